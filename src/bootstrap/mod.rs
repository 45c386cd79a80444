//! Process bootstrap: ordered environment configuration, then delegation.
//!
//! # Data Flow
//! ```text
//! main(argv)
//!     → clock::pin_utc()                 1. process clock → UTC
//!     → crypto provider + verifier slot  2. outbound TLS posture
//!     → AppContainer::start(env, argv)   3. delegation, runs until shutdown
//! ```
//!
//! # Design Decisions
//! - Steps run synchronously on the main thread, in order, exactly once per
//!   process; the container builds the async runtime, so no other thread
//!   exists before step 3
//! - Steps 1 and 2 cannot fail: clock pinning is infallible and policy
//!   parsing falls back to the safe default; container errors propagate
//!   to `main` unmodified
//! - Both applied settings are recorded in [`ProcessEnvironment`] and handed
//!   to the container instead of being re-read from ambient state

pub mod clock;

pub use clock::ClockSetting;

use crate::container::{AppContainer, StartupError};
use crate::security::tls::{self, HostnameVerification};

/// Environment invariants applied before the container starts.
///
/// Constructed only by [`run`]; the container receives it by reference and
/// can rely on both settings being in effect for the whole process.
#[derive(Debug, Clone, Copy)]
pub struct ProcessEnvironment {
    clock: ClockSetting,
    hostname_verification: HostnameVerification,
}

impl ProcessEnvironment {
    /// The applied process clock setting.
    pub fn clock(&self) -> ClockSetting {
        self.clock
    }

    /// The applied hostname verification policy.
    pub fn hostname_verification(&self) -> HostnameVerification {
        self.hostname_verification
    }
}

/// Run the bootstrap sequence, then hand control to `container`.
///
/// The argument list is forwarded to the container untouched. Returns when
/// the container stops: `Ok` after a graceful shutdown, or the container's
/// startup failure. The sequence itself never fails.
pub fn run<C: AppContainer>(mut container: C, args: Vec<String>) -> Result<(), StartupError> {
    // 1. Pin the process clock. Zone readers cache what they see first, so
    //    this must precede anything that could touch local time.
    let clock = clock::pin_utc();

    // 2. Outbound TLS posture: default crypto provider, then the verifier
    //    slot when verification is explicitly disabled.
    tls::ensure_crypto_provider();
    let hostname_verification = HostnameVerification::from_env();
    if hostname_verification.is_disabled() {
        tls::install_permissive_verifier();
    }

    let env = ProcessEnvironment {
        clock,
        hostname_verification,
    };

    // 3. Delegate. The container owns the main thread from here on.
    container.start(&env, &args)
}
