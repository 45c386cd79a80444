//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (bootstrap + container):
//!     Pin clock → Apply TLS posture → Load config → Validate → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGINT / ctrl-c → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: environment first, then config, then listeners
//! - Ordered shutdown: stop accept, drain, close
//! - TLS shutdown has a timeout: forced close after the grace period

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
