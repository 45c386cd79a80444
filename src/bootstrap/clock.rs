//! Process clock pinning.
//!
//! # Responsibilities
//! - Force the process-wide time zone to UTC before any other thread exists
//! - Pin the cached zone by performing the first local-offset read
//! - Expose the applied setting for injection into the container
//!
//! # Design Decisions
//! - Runs in plain `main` before the tokio runtime: `TZ` can only be written
//!   safely while the process is single-threaded, and zone readers cache the
//!   value on first use, so a later write is silently ignored by them
//! - One-shot: repeated calls return the setting applied by the first call

use std::sync::OnceLock;

/// Environment variable that selects the process time zone.
pub const TZ_VAR: &str = "TZ";

/// Canonical zone identifier applied at bootstrap.
pub const PROCESS_TIME_ZONE: &str = "UTC";

static PINNED: OnceLock<ClockSetting> = OnceLock::new();

/// The time zone setting applied to the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSetting {
    zone: &'static str,
    utc_offset_secs: i32,
}

impl ClockSetting {
    /// Zone identifier the process was pinned to.
    pub fn zone(&self) -> &'static str {
        self.zone
    }

    /// Offset from UTC, in seconds, observed when the zone was pinned.
    pub fn utc_offset_secs(&self) -> i32 {
        self.utc_offset_secs
    }

    /// Whether the process clock is pinned to UTC.
    pub fn is_utc(&self) -> bool {
        self.zone == PROCESS_TIME_ZONE && self.utc_offset_secs == 0
    }
}

/// Pin the process time zone to UTC and return the applied setting.
///
/// Must run on the main thread before the async runtime (or any other
/// thread) is created. The first call writes `TZ=UTC` and immediately reads
/// the local offset once, so everything that caches the zone caches UTC.
/// Subsequent calls are no-ops and return the original setting.
pub fn pin_utc() -> ClockSetting {
    *PINNED.get_or_init(|| {
        std::env::set_var(TZ_VAR, PROCESS_TIME_ZONE);
        let offset = current_utc_offset_secs();
        tracing::debug!(
            zone = PROCESS_TIME_ZONE,
            offset_secs = offset,
            "Process clock pinned"
        );
        ClockSetting {
            zone: PROCESS_TIME_ZONE,
            utc_offset_secs: offset,
        }
    })
}

/// Offset of the ambient local zone from UTC, in seconds.
pub fn current_utc_offset_secs() -> i32 {
    chrono::Local::now().offset().local_minus_utc()
}
