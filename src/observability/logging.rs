//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber exactly once per process
//! - Pick the filter from `RUST_LOG`, falling back to the service default
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - `RUST_LOG` wins over the built-in default when present
//! - Log timestamps render in UTC, consistent with the pinned process clock

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when `RUST_LOG` is not set.
pub const DEFAULT_FILTER: &str = "skills_service=info,tower_http=info";

/// Initialize the tracing subscriber.
///
/// Idempotent: when a subscriber is already installed (a container restarted
/// inside one process, as tests do) the first one stays in place.
pub fn init(default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
