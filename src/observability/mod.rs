//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Structured logging via tracing; `RUST_LOG` governs verbosity
//! - Metrics are cheap (atomic increments)
//! - The metrics endpoint is optional and never blocks startup

pub mod logging;
pub mod metrics;
