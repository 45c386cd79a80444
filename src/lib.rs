//! Skills platform backend service library.
//!
//! The crate is organized around a strict two-phase start: `bootstrap`
//! applies process-wide environment invariants (clock, outbound TLS posture)
//! on the main thread, then hands the untouched argument list to the
//! application container, which owns everything that follows: configuration,
//! the async runtime, HTTP serving, and background tasks.

// Process environment
pub mod bootstrap;
pub mod security;

// Application container
pub mod config;
pub mod container;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use bootstrap::ProcessEnvironment;
pub use config::ServiceConfig;
pub use container::{AppContainer, ServiceContainer, StartupError};
pub use lifecycle::Shutdown;
