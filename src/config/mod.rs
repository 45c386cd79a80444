//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, all errors collected)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the container for the process lifetime
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the start-once model has no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::SchedulerConfig;
pub use schema::ServiceConfig;
pub use schema::TlsConfig;
