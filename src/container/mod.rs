//! Application container subsystem.
//!
//! # Data Flow
//! ```text
//! bootstrap::run
//!     → AppContainer::start(env, args)
//!         → logging init
//!         → CLI arguments (clap)
//!         → config load + validate
//!         → async runtime construction (first worker threads)
//!         → serve: metrics, heartbeat, HTTP(S) listener
//! ```
//!
//! # Design Decisions
//! - `AppContainer` is the delegation seam: the bootstrap starts exactly one
//!   container and never looks inside it
//! - Startup is fail fast: any startup error stops the process with a
//!   non-zero exit
//! - The async runtime is built inside the container, not in `main`, so the
//!   environment steps run strictly before the first worker thread

mod heartbeat;
mod service;

pub use service::ServiceContainer;

use thiserror::Error;

use crate::bootstrap::ProcessEnvironment;
use crate::config::loader::ConfigError;
use crate::security::tls::TlsSetupError;

/// The subsystem the bootstrap delegates to once the environment is set.
pub trait AppContainer {
    /// Start the container with the applied environment and the original
    /// process arguments. Runs until shutdown; an error means startup failed.
    fn start(&mut self, env: &ProcessEnvironment, args: &[String]) -> Result<(), StartupError>;
}

/// Errors that can occur while starting the application container.
#[derive(Debug, Error)]
pub enum StartupError {
    /// Command-line arguments were rejected.
    #[error("invalid command-line arguments: {0}")]
    Args(#[from] clap::Error),

    /// Configuration could not be loaded or validated.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The async runtime could not be constructed.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The outbound HTTP client could not be built.
    #[error("failed to build outbound HTTP client: {0}")]
    Egress(#[source] reqwest::Error),

    /// Listener TLS material was missing or invalid.
    #[error(transparent)]
    Tls(#[from] TlsSetupError),

    /// The listener address could not be bound.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// The server stopped with an error.
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
