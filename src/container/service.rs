//! Production application container.
//!
//! # Responsibilities
//! - Initialize logging before anything else can fail
//! - Parse command-line arguments and load configuration
//! - Build the async runtime and everything that lives on it
//! - Serve HTTP (or HTTPS) until shutdown
//!
//! # Design Decisions
//! - Receives the applied environment from the bootstrap and logs the
//!   security posture instead of re-reading ambient state
//! - `--help` and `--version` print and return success; only genuinely
//!   malformed arguments fail startup

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use clap::Parser;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::bootstrap::ProcessEnvironment;
use crate::config::loader::{load_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::ServiceConfig;
use crate::container::heartbeat::Heartbeat;
use crate::container::{AppContainer, StartupError};
use crate::lifecycle::signals::shutdown_signal;
use crate::lifecycle::Shutdown;
use crate::observability::{logging, metrics};
use crate::security::tls;

/// How long draining connections get before the TLS listener force-closes.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

/// Command-line interface of the service binary.
#[derive(Debug, Parser)]
#[command(name = "skills-service", version, about = "Skills platform backend service")]
struct ServiceArgs {
    /// Path to the TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the listener bind address from the config file.
    #[arg(long)]
    bind: Option<String>,
}

/// Application state injected into handlers.
#[derive(Clone)]
struct AppState {
    started_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    started_at: DateTime<Utc>,
    uptime_secs: i64,
}

/// Health endpoint handler.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    metrics::record_request("health", 200);
    Json(HealthResponse {
        status: "ok",
        started_at: state.started_at,
        uptime_secs: (Utc::now() - state.started_at).num_seconds(),
    })
}

/// Production container: HTTP service plus background tasks.
pub struct ServiceContainer {
    shutdown: Shutdown,
}

impl ServiceContainer {
    /// Create a container that has not been started yet.
    pub fn new() -> Self {
        Self {
            shutdown: Shutdown::new(),
        }
    }

    /// Handle for triggering a graceful shutdown from outside the container.
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Everything that lives on the runtime: metrics, heartbeat, serve loop.
    async fn serve(&self, config: ServiceConfig) -> Result<(), StartupError> {
        if config.observability.metrics_enabled {
            match config.observability.metrics_address.parse() {
                Ok(addr) => metrics::init_metrics(addr),
                Err(_) => tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    "Failed to parse metrics address"
                ),
            }
        }

        // Built eagerly so a broken outbound TLS posture surfaces at startup,
        // not at the first scheduled probe.
        let egress = tls::outbound_client().map_err(StartupError::Egress)?;

        if config.scheduler.enabled {
            let heartbeat = Heartbeat::new(config.scheduler.clone(), egress);
            let rx = self.shutdown.subscribe();
            tokio::spawn(async move {
                heartbeat.run(rx).await;
            });
        }

        let state = AppState {
            started_at: Utc::now(),
        };
        let app = Self::build_router(&config, state);

        match &config.listener.tls {
            Some(tls_config) => {
                let rustls_config = tls::load_server_tls(
                    Path::new(&tls_config.cert_path),
                    Path::new(&tls_config.key_path),
                )
                .await?;
                let addr: SocketAddr =
                    config.listener.bind_address.parse().map_err(|err| {
                        StartupError::Bind {
                            addr: config.listener.bind_address.clone(),
                            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, err),
                        }
                    })?;

                let handle = axum_server::Handle::new();
                let watcher = handle.clone();
                let rx = self.shutdown.subscribe();
                tokio::spawn(async move {
                    shutdown_signal(rx).await;
                    watcher.graceful_shutdown(Some(SHUTDOWN_GRACE));
                });

                tracing::info!(address = %addr, "HTTPS server starting");
                axum_server::bind_rustls(addr, rustls_config)
                    .handle(handle)
                    .serve(app.into_make_service())
                    .await
                    .map_err(StartupError::Serve)?;
            }
            None => {
                let listener = TcpListener::bind(&config.listener.bind_address)
                    .await
                    .map_err(|source| StartupError::Bind {
                        addr: config.listener.bind_address.clone(),
                        source,
                    })?;
                let local_addr = listener.local_addr().map_err(StartupError::Serve)?;

                tracing::info!(address = %local_addr, "HTTP server starting");
                axum::serve(listener, app)
                    .with_graceful_shutdown(shutdown_signal(self.shutdown.subscribe()))
                    .await
                    .map_err(StartupError::Serve)?;
            }
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl AppContainer for ServiceContainer {
    fn start(&mut self, env: &ProcessEnvironment, args: &[String]) -> Result<(), StartupError> {
        logging::init(logging::DEFAULT_FILTER);

        let opts = match ServiceArgs::try_parse_from(args) {
            Ok(opts) => opts,
            Err(err)
                if err.kind() == clap::error::ErrorKind::DisplayHelp
                    || err.kind() == clap::error::ErrorKind::DisplayVersion =>
            {
                let _ = err.print();
                return Ok(());
            }
            Err(err) => return Err(StartupError::Args(err)),
        };

        let mut config = match &opts.config {
            Some(path) => load_config(path)?,
            None => ServiceConfig::default(),
        };
        if let Some(bind) = opts.bind {
            config.listener.bind_address = bind;
        }
        validate_config(&config).map_err(ConfigError::Validation)?;

        tracing::info!(
            bind_address = %config.listener.bind_address,
            time_zone = env.clock().zone(),
            hostname_verification = %env.hostname_verification(),
            "Configuration loaded"
        );
        if env.hostname_verification().is_disabled() {
            tracing::warn!(
                "Hostname verification DISABLED for outbound TLS; every outbound secure \
                 connection will accept any server certificate. Test environments only."
            );
        }

        // First worker threads in the process are created here; the
        // environment settings above are already locked in.
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(StartupError::Runtime)?;
        runtime.block_on(self.serve(config))
    }
}
