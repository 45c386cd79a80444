//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges and addresses before anything binds or spawns
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Disabled subsystems are not validated; their settings are inert

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic violation in a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Listener bind address does not parse as a socket address.
    #[error("listener.bind_address `{0}` is not a valid socket address")]
    BindAddress(String),

    /// Metrics address does not parse as a socket address.
    #[error("observability.metrics_address `{0}` is not a valid socket address")]
    MetricsAddress(String),

    /// A listener request timeout of zero would cancel every request.
    #[error("listener.request_timeout_secs must be greater than zero")]
    RequestTimeout,

    /// A heartbeat interval of zero would spin.
    #[error("scheduler.interval_secs must be greater than zero")]
    SchedulerInterval,

    /// Probe URL must be HTTP or HTTPS.
    #[error("scheduler.probe_url `{0}` must start with http:// or https://")]
    ProbeUrl(String),

    /// TLS certificate path is empty.
    #[error("listener.tls.cert_path must not be empty")]
    EmptyCertPath,

    /// TLS key path is empty.
    #[error("listener.tls.key_path must not be empty")]
    EmptyKeyPath,
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::RequestTimeout);
    }
    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.is_empty() {
            errors.push(ValidationError::EmptyCertPath);
        }
        if tls.key_path.is_empty() {
            errors.push(ValidationError::EmptyKeyPath);
        }
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.scheduler.enabled {
        if config.scheduler.interval_secs == 0 {
            errors.push(ValidationError::SchedulerInterval);
        }
        if let Some(url) = &config.scheduler.probe_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(ValidationError::ProbeUrl(url.clone()));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
