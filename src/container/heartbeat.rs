//! Scheduled heartbeat task.
//!
//! The scheduling layer proper lives with the wider platform; the container
//! carries this minimal shutdown-aware interval task so the scheduler wiring
//! (and the process-wide outbound TLS posture it probes through) is exercised
//! end to end.

use std::time::Duration;

use tokio::sync::broadcast;

use crate::config::SchedulerConfig;
use crate::observability::metrics;

/// Periodic background task recording liveness and probing an optional URL.
pub struct Heartbeat {
    config: SchedulerConfig,
    egress: reqwest::Client,
}

impl Heartbeat {
    pub fn new(config: SchedulerConfig, egress: reqwest::Client) -> Self {
        Self { config, egress }
    }

    /// Run until the shutdown signal fires.
    pub async fn run(self, mut shutdown_rx: broadcast::Receiver<()>) {
        let period = Duration::from_secs(self.config.interval_secs);
        let mut ticker = tokio::time::interval(period);
        tracing::debug!(interval_secs = period.as_secs(), "Heartbeat started");

        loop {
            tokio::select! {
                _ = ticker.tick() => self.beat().await,
                _ = shutdown_rx.recv() => {
                    tracing::debug!("Heartbeat stopped");
                    break;
                }
            }
        }
    }

    async fn beat(&self) {
        match &self.config.probe_url {
            Some(url) => match self.egress.get(url).send().await {
                Ok(response) => {
                    tracing::debug!(url = %url, status = %response.status(), "Heartbeat probe");
                    metrics::record_heartbeat("ok");
                }
                Err(err) => {
                    tracing::warn!(url = %url, error = %err, "Heartbeat probe failed");
                    metrics::record_heartbeat("error");
                }
            },
            None => metrics::record_heartbeat("idle"),
        }
    }
}
