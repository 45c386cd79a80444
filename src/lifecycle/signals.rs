//! OS signal handling.
//!
//! # Responsibilities
//! - Register the interrupt handler (SIGINT / ctrl-c)
//! - Translate signals and programmatic triggers into one shutdown event
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - The programmatic trigger and the OS signal are equivalent: the serve
//!   loops wait on whichever fires first
//! - A failed handler registration never counts as a shutdown cause

use tokio::sync::broadcast;

/// Wait until a shutdown cause arrives: ctrl-c or a programmatic trigger.
///
/// If the interrupt handler cannot be registered, that arm stays pending;
/// only a delivered signal or the trigger completes the wait.
pub async fn shutdown_signal(mut rx: broadcast::Receiver<()>) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Shutdown signal received");
        }
        _ = rx.recv() => {
            tracing::info!("Shutdown triggered");
        }
    }
}
