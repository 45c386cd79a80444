//! Skills platform backend service.
//!
//! # Startup Sequence
//!
//! ```text
//!   process start (single thread)
//!        │
//!        ▼
//!   ┌──────────────────────────────────────────────────┐
//!   │                  BOOTSTRAP                        │
//!   │  1. pin the process clock to UTC                  │
//!   │  2. crypto provider + hostname-verification       │
//!   │     policy for outbound TLS                       │
//!   │  3. hand argv to the application container        │
//!   └──────────────────────────────────────────────────┘
//!        │
//!        ▼
//!   ┌──────────────────────────────────────────────────┐
//!   │            APPLICATION CONTAINER                  │
//!   │  logging → CLI args → config → async runtime      │
//!   │     → metrics │ heartbeat │ HTTP(S) serve         │
//!   │  (graceful shutdown on ctrl-c or trigger)         │
//!   └──────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1 and 2 each mutate process-global state exactly once and must
//! finish before the container creates the first worker thread; see the
//! `bootstrap` module for why the order is load-bearing.

use std::error::Error;
use std::process::ExitCode;

use skills_service::bootstrap;
use skills_service::ServiceContainer;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    match bootstrap::run(ServiceContainer::new(), args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            // Logging may not be up when startup fails early; stderr always is.
            eprintln!("skills-service: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
