//! Explicit-disable path for outbound hostname verification.
//!
//! Lives in its own test binary: the environment variable must be set before
//! the bootstrap sequence runs, and must not leak into the other suites.

use std::sync::{Arc, Mutex};

use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use skills_service::bootstrap;
use skills_service::container::{AppContainer, StartupError};
use skills_service::security::tls::{self, HostnameVerification, DISABLE_HOSTNAME_VERIFIER_VAR};
use skills_service::ProcessEnvironment;

struct RecordingContainer {
    disabled_at_start: Arc<Mutex<Option<bool>>>,
}

impl AppContainer for RecordingContainer {
    fn start(&mut self, env: &ProcessEnvironment, _args: &[String]) -> Result<(), StartupError> {
        *self.disabled_at_start.lock().unwrap() =
            Some(env.hostname_verification().is_disabled());
        Ok(())
    }
}

#[test]
fn test_disable_flag_installs_permissive_verifier() {
    std::env::set_var(DISABLE_HOSTNAME_VERIFIER_VAR, "true");

    assert_eq!(HostnameVerification::from_env(), HostnameVerification::Disabled);

    let disabled_at_start = Arc::new(Mutex::new(None));
    let container = RecordingContainer {
        disabled_at_start: disabled_at_start.clone(),
    };
    bootstrap::run(container, vec!["skills-service".to_string()]).expect("bootstrap succeeds");

    assert_eq!(*disabled_at_start.lock().unwrap(), Some(true));

    // The process-wide slot now holds the permissive verifier: any
    // certificate passes for any server name.
    let verifier = tls::installed_verifier().expect("verifier installed");
    let junk_cert = CertificateDer::from(vec![0u8; 32]);
    for name in ["wrong.example.com", "localhost", "10.0.0.1"] {
        let server_name = ServerName::try_from(name).expect("valid server name");
        assert!(
            verifier
                .verify_server_cert(&junk_cert, &[], &server_name, &[], UnixTime::now())
                .is_ok(),
            "verifier rejected {name}"
        );
    }

    // Re-applying the policy is a no-op: the slot is write-once.
    assert!(!tls::install_permissive_verifier());

    // An outbound client still builds with the permissive posture in place.
    tls::outbound_client().expect("outbound client builds");
}
