//! Bootstrap sequencing: ordering, delegation, and failure propagation.

use std::sync::{Arc, Mutex};

use skills_service::bootstrap::{self, clock};
use skills_service::container::{AppContainer, StartupError};
use skills_service::security::tls::{self, HostnameVerification};
use skills_service::ProcessEnvironment;

/// What a container observed at the moment it was started.
#[derive(Debug, Default, Clone)]
struct Observation {
    calls: usize,
    args: Vec<String>,
    tz_var: Option<String>,
    utc_offset_secs: Option<i32>,
    clock_is_utc: bool,
    hostname_verification_disabled: bool,
}

#[derive(Default)]
struct RecordingContainer {
    observation: Arc<Mutex<Observation>>,
}

impl RecordingContainer {
    fn observation(&self) -> Arc<Mutex<Observation>> {
        self.observation.clone()
    }
}

impl AppContainer for RecordingContainer {
    fn start(&mut self, env: &ProcessEnvironment, args: &[String]) -> Result<(), StartupError> {
        let mut obs = self.observation.lock().unwrap();
        obs.calls += 1;
        obs.args = args.to_vec();
        obs.tz_var = std::env::var("TZ").ok();
        obs.utc_offset_secs = Some(clock::current_utc_offset_secs());
        obs.clock_is_utc = env.clock().is_utc();
        obs.hostname_verification_disabled = env.hostname_verification().is_disabled();
        Ok(())
    }
}

struct FailingContainer {
    calls: Arc<Mutex<usize>>,
}

impl AppContainer for FailingContainer {
    fn start(&mut self, _env: &ProcessEnvironment, _args: &[String]) -> Result<(), StartupError> {
        *self.calls.lock().unwrap() += 1;
        Err(StartupError::Runtime(std::io::Error::new(
            std::io::ErrorKind::Other,
            "runtime wiring failed",
        )))
    }
}

#[test]
fn test_clock_is_utc_before_container_starts() {
    let container = RecordingContainer::default();
    let observation = container.observation();

    bootstrap::run(container, vec!["skills-service".to_string()]).expect("bootstrap succeeds");

    let obs = observation.lock().unwrap();
    assert_eq!(obs.calls, 1);
    assert_eq!(obs.tz_var.as_deref(), Some("UTC"));
    assert_eq!(obs.utc_offset_secs, Some(0));
    assert!(obs.clock_is_utc);
}

#[test]
fn test_args_are_forwarded_unmodified() {
    let container = RecordingContainer::default();
    let observation = container.observation();
    let args = vec![
        "skills-service".to_string(),
        "--port=8080".to_string(),
        "--flag-nobody-owns".to_string(),
    ];

    bootstrap::run(container, args.clone()).expect("bootstrap succeeds");

    assert_eq!(observation.lock().unwrap().args, args);
}

#[test]
fn test_hostname_verification_defaults_to_enabled() {
    std::env::remove_var(tls::DISABLE_HOSTNAME_VERIFIER_VAR);
    let container = RecordingContainer::default();
    let observation = container.observation();

    bootstrap::run(container, vec!["skills-service".to_string()]).expect("bootstrap succeeds");

    assert!(!observation.lock().unwrap().hostname_verification_disabled);
    assert!(tls::installed_verifier().is_none());
}

#[test]
fn test_malformed_policy_values_keep_verification_enabled() {
    for value in [None, Some(""), Some("nonsense"), Some("0"), Some("TRUE!")] {
        assert_eq!(
            HostnameVerification::from_property(value),
            HostnameVerification::Enabled,
            "value {value:?} must keep verification enabled"
        );
    }
}

#[test]
fn test_container_failure_propagates_without_retry() {
    let calls = Arc::new(Mutex::new(0));
    let container = FailingContainer {
        calls: calls.clone(),
    };

    let err = bootstrap::run(container, vec!["skills-service".to_string()])
        .expect_err("container failure must propagate");

    assert!(matches!(err, StartupError::Runtime(_)));
    assert_eq!(*calls.lock().unwrap(), 1);
}

#[test]
fn test_rerunning_the_sequence_is_idempotent() {
    let first = clock::pin_utc();

    let container = RecordingContainer::default();
    bootstrap::run(container, vec!["skills-service".to_string()]).expect("bootstrap succeeds");

    let second = clock::pin_utc();
    assert_eq!(first, second);
    assert_eq!(clock::current_utc_offset_secs(), 0);
}
