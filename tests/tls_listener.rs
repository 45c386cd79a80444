//! End-to-end boot of the production container with TLS termination.
//!
//! Exercises the HTTPS listener path: certificate and key loaded from the
//! PEM fixtures, health served over TLS, graceful shutdown via the handle.

use std::time::Duration;

use skills_service::{bootstrap, ServiceContainer};

const CERT_PEM: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/localhost-cert.pem"
);
const KEY_PEM: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/tests/fixtures/localhost-key.pem"
);

#[tokio::test]
async fn test_bootstrap_serves_health_over_tls_and_shuts_down() {
    let config_dir = tempfile::tempdir().expect("temp dir");
    let config_path = config_dir.path().join("service.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[listener]
bind_address = "127.0.0.1:28561"

[listener.tls]
cert_path = "{CERT_PEM}"
key_path = "{KEY_PEM}"

[observability]
metrics_enabled = false

[scheduler]
enabled = false
"#
        ),
    )
    .expect("config written");

    let container = ServiceContainer::new();
    let shutdown = container.shutdown_handle();

    // The container builds its own runtime, so it gets a plain thread.
    let server = std::thread::spawn(move || {
        bootstrap::run(
            container,
            vec![
                "skills-service".to_string(),
                "--config".to_string(),
                config_path.display().to_string(),
            ],
        )
    });

    // The fixture certificate is self-signed, so the client skips
    // verification; the connection is still TLS end to end.
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .build()
        .expect("client builds");

    let mut response = None;
    for _ in 0..50 {
        match client.get("https://127.0.0.1:28561/health").send().await {
            Ok(r) => {
                response = Some(r);
                break;
            }
            Err(_) => tokio::time::sleep(Duration::from_millis(100)).await,
        }
    }
    let response = response.expect("health endpoint reachable over TLS");
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await.expect("health body is JSON");
    assert_eq!(body["status"], "ok");

    // Close the pooled connection so draining has nothing to wait on.
    drop(client);

    shutdown.trigger();
    let result = server.join().expect("bootstrap thread completes");
    assert!(result.is_ok(), "graceful shutdown returns Ok: {result:?}");
}
