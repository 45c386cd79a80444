//! Outbound TLS posture and inbound listener TLS material.
//!
//! # Responsibilities
//! - Parse the hostname-verification policy from the environment
//! - Install the permissive server-certificate verifier process-wide
//! - Build outbound HTTP clients that honor the installed policy
//! - Load certificate and key PEM files for the inbound listener
//!
//! # Design Decisions
//! - The verifier slot is write-once: filled (or left empty) before the
//!   container starts, immutable for the process lifetime, honored by every
//!   outbound client built afterwards
//! - Absent, empty, or malformed policy values keep verification enabled
//! - The ring crypto provider is installed as the process default before any
//!   TLS configuration is built

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use axum_server::tls_rustls::RustlsConfig;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{ClientConfig, DigitallySignedStruct, SignatureScheme};
use thiserror::Error;

/// Environment variable that disables hostname verification for outbound TLS.
///
/// WARNING: setting this to `true` makes every outbound secure connection
/// built through [`outbound_client`] accept any server certificate for any
/// hostname. It exists for constrained test environments with self-signed
/// certificates and must never be enabled in production.
pub const DISABLE_HOSTNAME_VERIFIER_VAR: &str = "SKILLS_DISABLE_HOSTNAME_VERIFIER";

/// Timeout applied to outbound requests.
const EGRESS_TIMEOUT: Duration = Duration::from_secs(10);

static OUTBOUND_VERIFIER: OnceLock<Arc<dyn ServerCertVerifier>> = OnceLock::new();

/// Process-wide policy for validating server identity on outbound TLS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostnameVerification {
    /// Server certificates are validated against the requested hostname.
    Enabled,
    /// Any certificate is accepted for any hostname. Test environments only.
    Disabled,
}

impl HostnameVerification {
    /// Read the policy from the process environment.
    pub fn from_env() -> Self {
        let value = std::env::var(DISABLE_HOSTNAME_VERIFIER_VAR).ok();
        Self::from_property(value.as_deref())
    }

    /// Parse the policy from a raw property value.
    ///
    /// Only an exact case-insensitive `true` disables verification.
    /// Everything else, including absent and unparseable values, keeps it
    /// enabled: for this setting the safe default wins over strict parsing.
    pub fn from_property(value: Option<&str>) -> Self {
        match value {
            Some(raw) if raw.eq_ignore_ascii_case("true") => Self::Disabled,
            _ => Self::Enabled,
        }
    }

    /// Whether hostname verification is disabled.
    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

impl std::fmt::Display for HostnameVerification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Make sure a process default crypto provider is installed.
///
/// Must run before any TLS configuration is built. Idempotent: keeps
/// whichever provider is already installed.
pub fn ensure_crypto_provider() -> Arc<CryptoProvider> {
    if let Some(provider) = CryptoProvider::get_default() {
        return provider.clone();
    }
    // A lost install race just means another caller's provider won.
    let _ = rustls::crypto::ring::default_provider().install_default();
    CryptoProvider::get_default()
        .cloned()
        .unwrap_or_else(|| Arc::new(rustls::crypto::ring::default_provider()))
}

/// Server-certificate verifier that accepts any certificate for any hostname.
///
/// Handshake signatures are still checked so the session is well-formed TLS,
/// but the certificate chain and the server name are not validated at all.
/// This removes the protection TLS exists to provide; it is only ever
/// installed when [`DISABLE_HOSTNAME_VERIFIER_VAR`] is explicitly `true`.
#[derive(Debug)]
pub struct AcceptAnyServerCert {
    provider: Arc<CryptoProvider>,
}

impl AcceptAnyServerCert {
    pub fn new(provider: Arc<CryptoProvider>) -> Self {
        Self { provider }
    }
}

impl ServerCertVerifier for AcceptAnyServerCert {
    fn verify_server_cert(
        &self,
        _end_entity: &CertificateDer<'_>,
        _intermediates: &[CertificateDer<'_>],
        _server_name: &ServerName<'_>,
        _ocsp_response: &[u8],
        _now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        Ok(ServerCertVerified::assertion())
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(
            message,
            cert,
            dss,
            &self.provider.signature_verification_algorithms,
        )
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider
            .signature_verification_algorithms
            .supported_schemes()
    }
}

/// Install the permissive verifier into the process-wide slot.
///
/// Returns `true` when this call performed the installation, `false` when
/// the slot was already occupied. The slot is write-once, so re-applying the
/// policy is a no-op.
pub fn install_permissive_verifier() -> bool {
    let provider = ensure_crypto_provider();
    let mut installed = false;
    OUTBOUND_VERIFIER.get_or_init(|| {
        installed = true;
        Arc::new(AcceptAnyServerCert::new(provider))
    });
    if installed {
        tracing::debug!("Permissive server-certificate verifier installed process-wide");
    }
    installed
}

/// Verifier currently occupying the process-wide slot, if any.
pub fn installed_verifier() -> Option<Arc<dyn ServerCertVerifier>> {
    OUTBOUND_VERIFIER.get().cloned()
}

/// Build the outbound HTTP client for this process.
///
/// Honors the process-wide verifier slot: when the permissive verifier is
/// installed the client carries it, otherwise the client performs standard
/// certificate and hostname validation.
pub fn outbound_client() -> Result<reqwest::Client, reqwest::Error> {
    let builder = reqwest::Client::builder().timeout(EGRESS_TIMEOUT);
    let builder = match installed_verifier() {
        Some(verifier) => {
            let tls = ClientConfig::builder()
                .dangerous()
                .with_custom_certificate_verifier(verifier)
                .with_no_client_auth();
            builder.use_preconfigured_tls(tls)
        }
        None => builder,
    };
    builder.build()
}

/// Errors raised while preparing listener TLS material.
#[derive(Debug, Error)]
pub enum TlsSetupError {
    /// A PEM file could not be read from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file was readable but not parseable as PEM.
    #[error("invalid PEM in {path}: {source}")]
    Pem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The certificate file held no certificates.
    #[error("no certificates found in {0}")]
    NoCertificates(PathBuf),

    /// The key file held no private key.
    #[error("no private key found in {0}")]
    NoPrivateKey(PathBuf),

    /// The material was rejected when assembling the server configuration.
    #[error("TLS configuration rejected: {0}")]
    Config(#[source] std::io::Error),
}

/// Load certificate and private key PEM files for the inbound listener.
///
/// Validates the PEM contents up front so a misconfigured listener fails at
/// startup with a pointed error instead of at the first handshake.
pub async fn load_server_tls(
    cert_path: &Path,
    key_path: &Path,
) -> Result<RustlsConfig, TlsSetupError> {
    let cert_pem = tokio::fs::read(cert_path)
        .await
        .map_err(|source| TlsSetupError::Read {
            path: cert_path.to_path_buf(),
            source,
        })?;
    let key_pem = tokio::fs::read(key_path)
        .await
        .map_err(|source| TlsSetupError::Read {
            path: key_path.to_path_buf(),
            source,
        })?;

    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut cert_pem.as_slice())
        .collect::<Result<_, _>>()
        .map_err(|source| TlsSetupError::Pem {
            path: cert_path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsSetupError::NoCertificates(cert_path.to_path_buf()));
    }
    let key = rustls_pemfile::private_key(&mut key_pem.as_slice()).map_err(|source| {
        TlsSetupError::Pem {
            path: key_path.to_path_buf(),
            source,
        }
    })?;
    if key.is_none() {
        return Err(TlsSetupError::NoPrivateKey(key_path.to_path_buf()));
    }

    RustlsConfig::from_pem(cert_pem, key_pem)
        .await
        .map_err(TlsSetupError::Config)
}
