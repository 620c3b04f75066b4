//! Public-key pinning on top of standard WebPKI verification.
//!
//! A pin is the base64 SHA-256 digest of a certificate's DER-encoded
//! SubjectPublicKeyInfo, the same value `openssl x509 -pubkey | openssl pkey
//! -pubin -outform der | openssl dgst -sha256 -binary | base64` prints.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::WebPkiServerVerifier;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{CertificateError, DigitallySignedStruct, OtherError, SignatureScheme};
use sha2::{Digest, Sha256};
use x509_parser::prelude::{FromDer, X509Certificate};

/// Pins shipped with the SDK for `api.eventline.net`.
pub const EVENTLINE_PINS: &[&str] = &["gg3x7U4UrWfTUpYNy9wL2+GYOQhi3fg5UTn5pzA67gc="];

#[derive(Debug, Clone, thiserror::Error)]
pub enum PinError {
    #[error("cannot parse peer certificate: {0}")]
    Parse(String),
    #[error("the public key of '{subject}' does not match any pinned fingerprint")]
    Mismatch { subject: String, fingerprint: String },
}

/// Ordered set of accepted public-key fingerprints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinSet {
    pins: Vec<String>,
}

impl Default for PinSet {
    fn default() -> Self {
        Self::eventline()
    }
}

impl PinSet {
    pub fn new<I, S>(pins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for p in pins {
            let p = p.into();
            if !out.contains(&p) {
                out.push(p);
            }
        }
        Self { pins: out }
    }

    pub fn eventline() -> Self {
        Self::new(EVENTLINE_PINS.iter().copied())
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.pins.iter().any(|p| p == fingerprint)
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.pins.iter().map(String::as_str)
    }

    /// Accept/reject decision for an observed fingerprint. An empty set
    /// accepts nothing.
    pub fn check(&self, fingerprint: &str) -> Result<(), PinError> {
        if self.contains(fingerprint) {
            Ok(())
        } else {
            Err(PinError::Mismatch {
                subject: String::new(),
                fingerprint: fingerprint.to_string(),
            })
        }
    }

    /// Fingerprints the certificate and checks it against the set.
    pub fn check_certificate(&self, cert_der: &[u8]) -> Result<(), PinError> {
        let (_, cert) = X509Certificate::from_der(cert_der).map_err(|e| PinError::Parse(e.to_string()))?;
        let fingerprint = digest_spki(cert.public_key().raw);
        self.check(&fingerprint).map_err(|_| PinError::Mismatch {
            subject: common_name(&cert),
            fingerprint,
        })
    }
}

/// Base64 SHA-256 of the DER SubjectPublicKeyInfo of `cert_der`.
pub fn spki_fingerprint(cert_der: &[u8]) -> Result<String, PinError> {
    let (_, cert) = X509Certificate::from_der(cert_der).map_err(|e| PinError::Parse(e.to_string()))?;
    Ok(digest_spki(cert.public_key().raw))
}

fn digest_spki(spki_der: &[u8]) -> String {
    BASE64.encode(Sha256::digest(spki_der))
}

fn common_name(cert: &X509Certificate<'_>) -> String {
    cert.subject()
        .iter_common_name()
        .next()
        .and_then(|cn| cn.as_str().ok())
        .unwrap_or("<unknown>")
        .to_string()
}

/// rustls verifier: WebPKI chain and hostname checks, then the pin check.
///
/// rustls only calls `verify_server_cert` on full handshakes, so resumed
/// sessions are not re-pinned.
#[derive(Debug)]
pub struct PinnedCertVerifier {
    inner: Arc<WebPkiServerVerifier>,
    pins: PinSet,
}

impl PinnedCertVerifier {
    pub fn new(inner: Arc<WebPkiServerVerifier>, pins: PinSet) -> Self {
        Self { inner, pins }
    }
}

impl ServerCertVerifier for PinnedCertVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        let verified = self
            .inner
            .verify_server_cert(end_entity, intermediates, server_name, ocsp_response, now)?;

        if let Err(e) = self.pins.check_certificate(end_entity.as_ref()) {
            tracing::warn!(server = ?server_name, error = %e, "rejecting pinned connection");
            return Err(rustls::Error::InvalidCertificate(CertificateError::Other(
                OtherError(Arc::new(e)),
            )));
        }
        Ok(verified)
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}

/// Finds a pin rejection inside a rustls error, if that is what it is.
pub(crate) fn as_pin_error(err: &rustls::Error) -> Option<&PinError> {
    match err {
        rustls::Error::InvalidCertificate(CertificateError::Other(other)) => {
            other.0.downcast_ref::<PinError>()
        }
        _ => None,
    }
}
