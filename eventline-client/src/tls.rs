use std::path::Path;
use std::sync::Arc;

use rustls::client::WebPkiServerVerifier;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::pem::PemObject;
use rustls::pki_types::CertificateDer;
use rustls::{ClientConfig, RootCertStore};

use crate::error::BuildError;
use crate::pinning::{PinSet, PinnedCertVerifier};

/// Reads every certificate from a PEM bundle.
pub fn load_ca_bundle(path: impl AsRef<Path>) -> Result<Vec<CertificateDer<'static>>, BuildError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| BuildError::CaBundleIo {
        path: path.display().to_string(),
        source,
    })?;
    parse_ca_bundle(&bytes)
}

pub fn parse_ca_bundle(pem: &[u8]) -> Result<Vec<CertificateDer<'static>>, BuildError> {
    let certs = CertificateDer::pem_slice_iter(pem)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| BuildError::CaBundle(e.to_string()))?;
    if certs.is_empty() {
        return Err(BuildError::CaBundle("no certificates found".to_string()));
    }
    Ok(certs)
}

fn root_store(ca_certificates: Option<&[CertificateDer<'static>]>) -> Result<RootCertStore, BuildError> {
    let mut roots = RootCertStore::empty();
    match ca_certificates {
        Some(certs) => {
            for cert in certs {
                roots
                    .add(cert.clone())
                    .map_err(|e| BuildError::CaBundle(e.to_string()))?;
            }
        }
        None => roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned()),
    }
    Ok(roots)
}

/// Client TLS configuration whose certificate verifier enforces `pins`.
///
/// Uses the ring provider explicitly so the process-wide default provider
/// does not need to be installed.
pub fn pinned_client_config(
    pins: &PinSet,
    ca_certificates: Option<&[CertificateDer<'static>]>,
) -> Result<ClientConfig, BuildError> {
    let provider: Arc<CryptoProvider> = Arc::new(rustls::crypto::ring::default_provider());
    let roots = Arc::new(root_store(ca_certificates)?);

    let webpki = WebPkiServerVerifier::builder_with_provider(roots, provider.clone())
        .build()
        .map_err(|e| BuildError::Tls(e.to_string()))?;
    let verifier = PinnedCertVerifier::new(webpki, pins.clone());

    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .map_err(|e| BuildError::Tls(e.to_string()))?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_no_client_auth();
    Ok(config)
}
