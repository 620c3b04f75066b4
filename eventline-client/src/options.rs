use std::time::Duration;

use rustls::pki_types::CertificateDer;
use secrecy::SecretString;
use url::Url;

use crate::error::BuildError;
use crate::pinning::PinSet;

pub const DEFAULT_HOST: &str = "api.eventline.net";
pub const DEFAULT_PORT: u16 = 443;
pub const DEFAULT_SCHEME: &str = "https";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything needed to build an [`crate::HttpTransport`].
///
/// Only `project_id` has no default. Changing any field after the transport
/// is built has no effect; build a new transport instead.
#[derive(Debug)]
pub struct ConnectionOptions {
    pub host: String,
    pub port: u16,
    pub scheme: String,
    /// Falls back to `$EVCLI_API_KEY` when `None`.
    pub token: Option<SecretString>,
    pub project_id: String,
    pub timeout: Duration,
    pub pins: PinSet,
    /// Trust anchors; Mozilla's root program when `None`.
    pub ca_certificates: Option<Vec<CertificateDer<'static>>>,
}

impl ConnectionOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            scheme: DEFAULT_SCHEME.to_string(),
            token: None,
            project_id: project_id.into(),
            timeout: DEFAULT_TIMEOUT,
            pins: PinSet::eventline(),
            ca_certificates: None,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_pins(mut self, pins: PinSet) -> Self {
        self.pins = pins;
        self
    }

    pub fn with_ca_certificates(mut self, certs: Vec<CertificateDer<'static>>) -> Self {
        self.ca_certificates = Some(certs);
        self
    }

    /// `scheme://host:port/`.
    pub fn base_url(&self) -> Result<Url, BuildError> {
        let invalid = |message: String| BuildError::InvalidAddress {
            address: format!("{}://{}:{}", self.scheme, self.host, self.port),
            message,
        };
        if self.scheme != "https" && self.scheme != "http" {
            return Err(invalid(format!("unsupported scheme {:?}", self.scheme)));
        }
        if self.host.is_empty() {
            return Err(invalid("empty host".to_string()));
        }
        let mut url = Url::parse(&format!("{}://{}", self.scheme, self.host)).map_err(|e| invalid(e.to_string()))?;
        if url.host_str().is_none() || url.path() != "/" {
            return Err(invalid("host must not contain a path".to_string()));
        }
        url.set_port(Some(self.port))
            .map_err(|_| invalid("cannot set port".to_string()))?;
        Ok(url)
    }
}
