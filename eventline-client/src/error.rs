use std::fmt;

use serde_json::Value as JsonValue;

/// Machine-readable failure code carried by every [`RequestError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    /// The connection closed before the whole body was received.
    IncompleteResponse,
    /// The response claimed `application/json` but the body did not parse.
    InvalidJson,
    /// Non-JSON failure body, or a JSON failure body without a `code`.
    UnknownError,
    /// Code declared by the server in a JSON error body, kept verbatim.
    Server(String),
    /// TLS handshake failure, including a peer key missing from the pin set.
    Tls,
    /// The request deadline elapsed.
    Timeout,
    /// Connect, DNS or write failure before any response was received.
    Network,
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::IncompleteResponse => "incomplete_response",
            ErrorCode::InvalidJson => "invalid_json",
            ErrorCode::UnknownError => "unknown_error",
            ErrorCode::Server(code) => code.as_str(),
            ErrorCode::Tls => "tls_error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::Network => "network_error",
        }
    }

    /// Wraps a code found in a server error body.
    ///
    /// Server codes are never folded into the client-side variants: a server
    /// sending `"unknown_error"` yields `Server("unknown_error")`, which is not
    /// equal to [`ErrorCode::UnknownError`]. Compare wire strings through
    /// [`RequestError::code_str`] instead.
    pub fn from_server(code: impl Into<String>) -> Self {
        ErrorCode::Server(code.into())
    }

    /// True for failures raised before an HTTP response existed.
    pub fn is_transport(&self) -> bool {
        matches!(self, ErrorCode::Tls | ErrorCode::Timeout | ErrorCode::Network)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure of one transport call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{}", self.describe())]
pub struct RequestError {
    pub status: Option<u16>,
    pub code: ErrorCode,
    pub data: JsonValue,
    pub message: Option<String>,
}

impl RequestError {
    pub fn new(status: Option<u16>, code: ErrorCode, data: JsonValue, message: Option<String>) -> Self {
        Self {
            status,
            code,
            data,
            message,
        }
    }

    pub fn incomplete_response() -> Self {
        Self::new(
            None,
            ErrorCode::IncompleteResponse,
            empty_data(),
            Some("incomplete response".to_string()),
        )
    }

    pub fn invalid_json(status: Option<u16>, raw_body: String) -> Self {
        Self::new(
            status,
            ErrorCode::InvalidJson,
            JsonValue::String(raw_body),
            Some("invalid json body".to_string()),
        )
    }

    pub fn timeout() -> Self {
        Self::new(
            None,
            ErrorCode::Timeout,
            empty_data(),
            Some("request timed out".to_string()),
        )
    }

    pub fn tls(message: impl Into<String>) -> Self {
        Self::new(None, ErrorCode::Tls, empty_data(), Some(message.into()))
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(None, ErrorCode::Network, empty_data(), Some(message.into()))
    }

    pub fn code_str(&self) -> &str {
        self.code.as_str()
    }

    fn describe(&self) -> String {
        let mut s = match self.status {
            Some(status) => format!("request failed with status {status} ({})", self.code),
            None => format!("request failed ({})", self.code),
        };
        if let Some(msg) = &self.message {
            s.push_str(": ");
            s.push_str(msg);
        }
        s
    }
}

pub(crate) fn empty_data() -> JsonValue {
    JsonValue::Object(serde_json::Map::new())
}

/// Failures while constructing an [`crate::HttpTransport`].
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing API token: set it in the connection options or in ${0}")]
    MissingToken(&'static str),
    #[error("missing project id")]
    MissingProjectId,
    #[error("invalid base address {address}: {message}")]
    InvalidAddress { address: String, message: String },
    #[error("invalid header value for {0}")]
    InvalidHeader(&'static str),
    #[error("failed to read CA bundle {path}: {source}")]
    CaBundleIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid CA bundle: {0}")]
    CaBundle(String),
    #[error("tls configuration error: {0}")]
    Tls(String),
    #[error("failed to build http client: {0}")]
    Http(String),
}
