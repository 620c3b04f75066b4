use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::error::{empty_data, ErrorCode, RequestError};

/// Body of a successful call.
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    /// The response was `application/json`.
    Json(JsonValue),
    /// Any other content type, body kept as text.
    Text(String),
}

impl Decoded {
    pub fn into_json(self) -> JsonValue {
        match self {
            Decoded::Json(v) => v,
            Decoded::Text(s) => JsonValue::String(s),
        }
    }

    /// Narrows the decoded value to `T`.
    ///
    /// A value that does not fit at all is reported as `invalid_json` with the
    /// value attached. That error is produced client-side, after the body
    /// parsed (or arrived as text), and carries no status here; use
    /// [`Reply::into_typed`] to keep the one the server sent.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        let value = self.into_json();
        serde_json::from_value(value.clone()).map_err(|e| {
            RequestError::new(
                None,
                ErrorCode::InvalidJson,
                value,
                Some(format!("unexpected response shape: {e}")),
            )
        })
    }
}

/// A 2xx response: its status and decoded body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Decoded,
}

impl Reply {
    pub fn new(status: u16, body: Decoded) -> Self {
        Self { status, body }
    }

    /// [`Decoded::into_typed`], with the response status attached to a
    /// narrowing failure.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, RequestError> {
        let status = self.status;
        self.body.into_typed().map_err(|mut e| {
            e.status = Some(status);
            e
        })
    }
}

pub fn is_success(status: Option<u16>) -> bool {
    matches!(status, Some(s) if (200..300).contains(&s))
}

/// Compares the media type essence; parameters such as `charset` are ignored.
///
/// This is looser than an exact match on `application/json`: a response sent
/// as `application/json; charset=utf-8` is parsed as JSON instead of being
/// returned as raw text.
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    let Some(ct) = content_type else {
        return false;
    };
    let essence = ct.split(';').next().unwrap_or("").trim();
    essence.eq_ignore_ascii_case("application/json")
}

/// Turns a fully received response into the call result.
///
/// Truncated responses never reach this point; they are reported by the
/// transport as `incomplete_response`.
pub fn classify(status: Option<u16>, content_type: Option<&str>, body: &[u8]) -> Result<Reply, RequestError> {
    let succeeded = status.filter(|&s| is_success(Some(s)));

    if is_json_content_type(content_type) {
        let value: JsonValue = match serde_json::from_slice(body) {
            Ok(v) => v,
            Err(_) => {
                return Err(RequestError::invalid_json(
                    status,
                    String::from_utf8_lossy(body).into_owned(),
                ))
            }
        };
        if let Some(ok) = succeeded {
            return Ok(Reply::new(ok, Decoded::Json(value)));
        }
        return Err(server_error(status, &value));
    }

    let text = String::from_utf8_lossy(body).into_owned();
    match succeeded {
        Some(ok) => Ok(Reply::new(ok, Decoded::Text(text))),
        None => Err(RequestError::new(
            status,
            ErrorCode::UnknownError,
            JsonValue::String(text),
            None,
        )),
    }
}

fn server_error(status: Option<u16>, body: &JsonValue) -> RequestError {
    let field = |name: &str| body.as_object().and_then(|o| o.get(name)).filter(|v| !v.is_null());

    let code = match field("code") {
        Some(JsonValue::String(s)) => ErrorCode::from_server(s.clone()),
        Some(other) => ErrorCode::from_server(other.to_string()),
        None => ErrorCode::UnknownError,
    };
    let data = field("data").cloned().unwrap_or_else(empty_data);
    let message = field("error").map(|v| match v {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    });

    RequestError::new(status, code, data, message)
}
