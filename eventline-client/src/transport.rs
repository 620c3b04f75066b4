use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE};
use url::Url;

use crate::classify::{classify, Reply};
use crate::error::{empty_data, BuildError, ErrorCode, RequestError};
use crate::options::ConnectionOptions;
use crate::pinning::as_pin_error;
use crate::tls::pinned_client_config;
use crate::token::{bearer_header, resolve_token};

pub const PROJECT_ID_HEADER: &str = "x-eventline-project-id";
pub const USER_AGENT: &str = concat!("eventline-sdk-rust/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Put => "PUT",
            Verb::Delete => "DELETE",
        }
    }

    fn method(self) -> reqwest::Method {
        match self {
            Verb::Get => reqwest::Method::GET,
            Verb::Post => reqwest::Method::POST,
            Verb::Put => reqwest::Method::PUT,
            Verb::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One authenticated request/response cycle against the API.
///
/// `path` is resolved against the transport's base address and may carry a
/// query string. Every call settles exactly once, with the decoded body or a
/// [`RequestError`]; nothing is retried. A [`Reply`] always has a 2xx status.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, verb: Verb, path: &str, body: Option<String>) -> Result<Reply, RequestError>;
}

/// [`Transport`] over reqwest with a pinned rustls configuration.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(options: ConnectionOptions) -> Result<Self, BuildError> {
        if options.project_id.is_empty() {
            return Err(BuildError::MissingProjectId);
        }
        let base_url = options.base_url()?;
        let token = resolve_token(options.token.as_ref())?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, bearer_header(&token)?);
        headers.insert(
            HeaderName::from_static(PROJECT_ID_HEADER),
            HeaderValue::from_str(&options.project_id).map_err(|_| BuildError::InvalidHeader("X-Eventline-Project-Id"))?,
        );

        let tls = pinned_client_config(&options.pins, options.ca_certificates.as_deref())?;

        // Redirects are not followed and idle connections are not kept.
        let client = reqwest::Client::builder()
            .use_preconfigured_tls(tls)
            .default_headers(headers)
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| BuildError::Http(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, verb: Verb, path: &str, body: Option<String>) -> Result<Reply, RequestError> {
        let url = self.base_url.join(path).map_err(|e| {
            RequestError::new(
                None,
                ErrorCode::UnknownError,
                empty_data(),
                Some(format!("invalid request path {path:?}: {e}")),
            )
        })?;
        tracing::debug!(%verb, %url, "sending request");

        let mut rb = self.client.request(verb.method(), url);
        if let Some(body) = body {
            rb = rb.header(CONTENT_LENGTH, body.len()).body(body);
        }

        let resp = rb.send().await.map_err(map_send_error)?;
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = resp.bytes().await.map_err(map_body_error)?;

        let result = classify(Some(status), content_type.as_deref(), &body);
        match &result {
            Ok(_) => tracing::debug!(%verb, status, "request succeeded"),
            Err(e) => tracing::debug!(%verb, status, code = %e.code, "request failed"),
        }
        result
    }
}

fn map_send_error(e: reqwest::Error) -> RequestError {
    if e.is_timeout() {
        return RequestError::timeout();
    }
    if let Some(tls) = find_tls_error(&e) {
        return match as_pin_error(tls) {
            Some(pin) => RequestError::tls(pin.to_string()),
            None => RequestError::tls(format!("tls handshake failed: {tls}")),
        };
    }
    RequestError::network(error_chain(&e))
}

/// Headers were received but the body was cut short.
fn map_body_error(e: reqwest::Error) -> RequestError {
    if e.is_timeout() {
        return RequestError::timeout();
    }
    tracing::debug!(error = %error_chain(&e), "response body incomplete");
    RequestError::incomplete_response()
}

/// rustls errors reach us boxed inside `io::Error`s, whose `source()` skips
/// the wrapped value, so each link is unwrapped by hand.
fn find_tls_error<'a>(err: &'a (dyn StdError + 'static)) -> Option<&'a rustls::Error> {
    let mut cur: Option<&'a (dyn StdError + 'static)> = Some(err);
    while let Some(e) = cur {
        if let Some(tls) = e.downcast_ref::<rustls::Error>() {
            return Some(tls);
        }
        if let Some(io) = e.downcast_ref::<std::io::Error>() {
            if let Some(tls) = io.get_ref().and_then(|inner| inner.downcast_ref::<rustls::Error>()) {
                return Some(tls);
            }
        }
        cur = e.source();
    }
    None
}

fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut out = err.to_string();
    let mut cur = err.source();
    while let Some(e) = cur {
        let s = e.to_string();
        if !out.contains(&s) {
            out.push_str(": ");
            out.push_str(&s);
        }
        cur = e.source();
    }
    out
}
