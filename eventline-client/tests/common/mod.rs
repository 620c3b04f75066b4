#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use eventline_client::ConnectionOptions;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio_rustls::rustls::pki_types::pem::PemObject;
use tokio_rustls::rustls::pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::rustls::ServerConfig;
use tokio_rustls::TlsAcceptor;

pub const CA_PEM: &[u8] = include_bytes!("../fixtures/ca.pem");
pub const LEAF_PEM: &[u8] = include_bytes!("../fixtures/leaf.pem");
pub const LEAF_KEY: &[u8] = include_bytes!("../fixtures/leaf.key");
pub const LEAF_PIN: &str = "micZoaILEcwdBOP4kWpSzO7SnfGwTeZkomUEg3i/uwM=";
pub const CA_PIN: &str = "LnHMTQFygNGi/Sa9lTgEabUGg9zjSY3MG51ZislGd2I=";

pub const PROJECT_ID: &str = "proj-1";
pub const TOKEN: &str = "secret-token";

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct Captured {
    pub head: String,
    pub body: Vec<u8>,
}

impl Captured {
    pub fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or("")
    }

    pub fn header(&self, name: &str) -> Option<String> {
        self.head.lines().skip(1).find_map(|line| {
            let (k, v) = line.split_once(':')?;
            k.trim().eq_ignore_ascii_case(name).then(|| v.trim().to_string())
        })
    }
}

/// Builds a raw HTTP/1.1 response with an exact `Content-Length`.
pub fn http_response(status: u16, content_type: Option<&str>, body: &str) -> Vec<u8> {
    let mut out = format!("HTTP/1.1 {status} Status\r\nConnection: close\r\n");
    if let Some(ct) = content_type {
        out.push_str(&format!("Content-Type: {ct}\r\n"));
    }
    out.push_str(&format!("Content-Length: {}\r\n\r\n", body.len()));
    out.push_str(body);
    out.into_bytes()
}

/// Declares `declared` body bytes but only sends `body`.
pub fn truncated_response(status: u16, content_type: &str, declared: usize, body: &str) -> Vec<u8> {
    format!(
        "HTTP/1.1 {status} Status\r\nConnection: close\r\nContent-Type: {content_type}\r\nContent-Length: {declared}\r\n\r\n{body}"
    )
    .into_bytes()
}

/// Serves the same canned bytes to every connection and records requests.
pub struct MockServer {
    pub addr: SocketAddr,
    requests: mpsc::UnboundedReceiver<Captured>,
    handshake_failures: mpsc::UnboundedReceiver<String>,
}

impl MockServer {
    pub async fn start(response: Vec<u8>) -> Self {
        Self::spawn(response, Duration::ZERO, None).await
    }

    pub async fn start_delayed(response: Vec<u8>, delay: Duration) -> Self {
        Self::spawn(response, delay, None).await
    }

    pub async fn start_tls(response: Vec<u8>) -> Self {
        Self::spawn(response, Duration::ZERO, Some(TlsAcceptor::from(server_tls_config()))).await
    }

    async fn spawn(response: Vec<u8>, delay: Duration, tls: Option<TlsAcceptor>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (req_tx, requests) = mpsc::unbounded_channel();
        let (hs_tx, handshake_failures) = mpsc::unbounded_channel();
        let response = Arc::new(response);

        tokio::spawn(async move {
            loop {
                let Ok((tcp, _)) = listener.accept().await else {
                    return;
                };
                let response = response.clone();
                let req_tx = req_tx.clone();
                let hs_tx = hs_tx.clone();
                let tls = tls.clone();
                tokio::spawn(async move {
                    match tls {
                        Some(acceptor) => match acceptor.accept(tcp).await {
                            Ok(stream) => handle(stream, &response, delay, &req_tx).await,
                            Err(e) => {
                                let _ = hs_tx.send(e.to_string());
                            }
                        },
                        None => handle(tcp, &response, delay, &req_tx).await,
                    }
                });
            }
        });

        Self {
            addr,
            requests,
            handshake_failures,
        }
    }

    /// Plain-HTTP options pointing at this server.
    pub fn options(&self) -> ConnectionOptions {
        ConnectionOptions::new(PROJECT_ID)
            .with_scheme("http")
            .with_host("127.0.0.1")
            .with_port(self.addr.port())
            .with_token(TOKEN)
    }

    /// HTTPS options for `localhost` trusting the fixture CA.
    pub fn tls_options(&self) -> ConnectionOptions {
        ConnectionOptions::new(PROJECT_ID)
            .with_host("localhost")
            .with_port(self.addr.port())
            .with_token(TOKEN)
            .with_ca_certificates(eventline_client::parse_ca_bundle(CA_PEM).unwrap())
    }

    pub async fn next_request(&mut self) -> Captured {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("no request received")
            .expect("server stopped")
    }

    pub fn try_next_request(&mut self) -> Option<Captured> {
        self.requests.try_recv().ok()
    }

    pub async fn next_handshake_failure(&mut self) -> String {
        tokio::time::timeout(Duration::from_secs(5), self.handshake_failures.recv())
            .await
            .expect("no handshake failure recorded")
            .expect("server stopped")
    }
}

async fn handle<S>(mut stream: S, response: &[u8], delay: Duration, req_tx: &mpsc::UnboundedSender<Captured>)
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let Some(captured) = read_request(&mut stream).await else {
        return;
    };
    let _ = req_tx.send(captured);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    let _ = stream.write_all(response).await;
    let _ = stream.flush().await;
    let _ = stream.shutdown().await;
}

async fn read_request<S>(stream: &mut S) -> Option<Captured>
where
    S: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let head_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos;
        }
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            return None;
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).into_owned();
    let mut captured = Captured {
        head,
        body: buf[head_end + 4..].to_vec(),
    };
    let declared = captured
        .header("content-length")
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(0);
    while captured.body.len() < declared {
        let n = stream.read(&mut chunk).await.ok()?;
        if n == 0 {
            break;
        }
        captured.body.extend_from_slice(&chunk[..n]);
    }
    Some(captured)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn server_tls_config() -> Arc<ServerConfig> {
    let chain = vec![
        CertificateDer::from_pem_slice(LEAF_PEM).unwrap(),
        CertificateDer::from_pem_slice(CA_PEM).unwrap(),
    ];
    let key = PrivateKeyDer::from_pem_slice(LEAF_KEY).unwrap();
    let provider = Arc::new(tokio_rustls::rustls::crypto::ring::default_provider());
    let config = ServerConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(chain, key)
        .unwrap();
    Arc::new(config)
}
