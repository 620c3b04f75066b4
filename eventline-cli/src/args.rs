use std::path::PathBuf;
use std::time::Duration;

use clap::Args;
use eventline_api::Pagination;
use eventline_client::options::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEME};
use eventline_client::{load_ca_bundle, BuildError, ConnectionOptions, PinSet};

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ConnectionArgs {
    #[arg(long, env = "EVENTLINE_API_HOST", default_value = DEFAULT_HOST, global = true)]
    pub host: String,
    #[arg(long, env = "EVENTLINE_API_PORT", default_value_t = DEFAULT_PORT, global = true)]
    pub port: u16,
    #[arg(long, env = "EVENTLINE_API_SCHEME", default_value = DEFAULT_SCHEME, global = true)]
    pub scheme: String,
    #[arg(long, env = "EVCLI_API_KEY", hide_env_values = true, global = true)]
    pub token: Option<String>,
    #[arg(long, env = "EVENTLINE_PROJECT_ID", global = true)]
    pub project_id: Option<String>,
    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..), global = true)]
    pub timeout: u64,
    /// PEM file with the trust anchors to use instead of the Mozilla roots.
    #[arg(long, global = true)]
    pub ca_bundle: Option<PathBuf>,
    /// Base64 SHA-256 digest of an accepted server public key; repeatable.
    /// Replaces the built-in pins.
    #[arg(long = "pin", value_name = "SHA256_BASE64", global = true)]
    pub pins: Vec<String>,
}

impl ConnectionArgs {
    pub fn to_options(&self) -> Result<ConnectionOptions, BuildError> {
        let project_id = self
            .project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(BuildError::MissingProjectId)?;

        let mut opts = ConnectionOptions::new(project_id)
            .with_host(&self.host)
            .with_port(self.port)
            .with_scheme(&self.scheme)
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(token) = &self.token {
            opts = opts.with_token(token.as_str());
        }
        if !self.pins.is_empty() {
            opts = opts.with_pins(PinSet::new(self.pins.iter().map(String::as_str)));
        }
        if let Some(path) = &self.ca_bundle {
            opts = opts.with_ca_certificates(load_ca_bundle(path)?);
        }
        Ok(opts)
    }
}

#[derive(Debug, Args, Clone, Default)]
pub struct PaginationArgs {
    #[arg(long)]
    pub after: Option<String>,
    #[arg(long)]
    pub before: Option<String>,
    #[arg(long)]
    pub size: Option<u32>,
    #[arg(long)]
    pub reverse: bool,
}

impl PaginationArgs {
    pub fn to_pagination(&self) -> Pagination {
        Pagination {
            after: self.after.clone(),
            before: self.before.clone(),
            size: self.size,
            reverse: self.reverse.then_some(true),
        }
    }
}
