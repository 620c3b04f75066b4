use reqwest::header::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::error::BuildError;

/// Environment variable consulted when no token is given explicitly.
pub const TOKEN_ENV_VAR: &str = "EVCLI_API_KEY";

/// Resolves the API token: explicit value first, then [`TOKEN_ENV_VAR`].
///
/// Empty values count as absent.
pub fn resolve_token(explicit: Option<&SecretString>) -> Result<SecretString, BuildError> {
    resolve_token_with(explicit, |key| std::env::var(key).ok())
}

pub(crate) fn resolve_token_with<F>(
    explicit: Option<&SecretString>,
    lookup: F,
) -> Result<SecretString, BuildError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = explicit {
        let s = token.expose_secret();
        if !s.is_empty() {
            return Ok(SecretString::from(s.to_string()));
        }
    }
    match lookup(TOKEN_ENV_VAR) {
        Some(v) if !v.is_empty() => Ok(SecretString::from(v)),
        _ => Err(BuildError::MissingToken(TOKEN_ENV_VAR)),
    }
}

/// `Authorization: Bearer <token>`, flagged sensitive so it never shows up in
/// debug output.
pub(crate) fn bearer_header(token: &SecretString) -> Result<HeaderValue, BuildError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
        .map_err(|_| BuildError::InvalidHeader("Authorization"))?;
    value.set_sensitive(true);
    Ok(value)
}
