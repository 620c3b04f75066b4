#![forbid(unsafe_code)]

//! Pinned HTTPS transport for the Eventline API.
//!
//! [`HttpTransport`] is built once from [`ConnectionOptions`] and then used
//! through the [`Transport`] trait by the resource wrappers in
//! `eventline-api`. It authenticates every request, refuses peers whose
//! public key is not in the [`PinSet`], and reports every failure as a
//! [`RequestError`].

pub mod classify;
pub mod error;
pub mod options;
pub mod pinning;
pub mod tls;
pub mod token;
pub mod transport;

pub use crate::classify::{Decoded, Reply};
pub use crate::error::{BuildError, ErrorCode, RequestError};
pub use crate::options::ConnectionOptions;
pub use crate::pinning::{PinError, PinSet, PinnedCertVerifier};
pub use crate::tls::{load_ca_bundle, parse_ca_bundle};
pub use crate::token::TOKEN_ENV_VAR;
pub use crate::transport::{HttpTransport, Transport, Verb};
