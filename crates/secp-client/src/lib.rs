#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Authenticated HTTP access to the SECP API
//!
//! Injects the stored bearer credential into outbound requests, turns
//! 401/403 answers into login redirects, and normalizes error bodies into
//! a display message plus debug detail.

mod client;
pub mod error;
mod error_body;
pub mod format;
mod redirect;

pub use client::{ApiClient, RequestOptions};
pub use error::{ClientError, Result};
pub use error_body::{ErrorDisplay, ParsedError, parse_error_body};
pub use redirect::{DEFAULT_LOGIN_PATH, LoginBanner, LoginRedirect, RedirectReason};
