#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Display-string resolution for the SECP client
//!
//! A locale dictionary fetched once per process, `{placeholder}`
//! substitution, and localization of the server's error codes.

mod cache;
mod codes;
mod dictionary;
mod error;
pub mod keys;

pub use cache::{DictionaryCache, DictionaryLoader, HttpDictionaryLoader, DEFAULT_LOCALE};
pub use codes::{ErrorCode, localize_error_code};
pub use dictionary::Dictionary;
pub use error::I18nError;
