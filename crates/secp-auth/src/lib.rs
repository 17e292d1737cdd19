#![allow(clippy::must_use_candidate)]

//! Bearer credential lifecycle for the SECP client
//!
//! A single token slot persisted through a pluggable [`TokenStorage`]
//! backend. Reads never fail: storage problems degrade to "no credential".

mod error;
mod storage;
mod store;

pub use error::StorageError;
pub use storage::{FileStorage, MemoryStorage, TokenStorage};
pub use store::{CredentialStore, DEFAULT_TOKEN_KEY};
