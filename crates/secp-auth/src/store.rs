use std::fmt;
use std::sync::Arc;

use http::HeaderValue;
use secrecy::{ExposeSecret, SecretString};

use crate::{MemoryStorage, StorageError, TokenStorage};

/// Storage slot holding the bearer token
pub const DEFAULT_TOKEN_KEY: &str = "secp_token";

/// Single-slot bearer credential store
///
/// Cloning shares the underlying storage. An empty stored value counts as
/// no credential.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn TokenStorage>,
    key: String,
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl CredentialStore {
    /// Create a store using the default `secp_token` slot
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self::with_key(storage, DEFAULT_TOKEN_KEY)
    }

    /// Create a store using a custom slot name
    pub fn with_key(storage: Arc<dyn TokenStorage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Create a store backed by process-local memory
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::new()))
    }

    /// Slot name used in the backing storage
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read the current credential
    ///
    /// Storage failures are logged and reported as no credential.
    pub fn get(&self) -> Option<SecretString> {
        match self.storage.get_item(&self.key) {
            Ok(Some(token)) if !token.is_empty() => Some(SecretString::from(token)),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "credential storage unreadable, treating request as anonymous");
                None
            }
        }
    }

    /// Store a credential, replacing any previous one
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    pub fn set(&self, token: &SecretString) -> Result<(), StorageError> {
        self.storage.set_item(&self.key, token.expose_secret())?;
        tracing::debug!(key = %self.key, "credential stored");
        Ok(())
    }

    /// Remove the credential; a no-op when none is stored
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)?;
        tracing::debug!(key = %self.key, "credential cleared");
        Ok(())
    }

    /// `Bearer <token>` header value for the current credential
    ///
    /// Returns `None` when no credential is stored or the token contains
    /// bytes that cannot appear in a header.
    pub fn authorization_header(&self) -> Option<HeaderValue> {
        let token = self.get()?;

        match HeaderValue::from_str(&format!("Bearer {}", token.expose_secret())) {
            Ok(mut value) => {
                value.set_sensitive(true);
                Some(value)
            }
            Err(_) => {
                tracing::warn!(key = %self.key, "stored credential is not a valid header value");
                None
            }
        }
    }
}
