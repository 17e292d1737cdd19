use std::path::PathBuf;

use serde::Deserialize;

/// Credential storage backend
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON file that survives restarts
    #[default]
    File,
    /// Process memory only
    Memory,
}

/// Credential storage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Storage file; defaults to `$XDG_CONFIG_HOME/secp/storage.json`
    #[serde(default)]
    pub path: Option<PathBuf>,
    /// Slot holding the bearer token
    #[serde(default = "default_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            key: default_key(),
        }
    }
}

impl StorageConfig {
    /// Storage file for the file backend
    ///
    /// Falls back to `$XDG_CONFIG_HOME/secp/storage.json`, then
    /// `$HOME/.config/secp/storage.json`.
    pub fn resolved_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.path {
            return Some(path.clone());
        }

        let config_dir = std::env::var_os("XDG_CONFIG_HOME")
            .filter(|dir| !dir.is_empty())
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))?;

        Some(config_dir.join("secp").join("storage.json"))
    }
}

fn default_key() -> String {
    "secp_token".to_owned()
}
