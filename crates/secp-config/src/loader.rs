use std::path::Path;

use crate::{Config, StorageBackend};

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its contents are invalid
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse configuration from TOML text
    ///
    /// Expands `{{ env.VAR }}` placeholders, deserializes, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded =
            crate::env::expand_env(raw).map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is usable
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_client()?;
        self.validate_storage()?;
        Ok(())
    }

    fn validate_client(&self) -> anyhow::Result<()> {
        let client = &self.client;

        if !matches!(client.base_url.scheme(), "http" | "https") {
            anyhow::bail!("client.base_url must be an http(s) URL, got `{}`", client.base_url);
        }

        if client.locale.is_empty() || client.locale.contains(['/', '\\', '.']) {
            anyhow::bail!("client.locale `{}` is not a valid locale tag", client.locale);
        }

        for (name, path) in [("login_path", &client.login_path), ("i18n_path", &client.i18n_path)] {
            if !path.starts_with('/') {
                anyhow::bail!("client.{name} must be an absolute path, got `{path}`");
            }
        }

        Ok(())
    }

    fn validate_storage(&self) -> anyhow::Result<()> {
        if self.storage.key.trim().is_empty() {
            anyhow::bail!("storage.key must not be empty");
        }

        if self.storage.backend == StorageBackend::File && self.storage.resolved_path().is_none() {
            anyhow::bail!("storage.path must be set when neither XDG_CONFIG_HOME nor HOME is available");
        }

        Ok(())
    }
}
