use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use secp_auth::{CredentialStore, FileStorage, MemoryStorage, TokenStorage};
use secp_client::{ApiClient, ClientError, LoginBanner, RequestOptions, parse_error_body};
use secp_config::{Config, StorageBackend};
use secp_i18n::{DictionaryCache, HttpDictionaryLoader};
use secrecy::SecretString;
use tokio::io::AsyncReadExt;

use crate::args::{Command, TokenCommand};
use crate::output;

/// Exit code when the server demands a new sign-in
const EXIT_REDIRECT: u8 = 2;

/// Wired-up client for one CLI invocation
pub struct App {
    client: ApiClient,
}

impl App {
    /// Build storage, dictionary cache, and API client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or any derived URL is invalid
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let storage: Arc<dyn TokenStorage> = match config.storage.backend {
            StorageBackend::File => {
                let path = config
                    .storage
                    .resolved_path()
                    .ok_or_else(|| anyhow::anyhow!("no storage path available"))?;
                tracing::debug!(path = %path.display(), "using file credential storage");
                Arc::new(FileStorage::new(path))
            }
            StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        };
        let credentials = CredentialStore::with_key(storage, config.storage.key.clone());

        let http = reqwest::Client::builder()
            .user_agent(concat!("secp/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let loader = HttpDictionaryLoader::new(
            http.clone(),
            &config.client.base_url,
            &config.client.i18n_path,
            &config.client.locale,
        )?;
        let messages = DictionaryCache::new(Arc::new(loader));

        let client = ApiClient::new(config.client.base_url.clone(), credentials, messages)?
            .with_http(http)
            .with_login_path(&config.client.login_path)?;

        Ok(Self { client })
    }

    /// Execute a subcommand, writing its output to stdout
    ///
    /// # Errors
    ///
    /// Returns an error on transport, storage, or input failures
    pub async fn run(&self, command: Command) -> anyhow::Result<ExitCode> {
        let mut out = std::io::stdout().lock();

        match command {
            Command::Token(TokenCommand::Set { token }) => {
                let token = match token {
                    Some(token) => token,
                    None => read_stdin().await?,
                };
                let token = token.trim();
                if token.is_empty() {
                    anyhow::bail!("refusing to store an empty token");
                }
                self.client.credentials().set(&SecretString::from(token.to_owned()))?;
                writeln!(out, "token stored")?;
            }
            Command::Token(TokenCommand::Show) => {
                let state = if self.client.credentials().get().is_some() { "token present" } else { "no token" };
                writeln!(out, "{state}")?;
            }
            Command::Token(TokenCommand::Clear) => {
                let redirect = self.client.logout()?;
                writeln!(out, "{}", redirect.location())?;
            }
            Command::Fetch {
                path,
                method,
                headers,
                data,
            } => return self.fetch(&mut out, &path, &method, &headers, data).await,
            Command::Explain { body } => {
                let body = match body {
                    Some(body) => body,
                    None => read_stdin().await?,
                };
                let dictionary = self.client.messages().ensure_loaded().await;
                let parsed = parse_error_body(&dictionary, &body);
                output::write_error(&mut out, parsed.display(&dictionary).as_ref())?;
            }
            Command::Banner { url } => {
                let dictionary = self.client.messages().ensure_loaded().await;
                output::write_banner(&mut out, LoginBanner::from_url(&url, &dictionary).as_ref())?;
            }
        }

        Ok(ExitCode::SUCCESS)
    }

    async fn fetch(
        &self,
        out: &mut impl Write,
        path: &str,
        method: &str,
        headers: &[String],
        data: Option<String>,
    ) -> anyhow::Result<ExitCode> {
        let mut options = RequestOptions::new(parse_method(method)?);
        for raw in headers {
            let (name, value) = parse_header(raw)?;
            options = options.header(name, value);
        }
        if let Some(data) = data {
            options = options.body(data);
        }

        // Settle the dictionary first so redirect messages are localized
        let dictionary = self.client.messages().ensure_loaded().await;

        match self.client.execute(path, &options).await {
            Ok(response) if response.status().is_success() => {
                let body = response.text().await?;
                writeln!(out, "{body}")?;
                Ok(ExitCode::SUCCESS)
            }
            Ok(response) => {
                let status = response.status();
                let parsed = self.client.read_error(response).await?;
                tracing::debug!(status = status.as_u16(), "request failed");
                writeln!(out, "HTTP {status}")?;
                output::write_error(out, parsed.display(&dictionary).as_ref())?;
                Ok(ExitCode::FAILURE)
            }
            Err(ClientError::Unauthorized(redirect) | ClientError::Forbidden(redirect)) => {
                output::write_redirect(out, &redirect)?;
                Ok(ExitCode::from(EXIT_REDIRECT))
            }
            Err(e) => Err(e.into()),
        }
    }
}

async fn read_stdin() -> anyhow::Result<String> {
    let mut buf = String::new();
    tokio::io::stdin().read_to_string(&mut buf).await?;
    Ok(buf)
}

fn parse_method(method: &str) -> anyhow::Result<Method> {
    Method::from_bytes(method.trim().to_ascii_uppercase().as_bytes())
        .map_err(|e| anyhow::anyhow!("invalid HTTP method `{method}`: {e}"))
}

fn parse_header(raw: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow::anyhow!("header `{raw}` must look like `Name: value`"))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| anyhow::anyhow!("invalid header name in `{raw}`: {e}"))?;
    let value = HeaderValue::from_str(value.trim()).map_err(|e| anyhow::anyhow!("invalid header value in `{raw}`: {e}"))?;

    Ok((name, value))
}
