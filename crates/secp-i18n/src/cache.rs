use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{CACHE_CONTROL, HeaderValue};
use tokio::sync::OnceCell;
use url::Url;

use crate::{Dictionary, I18nError};

/// Locale served by the SECP UI
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Source of the locale dictionary
#[async_trait]
pub trait DictionaryLoader: Send + Sync {
    /// Perform one load attempt
    async fn load(&self) -> Result<Dictionary, I18nError>;
}

/// Fetches `<base>/<i18n_path>/<locale>.json`
#[derive(Debug, Clone)]
pub struct HttpDictionaryLoader {
    http: reqwest::Client,
    url: Url,
}

impl HttpDictionaryLoader {
    /// Create a loader for `locale` under `i18n_path` (e.g. `/ui/i18n`)
    ///
    /// # Errors
    ///
    /// Returns an error if the dictionary URL cannot be built
    pub fn new(http: reqwest::Client, base_url: &Url, i18n_path: &str, locale: &str) -> Result<Self, I18nError> {
        let url = base_url.join(&format!("{}/{locale}.json", i18n_path.trim_end_matches('/')))?;
        Ok(Self { http, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl DictionaryLoader for HttpDictionaryLoader {
    async fn load(&self) -> Result<Dictionary, I18nError> {
        tracing::debug!(url = %self.url, "fetching locale dictionary");

        let response = self
            .http
            .get(self.url.clone())
            .header(CACHE_CONTROL, HeaderValue::from_static("no-cache"))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(I18nError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        Dictionary::from_json(&body)
    }
}

/// Loader used by preloaded caches; never invoked
struct NoLoader;

#[async_trait]
impl DictionaryLoader for NoLoader {
    async fn load(&self) -> Result<Dictionary, I18nError> {
        Ok(Dictionary::empty())
    }
}

/// Process-lifetime memo of the locale dictionary
///
/// The first [`ensure_loaded`](Self::ensure_loaded) call runs the loader;
/// callers arriving while it is in flight wait on the same attempt. Failed
/// loads are cached as an empty dictionary and never retried. Clones share
/// the memo.
#[derive(Clone)]
pub struct DictionaryCache {
    loader: Arc<dyn DictionaryLoader>,
    cell: Arc<OnceCell<Arc<Dictionary>>>,
}

impl fmt::Debug for DictionaryCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DictionaryCache")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

impl DictionaryCache {
    pub fn new(loader: Arc<dyn DictionaryLoader>) -> Self {
        Self {
            loader,
            cell: Arc::new(OnceCell::new()),
        }
    }

    /// Cache that is already settled on `dictionary`
    pub fn preloaded(dictionary: Dictionary) -> Self {
        Self {
            loader: Arc::new(NoLoader),
            cell: Arc::new(OnceCell::new_with(Some(Arc::new(dictionary)))),
        }
    }

    /// Whether the single load attempt has settled
    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }

    /// Return the dictionary, loading it on first use
    pub async fn ensure_loaded(&self) -> Arc<Dictionary> {
        let dictionary = self
            .cell
            .get_or_init(|| async {
                match self.loader.load().await {
                    Ok(dictionary) => {
                        tracing::debug!(entries = dictionary.len(), "locale dictionary loaded");
                        Arc::new(dictionary)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "locale dictionary unavailable, falling back to message keys");
                        Arc::new(Dictionary::empty())
                    }
                }
            })
            .await;

        Arc::clone(dictionary)
    }

    /// The settled dictionary, or an empty one if loading has not finished
    ///
    /// Never waits; lookups made before the load settles fall back to keys.
    pub fn current(&self) -> Arc<Dictionary> {
        self.cell
            .get()
            .map_or_else(|| Arc::new(Dictionary::empty()), Arc::clone)
    }
}
