use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use secp_auth::CredentialStore;
use secp_i18n::{DictionaryCache, keys};
use serde::Serialize;
use url::Url;

use crate::error::{ClientError, Result};
use crate::{DEFAULT_LOGIN_PATH, LoginRedirect, ParsedError, RedirectReason, parse_error_body};

/// Caller-supplied request parameters
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// HTTP method, `GET` by default
    pub method: Method,
    /// Extra headers; an `Authorization` header here is never overridden
    pub headers: HeaderMap,
    /// Raw request body
    pub body: Option<Bytes>,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a JSON body and content type
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        self.body = Some(Bytes::from(serde_json::to_vec(value)?));
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(self)
    }
}

/// Client for the SECP API that manages the bearer credential
///
/// 401 answers clear the stored credential and 403 answers keep it; both
/// fail the call with a [`LoginRedirect`] for the caller to navigate to.
/// Every other response, error statuses included, is handed back untouched.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    login_page: Url,
    credentials: CredentialStore,
    messages: DictionaryCache,
}

impl ApiClient {
    /// Create a client for the API served at `base_url`
    ///
    /// # Errors
    ///
    /// Returns an error if the login page URL cannot be derived from `base_url`
    pub fn new(base_url: Url, credentials: CredentialStore, messages: DictionaryCache) -> Result<Self> {
        let login_page = join(&base_url, DEFAULT_LOGIN_PATH)?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            login_page,
            credentials,
            messages,
        })
    }

    /// Use a preconfigured HTTP client
    #[must_use]
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// Redirect to a different login page path
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be resolved against the base URL
    pub fn with_login_path(mut self, path: &str) -> Result<Self> {
        self.login_page = join(&self.base_url, path)?;
        Ok(self)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn login_page(&self) -> &Url {
        &self.login_page
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn messages(&self) -> &DictionaryCache {
        &self.messages
    }

    /// Issue a request with the stored credential attached
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Unauthorized`] on 401 (after clearing the
    /// credential), [`ClientError::Forbidden`] on 403, or a transport or
    /// path error
    pub async fn execute(&self, path: &str, options: &RequestOptions) -> Result<Response> {
        let url = self.base_url.join(path).map_err(|source| ClientError::Path {
            path: path.to_owned(),
            source,
        })?;

        let mut headers = options.headers.clone();
        if !headers.contains_key(AUTHORIZATION)
            && let Some(value) = self.credentials.authorization_header()
        {
            headers.insert(AUTHORIZATION, value);
        }

        let mut request = self.http.request(options.method.clone(), url).headers(headers);
        if let Some(body) = &options.body {
            request = request.body(body.clone());
        }

        tracing::debug!(method = %options.method, path, "sending request");
        let response = request.send().await?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                if let Err(e) = self.credentials.clear() {
                    tracing::warn!(error = %e, "failed to clear rejected credential");
                }
                tracing::info!(path, "credential rejected, redirecting to login");
                Err(ClientError::Unauthorized(self.redirect(RedirectReason::Unauthorized, keys::UNAUTHORIZED)))
            }
            StatusCode::FORBIDDEN => {
                tracing::info!(path, "access denied, redirecting to login");
                Err(ClientError::Forbidden(self.redirect(RedirectReason::Forbidden, keys::FORBIDDEN)))
            }
            status => {
                tracing::debug!(path, status = status.as_u16(), "response received");
                Ok(response)
            }
        }
    }

    /// `GET` shorthand for [`execute`](Self::execute)
    pub async fn get(&self, path: &str) -> Result<Response> {
        self.execute(path, &RequestOptions::default()).await
    }

    /// Read a failed response's body and parse it for display
    ///
    /// Waits for the locale dictionary so coded errors are localized.
    pub async fn read_error(&self, response: Response) -> Result<ParsedError> {
        let body = response.text().await?;
        let dictionary = self.messages.ensure_loaded().await;
        Ok(parse_error_body(&dictionary, &body))
    }

    /// Forget the credential and return the sign-out redirect
    ///
    /// # Errors
    ///
    /// Returns an error if the credential storage cannot be written
    pub fn logout(&self) -> std::result::Result<LoginRedirect, secp_auth::StorageError> {
        self.credentials.clear()?;
        Ok(LoginRedirect::logout(&self.login_page))
    }

    fn redirect(&self, reason: RedirectReason, message_key: &str) -> LoginRedirect {
        let message = self.messages.current().resolve(message_key);
        LoginRedirect::new(&self.login_page, reason, Some(message))
    }
}

fn join(base_url: &Url, path: &str) -> Result<Url> {
    base_url
        .join(path)
        .map_err(|e| ClientError::Config(format!("invalid path '{path}' for base URL {base_url}: {e}")))
}
