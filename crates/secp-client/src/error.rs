use crate::LoginRedirect;

/// Client-specific result type
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors from the SECP client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Server answered 401; the credential has been cleared
    #[error("UNAUTHORIZED")]
    Unauthorized(LoginRedirect),

    /// Server answered 403; the credential is kept
    #[error("FORBIDDEN")]
    Forbidden(LoginRedirect),

    /// HTTP transport error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request path could not be resolved against the base URL
    #[error("invalid request path '{path}': {source}")]
    Path {
        /// Path as given by the caller
        path: String,
        /// Resolution failure
        #[source]
        source: url::ParseError,
    },

    /// Request body could not be encoded
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// Invalid configuration
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// Login redirect the caller should navigate to, if any
    pub fn redirect(&self) -> Option<&LoginRedirect> {
        match self {
            Self::Unauthorized(redirect) | Self::Forbidden(redirect) => Some(redirect),
            _ => None,
        }
    }
}
