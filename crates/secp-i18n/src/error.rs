/// Locale dictionary loading errors
///
/// These never escape [`crate::DictionaryCache`]; they are logged and the
/// cache degrades to an empty dictionary.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    /// Transport failure fetching the dictionary
    #[error("dictionary request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Dictionary endpoint answered with a non-success status
    #[error("dictionary endpoint returned {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Payload is not a JSON object
    #[error("malformed dictionary payload: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Dictionary URL could not be built
    #[error("invalid dictionary URL: {0}")]
    Url(#[from] url::ParseError),
}
