use std::num::FpCategory;

use secp_i18n::{Dictionary, keys, localize_error_code};
use serde_json::{Map, Value};

/// Error body split into display text and diagnostic detail
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedError {
    /// Text for end users
    pub message: String,
    /// Raw body, shown on demand
    pub debug: String,
}

impl ParsedError {
    /// Whether the body carried nothing at all
    pub fn is_empty(&self) -> bool {
        self.message.is_empty() && self.debug.is_empty()
    }

    /// Display model for this error
    pub fn display(&self, dictionary: &Dictionary) -> Option<ErrorDisplay> {
        ErrorDisplay::new(&self.message, &self.debug, dictionary)
    }
}

/// Shape of an error body, checked in priority order
enum ErrorBody {
    /// JSON object with a usable `message`
    WithMessage(String),
    /// JSON object with a usable `code` (or legacy `error`)
    WithCode(String),
    /// Anything else, including malformed JSON
    Unstructured,
}

impl ErrorBody {
    fn classify(raw: &str) -> Self {
        let Ok(Value::Object(fields)) = serde_json::from_str::<Value>(raw) else {
            return Self::Unstructured;
        };

        if let Some(message) = fields.get("message").and_then(field_text) {
            return Self::WithMessage(message);
        }

        if let Some(code) = code_field(&fields).and_then(field_text) {
            return Self::WithCode(code);
        }

        Self::Unstructured
    }
}

/// `code` unless it is missing or `null`, then `error`
fn code_field(fields: &Map<String, Value>) -> Option<&Value> {
    match fields.get("code") {
        Some(Value::Null) | None => fields.get("error"),
        code => code,
    }
}

/// Text of a field, or `None` for empty-ish values (`null`, `false`, `0`, `""`)
fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f.classify() == FpCategory::Zero) => None,
        other => Some(other.to_string()),
    }
}

/// Turn a raw error response body into a display message and debug detail
///
/// JSON objects are checked for `message` first, then `code` / `error`
/// (localized, falling back to the raw code). Anything else, malformed JSON
/// included, is shown verbatim. Successful structured parses keep the raw
/// body as debug detail.
pub fn parse_error_body(dictionary: &Dictionary, raw: &str) -> ParsedError {
    let raw = raw.trim();
    if raw.is_empty() {
        return ParsedError::default();
    }

    let message = match ErrorBody::classify(raw) {
        ErrorBody::WithMessage(message) => message,
        ErrorBody::WithCode(code) => {
            let localized = localize_error_code(dictionary, &code);
            if localized.is_empty() { code } else { localized }
        }
        ErrorBody::Unstructured => {
            tracing::debug!("error body is not structured, showing it verbatim");
            raw.to_owned()
        }
    };

    ParsedError {
        message,
        debug: raw.to_owned(),
    }
}

/// What an error panel should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDisplay {
    /// Headline text; never empty
    pub message: String,
    /// Collapsible detail, when there is any
    pub debug: Option<String>,
}

impl ErrorDisplay {
    /// Build the panel content, or `None` when the panel should be hidden
    ///
    /// A missing message falls back to the generic "request failed" text.
    pub fn new(message: &str, debug: &str, dictionary: &Dictionary) -> Option<Self> {
        let message = message.trim();
        let debug = debug.trim();

        if message.is_empty() && debug.is_empty() {
            return None;
        }

        let message = if message.is_empty() {
            dictionary.resolve(keys::REQUEST_FAILED)
        } else {
            message.to_owned()
        };

        Some(Self {
            message,
            debug: (!debug.is_empty()).then(|| debug.to_owned()),
        })
    }
}
