use std::collections::HashMap;
use std::fmt::Display;

use serde_json::Value;

use crate::I18nError;

/// Locale-specific key to template mapping
///
/// Templates are normally strings containing `{name}` placeholders. Lookups
/// of unknown keys return the key itself, so keys double as readable
/// fallbacks when the dictionary failed to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: HashMap<String, Value>,
}

impl Dictionary {
    /// Dictionary with no entries; every lookup falls back to its key
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a dictionary from a JSON object payload
    ///
    /// # Errors
    ///
    /// Returns [`I18nError::Malformed`] if the payload is not a JSON object
    pub fn from_json(raw: &str) -> Result<Self, I18nError> {
        let entries: HashMap<String, Value> = serde_json::from_str(raw)?;
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Resolve `key` with no substitutions
    pub fn resolve(&self, key: &str) -> String {
        self.resolve_with(key, std::iter::empty::<(&str, &str)>())
    }

    /// Resolve `key` and substitute `{name}` placeholders
    ///
    /// Missing (or `null`) entries resolve to `key`. Placeholders are only
    /// substituted in string templates; other JSON values come back as their
    /// JSON text. Placeholders with no matching parameter are left as-is.
    pub fn resolve_with<I, K, V>(&self, key: &str, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        match self.entries.get(key) {
            None | Some(Value::Null) => Self::format(key, params),
            Some(Value::String(template)) => Self::format(template, params),
            Some(other) => other.to_string(),
        }
    }

    /// Substitute `{name}` placeholders in a template
    ///
    /// Parameters are applied in iteration order, each replacing every
    /// occurrence of its placeholder.
    pub fn format<I, K, V>(template: &str, params: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        let mut out = template.to_owned();
        for (name, value) in params {
            let placeholder = format!("{{{}}}", name.as_ref());
            if out.contains(&placeholder) {
                out = out.replace(&placeholder, &value.to_string());
            }
        }
        out
    }
}

impl<K, V> FromIterator<(K, V)> for Dictionary
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        }
    }
}
