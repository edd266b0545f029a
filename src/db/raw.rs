// Raw Configuration Source
// Case-insensitive string key/value settings supplied by the hosting application

use crate::db::traits::OptionsError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Separator between namespace segments of a configuration key
pub const KEY_DELIMITER: &str = ":";

/// Join key segments with [`KEY_DELIMITER`]
pub fn configuration_key(segments: &[&str]) -> String {
    segments.join(KEY_DELIMITER)
}

/// Read-only mapping of configuration keys to raw string values.
///
/// Keys compare ASCII case-insensitively; the spelling of the most recent insert is
/// kept for iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawConfiguration {
    /// Folded key -> (original key, value)
    entries: BTreeMap<String, (String, String)>,
}

impl RawConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten a JSON document into colon-delimited keys.
    ///
    /// `{"SqlServer": {"MaxBatchSize": 1}}` yields `SqlServer:MaxBatchSize = "1"`.
    /// Array elements use their index as the key segment and `null` becomes an
    /// empty string.
    pub fn from_json(document: &Value) -> Self {
        let mut raw = Self::new();
        raw.flatten_json(None, document);
        raw
    }

    /// Parse and flatten a JSON document. The top level must be an object.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let document: serde_json::Map<String, Value> = serde_json::from_str(json)?;
        Ok(Self::from_json(&Value::Object(document)))
    }

    /// Build from environment-style variables.
    ///
    /// Only variables starting with `prefix` are kept; the prefix is stripped
    /// and `__` maps to the key delimiter, so `APP_SqlServer__MaxBatchSize`
    /// with prefix `APP_` becomes `SqlServer:MaxBatchSize`.
    pub fn from_env_vars<I, K, V>(prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut raw = Self::new();
        for (name, value) in vars {
            if let Some(stripped) = name.as_ref().strip_prefix(prefix) {
                if stripped.is_empty() {
                    continue;
                }
                raw.insert(stripped.replace("__", KEY_DELIMITER), value);
            }
        }
        raw
    }

    /// Insert or replace a value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        self.entries.insert(fold(&key), (key, value.into()));
    }

    /// Layer another source on top of this one; its values win per key
    pub fn extend_from(&mut self, other: &RawConfiguration) {
        for (folded, entry) in &other.entries {
            self.entries.insert(folded.clone(), entry.clone());
        }
    }

    /// Look up a value, ignoring key case
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&fold(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&fold(key))
    }

    /// Look up and parse an integer value.
    ///
    /// Surrounding whitespace and a leading sign are accepted. Returns
    /// `Ok(None)` when the key is absent.
    pub fn get_i32(&self, key: &str) -> Result<Option<i32>, OptionsError> {
        match self.get(key) {
            None => Ok(None),
            Some(text) => text.trim().parse::<i32>().map(Some).map_err(|_| {
                OptionsError::InvalidConfigurationFormat {
                    key: key.to_string(),
                    value: text.to_string(),
                }
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over (key, value) pairs in folded-key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn flatten_json(&mut self, path: Option<String>, value: &Value) {
        let child = |segment: &str| match &path {
            Some(parent) => configuration_key(&[parent, segment]),
            None => segment.to_string(),
        };

        match value {
            Value::Object(map) => {
                for (name, nested) in map {
                    self.flatten_json(Some(child(name)), nested);
                }
            }
            Value::Array(items) => {
                for (index, nested) in items.iter().enumerate() {
                    self.flatten_json(Some(child(&index.to_string())), nested);
                }
            }
            scalar => {
                // A bare scalar at the root has no key to live under
                if let Some(key) = &path {
                    let text = match scalar {
                        Value::Null => String::new(),
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    self.insert(key.clone(), text);
                }
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for RawConfiguration
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut raw = Self::new();
        for (key, value) in iter {
            raw.insert(key, value);
        }
        raw
    }
}

// ASCII-only folding: non-ASCII letters must match exactly
fn fold(key: &str) -> String {
    key.to_ascii_lowercase()
}
