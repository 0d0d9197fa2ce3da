//! Flat key/value set of environment variables

use std::collections::btree_map::{self, BTreeMap};
use std::env;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::EnvError;

/// A flat mapping from environment variable name to value.
///
/// Unmarshalling consumes the keys it binds, so after a successful call the
/// set holds only what no field claimed. Callers that need the original
/// contents must clone first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvSet(BTreeMap<String, String>);

impl EnvSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from `KEY=VALUE` entries.
    ///
    /// Each entry is split on its first `=`, so values may contain `=`.
    /// Later entries overwrite earlier ones with the same key.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::MissingSeparator`] for an entry without `=`.
    pub fn from_environ<I, S>(entries: I) -> Result<Self, EnvError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            let (key, value) = entry
                .split_once('=')
                .ok_or_else(|| EnvError::MissingSeparator {
                    entry: entry.to_string(),
                })?;
            set.insert(key, value);
        }
        Ok(set)
    }

    /// Snapshot the current process environment.
    ///
    /// Entries whose key or value is not valid UTF-8 cannot be bound to any
    /// field and are left out of the snapshot.
    pub fn from_process_env() -> Self {
        env::vars_os()
            .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
                (Ok(key), Ok(value)) => Some((key, value)),
                (key, _) => {
                    let key = match key {
                        Ok(key) => key,
                        Err(key) => key.to_string_lossy().into_owned(),
                    };
                    trace!(key = %key, "skipping non-unicode environment variable");
                    None
                }
            })
            .collect()
    }

    /// Render the set as `KEY=VALUE` entries, sorted by key.
    pub fn to_environ(&self) -> Vec<String> {
        self.iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect()
    }

    /// Look up the value bound to `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    /// Remove `key`, returning its value if it was present.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    /// Whether `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Number of variables in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no variables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(key, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for EnvSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for EnvSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for EnvSet {
    type Item = (String, String);
    type IntoIter = btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl From<BTreeMap<String, String>> for EnvSet {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}
