// src/core/environment.rs

use std::collections::BTreeMap;

/// Namespace consulted when `<namespace>.<name>` is not set.
pub const FALLBACK_NAMESPACE: &str = "db";

/// Outcome of [`Environment::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetOutcome {
    Added,
    Changed { previous: String },
    Unchanged,
}

/// The session's key/value store.
///
/// Loaded from the settings file at startup, changed at runtime through `set`, and
/// never written back to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    values: BTreeMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(values: BTreeMap<String, String>) -> Self {
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Two-level lookup: `<namespace>.<name>`, then `db.<name>`.
    pub fn lookup(&self, namespace: &str, name: &str) -> Option<&str> {
        self.get(&format!("{}.{}", namespace, name))
            .or_else(|| self.get(&format!("{}.{}", FALLBACK_NAMESPACE, name)))
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> SetOutcome {
        let value = value.into();
        match self.values.insert(key.into(), value.clone()) {
            None => SetOutcome::Added,
            Some(previous) if previous == value => SetOutcome::Unchanged,
            Some(previous) => SetOutcome::Changed { previous },
        }
    }

    /// Replaces the whole content in place, e.g. on `env load`.
    pub fn replace(&mut self, other: Self) {
        self.values = other.values;
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
