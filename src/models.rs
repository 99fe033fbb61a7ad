// src/models.rs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// --- `aliases.toml` MODELS ---

/// Represents the deserialized structure of an `aliases.toml` file.
///
/// ```toml
/// [aliases]
/// ll = "list -l"
/// ```
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasesConfig {
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

// --- `settings.toml` MODELS ---

/// The raw content of a `settings.toml` file. Any shape of tables is accepted; the
/// loader flattens it into dotted keys.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct SettingsConfig {
    pub table: toml::Table,
}

// --- HELP MODELS ---

/// Ordered parameter descriptions a command publishes for `help <command>`.
///
/// Keys are flags as the user types them (`-f`, `--count`); the empty key describes
/// the main positional parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamDesc {
    entries: Vec<(String, String)>,
}

impl ParamDesc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describes the main (positional) parameter.
    pub fn main(self, description: impl Into<String>) -> Self {
        self.entry("", description)
    }

    pub fn flag(self, flag: impl Into<String>, description: impl Into<String>) -> Self {
        self.entry(flag, description)
    }

    fn entry(mut self, key: impl Into<String>, description: impl Into<String>) -> Self {
        self.entries.push((key.into(), description.into()));
        self
    }

    pub fn main_param(&self) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key.is_empty())
            .map(|(_, desc)| desc.as_str())
    }

    /// Flag entries in declaration order.
    pub fn flags(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter(|(key, _)| !key.is_empty())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
