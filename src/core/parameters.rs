// src/core/parameters.rs

//! Typed views over a single raw argument.
//!
//! Each value is built once from the raw text found by an [`ArgumentSet`] lookup and
//! refined with pure, consuming transformations:
//!
//! ```
//! use spycon::core::arg_parser::ArgumentSet;
//!
//! let args = ArgumentSet::of("-c 3", false, &[]);
//! let count = args.get("count").abbrev().int().with_default(2).get();
//! assert_eq!(count, 3);
//! ```
//!
//! Parsing problems never surface as errors. Only [`StringValue::require_non_empty`] and
//! its siblings fail, with an [`ArgumentError`].
//!
//! [`ArgumentSet`]: crate::core::arg_parser::ArgumentSet

use thiserror::Error;

const TRUE_LITERALS: &[&str] = &["true", "yes", "y", "on", "1"];
const FALSE_LITERALS: &[&str] = &["false", "no", "n", "off", "0"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("missing argument {name}")]
    Missing { name: String },
    #[error("property '{key}' is not set")]
    MissingProperty { key: String },
}

/// Label used in messages for a named argument, e.g. `--filename`.
pub(crate) fn named_label(key: &str) -> String {
    if key.chars().count() > 1 {
        format!("--{}", key)
    } else {
        format!("-{}", key)
    }
}

/// Label used in messages for an anonymous argument, e.g. `#0`.
pub(crate) fn positional_label(index: usize) -> String {
    format!("#{}", index)
}

// --- STRING ---

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringValue {
    name: String,
    value: String,
}

impl StringValue {
    pub fn from_named(key: &str, raw: Option<&str>) -> Self {
        Self {
            name: named_label(key),
            value: raw.unwrap_or_default().to_string(),
        }
    }

    pub fn from_positional(index: usize, raw: Option<&str>) -> Self {
        Self {
            name: positional_label(index),
            value: raw.unwrap_or_default().to_string(),
        }
    }

    /// Substitutes `default` when the value is absent or empty.
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        if self.value.is_empty() {
            self.value = default.into();
        }
        self
    }

    /// Overrides the label used by [`Self::require_non_empty`].
    pub fn arg_name(mut self, label: impl Into<String>) -> Self {
        self.name = label.into();
        self
    }

    pub fn require_non_empty(self) -> Result<Self, ArgumentError> {
        if self.value.is_empty() {
            return Err(ArgumentError::Missing { name: self.name });
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

// --- INTEGER ---

/// A base-10 integer. Absent or malformed input falls through to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntValue {
    name: String,
    raw: String,
    default: i64,
}

impl IntValue {
    pub fn from_named(key: &str, raw: Option<&str>) -> Self {
        Self {
            name: named_label(key),
            raw: raw.unwrap_or_default().to_string(),
            default: 0,
        }
    }

    pub fn from_positional(index: usize, raw: Option<&str>) -> Self {
        Self {
            name: positional_label(index),
            raw: raw.unwrap_or_default().to_string(),
            default: 0,
        }
    }

    pub fn with_default(mut self, default: i64) -> Self {
        self.default = default;
        self
    }

    pub fn arg_name(mut self, label: impl Into<String>) -> Self {
        self.name = label.into();
        self
    }

    /// Fails when no text was supplied at all. Malformed text still passes and
    /// resolves to the default in [`Self::get`].
    pub fn require_non_empty(self) -> Result<Self, ArgumentError> {
        if self.raw.is_empty() {
            return Err(ArgumentError::Missing { name: self.name });
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn get(&self) -> i64 {
        self.raw.trim().parse().unwrap_or(self.default)
    }
}

// --- BOOLEAN ---

/// A boolean matched case-insensitively against known literals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoolValue {
    name: String,
    raw: String,
    default: bool,
}

impl BoolValue {
    pub fn from_named(key: &str, raw: Option<&str>) -> Self {
        Self {
            name: named_label(key),
            raw: raw.unwrap_or_default().to_string(),
            default: false,
        }
    }

    pub fn from_positional(index: usize, raw: Option<&str>) -> Self {
        Self {
            name: positional_label(index),
            raw: raw.unwrap_or_default().to_string(),
            default: false,
        }
    }

    pub fn with_default(mut self, default: bool) -> Self {
        self.default = default;
        self
    }

    pub fn arg_name(mut self, label: impl Into<String>) -> Self {
        self.name = label.into();
        self
    }

    pub fn require_non_empty(self) -> Result<Self, ArgumentError> {
        if self.raw.is_empty() {
            return Err(ArgumentError::Missing { name: self.name });
        }
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    pub fn get(&self) -> bool {
        let raw = self.raw.trim();
        if TRUE_LITERALS.iter().any(|l| raw.eq_ignore_ascii_case(l)) {
            true
        } else if FALSE_LITERALS.iter().any(|l| raw.eq_ignore_ascii_case(l)) {
            false
        } else {
            self.default
        }
    }
}

// MARK: --- UNIT TESTS ---
