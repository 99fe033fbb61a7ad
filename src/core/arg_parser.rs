// src/core/arg_parser.rs

use crate::core::{
    parameters::{BoolValue, IntValue, StringValue},
    tokenizer,
};
use std::collections::HashMap;
use std::fmt;

/// The arguments of one command invocation, classified into named flags and
/// positional (anonymous) values.
///
/// Building an `ArgumentSet` never fails: every token ends up as exactly one flag key,
/// one flag value or one positional entry. Validation happens later, when a typed
/// accessor is consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentSet {
    positional: Vec<String>,
    named: HashMap<String, String>,
    first_token_is_command: bool,
}

impl ArgumentSet {
    /// Parses a token sequence.
    ///
    /// # Logic:
    /// - A token starting with `--` or `-` is a flag; the dashes are stripped to form its key.
    /// - Keys listed in `no_value_flags` are recorded with `""` immediately and never wait
    ///   for a value.
    /// - Any other flag becomes the pending key. A pending key that meets another flag is
    ///   recorded with `""`.
    /// - A non-flag token is the value of the pending key, or else a positional argument.
    /// - A pending key left at the end is recorded with `""`.
    pub fn new<S: AsRef<str>>(
        tokens: &[S],
        first_token_is_command: bool,
        no_value_flags: &[&str],
    ) -> Self {
        let mut positional = Vec::new();
        let mut named = HashMap::new();
        let mut pending: Option<&str> = None;

        for token in tokens {
            let token: &str = token.as_ref();
            let flag = if let Some(key) = token.strip_prefix("--") {
                Some(key)
            } else {
                token.strip_prefix('-')
            };

            match flag {
                Some(key) if no_value_flags.contains(&key) => {
                    named.insert(key.to_string(), String::new());
                }
                Some(key) => {
                    if let Some(previous) = pending.replace(key) {
                        named.insert(previous.to_string(), String::new());
                    }
                }
                None => match pending.take() {
                    Some(key) => {
                        named.insert(key.to_string(), token.to_string());
                    }
                    None => positional.push(token.to_string()),
                },
            }
        }
        if let Some(key) = pending {
            named.insert(key.to_string(), String::new());
        }

        Self {
            positional,
            named,
            first_token_is_command,
        }
    }

    /// Tokenizes `line` on spaces and parses the result.
    pub fn of(line: &str, has_command: bool, no_value_flags: &[&str]) -> Self {
        let tokens = tokenizer::tokenize(line, ' ');
        Self::new(&tokens, has_command, no_value_flags)
    }

    // --- Raw access ---

    /// The reserved command name, when the first token is treated as one.
    pub fn command(&self) -> Option<&str> {
        if self.first_token_is_command {
            self.positional.first().map(String::as_str)
        } else {
            None
        }
    }

    /// Positional arguments, excluding the reserved command slot.
    pub fn anonymous_args(&self) -> &[String] {
        let skip = usize::from(self.first_token_is_command);
        self.positional.get(skip..).unwrap_or_default()
    }

    pub fn anonymous_count(&self) -> usize {
        self.anonymous_args().len()
    }

    pub fn named_count(&self) -> usize {
        self.named.len()
    }

    /// True when there are no flags and no positional values besides the command slot.
    pub fn is_arg_empty(&self) -> bool {
        self.named.is_empty() && self.anonymous_args().is_empty()
    }

    /// True if any of the given keys was supplied as a flag, with or without a value.
    pub fn contains_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.named.contains_key(*key))
    }

    /// Named arguments sorted by key.
    pub fn named_sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self
            .named
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        pairs.sort();
        pairs
    }

    // --- Typed access ---

    /// Starts a lookup of a named argument.
    pub fn get<'a>(&'a self, key: &'a str) -> NamedLookup<'a> {
        NamedLookup {
            args: self,
            key,
            abbrev: false,
        }
    }

    /// Starts a lookup of the anonymous argument at `index`.
    pub fn at(&self, index: usize) -> PositionalLookup<'_> {
        PositionalLookup { args: self, index }
    }
}

impl fmt::Display for ArgumentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}{{", self.positional)?;
        for (i, (key, value)) in self.named_sorted().into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}")
    }
}

/// A pending lookup of a named argument. Consumed by one of the typed terminals.
#[derive(Debug, Clone, Copy)]
pub struct NamedLookup<'a> {
    args: &'a ArgumentSet,
    key: &'a str,
    abbrev: bool,
}

impl<'a> NamedLookup<'a> {
    /// Enables the first-character fallback: `filename` also matches `-f` when
    /// `--filename` itself was not supplied or was given no value.
    pub fn abbrev(mut self) -> Self {
        self.abbrev = true;
        self
    }

    /// The raw value, if the flag (or its abbreviation) was supplied.
    pub fn raw(&self) -> Option<&'a str> {
        let full = self.args.named.get(self.key).map(String::as_str);
        if !self.abbrev || self.key.chars().count() <= 1 || full.is_some_and(|v| !v.is_empty()) {
            return full;
        }
        let Some(first) = self.key.chars().next() else {
            return full;
        };
        let mut buf = [0; 4];
        let short: &str = first.encode_utf8(&mut buf);
        self.args.named.get(short).map(String::as_str).or(full)
    }

    pub fn is_present(&self) -> bool {
        self.raw().is_some()
    }

    pub fn string(self) -> StringValue {
        StringValue::from_named(self.key, self.raw())
    }

    pub fn int(self) -> IntValue {
        IntValue::from_named(self.key, self.raw())
    }

    pub fn boolean(self) -> BoolValue {
        BoolValue::from_named(self.key, self.raw())
    }
}

/// A pending lookup of an anonymous argument by index.
#[derive(Debug, Clone, Copy)]
pub struct PositionalLookup<'a> {
    args: &'a ArgumentSet,
    index: usize,
}

impl<'a> PositionalLookup<'a> {
    pub fn raw(&self) -> Option<&'a str> {
        self.args
            .anonymous_args()
            .get(self.index)
            .map(String::as_str)
    }

    pub fn string(self) -> StringValue {
        StringValue::from_positional(self.index, self.raw())
    }

    pub fn int(self) -> IntValue {
        IntValue::from_positional(self.index, self.raw())
    }

    pub fn boolean(self) -> BoolValue {
        BoolValue::from_positional(self.index, self.raw())
    }
}

// MARK: --- UNIT TESTS ---
