// src/core/alias.rs

//! # Command aliases
//!
//! An alias maps a short command name to a replacement command line, e.g.
//! `ll = "list -l"`. Expansion happens once, right after tokenization: the
//! replacement is tokenized and prepended to the remaining tokens. A replacement that
//! itself starts with an alias name is dispatched literally (no recursion).

use crate::core::tokenizer;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: BTreeMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overlays `layer` on top of the current entries. Later layers win on conflict.
    pub fn extend<I, K, V>(&mut self, layer: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, replacement) in layer {
            let name = name.into();
            let replacement = replacement.into();
            if let Some(previous) = self.entries.get(&name) {
                log::debug!(
                    "Alias '{}' overridden: '{}' -> '{}'",
                    name,
                    previous,
                    replacement
                );
            }
            self.entries.insert(name, replacement);
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries sorted by alias name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Rewrites `first` + `rest` into the effective command and its tokens.
    ///
    /// Returns `None` as command only when an alias expands to an empty line and
    /// there is nothing left to dispatch.
    pub fn resolve(&self, first: &str, rest: Vec<String>) -> (Option<String>, Vec<String>) {
        let Some(replacement) = self.get(first) else {
            return (Some(first.to_string()), rest);
        };

        let mut tokens = tokenizer::tokenize(replacement, ' ');
        log::debug!("Alias '{}' expands to {:?}", first, tokens);
        tokens.extend(rest);

        if tokens.is_empty() {
            return (None, tokens);
        }
        let command = tokens.remove(0);
        (Some(command), tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(pairs: &[(&str, &str)]) -> AliasTable {
        let mut table = AliasTable::new();
        table.extend(pairs.iter().copied());
        table
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_alias_expands_and_prepends() {
        let aliases = table(&[("ll", "list -l")]);
        let (command, tokens) = aliases.resolve("ll", strings(&["foo"]));
        assert_eq!(command.as_deref(), Some("list"));
        assert_eq!(tokens, strings(&["-l", "foo"]));
    }

    #[test]
    fn test_unknown_name_is_unchanged() {
        let aliases = table(&[("ll", "list -l")]);
        let (command, tokens) = aliases.resolve("list", strings(&["-a"]));
        assert_eq!(command.as_deref(), Some("list"));
        assert_eq!(tokens, strings(&["-a"]));
    }

    #[test]
    fn test_expansion_is_not_recursive() {
        let aliases = table(&[("a", "b -x"), ("b", "c -y")]);
        let (command, tokens) = aliases.resolve("a", vec![]);
        assert_eq!(command.as_deref(), Some("b"));
        assert_eq!(tokens, strings(&["-x"]));
    }

    #[test]
    fn test_quoted_replacement() {
        let aliases = table(&[("greet", "say \"hello world\"")]);
        let (command, tokens) = aliases.resolve("greet", strings(&["now"]));
        assert_eq!(command.as_deref(), Some("say"));
        assert_eq!(tokens, strings(&["hello world", "now"]));
    }

    #[test]
    fn test_empty_replacement_uses_next_token() {
        let aliases = table(&[("nop", "")]);
        assert_eq!(aliases.resolve("nop", vec![]), (None, vec![]));
        let (command, tokens) = aliases.resolve("nop", strings(&["list", "-l"]));
        assert_eq!(command.as_deref(), Some("list"));
        assert_eq!(tokens, strings(&["-l"]));
    }

    #[test]
    fn test_later_layer_wins() {
        let mut aliases = table(&[("ll", "list -l"), ("h", "help")]);
        aliases.extend([("ll", "list -la")]);
        assert_eq!(aliases.get("ll"), Some("list -la"));
        assert_eq!(aliases.get("h"), Some("help"));
        assert_eq!(aliases.len(), 2);
    }
}
