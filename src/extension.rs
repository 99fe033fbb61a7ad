//! # Extension contract
//!
//! Everything a console command needs to know about the console: the [`Command`]
//! trait it implements and the [`ExtensionContext`] it is handed.
//!
//! Commands are registered at startup as `(name, factory)` pairs. The registry owns the
//! command for the whole session; the context is only ever lent to it, once through
//! [`Command::attach`] right after construction and again for every [`Command::run`].

use crate::{
    core::{arg_parser::ArgumentSet, parameters::ArgumentError},
    models::ParamDesc,
};
use anyhow::Result;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;

/// A sub-command that can be registered with the console.
pub trait Command {
    /// Called once, when the command is placed in the registry.
    fn attach(&mut self, _context: &dyn ExtensionContext) {}

    /// Executes the command. Any error is reported by the console, which then
    /// continues with the next line.
    fn run(&mut self, context: &mut dyn ExtensionContext, args: &ArgumentSet) -> Result<()>;

    /// Parameter descriptions shown by `help <command>`.
    fn param_desc(&self) -> ParamDesc {
        ParamDesc::default()
    }

    /// Flags that never consume the following token as their value.
    fn no_value_flags(&self) -> &[&'static str] {
        &[]
    }

    /// Display label, by default the implementing type's name.
    fn name(&self) -> &str {
        let full = std::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }
}

/// A factory producing a fresh command instance.
pub type CommandFactory = fn() -> Box<dyn Command>;

/// What the console exposes to a running command.
pub trait ExtensionContext {
    fn property(&self, key: &str) -> Option<&str>;

    fn contains(&self, key: &str) -> bool;

    /// Like [`Self::property`], but absent or empty values are an [`ArgumentError`].
    fn property_not_empty(&self, key: &str) -> Result<&str, ArgumentError> {
        match self.property(key) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ArgumentError::MissingProperty {
                key: key.to_string(),
            }),
        }
    }

    /// Looks up `<namespace>.<name>`, falling back to `db.<name>`.
    fn param_value(&self, namespace: &str, name: &str) -> Option<&str>;

    fn param_value_not_empty(&self, namespace: &str, name: &str) -> Result<&str, ArgumentError> {
        match self.param_value(namespace, name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ArgumentError::MissingProperty {
                key: format!("{}.{}", namespace, name),
            }),
        }
    }

    /// Opens a text file relative to the working directory.
    fn reader(&self, file_name: &str) -> Result<BufReader<File>>;

    /// Creates a text file relative to the working directory, choosing a new name
    /// rather than overwriting an existing file.
    fn writer(&self, file_name: &str) -> Result<(PathBuf, BufWriter<File>)>;

    /// The output channel.
    fn out(&mut self) -> &mut dyn Write;

    /// Writes a line to the error channel.
    fn error(&mut self, message: &str);
}
