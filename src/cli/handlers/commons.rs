// src/cli/handlers/commons.rs

// Shared helpers for the built-in handlers.

use crate::core::{arg_parser::ArgumentSet, parameters::ArgumentError};

/// The file name every file-based handler takes as its first anonymous argument.
pub fn file_argument(args: &ArgumentSet) -> Result<String, ArgumentError> {
    Ok(args
        .at(0)
        .string()
        .arg_name("file")
        .require_non_empty()?
        .into_string())
}
