// src/constants.rs

/// The settings file looked up in the working directory.
pub const SETTINGS_FILENAME: &str = "settings.toml";

/// The alias file looked up in the working directory.
pub const ALIASES_FILENAME: &str = "aliases.toml";

/// Settings used when the working directory has no `settings.toml`.
pub const BUNDLED_SETTINGS: &str = include_str!("../resources/settings.toml");

/// Aliases always loaded before the project-local `aliases.toml`.
pub const BUNDLED_ALIASES: &str = include_str!("../resources/aliases.toml");

/// Name shown when the bundled configuration is in use.
pub const BUNDLED_SOURCE: &str = "<bundled>";

/// Prompt printed before each read, unless `console.prompt` overrides it.
pub const DEFAULT_PROMPT: &str = "spy>";

/// Setting key overriding the prompt.
pub const PROMPT_SETTING: &str = "console.prompt";

/// Extension tried by file readers when the plain name does not exist.
pub const TEXT_EXTENSION: &str = "txt";

/// Column widths used by the help tables.
pub const COMMAND_COLUMN_WIDTH: usize = 16;
pub const PARAM_COLUMN_WIDTH: usize = 24;
