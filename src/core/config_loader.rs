//! # Config Loader
//!
//! Loads the two startup configuration sources of a console session:
//!
//! - **Settings** (`settings.toml`): the project-local file if the working directory has
//!   one, otherwise the bundled default. The two are alternatives, not layers. Tables
//!   are flattened into dotted keys, so `[db] user = "root"` becomes `db.user`.
//! - **Aliases** (`aliases.toml`): the bundled default is always loaded first and the
//!   project-local file, when present, is overlaid on top of it.
//!
//! Any failure here is a [`ConfigError`], the one error class allowed to stop the
//! console from starting.
use crate::{
    constants::{ALIASES_FILENAME, BUNDLED_ALIASES, BUNDLED_SETTINGS, BUNDLED_SOURCE, SETTINGS_FILENAME},
    core::{alias::AliasTable, environment::Environment},
    models::{AliasesConfig, SettingsConfig},
};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse '{origin}': {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },
}

/// Settings together with the place they were read from.
#[derive(Debug, Clone)]
pub struct LoadedSettings {
    pub origin: String,
    pub environment: Environment,
}

/// Reads configuration files relative to a working directory.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
}

impl ConfigLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Loads the project-local settings file, falling back to the bundled one.
    pub fn load_settings(&self) -> Result<LoadedSettings, ConfigError> {
        let local = self.root.join(SETTINGS_FILENAME);
        let (origin, content) = if local.is_file() {
            let origin = local.display().to_string();
            let content = read(&local)?;
            (origin, content)
        } else {
            log::debug!("No {} in {}, using bundled settings.", SETTINGS_FILENAME, self.root.display());
            (BUNDLED_SOURCE.to_string(), BUNDLED_SETTINGS.to_string())
        };

        let environment = parse_settings(&content, &origin)?;
        log::info!("Loaded {} setting(s) from {}", environment.len(), origin);
        Ok(LoadedSettings {
            origin,
            environment,
        })
    }

    /// Loads the bundled aliases, then overlays the project-local file if present.
    pub fn load_aliases(&self) -> Result<AliasTable, ConfigError> {
        let mut table = AliasTable::new();
        table.extend(parse_aliases(BUNDLED_ALIASES, BUNDLED_SOURCE)?.aliases);

        let local = self.root.join(ALIASES_FILENAME);
        if local.is_file() {
            let origin = local.display().to_string();
            let content = read(&local)?;
            table.extend(parse_aliases(&content, &origin)?.aliases);
        }

        log::info!("Loaded {} alias(es)", table.len());
        Ok(table)
    }
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.display().to_string(),
        source: e,
    })
}

/// Parses settings TOML into a flat [`Environment`].
pub fn parse_settings(content: &str, origin: &str) -> Result<Environment, ConfigError> {
    let config: SettingsConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        source: e,
    })?;

    let mut values = BTreeMap::new();
    flatten_table("", &config.table, &mut values);
    Ok(Environment::from_map(values))
}

/// Parses an alias file.
pub fn parse_aliases(content: &str, origin: &str) -> Result<AliasesConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::Parse {
        origin: origin.to_string(),
        source: e,
    })
}

/// Flattens nested tables into dotted keys. Strings keep their raw text; other values
/// are stored in their TOML form (`10`, `true`, `[1, 2]`).
fn flatten_table(prefix: &str, table: &toml::Table, out: &mut BTreeMap<String, String>) {
    for (key, value) in table {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        match value {
            toml::Value::Table(nested) => flatten_table(&full_key, nested, out),
            toml::Value::String(s) => {
                out.insert(full_key, s.clone());
            }
            other => {
                out.insert(full_key, other.to_string());
            }
        }
    }
}
