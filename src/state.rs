// src/state.rs

use crate::{
    constants::{DEFAULT_PROMPT, PROMPT_SETTING},
    core::{alias::AliasTable, config_loader::ConfigLoader, environment::Environment},
    extension::ExtensionContext,
    system::files,
};
use anyhow::Result;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// The process-wide state of a console session: settings, aliases, the working
/// directory and the two output channels.
///
/// The session is the [`ExtensionContext`] lent to every command.
pub struct Session {
    loader: ConfigLoader,
    settings_origin: String,
    environment: Environment,
    aliases: AliasTable,
    out: Box<dyn Write>,
    err: Box<dyn Write>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("root", &self.loader.root())
            .field("settings_origin", &self.settings_origin)
            .field("environment", &self.environment)
            .field("aliases", &self.aliases)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Loads settings and aliases for `root` and writes to the process' stdout/stderr.
    pub fn load(root: impl Into<PathBuf>) -> Result<Self> {
        Self::load_with_output(root, Box::new(io::stdout()), Box::new(io::stderr()))
    }

    pub fn load_with_output(
        root: impl Into<PathBuf>,
        out: Box<dyn Write>,
        err: Box<dyn Write>,
    ) -> Result<Self> {
        let loader = ConfigLoader::new(root);
        let settings = loader.load_settings()?;
        let aliases = loader.load_aliases()?;
        Ok(Self {
            loader,
            settings_origin: settings.origin,
            environment: settings.environment,
            aliases,
            out,
            err,
        })
    }

    pub fn root(&self) -> &Path {
        self.loader.root()
    }

    pub fn settings_origin(&self) -> &str {
        &self.settings_origin
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn environment_mut(&mut self) -> &mut Environment {
        &mut self.environment
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    pub fn prompt(&self) -> &str {
        self.environment
            .get(PROMPT_SETTING)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PROMPT)
    }

    /// Re-reads the settings file and replaces the environment in place.
    /// Returns where the settings came from.
    pub fn reload_environment(&mut self) -> Result<&str> {
        let settings = self.loader.load_settings()?;
        self.environment.replace(settings.environment);
        self.settings_origin = settings.origin;
        Ok(&self.settings_origin)
    }

    /// Flushes both channels, ignoring failures of an already closed terminal.
    pub fn flush(&mut self) {
        if let Err(e) = self.out.flush() {
            log::debug!("Failed to flush output: {}", e);
        }
        if let Err(e) = self.err.flush() {
            log::debug!("Failed to flush error output: {}", e);
        }
    }
}

impl ExtensionContext for Session {
    fn property(&self, key: &str) -> Option<&str> {
        self.environment.get(key)
    }

    fn contains(&self, key: &str) -> bool {
        self.environment.contains(key)
    }

    fn param_value(&self, namespace: &str, name: &str) -> Option<&str> {
        self.environment.lookup(namespace, name)
    }

    fn reader(&self, file_name: &str) -> Result<BufReader<File>> {
        Ok(files::open_reader(self.root(), file_name)?)
    }

    fn writer(&self, file_name: &str) -> Result<(PathBuf, BufWriter<File>)> {
        Ok(files::open_writer(self.root(), file_name)?)
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.out
    }

    fn error(&mut self, message: &str) {
        if let Err(e) = writeln!(self.err, "{}", message) {
            log::warn!("Failed to write to the error channel: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::commons::test_support::test_session;
    use std::fs;

    #[test]
    fn test_properties_as_seen_by_a_command() {
        let mut ts = test_session();
        let env = ts.session.environment_mut();
        env.set("db.user", "root");
        env.set("db.password", "");
        env.set("prod.user", "admin");
        let context: &dyn ExtensionContext = &ts.session;

        assert_eq!(context.property("db.user"), Some("root"));
        assert!(context.contains("db.password"));
        assert_eq!(context.property_not_empty("db.user"), Ok("root"));
        assert_eq!(
            context.property_not_empty("db.password").unwrap_err().to_string(),
            "property 'db.password' is not set"
        );
        assert!(context.property_not_empty("missing").is_err());
    }

    #[test]
    fn test_param_value_falls_back_to_db_namespace() {
        let mut ts = test_session();
        let env = ts.session.environment_mut();
        env.set("db.user", "root");
        env.set("db.url", "");
        env.set("prod.user", "admin");
        let context: &dyn ExtensionContext = &ts.session;

        assert_eq!(context.param_value("prod", "user"), Some("admin"));
        assert_eq!(context.param_value("test", "user"), Some("root"));
        assert_eq!(context.param_value("test", "port"), None);
        assert_eq!(context.param_value_not_empty("test", "user"), Ok("root"));

        let err = context.param_value_not_empty("test", "url").unwrap_err();
        assert_eq!(err.to_string(), "property 'test.url' is not set");
    }

    #[test]
    fn test_reload_replaces_environment() {
        let mut ts = test_session();
        assert_eq!(ts.session.settings_origin(), "<bundled>");
        assert_eq!(ts.session.prompt(), "spy>");

        fs::write(
            ts.dir.path().join("settings.toml"),
            "[console]\nprompt = \"db>\"\n",
        )
        .unwrap();
        ts.session.environment_mut().set("scratch", "1");
        ts.session.reload_environment().unwrap();

        assert_eq!(ts.session.prompt(), "db>");
        assert!(!ts.session.environment().contains("scratch"));
        assert!(ts.session.settings_origin().ends_with("settings.toml"));
    }
}
