use crate::{
    constants::{COMMAND_COLUMN_WIDTH, PARAM_COLUMN_WIDTH},
    core::{arg_parser::ArgumentSet, commons::pad_right, parameters::ArgumentError},
    dev_utils,
    extension::{Command, CommandFactory, ExtensionContext},
};
use anyhow::Result;
use colored::*;
use thiserror::Error;

/// The command name intercepted before registry lookup.
pub const HELP_COMMAND: &str = "help";

/// Names handled by the console itself; registering them has no visible effect.
const RESERVED_NAMES: &[&str] = &["help", "env", "alias", "set", "q", "exit"];

/// Mistakes in what the user typed. Reported, never fatal.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid command: {0}")]
    UnknownCommand(String),
    #[error("malformed assignment '{0}', expected: set <key>=<value>")]
    MalformedSet(String),
    #[error(transparent)]
    Argument(#[from] ArgumentError),
}

/// What happened to a dispatched line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    Help,
    Executed,
    UnknownCommand,
    Failed,
}

// --- Command Definition and Registry ---

/// A registered command and the name it answers to.
struct CommandEntry {
    name: String,
    handler: Box<dyn Command>,
}

/// Name-to-handler mapping, kept in registration order.
pub struct Registry {
    entries: Vec<CommandEntry>,
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Instantiates every `(name, factory)` pair and binds it to `context`.
    pub fn build(definitions: &[(&str, CommandFactory)], context: &dyn ExtensionContext) -> Self {
        let mut registry = Self::new();
        for (name, factory) in definitions {
            registry.register(name, factory(), context);
        }
        registry
    }

    /// Binds `handler` to `context` and stores it under `name`. A second
    /// registration under the same name replaces the first one in place.
    pub fn register(
        &mut self,
        name: &str,
        mut handler: Box<dyn Command>,
        context: &dyn ExtensionContext,
    ) {
        if RESERVED_NAMES.contains(&name) {
            log::warn!("Command '{}' is shadowed by a built-in console command.", name);
        }
        handler.attach(context);
        log::debug!("Registered command '{}' ({})", name, handler.name());

        if let Some(entry) = self.entries.iter_mut().find(|e| e.name == name) {
            log::warn!("Command '{}' registered twice; the last one wins.", name);
            entry.handler = handler;
        } else {
            self.entries.push(CommandEntry {
                name: name.to_string(),
                handler,
            });
        }
    }

    /// Finds a command by its registered name.
    pub fn find(&self, name: &str) -> Option<&dyn Command> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.handler.as_ref())
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Box<dyn Command>> {
        self.entries
            .iter_mut()
            .find(|e| e.name == name)
            .map(|e| &mut e.handler)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Routes one already alias-resolved command line.
    ///
    /// Only failures of the output channel are returned as errors; unknown commands and
    /// handler failures are reported to the user and end up in the outcome.
    pub fn dispatch(
        &mut self,
        context: &mut dyn ExtensionContext,
        name: &str,
        tokens: &[String],
    ) -> Result<DispatchOutcome> {
        log::debug!("Dispatching '{}' with {:?}", name, tokens);

        if name.eq_ignore_ascii_case(HELP_COMMAND) {
            match tokens {
                [command] if self.contains(command) => self.print_command_help(context, command)?,
                _ => self.print_summary(context)?,
            }
            return Ok(DispatchOutcome::Help);
        }

        let Some(handler) = self.find_mut(name) else {
            report_input_error(context, &InputError::UnknownCommand(name.to_string()))?;
            return Ok(DispatchOutcome::UnknownCommand);
        };

        let args = ArgumentSet::new(tokens, false, handler.no_value_flags());
        log::debug!("Executing '{}' {}", name, args);

        let _timer = dev_utils::BlockTimer::new(format!("command '{}'", name));
        match handler.run(context, &args) {
            Ok(()) => Ok(DispatchOutcome::Executed),
            Err(e) => {
                report_failure(context, name, &e);
                Ok(DispatchOutcome::Failed)
            }
        }
    }

    // --- Help ---

    /// Prints the built-in commands followed by every registered command.
    pub fn print_summary(&self, context: &mut dyn ExtensionContext) -> Result<()> {
        let out = context.out();
        writeln!(out, "{}", t!("help.builtins"))?;
        for entry in &self.entries {
            writeln!(
                out,
                "{}\t{}",
                pad_right(&entry.name, COMMAND_COLUMN_WIDTH).cyan(),
                entry.handler.name()
            )?;
        }
        Ok(())
    }

    /// Prints the display name, a usage line and the parameter table of `name`.
    fn print_command_help(&self, context: &mut dyn ExtensionContext, name: &str) -> Result<()> {
        let Some(handler) = self.find(name) else {
            return Ok(());
        };
        let desc = handler.param_desc();
        let out = context.out();

        writeln!(out, "{}", handler.name().bold())?;

        let mut usage = name.to_string();
        for (flag, _) in desc.flags() {
            usage.push_str(&format!(" [{}]", flag));
        }
        if let Some(main) = desc.main_param() {
            usage.push_str(&format!(" <{}>", main));
        }
        writeln!(out, "{}", usage)?;

        for (flag, description) in desc.flags() {
            writeln!(out, "{}\t{}", pad_right(flag, PARAM_COLUMN_WIDTH), description)?;
        }
        Ok(())
    }
}

// --- Error reporting ---

/// Writes a user input error to the output channel.
pub fn report_input_error(context: &mut dyn ExtensionContext, error: &InputError) -> Result<()> {
    writeln!(context.out(), "{}", error.to_string().yellow())?;
    Ok(())
}

/// Reports a failed command on the error channel. Missing arguments are shown as input
/// errors; anything else is logged with its full chain.
fn report_failure(context: &mut dyn ExtensionContext, name: &str, error: &anyhow::Error) {
    if let Some(arg_error) = error.downcast_ref::<ArgumentError>() {
        log::debug!("Command '{}' rejected its arguments: {}", name, arg_error);
        context.error(&format!("{} {}", t!("dispatch.error.input").yellow().bold(), arg_error));
        return;
    }

    log::error!("Command '{}' failed: {:?}", name, error);
    context.error(&format!(
        "{} {:#}",
        format!(t!("dispatch.error.failed"), command = name).red().bold(),
        error
    ));
}

// MARK: --- UNIT TESTS ---

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::commons::test_support::test_session;

    struct Named(&'static str);

    impl Command for Named {
        fn run(&mut self, context: &mut dyn ExtensionContext, args: &ArgumentSet) -> Result<()> {
            writeln!(context.out(), "{} {}", self.0, args)?;
            Ok(())
        }

        fn no_value_flags(&self) -> &[&'static str] {
            &["quiet"]
        }
    }

    fn named_factory() -> Box<dyn Command> {
        Box::new(Named("factory"))
    }

    #[test]
    fn test_build_keeps_registration_order() {
        let ts = test_session();
        let registry = Registry::build(
            &[("zeta", named_factory as CommandFactory), ("alpha", named_factory)],
            &ts.session,
        );
        assert_eq!(registry.names().collect::<Vec<_>>(), ["zeta", "alpha"]);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_register_twice_replaces_in_place() {
        let mut ts = test_session();
        let mut registry = Registry::new();
        registry.register("a", Box::new(Named("first")), &ts.session);
        registry.register("b", Box::new(Named("other")), &ts.session);
        registry.register("a", Box::new(Named("second")), &ts.session);
        assert_eq!(registry.names().collect::<Vec<_>>(), ["a", "b"]);

        let outcome = registry
            .dispatch(&mut ts.session, "a", &["x".to_string()])
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Executed);
        assert_eq!(ts.out.text(), "second [\"x\"]{}\n");
    }

    #[test]
    fn test_dispatch_applies_no_value_flags() {
        let mut ts = test_session();
        let mut registry = Registry::new();
        registry.register("a", Box::new(Named("n")), &ts.session);

        let tokens: Vec<String> = ["--quiet", "file"].iter().map(|s| s.to_string()).collect();
        registry.dispatch(&mut ts.session, "a", &tokens).unwrap();
        assert_eq!(ts.out.text(), "n [\"file\"]{quiet=}\n");
    }

    #[test]
    fn test_unknown_command_is_an_outcome() {
        let mut ts = test_session();
        let mut registry = Registry::new();
        let outcome = registry.dispatch(&mut ts.session, "zzz", &[]).unwrap();
        assert_eq!(outcome, DispatchOutcome::UnknownCommand);
        assert_eq!(ts.out.text(), "invalid command: zzz\n");
        assert!(ts.err.text().is_empty());
    }

    #[test]
    fn test_help_is_intercepted() {
        let mut ts = test_session();
        let mut registry = Registry::new();
        registry.register(HELP_COMMAND, Box::new(Named("shadowed")), &ts.session);

        let outcome = registry.dispatch(&mut ts.session, "help", &[]).unwrap();
        assert_eq!(outcome, DispatchOutcome::Help);
        assert!(!ts.out.text().contains("shadowed ["));
        assert!(ts.out.text().contains("Named"));
    }

    #[test]
    fn test_help_matches_any_case() {
        let mut ts = test_session();
        let mut registry = Registry::new();
        registry.register("head", Box::new(Named("n")), &ts.session);

        let outcome = registry
            .dispatch(&mut ts.session, "HELP", &["head".to_string()])
            .unwrap();
        assert_eq!(outcome, DispatchOutcome::Help);
        let out = ts.out.text();
        assert!(out.starts_with("Named\nhead\n"), "{out}");
        assert!(!out.contains("invalid command"), "{out}");
    }
}
