//! # The interactive console loop
//!
//! Reads one line at a time and decides, in this order, what it is:
//!
//! 1. blank: ignored.
//! 2. `q` (any case) or `exit`: stops the loop.
//! 3. a meta-command handled in-process: `help`, `env`, `env load`, `alias`,
//!    `env <key>` and `set <key>=<value>`.
//! 4. anything else: tokenized, alias-expanded and handed to the [`Registry`].
//!
//! Failures of a single line never end the session. Only an unusable input or output
//! stream does.

use crate::{
    cli::dispatcher::{InputError, Registry, report_input_error},
    constants::COMMAND_COLUMN_WIDTH,
    core::{commons::pad_right, environment::SetOutcome, tokenizer},
    extension::{Command, CommandFactory, ExtensionContext},
    state::Session,
};
use anyhow::Result;
use colored::*;
use lazy_static::lazy_static;
use regex::Regex;
use std::io::BufRead;

lazy_static! {
    static ref ENV_KEY_RE: Regex = Regex::new(r"(?i)^env\s+(\S+)$").unwrap();
    static ref SET_RE: Regex = Regex::new(r"(?i)^set(?:\s+(.*))?$").unwrap();
}

/// Where the console loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleState {
    Reading,
    Dispatching,
    Stopped,
}

/// Whether the loop keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Stop,
}

#[derive(Debug)]
pub struct Console {
    registry: Registry,
    session: Session,
    state: ConsoleState,
}

impl Console {
    /// Builds the registry from `(name, factory)` pairs, binding each command to the
    /// session.
    pub fn new(session: Session, definitions: &[(&str, CommandFactory)]) -> Self {
        let registry = Registry::build(definitions, &session);
        log::info!("Console ready with {} command(s)", registry.len());
        Self {
            registry,
            session,
            state: ConsoleState::Reading,
        }
    }

    /// Registers one more command instance.
    pub fn register(&mut self, name: &str, handler: Box<dyn Command>) {
        self.registry.register(name, handler, &self.session);
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn state(&self) -> ConsoleState {
        self.state
    }

    /// Runs the loop until end of input or an exit command.
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.state = ConsoleState::Reading;
        self.print_prompt()?;

        for line in input.lines() {
            let line = line?;
            if self.handle_line(&line)? == LineOutcome::Stop {
                break;
            }
            self.print_prompt()?;
        }

        writeln!(self.session.out())?;
        writeln!(self.session.out(), "{}", t!("console.farewell"))?;
        self.session.flush();
        self.state = ConsoleState::Stopped;
        log::debug!("Console stopped");
        Ok(())
    }

    /// Processes a single input line.
    pub fn handle_line(&mut self, raw: &str) -> Result<LineOutcome> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(LineOutcome::Continue);
        }
        if line.eq_ignore_ascii_case("q") || line == "exit" {
            return Ok(LineOutcome::Stop);
        }

        if line.eq_ignore_ascii_case("help") {
            self.registry.print_summary(&mut self.session)?;
        } else if line.eq_ignore_ascii_case("env") {
            self.show_environment()?;
        } else if line.eq_ignore_ascii_case("env load") {
            self.reload_environment()?;
        } else if line.eq_ignore_ascii_case("alias") {
            self.show_aliases()?;
        } else if let Some(caps) = ENV_KEY_RE.captures(line) {
            let key = caps.get(1).map_or("", |m| m.as_str());
            self.show_key(key)?;
        } else if let Some(caps) = SET_RE.captures(line) {
            let assignment = caps.get(1).map_or("", |m| m.as_str());
            self.set_value(assignment)?;
        } else {
            self.dispatch_line(line)?;
        }
        Ok(LineOutcome::Continue)
    }

    fn print_prompt(&mut self) -> Result<()> {
        let prompt = self.session.prompt().to_string();
        let out = self.session.out();
        write!(out, "{} ", prompt.green().bold())?;
        out.flush()?;
        Ok(())
    }

    // --- Dispatch ---

    fn dispatch_line(&mut self, line: &str) -> Result<()> {
        let mut tokens = tokenizer::tokenize(line, ' ');
        if tokens.is_empty() {
            return Ok(());
        }
        let first = tokens.remove(0);
        let (command, tokens) = self.session.aliases().resolve(&first, tokens);
        let Some(command) = command else {
            return Ok(());
        };

        self.state = ConsoleState::Dispatching;
        let outcome = self.registry.dispatch(&mut self.session, &command, &tokens);
        self.state = ConsoleState::Reading;

        log::debug!("'{}' -> {:?}", command, outcome);
        outcome.map(|_| ())
    }

    // --- Meta-commands ---

    fn show_environment(&mut self) -> Result<()> {
        let header = format!(t!("env.header"), origin = self.session.settings_origin());
        let lines: Vec<String> = self
            .session
            .environment()
            .iter()
            .map(|(key, value)| format!("{}\t{}", pad_right(key, COMMAND_COLUMN_WIDTH), value))
            .collect();

        let out = self.session.out();
        writeln!(out, "{}", header.dimmed())?;
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn show_key(&mut self, key: &str) -> Result<()> {
        let message = match self.session.environment().get(key) {
            Some(value) => format!("[{}]={}", key, value),
            None => format!(t!("env.show.absent"), key = key),
        };
        writeln!(self.session.out(), "{}", message)?;
        Ok(())
    }

    fn reload_environment(&mut self) -> Result<()> {
        let message = match self.session.reload_environment() {
            Ok(origin) => format!(t!("env.reloaded"), origin = origin),
            Err(e) => {
                log::error!("Reloading settings failed: {:?}", e);
                let message = format!("{} {:#}", t!("env.error.reload").red().bold(), e);
                self.session.error(&message);
                return Ok(());
            }
        };
        writeln!(self.session.out(), "{}", message)?;
        Ok(())
    }

    fn set_value(&mut self, assignment: &str) -> Result<()> {
        let parsed = assignment
            .split_once('=')
            .map(|(key, value)| (key.trim(), value.trim()))
            .filter(|(key, _)| !key.is_empty());
        let Some((key, value)) = parsed else {
            return report_input_error(
                &mut self.session,
                &InputError::MalformedSet(assignment.to_string()),
            );
        };

        let message = match self.session.environment_mut().set(key, value) {
            SetOutcome::Added => format!(t!("env.set.added"), key = key, value = value),
            SetOutcome::Changed { previous } => format!(
                t!("env.set.changed"),
                key = key,
                previous = previous,
                value = value
            ),
            SetOutcome::Unchanged => format!(t!("env.set.unchanged"), key = key, value = value),
        };
        log::debug!("set {}={}", key, value);
        writeln!(self.session.out(), "{}", message)?;
        Ok(())
    }

    fn show_aliases(&mut self) -> Result<()> {
        let lines: Vec<String> = self
            .session
            .aliases()
            .iter()
            .map(|(name, replacement)| {
                format!("  {} ->  {}", pad_right(name, COMMAND_COLUMN_WIDTH).cyan(), replacement)
            })
            .collect();

        let out = self.session.out();
        if lines.is_empty() {
            writeln!(out, "{}", t!("alias.info.none"))?;
            return Ok(());
        }
        writeln!(out, "{}:", t!("alias.info.header"))?;
        for line in lines {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }
}

// MARK: --- UNIT TESTS ---
