// src/cli/handlers/args.rs

use crate::{
    core::arg_parser::ArgumentSet,
    extension::{Command, ExtensionContext},
    models::ParamDesc,
};
use anyhow::Result;
use colored::*;

/// Prints how the console parsed its arguments. Useful for checking quoting and aliases.
#[derive(Debug, Default)]
pub struct ArgsCommand;

impl ArgsCommand {
    pub fn create() -> Box<dyn Command> {
        Box::new(Self)
    }
}

impl Command for ArgsCommand {
    fn run(&mut self, context: &mut dyn ExtensionContext, args: &ArgumentSet) -> Result<()> {
        let verbose = args.get("verbose").abbrev().is_present();
        let out = context.out();
        writeln!(out, "{}", args)?;
        if !verbose {
            return Ok(());
        }

        for (index, value) in args.anonymous_args().iter().enumerate() {
            writeln!(out, "  {:<12} {}", format!("#{}", index).blue(), value)?;
        }
        for (key, value) in args.named_sorted() {
            let shown = if value.is_empty() {
                t!("args.label.no_value").dimmed().to_string()
            } else {
                value.to_string()
            };
            writeln!(out, "  {:<12} {}", format!("--{}", key).blue(), shown)?;
        }
        Ok(())
    }

    fn param_desc(&self) -> ParamDesc {
        ParamDesc::new()
            .main(t!("args.param.main"))
            .flag("-v, --verbose", t!("args.param.verbose"))
    }

    fn no_value_flags(&self) -> &[&'static str] {
        &["verbose", "v"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::commons::test_support::test_session;

    #[test]
    fn test_prints_parsed_set() {
        let mut ts = test_session();
        let mut command = ArgsCommand;
        let args = ArgumentSet::of("a \"b c\" -n 2", false, command.no_value_flags());
        command.run(&mut ts.session, &args).unwrap();
        assert_eq!(ts.out.text(), "[\"a\", \"b c\"]{n=2}\n");
    }

    #[test]
    fn test_verbose_lists_every_argument() {
        let mut ts = test_session();
        let mut command = ArgsCommand;
        let args = ArgumentSet::of("--verbose file -x", false, command.no_value_flags());
        command.run(&mut ts.session, &args).unwrap();

        let out = ts.out.text();
        assert!(out.contains("#0"), "{out}");
        assert!(out.contains("file"), "{out}");
        assert!(out.contains("--x"), "{out}");
        assert!(out.contains("--verbose"), "{out}");
    }
}
