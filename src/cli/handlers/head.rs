// src/cli/handlers/head.rs

use crate::{
    cli::handlers::commons,
    core::arg_parser::ArgumentSet,
    extension::{Command, ExtensionContext},
    models::ParamDesc,
};
use anyhow::Result;
use std::io::BufRead;

/// Setting that overrides the default number of lines.
const LINES_SETTING: &str = "head.lines";
const DEFAULT_LINES: i64 = 10;

/// Prints the first lines of a text file in the working directory.
#[derive(Debug, Default)]
pub struct HeadCommand;

impl HeadCommand {
    pub fn create() -> Box<dyn Command> {
        Box::new(Self)
    }

    /// `-n` wins over `--lines`; both fall back to [`default_lines`].
    fn line_count(context: &dyn ExtensionContext, args: &ArgumentSet) -> i64 {
        let short = args.get("n");
        let lookup = if short.is_present() { short } else { args.get("lines") };
        lookup.int().with_default(default_lines(context)).get()
    }
}

/// The positive `head.lines` setting, or 10.
fn default_lines(context: &dyn ExtensionContext) -> i64 {
    context
        .property(LINES_SETTING)
        .and_then(|v| v.trim().parse().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_LINES)
}

impl Command for HeadCommand {
    fn attach(&mut self, context: &dyn ExtensionContext) {
        log::debug!("head: {} line(s) by default", default_lines(context));
    }

    fn run(&mut self, context: &mut dyn ExtensionContext, args: &ArgumentSet) -> Result<()> {
        let file = commons::file_argument(args)?;
        let count = usize::try_from(Self::line_count(context, args)).unwrap_or(0);

        let reader = context.reader(&file)?;
        let out = context.out();
        for line in reader.lines().take(count) {
            writeln!(out, "{}", line?)?;
        }
        Ok(())
    }

    fn param_desc(&self) -> ParamDesc {
        ParamDesc::new()
            .main(t!("head.param.main"))
            .flag("-n, --lines <N>", t!("head.param.lines"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::handlers::commons::test_support::test_session;
    use std::fs;

    fn numbered(count: usize) -> String {
        (1..=count).map(|i| format!("line {}\n", i)).collect()
    }

    #[test]
    fn test_default_is_ten_lines() {
        let mut ts = test_session();
        fs::write(ts.dir.path().join("log.txt"), numbered(15)).unwrap();

        let mut command = HeadCommand;
        command.attach(&ts.session);
        command
            .run(&mut ts.session, &ArgumentSet::of("log.txt", false, &[]))
            .unwrap();

        let out = ts.out.text();
        assert_eq!(out.lines().count(), 10);
        assert!(out.ends_with("line 10\n"));
    }

    #[test]
    fn test_count_flags_and_txt_fallback() {
        let mut ts = test_session();
        fs::write(ts.dir.path().join("log.txt"), numbered(15)).unwrap();
        let mut command = HeadCommand;
        command.attach(&ts.session);

        command
            .run(&mut ts.session, &ArgumentSet::of("log -n 3", false, &[]))
            .unwrap();
        assert_eq!(ts.out.text(), "line 1\nline 2\nline 3\n");

        let mut ts = test_session();
        fs::write(ts.dir.path().join("log.txt"), numbered(15)).unwrap();
        command
            .run(&mut ts.session, &ArgumentSet::of("log --lines 2", false, &[]))
            .unwrap();
        assert_eq!(ts.out.text(), "line 1\nline 2\n");
    }

    #[test]
    fn test_setting_changes_default() {
        let mut ts = test_session();
        fs::write(ts.dir.path().join("log.txt"), numbered(15)).unwrap();
        ts.session.environment_mut().set("head.lines", "4");

        let mut command = HeadCommand;
        command.attach(&ts.session);
        command
            .run(&mut ts.session, &ArgumentSet::of("log.txt -n", false, &[]))
            .unwrap();
        assert_eq!(ts.out.text().lines().count(), 4);
    }

    #[test]
    fn test_non_positive_setting_keeps_builtin_default() {
        let mut ts = test_session();
        fs::write(ts.dir.path().join("log.txt"), numbered(15)).unwrap();
        ts.session.environment_mut().set("head.lines", "0");

        let mut command = HeadCommand;
        command
            .run(&mut ts.session, &ArgumentSet::of("log.txt", false, &[]))
            .unwrap();
        assert_eq!(ts.out.text().lines().count(), 10);
    }

    #[test]
    fn test_missing_file_and_argument() {
        let mut ts = test_session();
        let mut command = HeadCommand;
        command.attach(&ts.session);

        let err = command
            .run(&mut ts.session, &ArgumentSet::of("", false, &[]))
            .unwrap_err();
        assert_eq!(err.to_string(), "missing argument file");

        let err = command
            .run(&mut ts.session, &ArgumentSet::of("absent", false, &[]))
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"), "{err}");
    }
}
