// src/cli/handlers/save.rs

use crate::{
    cli::handlers::commons,
    core::arg_parser::ArgumentSet,
    extension::{Command, ExtensionContext},
    models::ParamDesc,
};
use anyhow::{Context, Result};
use colored::*;
use std::io::Write;

/// Writes text into a new file in the working directory. Existing files are kept and a
/// numbered name is chosen instead.
#[derive(Debug, Default)]
pub struct SaveCommand;

impl SaveCommand {
    pub fn create() -> Box<dyn Command> {
        Box::new(Self)
    }
}

impl Command for SaveCommand {
    fn run(&mut self, context: &mut dyn ExtensionContext, args: &ArgumentSet) -> Result<()> {
        let file = commons::file_argument(args)?;
        let text = args
            .anonymous_args()
            .get(1..)
            .unwrap_or_default()
            .join(" ");
        let newline = args.contains_any(&["append-newline", "a"]);

        let (path, mut writer) = context.writer(&file)?;
        writer
            .write_all(text.as_bytes())
            .and_then(|()| if newline { writer.write_all(b"\n") } else { Ok(()) })
            .and_then(|()| writer.flush())
            .with_context(|| format!("Failed to write '{}'", path.display()))?;

        log::info!("Saved {} byte(s) to '{}'", text.len(), path.display());
        writeln!(
            context.out(),
            "{}",
            format!(t!("save.success"), path = path.display()).green()
        )?;
        Ok(())
    }

    fn param_desc(&self) -> ParamDesc {
        ParamDesc::new()
            .main(t!("save.param.main"))
            .flag("-a, --append-newline", t!("save.param.append_newline"))
    }

    fn no_value_flags(&self) -> &[&'static str] {
        &["append-newline", "a"]
    }
}
