use clap::Parser;

pub mod console;
pub mod dispatcher;
pub mod handlers;

/// Builds the color-aware help text at runtime from the `cli.help.template` message.
fn build_help_string() -> &'static str {
    let use_colors = colored::control::SHOULD_COLORIZE.should_colorize();

    let template = t!("cli.help.template");

    let title = if use_colors { "\x1b[1;33m" } else { "" }; // Bold Yellow
    let hl = if use_colors { "\x1b[1;36m" } else { "" }; // Bold Cyan
    let cmd = if use_colors { "\x1b[36m" } else { "" }; // Cyan
    let dim = if use_colors { "\x1b[2m" } else { "" };
    let reset = if use_colors { "\x1b[0m" } else { "" };

    let formatted_string = template
        .replace("<title>", title)
        .replace("</title>", reset)
        .replace("<hl>", hl)
        .replace("</hl>", reset)
        .replace("<cmd>", cmd)
        .replace("</cmd>", reset)
        .replace("<dim>", dim)
        .replace("</dim>", reset);

    Box::leak(formatted_string.into_boxed_str())
}

/// spycon: an interactive console with a pluggable command registry.
#[derive(Parser, Debug, Default)]
#[command(
    author,
    version,
    about,
    help_template = { build_help_string() },
    styles = clap::builder::Styles::styled()
        .header(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .usage(clap::builder::styling::AnsiColor::Yellow.on_default().bold())
        .literal(clap::builder::styling::AnsiColor::Cyan.on_default().bold())
        .placeholder(clap::builder::styling::AnsiColor::Green.on_default()),
)]
pub struct Cli {
    /// Directory holding `settings.toml`, `aliases.toml` and the files commands read
    /// and write. `~` and environment variables are expanded.
    #[arg(long, short = 'w', value_name = "DIR")]
    pub workdir: Option<String>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let cli = Cli::try_parse_from(["spycon", "--workdir", "~/data", "--no-color"]).unwrap();
        assert_eq!(cli.workdir.as_deref(), Some("~/data"));
        assert!(cli.no_color);

        let cli = Cli::try_parse_from(["spycon"]).unwrap();
        assert!(cli.workdir.is_none());
        assert!(!cli.no_color);
    }

    #[test]
    fn test_rejects_unknown_arguments() {
        assert!(Cli::try_parse_from(["spycon", "extra"]).is_err());
    }
}
