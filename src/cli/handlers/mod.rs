// src/cli/handlers/mod.rs

// Commands registered by the `spycon` binary. Embedding applications bring their own.

use crate::extension::CommandFactory;

pub mod args;
pub mod commons;
pub mod head;
pub mod save;

/// The `(name, factory)` pairs of the bundled commands, in help order.
pub fn builtin_commands() -> Vec<(&'static str, CommandFactory)> {
    vec![
        ("args", args::ArgsCommand::create as CommandFactory),
        ("head", head::HeadCommand::create as CommandFactory),
        ("save", save::SaveCommand::create as CommandFactory),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::console::Console;
    use crate::cli::handlers::commons::test_support::test_session;
    use std::fs;
    use std::io::Cursor;

    #[test]
    fn test_bundled_aliases_reach_builtin_commands() {
        let ts = test_session();
        fs::write(ts.dir.path().join("notes.txt"), "a\nb\nc\nd\ne\nf\ng\n").unwrap();

        let mut console = Console::new(ts.session, &builtin_commands());
        console.run(Cursor::new("top notes\nshow x -k v\n")).unwrap();

        let out = ts.out.text();
        assert!(out.contains("a\nb\nc\nd\ne\n"), "{out}");
        assert!(!out.contains("f\n"), "{out}");
        assert!(out.contains("[\"x\"]{k=v, verbose=}"), "{out}");
    }

    #[test]
    fn test_save_then_head_round_trip_through_console() {
        let ts = test_session();
        let mut console = Console::new(ts.session, &builtin_commands());
        console
            .run(Cursor::new("save memo first words -a\nhead memo\n"))
            .unwrap();

        assert!(ts.dir.path().join("memo").exists());
        let out = ts.out.text();
        assert!(out.contains("first words"), "{out}");
        assert!(ts.err.text().is_empty(), "{}", ts.err.text());
    }
}
