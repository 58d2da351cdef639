//! Mock command shell

use core::fmt::Write;

use heapless::Vec;

use crate::platform::traits::{CommandError, CommandHandler, CommandRegistry, CommandSpec};

const MAX_COMMANDS: usize = 8;

/// Mock shell
///
/// Stores registrations and dispatches command lines the way the device
/// shell does: the longest registered command path wins and the remaining
/// words are passed as arguments.
pub struct MockCommandRegistry {
    commands: Vec<(CommandSpec, &'static dyn CommandHandler), MAX_COMMANDS>,
}

impl MockCommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    pub fn spec(&self, parent: Option<&str>, name: &str) -> Option<CommandSpec> {
        self.commands
            .iter()
            .map(|(spec, _)| *spec)
            .find(|spec| spec.name == name && spec.parent == parent)
    }

    /// Run `line`, e.g. `["boot", "status"]`.
    pub fn execute(&self, line: &[&str], out: &mut dyn Write) -> Result<(), CommandError> {
        let (first, rest) = line.split_first().ok_or(CommandError::UnknownCommand)?;

        let sub = rest.first().and_then(|word| {
            self.commands
                .iter()
                .find(|(spec, _)| spec.parent == Some(*first) && spec.name == *word)
        });
        let ((spec, handler), args) = match sub {
            Some(entry) => (entry, &rest[1..]),
            None => (
                self.commands
                    .iter()
                    .find(|(spec, _)| spec.parent.is_none() && spec.name == *first)
                    .ok_or(CommandError::UnknownCommand)?,
                rest,
            ),
        };

        if !spec.accepts(args.len()) {
            return Err(CommandError::ArgumentCount {
                given: args.len(),
                min: spec.min_args,
                max: spec.max_args,
            });
        }
        handler.execute(out, args)
    }
}

impl Default for MockCommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry for MockCommandRegistry {
    fn register(
        &mut self,
        spec: CommandSpec,
        handler: &'static dyn CommandHandler,
    ) -> Result<(), CommandError> {
        self.commands
            .push((spec, handler))
            .map_err(|_| CommandError::TableFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    impl CommandHandler for Echo {
        fn execute(&self, out: &mut dyn Write, args: &[&str]) -> Result<(), CommandError> {
            write!(out, "{}", args.len())?;
            Ok(())
        }
    }

    static ECHO: Echo = Echo;

    fn spec(name: &'static str, parent: Option<&'static str>, max_args: usize) -> CommandSpec {
        CommandSpec {
            name,
            parent,
            title: "",
            min_args: 0,
            max_args,
        }
    }

    #[test]
    fn test_dispatch_prefers_subcommand() {
        let mut shell = MockCommandRegistry::new();
        shell.register(spec("top", None, 1), &ECHO).unwrap();
        shell.register(spec("sub", Some("top"), 0), &ECHO).unwrap();

        let mut out = std::string::String::new();
        shell.execute(&["top", "sub"], &mut out).unwrap();
        assert_eq!(out, "0");

        out.clear();
        shell.execute(&["top", "other"], &mut out).unwrap();
        assert_eq!(out, "1");
    }

    #[test]
    fn test_argument_count_checked() {
        let mut shell = MockCommandRegistry::new();
        shell.register(spec("top", None, 0), &ECHO).unwrap();

        let mut out = std::string::String::new();
        assert_eq!(
            shell.execute(&["top", "x"], &mut out),
            Err(CommandError::ArgumentCount {
                given: 1,
                min: 0,
                max: 0
            })
        );
        assert_eq!(
            shell.execute(&["nope"], &mut out),
            Err(CommandError::UnknownCommand)
        );
    }

    #[test]
    fn test_table_full() {
        let mut shell = MockCommandRegistry::new();
        for _ in 0..MAX_COMMANDS {
            shell.register(spec("x", None, 0), &ECHO).unwrap();
        }
        assert_eq!(
            shell.register(spec("x", None, 0), &ECHO),
            Err(CommandError::TableFull)
        );
    }
}
