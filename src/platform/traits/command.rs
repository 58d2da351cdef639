//! Shell command registration interface

use core::fmt::{self, Write};

/// Shell command description
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Command word
    pub name: &'static str,
    /// Parent command word, `None` for top-level commands
    pub parent: Option<&'static str>,
    /// One-line help text
    pub title: &'static str,
    pub min_args: usize,
    pub max_args: usize,
}

impl CommandSpec {
    pub fn accepts(&self, argc: usize) -> bool {
        (self.min_args..=self.max_args).contains(&argc)
    }
}

/// Command execution errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// No command registered under that name
    UnknownCommand,
    /// Argument count outside the registered range
    ArgumentCount { given: usize, min: usize, max: usize },
    /// No free registration slot
    TableFull,
    /// Output sink rejected the text
    Output,
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand => write!(f, "Unrecognised command"),
            CommandError::ArgumentCount { given, min, max } => write!(
                f,
                "Wrong number of arguments: {} given, {}..={} expected",
                given, min, max
            ),
            CommandError::TableFull => write!(f, "Command table full"),
            CommandError::Output => write!(f, "Output error"),
        }
    }
}

impl From<fmt::Error> for CommandError {
    fn from(_: fmt::Error) -> Self {
        CommandError::Output
    }
}

/// Executes a registered command.
pub trait CommandHandler: Sync {
    fn execute(&self, out: &mut dyn Write, args: &[&str]) -> Result<(), CommandError>;
}

/// Shell that commands register into.
pub trait CommandRegistry {
    fn register(
        &mut self,
        spec: CommandSpec,
        handler: &'static dyn CommandHandler,
    ) -> Result<(), CommandError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts() {
        let spec = CommandSpec {
            name: "boot",
            parent: None,
            title: "BOOT framework",
            min_args: 0,
            max_args: 1,
        };
        assert!(spec.accepts(0));
        assert!(spec.accepts(1));
        assert!(!spec.accepts(2));
    }

    #[test]
    fn test_error_display() {
        let err = CommandError::ArgumentCount {
            given: 2,
            min: 0,
            max: 1,
        };
        assert_eq!(
            format!("{}", err),
            "Wrong number of arguments: 2 given, 0..=1 expected"
        );
        assert_eq!(CommandError::from(fmt::Error), CommandError::Output);
    }
}
