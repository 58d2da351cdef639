//! `boot` shell commands

use core::fmt::Write;

use super::{BootDiagnostics, RestartMonitor};
use crate::platform::traits::{CommandError, CommandHandler, CommandRegistry, CommandSpec, Platform};

pub const BOOT_COMMAND: CommandSpec = CommandSpec {
    name: "boot",
    parent: None,
    title: "BOOT framework",
    min_args: 0,
    max_args: 1,
};

pub const BOOT_STATUS_COMMAND: CommandSpec = CommandSpec {
    name: "status",
    parent: Some("boot"),
    title: "Show boot system status",
    min_args: 0,
    max_args: 0,
};

/// Handler behind `boot` and `boot status`; both print the status report.
pub struct BootCommand<'a, P: Platform> {
    diagnostics: &'a BootDiagnostics<'a, P>,
    shutdown: Option<&'a dyn RestartMonitor>,
}

impl<'a, P: Platform> BootCommand<'a, P> {
    pub fn new(
        diagnostics: &'a BootDiagnostics<'a, P>,
        shutdown: Option<&'a dyn RestartMonitor>,
    ) -> Self {
        Self { diagnostics, shutdown }
    }
}

impl<P: Platform + Sync> CommandHandler for BootCommand<'_, P> {
    fn execute(&self, out: &mut dyn Write, _args: &[&str]) -> Result<(), CommandError> {
        let restart = self.shutdown.and_then(|s| s.restart_progress());
        self.diagnostics.write_status(out, restart)?;
        Ok(())
    }
}

/// Register `boot` and `boot status` with the shell.
pub fn register_commands<C: CommandRegistry + ?Sized>(
    registry: &mut C,
    handler: &'static dyn CommandHandler,
) -> Result<(), CommandError> {
    registry.register(BOOT_COMMAND, handler)?;
    registry.register(BOOT_STATUS_COMMAND, handler)
}
