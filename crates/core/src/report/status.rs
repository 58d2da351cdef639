//! Human-readable boot status

use core::fmt::{self, Write};

use super::time::UtcTimestamp;
use crate::boot::{BootReason, PersistentBootState};
use crate::crash::{exception_name, REGISTER_NAMES};

/// Shutdown countdown shown while a restart is in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartProgress {
    pub countdown_secs: u32,
    pub pending: i32,
}

/// Everything the status report shows.
#[derive(Debug, Clone, Copy)]
pub struct BootStatus<'a> {
    pub state: &'a PersistentBootState,
    pub reason: BootReason,
    /// Early crash count captured at boot
    pub early_crash_count: u32,
    pub uptime_secs: u32,
    pub boot_unix_time: Option<i64>,
    pub restart: Option<RestartProgress>,
    pub firmware_version: &'a str,
}

/// Write the multi-line status report.
pub fn write_status<W: Write + ?Sized>(w: &mut W, status: &BootStatus<'_>) -> fmt::Result {
    let state = status.state;

    writeln!(w, "Last boot was {} second(s) ago", status.uptime_secs)?;
    if let Some(boot_time) = status.boot_unix_time {
        writeln!(w, "Time at boot: {}", UtcTimestamp(boot_time))?;
    }

    writeln!(w, "  This is reset #{} since last power cycle", state.boot_count)?;
    writeln!(
        w,
        "  Detected boot reason: {} ({}/{})",
        status.reason, state.reset_reason_core0(), state.reset_reason_core1()
    )?;
    writeln!(
        w,
        "  Crash counters: {} total, {} early",
        state.crash_count_total, status.early_crash_count
    )?;

    if let Some(restart) = status.restart {
        writeln!(
            w,
            "\nRestart in progress ({} secs, waiting for {} tasks)",
            restart.countdown_secs, restart.pending
        )?;
    }

    if state.crash_count_total == 0 {
        return Ok(());
    }

    let crash = &state.crash_snapshot;
    w.write_str("\nLast crash: ")?;
    if crash.is_abort() {
        writeln!(w, "abort() was called on core {}", crash.core_id)?;
    } else {
        writeln!(
            w,
            "{} exception on core {}",
            exception_name(crash.exception_cause()),
            crash.core_id
        )?;
        w.write_str("  Registers:\n")?;
        for (i, (name, value)) in REGISTER_NAMES.iter().zip(crash.registers.iter()).enumerate() {
            write!(w, "  {}: 0x{:08x}", name, value)?;
            if (i + 1) % 4 == 0 {
                w.write_char('\n')?;
            }
        }
    }

    w.write_str("  Backtrace:\n ")?;
    for pc in crash.backtrace() {
        write!(w, " 0x{:08x}", pc)?;
    }
    writeln!(w, "\n  Version: {}", status.firmware_version)
}
