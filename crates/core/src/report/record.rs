//! Structured crash record for the remote collector
//!
//! One line, fourteen comma-separated fields:
//!
//! ```text
//! *-OVM-DebugCrash,0,2592000,<firmware>,<boot_count>,<boot_reason>,
//!   <core0_reset>,<core1_reset>,<crash_total>,<crash_early>,<crash_type>,
//!   <crash_core>,<registers>,<backtrace>
//! ```
//!
//! Registers and backtrace are space separated inside their field. The
//! register field is empty for aborts.

use core::fmt::{self, Write};

use crate::boot::{BootReason, PersistentBootState};
use crate::crash::{exception_name, ABORT_MARKER};

/// Record type understood by the collector
pub const RECORD_TYPE: &str = "*-OVM-DebugCrash";

/// Record layout version
pub const RECORD_VERSION: u32 = 0;

/// Top-level fields in every record
pub const RECORD_FIELD_COUNT: usize = 14;

/// Inputs to one crash record
#[derive(Debug, Clone, Copy)]
pub struct CrashRecord<'a> {
    pub state: &'a PersistentBootState,
    pub reason: BootReason,
    pub early_crash_count: u32,
    pub firmware_version: &'a str,
    /// How long the collector keeps the record
    pub retention_secs: u32,
}

/// Write the single-line crash record (no trailing newline).
pub fn write_crash_record<W: Write + ?Sized>(w: &mut W, record: &CrashRecord<'_>) -> fmt::Result {
    let state = record.state;
    let crash = &state.crash_snapshot;

    write!(w, "{},{},{},", RECORD_TYPE, RECORD_VERSION, record.retention_secs)?;
    // The version string is free text; keep it from splitting the record
    for c in record.firmware_version.chars() {
        w.write_char(if c == ',' { ';' } else { c })?;
    }
    write!(
        w,
        ",{},{},{},{},{},{}",
        state.boot_count,
        record.reason,
        state.reset_reason_core0(),
        state.reset_reason_core1(),
        state.crash_count_total,
        record.early_crash_count
    )?;

    if crash.is_abort() {
        write!(w, ",{},{},", ABORT_MARKER, crash.core_id)?;
    } else {
        write!(
            w,
            ",{},{},",
            exception_name(crash.exception_cause()),
            crash.core_id
        )?;
        for value in crash.registers.iter() {
            write!(w, "0x{:08x} ", value)?;
        }
    }

    w.write_char(',')?;
    for pc in crash.backtrace() {
        write!(w, "0x{:08x} ", pc)?;
    }
    Ok(())
}
