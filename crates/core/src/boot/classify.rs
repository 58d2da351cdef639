//! Boot reason classification
//!
//! Runs once per boot, before anything depends on the boot reason. The
//! one-shot flags in [`PersistentBootState`] act as a write-once/read-once
//! handshake across the reset boundary: whoever requests a deliberate restart
//! sets a flag, and classification is the only reader and clearer.

use core::fmt;

use super::reset::ResetReason;
use super::store::PersistentBootState;

/// Why the running image booted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootReason {
    /// Supply power cycle; the persistent store was zeroed
    PowerOn,
    /// Restart requested by the user
    SoftReset,
    /// Restart after a firmware update
    FirmwareUpdate,
    /// Previous image crashed before declaring itself stable
    EarlyCrash,
    /// Previous image crashed after declaring itself stable
    Crash,
}

impl BootReason {
    pub fn name(self) -> &'static str {
        match self {
            BootReason::PowerOn => "PowerOn",
            BootReason::SoftReset => "SoftReset",
            BootReason::FirmwareUpdate => "FirmwareUpdate",
            BootReason::EarlyCrash => "EarlyCrash",
            BootReason::Crash => "Crash",
        }
    }

    /// True if the previous session ended in a crash
    pub fn is_crash(self) -> bool {
        matches!(self, BootReason::EarlyCrash | BootReason::Crash)
    }
}

impl fmt::Display for BootReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Result of classifying the current boot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootClassification {
    pub reason: BootReason,
    /// `crash_count_early` as seen at boot, before [`mark_stable`] clears it
    pub early_crash_count: u32,
}

/// Classify the current boot and update the persistent counters.
///
/// Steps 1-6 of the boot sequence; installing the crash handler is left to
/// the caller since it is a platform concern.
///
/// # Counter rules
///
/// - Power-on: the whole store is zeroed.
/// - Soft reset / firmware update: both crash counters are zeroed.
/// - Early crash (`stable_reached` unset): total and early counters increment.
/// - Crash: only the total counter increments.
///
/// All three one-shot flags are cleared afterwards, so the next boot is
/// classified only by what happens during this session.
pub fn classify(
    state: &mut PersistentBootState,
    core0: ResetReason,
    core1: ResetReason,
) -> BootClassification {
    let reason = if core0.is_power_on() {
        state.clear();
        BootReason::PowerOn
    } else {
        state.boot_count = state.boot_count.wrapping_add(1);

        if state.soft_reset() {
            state.crash_count_total = 0;
            state.crash_count_early = 0;
            BootReason::SoftReset
        } else if state.firmware_update() {
            state.crash_count_total = 0;
            state.crash_count_early = 0;
            BootReason::FirmwareUpdate
        } else if !state.stable_reached() {
            state.crash_count_total = state.crash_count_total.wrapping_add(1);
            state.crash_count_early = state.crash_count_early.wrapping_add(1);
            BootReason::EarlyCrash
        } else {
            state.crash_count_total = state.crash_count_total.wrapping_add(1);
            BootReason::Crash
        }
    };

    let early_crash_count = state.crash_count_early;

    state.set_reset_reasons(core0, core1);

    state.set_soft_reset(false);
    state.set_firmware_update(false);
    state.set_stable_reached(false);

    BootClassification {
        reason,
        early_crash_count,
    }
}

/// Record that the running image is healthy.
///
/// A crash after this point classifies as [`BootReason::Crash`] rather than
/// [`BootReason::EarlyCrash`], and the early-crash streak is reset.
pub fn mark_stable(state: &mut PersistentBootState) {
    state.set_stable_reached(true);
    state.crash_count_early = 0;
}
