//! Reset-persistent boot state layout
//!
//! [`PersistentBootState`] is placed by the firmware in a memory region that
//! survives software resets and crashes but reads as zero after power-on.
//! All fields are fixed width so the layout is identical for the normal task
//! context and the fatal-exception context.
//!
//! Every bit pattern is a valid value of every field. Enumerations and flags
//! are kept as raw bytes and decoded on access, so a region holding garbage
//! after a brown-out still reads as a well-defined (if meaningless) state.

use core::num::NonZeroU32;

use static_assertions::assert_eq_size;

use super::reset::ResetReason;

/// Number of saved processor registers per crash
pub const REGISTER_COUNT: usize = 24;

/// Maximum number of backtrace entries per crash
pub const BACKTRACE_DEPTH: usize = 32;

/// Processor state captured by the fatal-exception handler.
///
/// Only the most recent crash is retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct CrashSnapshot {
    /// Core that raised the exception
    pub core_id: u8,
    /// Nonzero for a deliberate `abort()`, zero for a hardware exception
    abort: u8,
    /// Saved registers, in exception-frame order (PC first)
    pub registers: [u32; REGISTER_COUNT],
    /// Return addresses; the first `None` terminates the trace
    pub backtrace: [Option<NonZeroU32>; BACKTRACE_DEPTH],
}

assert_eq_size!(CrashSnapshot, [u8; 228]);

impl CrashSnapshot {
    /// Register index holding the exception cause code
    pub const EXCCAUSE_INDEX: usize = 19;

    pub const fn zeroed() -> Self {
        Self {
            core_id: 0,
            abort: 0,
            registers: [0; REGISTER_COUNT],
            backtrace: [None; BACKTRACE_DEPTH],
        }
    }

    /// True for a deliberate `abort()`, false for a hardware exception
    pub fn is_abort(&self) -> bool {
        self.abort != 0
    }

    pub fn set_abort(&mut self, is_abort: bool) {
        self.abort = u8::from(is_abort);
    }

    /// Raw exception cause code of the last hardware exception
    pub fn exception_cause(&self) -> u32 {
        self.registers[Self::EXCCAUSE_INDEX]
    }

    /// Backtrace addresses up to the first empty slot
    pub fn backtrace(&self) -> impl Iterator<Item = u32> + '_ {
        self.backtrace
            .iter()
            .map_while(|entry| entry.map(NonZeroU32::get))
    }
}

impl Default for CrashSnapshot {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Boot bookkeeping that outlives software resets.
///
/// # Lifecycle
///
/// - Zeroed once per power cycle (by classification of a power-on reset).
/// - `soft_reset` / `firmware_update` are written by a restart requester and
///   consumed by the next boot's classification.
/// - `stable_reached` is written by the running image once healthy and
///   consumed by the next boot's classification.
/// - `crash_snapshot` is overwritten by each fatal exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct PersistentBootState {
    /// Resets since the last power cycle
    pub boot_count: u32,
    /// Reset cause code latched for core 0 at the last boot
    reset_reason_core0: u8,
    /// Reset cause code latched for core 1 at the last boot
    reset_reason_core1: u8,
    /// Deliberate restart requested by the user
    soft_reset: u8,
    /// Deliberate restart after a firmware update
    firmware_update: u8,
    /// Running image declared itself healthy
    stable_reached: u8,
    /// Crashes since the last deliberate reset
    pub crash_count_total: u32,
    /// Consecutive crashes before stability was reached
    pub crash_count_early: u32,
    /// Most recent crash
    pub crash_snapshot: CrashSnapshot,
}

assert_eq_size!(PersistentBootState, [u8; 248]);

impl PersistentBootState {
    /// The power-on contents of the region.
    pub const fn zeroed() -> Self {
        Self {
            boot_count: 0,
            reset_reason_core0: 0,
            reset_reason_core1: 0,
            soft_reset: 0,
            firmware_update: 0,
            stable_reached: 0,
            crash_count_total: 0,
            crash_count_early: 0,
            crash_snapshot: CrashSnapshot::zeroed(),
        }
    }

    /// Reset every field to its power-on value.
    pub fn clear(&mut self) {
        *self = Self::zeroed();
    }

    /// Reset cause latched for core 0 at the last boot
    pub fn reset_reason_core0(&self) -> ResetReason {
        ResetReason::from_code(self.reset_reason_core0)
    }

    /// Reset cause latched for core 1 at the last boot
    pub fn reset_reason_core1(&self) -> ResetReason {
        ResetReason::from_code(self.reset_reason_core1)
    }

    pub fn set_reset_reasons(&mut self, core0: ResetReason, core1: ResetReason) {
        self.reset_reason_core0 = core0.code();
        self.reset_reason_core1 = core1.code();
    }

    pub fn soft_reset(&self) -> bool {
        self.soft_reset != 0
    }

    pub fn set_soft_reset(&mut self, value: bool) {
        self.soft_reset = u8::from(value);
    }

    pub fn firmware_update(&self) -> bool {
        self.firmware_update != 0
    }

    pub fn set_firmware_update(&mut self, value: bool) {
        self.firmware_update = u8::from(value);
    }

    pub fn stable_reached(&self) -> bool {
        self.stable_reached != 0
    }

    pub fn set_stable_reached(&mut self, value: bool) {
        self.stable_reached = u8::from(value);
    }
}

impl Default for PersistentBootState {
    fn default() -> Self {
        Self::zeroed()
    }
}
