//! Reset controller interface

use bootdiag_core::boot::ResetReason;
use bootdiag_core::crash::ExceptionFrame;

use crate::platform::Result;

/// Fatal-exception hook: `(frame, core_id, is_abort)`.
///
/// Runs with interrupts disabled and no heap. It must not allocate, block or
/// take a lock.
pub type FatalExceptionHandler = fn(&ExceptionFrame, u8, bool);

/// Reset reason registers, software restart and the fatal-exception hook.
pub trait ResetController {
    /// Hardware reset reason latched for `core` (0 or 1).
    fn reset_reason(&self, core: u8) -> ResetReason;

    /// Restart the chip.
    ///
    /// Device implementations never return. Mock implementations record the
    /// request and return.
    fn restart(&self);

    /// Route fatal exceptions and aborts to `handler`. Replaces any handler
    /// installed earlier.
    fn install_fatal_handler(&self, handler: FatalExceptionHandler) -> Result<()>;
}
