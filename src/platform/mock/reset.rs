//! Mock reset controller

use bootdiag_core::boot::ResetReason;

use crate::core::traits::{CriticalState, SharedState};
use crate::platform::{
    traits::{FatalExceptionHandler, ResetController},
    Result,
};

/// Mock reset controller
///
/// Reports configurable reset reasons and records restart requests and the
/// installed fatal-exception handler for test verification.
pub struct MockResetController {
    reasons: CriticalState<[ResetReason; 2]>,
    restarts: CriticalState<u32>,
    handler: CriticalState<Option<FatalExceptionHandler>>,
}

impl MockResetController {
    /// Both cores report a power-on reset.
    pub fn new() -> Self {
        Self::with_reasons(ResetReason::PowerOn, ResetReason::PowerOn)
    }

    pub fn with_reasons(core0: ResetReason, core1: ResetReason) -> Self {
        Self {
            reasons: CriticalState::new([core0, core1]),
            restarts: CriticalState::new(0),
            handler: CriticalState::new(None),
        }
    }

    /// Change the reasons reported by the next boot.
    pub fn set_reasons(&self, core0: ResetReason, core1: ResetReason) {
        self.reasons.with_mut(|r| *r = [core0, core1]);
    }

    /// Number of `restart()` calls so far
    pub fn restart_count(&self) -> u32 {
        self.restarts.with(|n| *n)
    }

    pub fn installed_handler(&self) -> Option<FatalExceptionHandler> {
        self.handler.with(|h| *h)
    }
}

impl Default for MockResetController {
    fn default() -> Self {
        Self::new()
    }
}

impl ResetController for MockResetController {
    fn reset_reason(&self, core: u8) -> ResetReason {
        self.reasons
            .with(|r| r.get(usize::from(core)).copied().unwrap_or(ResetReason::NoMean))
    }

    fn restart(&self) {
        self.restarts.with_mut(|n| *n += 1);
    }

    fn install_fatal_handler(&self, handler: FatalExceptionHandler) -> Result<()> {
        self.handler.with_mut(|h| *h = Some(handler));
        Ok(())
    }
}
