//! Mock Platform implementation for testing

use bootdiag_core::traits::MockClock;

use super::{MockConfigStore, MockNotifier, MockResetController, MockStackMemory};
use crate::platform::traits::Platform;

/// Mock Platform implementation
///
/// Bundles the mock services for hardware-free testing.
///
/// ```ignore
/// use bootdiag::platform::mock::MockPlatform;
/// use bootdiag::platform::traits::{Platform, ResetController};
///
/// let platform = MockPlatform::new();
/// platform.reset_controller().restart();
/// assert_eq!(platform.reset.restart_count(), 1);
/// ```
#[derive(Default)]
pub struct MockPlatform {
    pub reset: MockResetController,
    pub config: MockConfigStore,
    pub notifier: MockNotifier,
    pub clock: MockClock,
}

impl MockPlatform {
    /// Create a new mock platform
    pub fn new() -> Self {
        Self::default()
    }
}

impl Platform for MockPlatform {
    type Reset = MockResetController;
    type Config = MockConfigStore;
    type Notify = MockNotifier;
    type Clock = MockClock;
    type Memory = MockStackMemory;

    fn reset_controller(&self) -> &Self::Reset {
        &self.reset
    }

    fn config_store(&self) -> &Self::Config {
        &self.config
    }

    fn notifier(&self) -> &Self::Notify {
        &self.notifier
    }

    fn clock(&self) -> &Self::Clock {
        &self.clock
    }
}
