//! Uptime from embassy-time, wall clock set externally

use bootdiag_core::traits::Clock;
use embassy_time::Instant;

use crate::core::traits::{CriticalState, SharedState};

/// Clock backed by the embassy time driver.
///
/// The wall clock stays unset until [`EmbassyClock::set_unix_time`] is
/// called (network time or GPS fix).
pub struct EmbassyClock {
    /// Unix time at uptime zero
    epoch_at_boot: CriticalState<Option<i64>>,
}

impl EmbassyClock {
    pub const fn new() -> Self {
        Self {
            epoch_at_boot: CriticalState::new(None),
        }
    }

    pub fn set_unix_time(&self, now: i64) {
        let uptime = i64::from(self.uptime_secs());
        self.epoch_at_boot.with_mut(|epoch| *epoch = Some(now - uptime));
    }
}

impl Default for EmbassyClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for EmbassyClock {
    fn uptime_secs(&self) -> u32 {
        Instant::now().as_secs() as u32
    }

    fn unix_time(&self) -> Option<i64> {
        let uptime = i64::from(self.uptime_secs());
        self.epoch_at_boot.with(|epoch| epoch.map(|e| e + uptime))
    }
}
