//! Mock configuration store

use crate::core::traits::{CriticalState, SharedState};
use crate::platform::{
    error::{PlatformError, StorageError},
    traits::ConfigStore,
    Result,
};

/// Mock configuration store
///
/// Starts mounted. A second unmount fails with `NotMounted`.
pub struct MockConfigStore {
    mounted: CriticalState<bool>,
    unmounts: CriticalState<u32>,
}

impl MockConfigStore {
    pub fn new() -> Self {
        Self {
            mounted: CriticalState::new(true),
            unmounts: CriticalState::new(0),
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.with(|m| *m)
    }

    /// Successful unmounts so far
    pub fn unmount_count(&self) -> u32 {
        self.unmounts.with(|n| *n)
    }
}

impl Default for MockConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for MockConfigStore {
    fn unmount(&self) -> Result<()> {
        let was_mounted = self.mounted.with_mut(|m| core::mem::replace(m, false));
        if !was_mounted {
            return Err(PlatformError::Storage(StorageError::NotMounted));
        }
        self.unmounts.with_mut(|n| *n += 1);
        Ok(())
    }
}
