//! Configuration store interface

use crate::platform::Result;

/// Persistent configuration filesystem.
pub trait ConfigStore {
    /// Flush and unmount. Called as the last step before a soft restart.
    fn unmount(&self) -> Result<()>;
}
