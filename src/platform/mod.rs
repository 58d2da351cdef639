//! Platform abstraction layer
//!
//! Everything the diagnostics subsystem needs from the device goes through
//! the traits in this module: reset reason registers and the restart
//! trigger, the fatal-exception hook, the configuration store, the
//! notification transport and raw stack memory. Chip-specific code lives
//! only in the feature-gated implementation modules.

pub mod error;
pub mod traits;

// Platform implementations (feature-gated)
#[cfg(feature = "esp32")]
pub mod esp32;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{NotifyError, PlatformError, Result, StorageError};
pub use traits::{
    CommandError, CommandHandler, CommandRegistry, CommandSpec, ConfigStore,
    FatalExceptionHandler, Notifier, Platform, ResetController,
};
