//! Platform abstraction traits
//!
//! This module defines the traits that platform implementations must provide.

pub mod command;
pub mod notify;
pub mod platform;
pub mod reset;
pub mod storage;

// Re-export trait interfaces
pub use command::{CommandError, CommandHandler, CommandRegistry, CommandSpec};
pub use notify::Notifier;
pub use platform::Platform;
pub use reset::{FatalExceptionHandler, ResetController};
pub use storage::ConfigStore;
