//! Reset-persistent boot state and boot classification.

pub mod classify;
pub mod reset;
pub mod store;

pub use classify::{classify, mark_stable, BootClassification, BootReason};
pub use reset::ResetReason;
pub use store::{CrashSnapshot, PersistentBootState, BACKTRACE_DEPTH, REGISTER_COUNT};
