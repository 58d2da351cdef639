//! Root platform trait
//!
//! This module defines the root Platform trait that aggregates the device
//! services the diagnostics subsystem depends on.

use bootdiag_core::crash::StackMemory;
use bootdiag_core::traits::Clock;

use super::{ConfigStore, Notifier, ResetController};

/// Root platform trait
///
/// Platform implementations provide concrete types for each service via
/// associated types, so the subsystem is monomorphized per target.
///
/// # Example
///
/// ```ignore
/// impl Platform for Esp32Platform {
///     type Reset = Esp32ResetController;
///     type Config = VfsConfigStore;
///     type Notify = ServerNotifier;
///     type Clock = EmbassyClock;
///     type Memory = DramStackMemory;
///     // ...
/// }
/// ```
pub trait Platform {
    /// Reset reason registers and restart trigger
    type Reset: ResetController;

    /// Persistent configuration store
    type Config: ConfigStore;

    /// Notification transport
    type Notify: Notifier;

    /// Uptime and wall clock
    type Clock: Clock;

    /// Stack reader for the crash handler.
    ///
    /// Constructed with `Default` inside the fatal-exception handler, so it
    /// must be stateless or cheap to build without allocation.
    type Memory: StackMemory + Default;

    fn reset_controller(&self) -> &Self::Reset;

    fn config_store(&self) -> &Self::Config;

    fn notifier(&self) -> &Self::Notify;

    fn clock(&self) -> &Self::Clock;
}
