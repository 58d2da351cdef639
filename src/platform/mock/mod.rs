//! Mock platform implementation for testing
//!
//! This module provides mock implementations of platform traits that can be
//! used for unit testing without requiring actual hardware. Mock state sits
//! behind [`CriticalState`](crate::core::traits::CriticalState) so the mocks
//! are `Sync` and can back `'static` services in tests.
//!
//! # Feature Gate
//!
//! This module is available in two contexts:
//! - During test builds (`#[cfg(test)]`)
//! - When the `mock` feature is enabled
//!
//! # Example
//!
//! ```ignore
//! use bootdiag::platform::mock::MockPlatform;
//! use bootdiag::platform::traits::{Notifier, Platform};
//!
//! let platform = MockPlatform::new();
//! platform.notifier().notify_string("info", "test", "hello").unwrap();
//! assert_eq!(platform.notifier().sent_count(), 1);
//! ```

#![cfg(any(test, feature = "mock"))]

mod command;
mod memory;
mod notify;
mod platform;
mod reset;
mod storage;

pub use command::MockCommandRegistry;
pub use memory::MockStackMemory;
pub use notify::{MockNotification, MockNotifier};
pub use platform::MockPlatform;
pub use reset::MockResetController;
pub use storage::MockConfigStore;
