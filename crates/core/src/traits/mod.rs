//! Platform-agnostic trait abstractions.
//!
//! Trait definitions are pure and have no feature gates. Mock implementations
//! are always available for host testing; device implementations live in the
//! firmware crate.

pub mod time;

pub use time::{Clock, MockClock};
