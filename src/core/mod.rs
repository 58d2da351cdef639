//! Core firmware infrastructure
//!
//! Logging, synchronized state and event dispatch shared by the subsystems.

pub mod events;
pub mod logging;
pub mod traits;
