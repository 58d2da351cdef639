//! Core traits for platform-agnostic firmware services.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  Subsystems (boot diagnostics, shutdown coordinator)     │
//! │                         │                                │
//! │                         ▼                                │
//! │        ┌─────────────────────────────────┐               │
//! │        │ SharedState<T>                  │               │
//! │        │ + with(f: FnOnce(&T) -> R)      │               │
//! │        │ + with_mut(f: FnOnce(&mut T))   │               │
//! │        └─────────────────────────────────┘               │
//! │                         │                                │
//! │                         ▼                                │
//! │               CriticalState<T>                           │
//! │               (critical-section mutex,                   │
//! │                device and host)                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod sync;

pub use sync::{CriticalState, SharedState};
