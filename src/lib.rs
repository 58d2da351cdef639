#![cfg_attr(not(test), no_std)]

//! bootdiag - Boot and crash diagnostics for vehicle telemetry firmware
//!
//! This library classifies why the device booted, records fatal exceptions
//! into memory that survives the reset, coordinates orderly soft restarts
//! and reports crash history to the shell and to the server.
//!
//! Pure logic (store layout, classification, stack walking, report
//! formatting, the shutdown state machine) lives in `bootdiag_core`; this
//! crate adds the platform layer, event dispatch and the service objects.

// Platform abstraction layer
pub mod platform;

// Core systems (logging, synchronization, events)
pub mod core;

// Build-time parameters
pub mod parameters;

// Boot diagnostics service
pub mod subsystems;

pub use subsystems::boot::{BootDiagnostics, ShutdownCoordinator, BOOT_DATA};
