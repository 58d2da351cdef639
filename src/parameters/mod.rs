//! Diagnostics parameters
//!
//! Compile-time defaults for the boot diagnostics subsystem. Values come from
//! `build.rs`, which reads optional environment variables at build time so a
//! release build can stamp its version without code changes.

pub mod diagnostics;

pub use diagnostics::{DiagnosticsParams, MAX_VERSION_LEN};
