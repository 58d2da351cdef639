//! bootdiag_core - Pure no_std boot and crash diagnostics logic
//!
//! This crate contains the platform-agnostic half of the boot diagnostics
//! subsystem. Everything here can be tested on host without feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives allowed
//! - **Pure no_std**: No std library dependencies, no allocation
//! - **Trait abstractions**: Clocks and stack memory injected via traits
//!
//! # Modules
//!
//! - [`boot`]: Reset-persistent data model and boot classification
//! - [`crash`]: Exception frame layout, cause names and heuristic stack walking
//! - [`shutdown`]: Drain-and-restart state machine
//! - [`report`]: Human-readable status and structured crash record formatting
//! - [`traits`]: Clock abstraction (uptime and wall time)

#![no_std]

pub mod boot;
pub mod crash;
pub mod report;
pub mod shutdown;
pub mod traits;
