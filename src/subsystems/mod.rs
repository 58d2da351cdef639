//! Subsystems built on the platform layer

pub mod boot;
