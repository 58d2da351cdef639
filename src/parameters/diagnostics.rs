//! Boot diagnostics parameter set
//!
//! # Parameters
//!
//! - `firmware_version` - Version string for status output and crash records
//!   (`BOOTDIAG_FIRMWARE_VERSION`, default: package version)
//! - `drain_budget_secs` - Drain ceiling for a soft restart
//!   (`BOOTDIAG_DRAIN_BUDGET_SECS`, default: 60)
//! - `fast_path_secs` - Countdown once nothing is pending (2)
//! - `progress_interval_secs` - Countdown log period (5)
//! - `record_retention_secs` - Collector retention for crash records (30 days)

use bootdiag_core::shutdown::ShutdownTimings;
use heapless::String;

/// Maximum firmware version length kept in the parameter set
pub const MAX_VERSION_LEN: usize = 64;

/// Crash record retention requested from the collector (30 days)
pub const DEFAULT_RECORD_RETENTION_SECS: u32 = 2_592_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticsParams {
    pub firmware_version: String<MAX_VERSION_LEN>,
    pub drain_budget_secs: u32,
    pub fast_path_secs: u32,
    pub progress_interval_secs: u32,
    pub record_retention_secs: u32,
}

impl DiagnosticsParams {
    /// Parameters with the defaults baked in at build time.
    pub fn from_build_env() -> Self {
        let timings = ShutdownTimings::new();
        Self {
            firmware_version: truncated(env!("BOOTDIAG_FIRMWARE_VERSION")),
            drain_budget_secs: parse_secs(
                env!("BOOTDIAG_DRAIN_BUDGET_SECS"),
                timings.drain_budget_secs,
            ),
            fast_path_secs: timings.fast_path_secs,
            progress_interval_secs: timings.progress_interval_secs,
            record_retention_secs: DEFAULT_RECORD_RETENTION_SECS,
        }
    }

    /// Replace the firmware version (e.g. with the running OTA partition's).
    pub fn with_firmware_version(mut self, version: &str) -> Self {
        self.firmware_version = truncated(version);
        self
    }

    /// Countdown settings for the shutdown coordinator
    pub fn timings(&self) -> ShutdownTimings {
        ShutdownTimings {
            drain_budget_secs: self.drain_budget_secs,
            fast_path_secs: self.fast_path_secs,
            progress_interval_secs: self.progress_interval_secs,
        }
    }
}

impl Default for DiagnosticsParams {
    fn default() -> Self {
        Self::from_build_env()
    }
}

/// Parse a positive duration; zero or garbage falls back to `default`.
fn parse_secs(value: &str, default: u32) -> u32 {
    match value.trim().parse::<u32>() {
        Ok(secs) if secs > 0 => secs,
        _ => default,
    }
}

fn truncated(value: &str) -> String<MAX_VERSION_LEN> {
    let mut out = String::new();
    for c in value.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
