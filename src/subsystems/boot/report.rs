//! Status report and crash notification
//!
//! Read-only projections of the store: the multi-line report behind the
//! `boot status` command and the one-line `*-OVM-DebugCrash` record sent to
//! the server after a crash.

use core::fmt::{self, Write};
use core::sync::atomic::Ordering;

use bootdiag_core::report::{
    write_crash_record, write_status, BootStatus, CrashRecord, RestartProgress,
};
use bootdiag_core::traits::Clock;
use heapless::String;

use super::BootDiagnostics;
use crate::platform::{
    traits::{Notifier, Platform},
    Result,
};

/// Buffer size for one crash record
pub const RECORD_CAPACITY: usize = 1024;

/// Rendered crash record
pub type CrashRecordText = String<RECORD_CAPACITY>;

/// Notification type of the crash record
pub const NOTIFY_KIND: &str = "data";

/// Notification subtype of the crash record
pub const NOTIFY_SUBTYPE: &str = "debug.crash";

impl<P: Platform> BootDiagnostics<'_, P> {
    /// Write the human-readable status report.
    ///
    /// `restart` adds the restart-in-progress line.
    pub fn write_status(
        &self,
        out: &mut dyn Write,
        restart: Option<RestartProgress>,
    ) -> fmt::Result {
        let state = self.store.read();
        let clock = self.platform.clock();
        write_status(
            out,
            &BootStatus {
                state: &state,
                reason: self.classification.reason,
                early_crash_count: self.classification.early_crash_count,
                uptime_secs: clock.uptime_secs(),
                boot_unix_time: clock.boot_unix_time(),
                restart,
                firmware_version: self.params.firmware_version.as_str(),
            },
        )
    }

    /// Render the crash record, or `None` if no crash has been recorded
    /// since the last deliberate reset.
    pub fn crash_record(&self) -> Option<CrashRecordText> {
        let state = self.store.read();
        if state.crash_count_total == 0 {
            return None;
        }

        let mut text = CrashRecordText::new();
        let written = write_crash_record(
            &mut text,
            &CrashRecord {
                state: &state,
                reason: self.classification.reason,
                early_crash_count: self.classification.early_crash_count,
                firmware_version: self.params.firmware_version.as_str(),
                retention_secs: self.params.record_retention_secs,
            },
        );
        if written.is_err() {
            crate::log_error!("Crash record exceeds {} bytes", RECORD_CAPACITY);
            return None;
        }
        Some(text)
    }

    /// Send the crash record to the server, if there was a crash.
    ///
    /// The record goes out at most once per session; a failed send leaves it
    /// eligible for the next call. Returns whether a record was queued.
    pub fn notify_debug_crash(&self) -> Result<bool> {
        if self.crash_notified.load(Ordering::Acquire) {
            return Ok(false);
        }
        let Some(record) = self.crash_record() else {
            return Ok(false);
        };
        self.platform
            .notifier()
            .notify_string(NOTIFY_KIND, NOTIFY_SUBTYPE, record.as_str())?;
        self.crash_notified.store(true, Ordering::Release);
        crate::log_debug!("Crash record queued ({} bytes)", record.len());
        Ok(true)
    }
}
