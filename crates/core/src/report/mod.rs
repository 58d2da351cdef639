//! Read-only projections of the boot state
//!
//! Two renderings of the same data: a multi-line status report for the
//! console, and a single-line comma-separated record for the remote
//! collector. Both write into any [`core::fmt::Write`] sink so callers pick
//! the buffer (a `heapless::String` on the device).

pub mod record;
pub mod status;
pub mod time;

pub use record::{write_crash_record, CrashRecord, RECORD_FIELD_COUNT, RECORD_TYPE};
pub use status::{write_status, BootStatus, RestartProgress};
pub use time::UtcTimestamp;
