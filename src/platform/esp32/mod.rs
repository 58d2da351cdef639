//! ESP32 (dual-core Xtensa LX6) platform implementation
//!
//! Register-level access to the RTC controller for reset reasons and the
//! software system reset, the fatal-exception hook exported to the panic
//! path, a DRAM-bounded stack reader and an embassy-time backed clock.
//!
//! Configuration store and notification transport are provided by the
//! application (filesystem and server connections are outside this crate).

mod clock;
mod memory;
mod reset;

pub use clock::EmbassyClock;
pub use memory::DramStackMemory;
pub use reset::{bootdiag_fatal_exception, Esp32ResetController};
