//! Fatal exception capture
//!
//! Everything in this module runs inside the platform's fatal-exception
//! handler: interrupts are off, there is no heap, and no lock may be taken.
//! Nothing here allocates or blocks.

pub mod capture;
pub mod cause;
pub mod frame;
pub mod walk;

pub use capture::capture;
pub use cause::{exception_name, ABORT_MARKER};
pub use frame::{ExceptionFrame, REGISTER_NAMES};
pub use walk::{adjust_return_address, StackMemory, StackWalker};
