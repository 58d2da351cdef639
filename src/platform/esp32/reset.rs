//! RTC controller reset registers and the fatal-exception hook

use core::ptr;
use core::sync::atomic::{AtomicPtr, Ordering};

use bootdiag_core::boot::ResetReason;
use bootdiag_core::crash::ExceptionFrame;

use crate::platform::{
    traits::{FatalExceptionHandler, ResetController},
    Result,
};

/// RTC_CNTL_OPTIONS0_REG
const RTC_CNTL_OPTIONS0: usize = 0x3ff4_8000;
/// RTC_CNTL_SW_SYS_RST
const SW_SYS_RST: u32 = 1 << 31;
/// RTC_CNTL_RESET_STATE_REG
const RTC_CNTL_RESET_STATE: usize = 0x3ff4_8034;
static FATAL_HANDLER: AtomicPtr<()> = AtomicPtr::new(ptr::null_mut());

/// Reset controller backed by the RTC_CNTL peripheral
#[derive(Debug, Default, Clone, Copy)]
pub struct Esp32ResetController;

impl Esp32ResetController {
    pub const fn new() -> Self {
        Self
    }
}

impl ResetController for Esp32ResetController {
    fn reset_reason(&self, core: u8) -> ResetReason {
        // SAFETY: read-only access to an always-mapped peripheral register
        let state = unsafe { ptr::read_volatile(RTC_CNTL_RESET_STATE as *const u32) };
        ResetReason::from_state_register(state, core)
    }

    fn restart(&self) {
        // SAFETY: read-modify-write of the RTC options register; the write
        // resets both cores and never returns control here
        unsafe {
            let reg = RTC_CNTL_OPTIONS0 as *mut u32;
            ptr::write_volatile(reg, ptr::read_volatile(reg) | SW_SYS_RST);
        }
        loop {
            core::hint::spin_loop();
        }
    }

    fn install_fatal_handler(&self, handler: FatalExceptionHandler) -> Result<()> {
        FATAL_HANDLER.store(handler as *mut (), Ordering::Release);
        Ok(())
    }
}

/// Entry point for the panic path.
///
/// The exception vector saves the register file into an [`ExceptionFrame`]
/// and calls this with the faulting core and whether the fault came from
/// `abort()`.
///
/// # Safety
///
/// `frame` must point to a complete, readable exception frame.
#[no_mangle]
pub unsafe extern "C" fn bootdiag_fatal_exception(
    frame: *const ExceptionFrame,
    core_id: u32,
    is_abort: bool,
) {
    let raw = FATAL_HANDLER.load(Ordering::Acquire);
    if raw.is_null() || frame.is_null() {
        return;
    }
    // SAFETY: only ever stored from a `FatalExceptionHandler` above
    let handler = unsafe { core::mem::transmute::<*mut (), FatalExceptionHandler>(raw) };
    // SAFETY: caller guarantees `frame` is valid
    handler(unsafe { &*frame }, core_id as u8, is_abort);
}
