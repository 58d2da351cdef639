//! Fatal-exception capture into the reset-persistent store
//!
//! Runs in the exception context: no allocation, no logging, no locks.

use bootdiag_core::crash::{capture, ExceptionFrame, StackMemory};

use super::store::{ResetPersistentStore, BOOT_DATA};

/// Capture a crash into `store`.
///
/// Overwrites the previous snapshot: core, abort flag, all registers and a
/// heuristic backtrace read through `memory`. Unused backtrace slots are
/// cleared.
///
/// # Safety
///
/// Must only run in the fatal-exception context (see
/// [`ResetPersistentStore::exception_context`]).
pub unsafe fn capture_crash<M: StackMemory + ?Sized>(
    store: &ResetPersistentStore,
    frame: &ExceptionFrame,
    core_id: u8,
    is_abort: bool,
    memory: &M,
) {
    // SAFETY: forwarded from the caller
    let state = unsafe { store.exception_context() };
    capture(&mut state.crash_snapshot, frame, core_id, is_abort, memory);
}

/// Fatal-exception handler installed by
/// [`BootDiagnostics::start`](super::BootDiagnostics::start).
///
/// `M` is the platform's stack reader, built with `Default` so the handler
/// stays a plain `fn` pointer.
pub fn on_fatal_exception<M: StackMemory + Default>(
    frame: &ExceptionFrame,
    core_id: u8,
    is_abort: bool,
) {
    let memory = M::default();
    // SAFETY: only ever invoked by the platform's fatal-exception path
    unsafe { capture_crash(&BOOT_DATA, frame, core_id, is_abort, &memory) };
}
