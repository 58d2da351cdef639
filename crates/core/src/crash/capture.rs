//! Crash snapshot capture

use core::num::NonZeroU32;

use super::frame::ExceptionFrame;
use super::walk::{StackMemory, StackWalker};
use crate::boot::CrashSnapshot;

/// Record a fatal exception into `snapshot`.
///
/// Overwrites the previous snapshot completely: backtrace slots past the end
/// of the new trace are cleared. Allocation-free and lock-free; safe to call
/// from the exception vector.
pub fn capture<M: StackMemory + ?Sized>(
    snapshot: &mut CrashSnapshot,
    frame: &ExceptionFrame,
    core_id: u8,
    is_abort: bool,
    memory: &M,
) {
    snapshot.set_abort(is_abort);
    snapshot.core_id = core_id;
    snapshot.registers = frame.registers;

    let mut trace = StackWalker::new(frame, memory)
        .map_while(NonZeroU32::new)
        .fuse();
    for slot in snapshot.backtrace.iter_mut() {
        *slot = trace.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boot::BACKTRACE_DEPTH;
    use crate::crash::walk::tests::{frame, FakeStack};

    const BASE: u32 = 0x3ffb_0000;

    #[test]
    fn test_capture_copies_registers_and_flags() {
        let stack = FakeStack::new(BASE);
        let mut f = frame(0x400d_1000, 0x800d_2003, 0);
        f.registers[19] = 28;
        f.registers[23] = 0xffff_ffff;
        let mut snapshot = CrashSnapshot::zeroed();

        capture(&mut snapshot, &f, 1, false, &stack);

        assert_eq!(snapshot.core_id, 1);
        assert!(!snapshot.is_abort());
        assert_eq!(snapshot.registers, f.registers);
        assert_eq!(snapshot.exception_cause(), 28);
    }

    #[test]
    fn test_capture_with_insane_sp_has_single_entry() {
        let stack = FakeStack::new(BASE);
        let f = frame(0x800d_1000, 0x800d_2003, 0x0000_0001);
        let mut snapshot = CrashSnapshot::zeroed();

        capture(&mut snapshot, &f, 0, true, &stack);

        let mut trace = snapshot.backtrace();
        assert_eq!(trace.next(), Some(0x400d_1000));
        assert_eq!(trace.next(), None);
        assert!(snapshot.is_abort());
    }

    #[test]
    fn test_capture_clears_stale_backtrace() {
        let mut stack = FakeStack::new(BASE);
        let sp0 = BASE + 0x100;
        stack.push_frame(sp0, 0x800d_3003, sp0);
        let deep = frame(0x400d_1000, 0x800d_2003, sp0);
        let mut snapshot = CrashSnapshot::zeroed();
        capture(&mut snapshot, &deep, 0, false, &stack);
        assert_eq!(snapshot.backtrace().count(), BACKTRACE_DEPTH);

        let shallow = frame(0x400d_5000, 0, 0);
        capture(&mut snapshot, &shallow, 1, true, &stack);

        assert_eq!(snapshot.backtrace().count(), 1);
        assert!(snapshot.backtrace[1..].iter().all(Option::is_none));
        assert_eq!(snapshot.core_id, 1);
    }

    #[test]
    fn test_capture_never_exceeds_depth() {
        let mut stack = FakeStack::new(BASE);
        let sp0 = BASE + 0x100;
        let sp1 = BASE + 0x200;
        stack.push_frame(sp0, 0x800d_3003, sp1);
        stack.push_frame(sp1, 0x800d_4003, sp0);
        let f = frame(0x400d_1000, 0x800d_2003, sp0);
        let mut snapshot = CrashSnapshot::zeroed();

        capture(&mut snapshot, &f, 0, false, &stack);

        assert_eq!(snapshot.backtrace().count(), BACKTRACE_DEPTH);
    }

    #[test]
    fn test_zero_faulting_pc_leaves_empty_trace() {
        let stack = FakeStack::new(BASE);
        let f = frame(0, 0x800d_2003, BASE + 0x100);
        let mut snapshot = CrashSnapshot::zeroed();
        snapshot.backtrace[0] = NonZeroU32::new(0x400d_0000);

        capture(&mut snapshot, &f, 0, false, &stack);

        assert_eq!(snapshot.backtrace().count(), 0);
    }
}
