//! Heuristic stack walking for the windowed-register call ABI
//!
//! No unwind tables or symbols are consulted. Each step reads the caller's
//! return address and stack pointer from the register spill area just below
//! the current stack pointer. The walk stops as soon as the stack pointer
//! leaves the data RAM window or the next return address falls below the
//! code region, so a corrupt stack yields a short trace instead of a second
//! fault.

use core::iter::FusedIterator;

use super::frame::ExceptionFrame;
use crate::boot::BACKTRACE_DEPTH;

/// Lowest plausible stack pointer
pub const STACK_LOW: u32 = 0x3ffa_e010;

/// Highest plausible stack pointer
pub const STACK_HIGH: u32 = 0x3fff_fff0;

/// Start of the instruction address space
pub const CODE_REGION_START: u32 = 0x4000_0000;

/// Spill area holding A0 (return address) and A1 (stack pointer) of the caller
const SPILL_OFFSET: u32 = 0x10;

/// Read access to stack memory for the walker.
///
/// Implementations used in the exception context must not allocate, lock or
/// fault. The device implementation only dereferences addresses inside the
/// data RAM window.
pub trait StackMemory {
    /// Read the 32-bit word at `addr`.
    fn read_word(&self, addr: u32) -> u32;

    /// True if `sp` may be used as a stack pointer.
    fn is_sane_stack_pointer(&self, sp: u32) -> bool {
        (STACK_LOW..=STACK_HIGH).contains(&sp) && sp & 0xf == 0
    }
}

/// Map a windowed-call return address to its canonical code address.
///
/// The top two bits of A0 encode the call window increment; a set high bit
/// marks a windowed call and is replaced by the code region prefix.
pub fn adjust_return_address(pc: u32) -> u32 {
    if pc & 0x8000_0000 != 0 {
        (pc & 0x3fff_ffff) | CODE_REGION_START
    } else {
        pc
    }
}

/// Lazy, bounded walk from an exception frame.
///
/// Yields the faulting PC first, then approximate call sites of each caller.
/// The sequence is finite (at most the configured depth) and cannot be
/// restarted; build a new walker to walk again.
pub struct StackWalker<'m, M: StackMemory + ?Sized> {
    memory: &'m M,
    faulting_pc: Option<u32>,
    pc: u32,
    sp: u32,
    remaining: usize,
}

impl<'m, M: StackMemory + ?Sized> StackWalker<'m, M> {
    pub fn new(frame: &ExceptionFrame, memory: &'m M) -> Self {
        Self::with_depth(frame, memory, BACKTRACE_DEPTH)
    }

    pub fn with_depth(frame: &ExceptionFrame, memory: &'m M, depth: usize) -> Self {
        Self {
            memory,
            faulting_pc: Some(adjust_return_address(frame.pc())),
            pc: frame.return_address(),
            sp: frame.stack_pointer(),
            remaining: depth,
        }
    }

    fn stop(&mut self) -> Option<u32> {
        self.remaining = 0;
        None
    }
}

impl<M: StackMemory + ?Sized> Iterator for StackWalker<'_, M> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        if let Some(pc) = self.faulting_pc.take() {
            return Some(pc);
        }

        let frame_sp = self.sp;
        if !self.memory.is_sane_stack_pointer(frame_sp) {
            return self.stop();
        }

        let spill = frame_sp.wrapping_sub(SPILL_OFFSET);
        self.sp = self.memory.read_word(spill.wrapping_add(4));
        // A0 points after the call instruction; step back onto it
        let call_site = adjust_return_address(self.pc.wrapping_sub(3));
        self.pc = self.memory.read_word(spill);

        if self.pc < CODE_REGION_START {
            self.remaining = 0;
        }
        Some(call_site)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

impl<M: StackMemory + ?Sized> FusedIterator for StackWalker<'_, M> {}
