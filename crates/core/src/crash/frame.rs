//! Exception frame layout
//!
//! The frame saved by the exception vector starts with an `exit` word
//! followed by the 24 processor registers in the order of
//! [`REGISTER_NAMES`]. The vector may save more words after these; they are
//! not part of the crash record.

use crate::boot::REGISTER_COUNT;

/// Display names of the saved registers, padded to equal width.
pub const REGISTER_NAMES: [&str; REGISTER_COUNT] = [
    "PC      ", "PS      ", "A0      ", "A1      ", "A2      ", "A3      ", "A4      ",
    "A5      ", "A6      ", "A7      ", "A8      ", "A9      ", "A10     ", "A11     ",
    "A12     ", "A13     ", "A14     ", "A15     ", "SAR     ", "EXCCAUSE", "EXCVADDR",
    "LBEG    ", "LEND    ", "LCOUNT  ",
];

/// Register file saved by the exception vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(C)]
pub struct ExceptionFrame {
    /// Exit dispatcher address
    pub exit: u32,
    /// PC, PS, A0..A15, SAR, EXCCAUSE, EXCVADDR, LBEG, LEND, LCOUNT
    pub registers: [u32; REGISTER_COUNT],
}

impl ExceptionFrame {
    const PC: usize = 0;
    const A0: usize = 2;
    const A1: usize = 3;

    pub const fn new(registers: [u32; REGISTER_COUNT]) -> Self {
        Self { exit: 0, registers }
    }

    /// Faulting program counter
    pub fn pc(&self) -> u32 {
        self.registers[Self::PC]
    }

    /// Return address of the faulting function (windowed-call encoded)
    pub fn return_address(&self) -> u32 {
        self.registers[Self::A0]
    }

    /// Stack pointer at the fault
    pub fn stack_pointer(&self) -> u32 {
        self.registers[Self::A1]
    }
}
