//! Mock stack memory

use bootdiag_core::crash::StackMemory;

const WORDS: usize = 256;

/// Word-addressed RAM window for stack walk tests
///
/// Reads outside the window return zero, which the walker treats as the end
/// of the chain.
#[derive(Debug, Clone)]
pub struct MockStackMemory {
    base: u32,
    words: [u32; WORDS],
}

impl MockStackMemory {
    /// Default window start, inside the sane stack range
    pub const DEFAULT_BASE: u32 = 0x3ffb_0000;

    pub fn new(base: u32) -> Self {
        Self {
            base,
            words: [0; WORDS],
        }
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    /// Store `value` at `addr`; ignored outside the window.
    pub fn write(&mut self, addr: u32, value: u32) {
        if let Some(slot) = self.slot(addr) {
            self.words[slot] = value;
        }
    }

    /// Lay out the spill area of the frame at `sp` so that it returns to
    /// `caller_ra` with stack pointer `caller_sp`.
    pub fn push_frame(&mut self, sp: u32, caller_ra: u32, caller_sp: u32) {
        self.write(sp - 0x10, caller_ra);
        self.write(sp - 0x10 + 4, caller_sp);
    }

    fn slot(&self, addr: u32) -> Option<usize> {
        let offset = addr.checked_sub(self.base)?;
        if offset % 4 != 0 {
            return None;
        }
        let slot = (offset / 4) as usize;
        (slot < WORDS).then_some(slot)
    }
}

impl Default for MockStackMemory {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE)
    }
}

impl StackMemory for MockStackMemory {
    fn read_word(&self, addr: u32) -> u32 {
        self.slot(addr).map(|slot| self.words[slot]).unwrap_or(0)
    }
}
