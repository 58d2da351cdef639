//! Stack reads bounded to internal data RAM

use bootdiag_core::crash::StackMemory;

/// First byte of the internal DRAM window
const DRAM_START: u32 = 0x3ffa_e000;
/// One past the last byte of the internal DRAM window
const DRAM_END: u32 = 0x4000_0000;

/// Reads stack words straight from DRAM.
///
/// Addresses outside the DRAM window, or unaligned, read as zero so a
/// corrupt stack pointer can never raise a second fault.
#[derive(Debug, Default, Clone, Copy)]
pub struct DramStackMemory;

impl StackMemory for DramStackMemory {
    fn read_word(&self, addr: u32) -> u32 {
        if !(DRAM_START..DRAM_END - 3).contains(&addr) || addr & 0x3 != 0 {
            return 0;
        }
        // SAFETY: aligned address inside always-mapped internal RAM
        unsafe { core::ptr::read_volatile(addr as usize as *const u32) }
    }
}
