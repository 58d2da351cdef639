//! Hardware reset causes
//!
//! Codes reported by the RTC controller for each processing core.

use core::fmt;

/// Reset cause field width per core in the reset-state register
const RESET_CAUSE_BITS: u32 = 6;
const RESET_CAUSE_MASK: u32 = (1 << RESET_CAUSE_BITS) - 1;

/// Number of cores with a reset cause field
pub const CORE_COUNT: u8 = 2;

/// Per-core hardware reset cause.
///
/// The discriminants are the raw codes from the RTC reset-state register.
/// Reports print the numeric code, so [`ResetReason::code`] is the canonical
/// representation outside of this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum ResetReason {
    /// No reason latched (also the zeroed-store value)
    #[default]
    NoMean = 0,
    /// Supply power cycle
    PowerOn = 1,
    /// Software system reset
    Software = 3,
    /// Legacy watchdog
    LegacyWatchdog = 4,
    /// Wake from deep sleep
    DeepSleep = 5,
    /// SDIO reset
    Sdio = 6,
    /// Timer group 0 watchdog (system)
    TimerGroup0Watchdog = 7,
    /// Timer group 1 watchdog (system)
    TimerGroup1Watchdog = 8,
    /// RTC watchdog (system)
    RtcWatchdog = 9,
    /// Intrusion test
    Intrusion = 10,
    /// Timer group watchdog (core only)
    TimerGroupCpuWatchdog = 11,
    /// Software core reset
    SoftwareCpu = 12,
    /// RTC watchdog (core only)
    RtcWatchdogCpu = 13,
    /// Reset asserted by the other core
    ExternalCpu = 14,
    /// Brown-out detector
    BrownOut = 15,
    /// RTC watchdog (system and RTC domain)
    RtcWatchdogRtc = 16,
}

impl ResetReason {
    /// Map a raw register code. Codes the controller does not define map to
    /// [`ResetReason::NoMean`].
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Self::PowerOn,
            3 => Self::Software,
            4 => Self::LegacyWatchdog,
            5 => Self::DeepSleep,
            6 => Self::Sdio,
            7 => Self::TimerGroup0Watchdog,
            8 => Self::TimerGroup1Watchdog,
            9 => Self::RtcWatchdog,
            10 => Self::Intrusion,
            11 => Self::TimerGroupCpuWatchdog,
            12 => Self::SoftwareCpu,
            13 => Self::RtcWatchdogCpu,
            14 => Self::ExternalCpu,
            15 => Self::BrownOut,
            16 => Self::RtcWatchdogRtc,
            _ => Self::NoMean,
        }
    }

    /// Extract the cause for `core` from a raw reset-state register value.
    /// Cores the register has no field for report [`ResetReason::NoMean`].
    pub fn from_state_register(state: u32, core: u8) -> Self {
        if core >= CORE_COUNT {
            return Self::NoMean;
        }
        let shift = u32::from(core) * RESET_CAUSE_BITS;
        Self::from_code(((state >> shift) & RESET_CAUSE_MASK) as u8)
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_power_on(self) -> bool {
        self == Self::PowerOn
    }
}

impl fmt::Display for ResetReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_mapping_is_stable() {
        for code in 0u8..=20 {
            let reason = ResetReason::from_code(code);
            match code {
                1 | 3..=16 => assert_eq!(reason.code(), code),
                _ => assert_eq!(reason, ResetReason::NoMean),
            }
        }
    }

    #[test]
    fn test_state_register_fields_per_core() {
        // core 0: SW_CPU_RESET (12), core 1: EXT_CPU_RESET (14)
        let state = 12 | (14 << 6) | (0x3f << 12);
        assert_eq!(ResetReason::from_state_register(state, 0), ResetReason::SoftwareCpu);
        assert_eq!(ResetReason::from_state_register(state, 1), ResetReason::ExternalCpu);
    }

    #[test]
    fn test_state_register_unknown_core() {
        let state = 1 | (1 << 6);
        assert_eq!(ResetReason::from_state_register(state, 2), ResetReason::NoMean);
        assert_eq!(ResetReason::from_state_register(state, u8::MAX), ResetReason::NoMean);
    }

    #[test]
    fn test_power_on_detection() {
        assert!(ResetReason::PowerOn.is_power_on());
        assert!(!ResetReason::Software.is_power_on());
        assert!(!ResetReason::BrownOut.is_power_on());
    }
}
