//! Exception cause names

/// Crash type reported for a deliberate abort
pub const ABORT_MARKER: &str = "abort()";

const CAUSE_NAMES: [&str; 40] = [
    "IllegalInstruction", "Syscall", "InstructionFetchError", "LoadStoreError",
    "Level1Interrupt", "Alloca", "IntegerDivideByZero", "PCValue",
    "Privileged", "LoadStoreAlignment", "res", "res",
    "InstrPDAddrError", "LoadStorePIFDataError", "InstrPIFAddrError", "LoadStorePIFAddrError",
    "InstTLBMiss", "InstTLBMultiHit", "InstFetchPrivilege", "res",
    "InstrFetchProhibited", "res", "res", "res",
    "LoadStoreTLBMiss", "LoadStoreTLBMultihit", "LoadStorePrivilege", "res",
    "LoadProhibited", "StoreProhibited", "res", "res",
    "Cp0Dis", "Cp1Dis", "Cp2Dis", "Cp3Dis",
    "Cp4Dis", "Cp5Dis", "Cp6Dis", "Cp7Dis",
];

/// Symbolic name of an exception cause code, `"Unknown"` if out of range.
pub fn exception_name(cause: u32) -> &'static str {
    usize::try_from(cause)
        .ok()
        .and_then(|index| CAUSE_NAMES.get(index))
        .copied()
        .unwrap_or("Unknown")
}
