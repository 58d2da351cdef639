use std::env;

fn main() {
    // Build-time defaults for the diagnostics parameters. Both can be
    // overridden per build from the environment.

    // Firmware version reported in status output and crash records
    if let Ok(version) = env::var("BOOTDIAG_FIRMWARE_VERSION") {
        println!("cargo:rustc-env=BOOTDIAG_FIRMWARE_VERSION={}", version);
        println!(
            "cargo:warning=Using BOOTDIAG_FIRMWARE_VERSION from environment: {}",
            version
        );
    } else {
        let version = env::var("CARGO_PKG_VERSION").unwrap_or_default();
        println!("cargo:rustc-env=BOOTDIAG_FIRMWARE_VERSION={}", version);
    }

    // Seconds dependent subsystems get to drain before a soft restart
    if let Ok(budget) = env::var("BOOTDIAG_DRAIN_BUDGET_SECS") {
        if !matches!(budget.trim().parse::<u32>(), Ok(secs) if secs > 0) {
            panic!(
                "BOOTDIAG_DRAIN_BUDGET_SECS must be a positive number of seconds, got {:?}",
                budget
            );
        }
        println!("cargo:rustc-env=BOOTDIAG_DRAIN_BUDGET_SECS={}", budget);
        println!(
            "cargo:warning=Using BOOTDIAG_DRAIN_BUDGET_SECS from environment: {}",
            budget
        );
    } else {
        println!("cargo:rustc-env=BOOTDIAG_DRAIN_BUDGET_SECS=60");
    }

    println!("cargo:rerun-if-env-changed=BOOTDIAG_FIRMWARE_VERSION");
    println!("cargo:rerun-if-env-changed=BOOTDIAG_DRAIN_BUDGET_SECS");
}
