//! Boot and crash diagnostics subsystem
//!
//! Classifies every boot (power-on, soft reset, firmware update, crash),
//! captures fatal exceptions into reset-persistent RAM, coordinates orderly
//! soft restarts and reports the result to the shell and to the server.
//!
//! # Startup
//!
//! ```ignore
//! use bootdiag::subsystems::boot::{BootDiagnostics, BOOT_DATA};
//!
//! let boot = BootDiagnostics::start(&BOOT_DATA, &PLATFORM, DiagnosticsParams::default())?;
//! // ... bring up the remaining subsystems ...
//! boot.mark_stable();
//! ```
//!
//! `start` must run before anything that depends on the boot reason, and
//! before the first point where a crash should be recorded.

pub mod commands;
pub mod crash;
pub mod report;
pub mod shutdown;
pub mod store;

pub use commands::{register_commands, BootCommand, BOOT_COMMAND, BOOT_STATUS_COMMAND};
pub use crash::{capture_crash, on_fatal_exception};
pub use report::{CrashRecordText, NOTIFY_KIND, NOTIFY_SUBTYPE, RECORD_CAPACITY};
pub use shutdown::{RestartMonitor, ShutdownCoordinator};
pub use store::{ResetPersistentStore, BOOT_DATA};

use core::sync::atomic::AtomicBool;

use bootdiag_core::boot::{BootClassification, BootReason, PersistentBootState};

use crate::parameters::DiagnosticsParams;
use crate::platform::{
    traits::{Platform, ResetController},
    Result,
};

/// Boot diagnostics service.
///
/// Created once at startup and kept for the life of the image. The boot
/// classification is fixed at construction.
pub struct BootDiagnostics<'a, P: Platform> {
    store: &'a ResetPersistentStore,
    platform: &'a P,
    params: DiagnosticsParams,
    classification: BootClassification,
    /// Crash record already sent this session
    crash_notified: AtomicBool,
}

impl<'a, P: Platform> BootDiagnostics<'a, P> {
    /// Classify this boot and install the crash handler.
    ///
    /// # Errors
    ///
    /// Fails if the platform refuses the fatal-exception handler. The store
    /// has been classified by then.
    pub fn start(
        store: &'a ResetPersistentStore,
        platform: &'a P,
        params: DiagnosticsParams,
    ) -> Result<Self> {
        let reset = platform.reset_controller();
        let core0 = reset.reset_reason(0);
        let core1 = reset.reset_reason(1);

        let classification = store.classify_boot(core0, core1);
        let state = store.read();

        crate::log_info!(
            "Boot #{} reasons for CPU0={} and CPU1={}",
            state.boot_count,
            core0.code(),
            core1.code()
        );
        if classification.reason.is_crash() {
            crate::log_error!(
                "Boot reason: {} (crash #{}, {} early)",
                classification.reason.name(),
                state.crash_count_total,
                classification.early_crash_count
            );
        } else {
            crate::log_info!("Boot reason: {}", classification.reason.name());
        }

        reset.install_fatal_handler(on_fatal_exception::<P::Memory>)?;

        Ok(Self {
            store,
            platform,
            params,
            classification,
            crash_notified: AtomicBool::new(false),
        })
    }

    pub fn boot_reason(&self) -> BootReason {
        self.classification.reason
    }

    pub fn boot_reason_name(&self) -> &'static str {
        self.classification.reason.name()
    }

    /// Crashes since the last deliberate reset
    pub fn crash_count(&self) -> u32 {
        self.store.read().crash_count_total
    }

    /// Early crash streak as it was at boot, before any `mark_stable`.
    pub fn early_crash_count(&self) -> u32 {
        self.classification.early_crash_count
    }

    /// Copy of the reset-persistent store
    pub fn snapshot(&self) -> PersistentBootState {
        self.store.read()
    }

    pub fn params(&self) -> &DiagnosticsParams {
        &self.params
    }

    pub fn platform(&self) -> &P {
        self.platform
    }

    /// Flag the next restart as deliberate.
    pub fn set_soft_reset(&self) {
        self.store.set_soft_reset();
    }

    /// Flag the next restart as a firmware update.
    pub fn set_firmware_update(&self) {
        self.store.set_firmware_update();
    }

    /// Declare this image healthy. Clears the early crash streak.
    pub fn mark_stable(&self) {
        self.store.mark_stable();
        crate::log_info!("Boot marked stable");
    }
}
