//! Process-wide reset-persistent store cell
//!
//! The region survives software resets and crashes but holds garbage after a
//! power cycle, so it is placed in a no-init RTC RAM section on the device
//! and zeroed by the classifier on power-on, before any field is read.

use core::cell::UnsafeCell;
use core::ptr;

use bootdiag_core::boot::{
    classify, mark_stable, BootClassification, PersistentBootState, ResetReason,
};

/// Fixed-layout store shared by the normal and the exception context.
///
/// Normal-context access goes through a critical section. The crash handler
/// bypasses it with [`ResetPersistentStore::exception_context`], since it
/// may interrupt a holder of the critical section and must not wait.
pub struct ResetPersistentStore {
    cell: UnsafeCell<PersistentBootState>,
}

// SAFETY: all normal-context access is serialized by `critical_section`; the
// exception-context accessor is unsafe and documented below.
unsafe impl Sync for ResetPersistentStore {}

impl ResetPersistentStore {
    pub const fn zeroed() -> Self {
        Self {
            cell: UnsafeCell::new(PersistentBootState::zeroed()),
        }
    }

    /// Copy of the current contents
    pub fn read(&self) -> PersistentBootState {
        // SAFETY: shared read inside the critical section
        critical_section::with(|_| unsafe { *self.cell.get() })
    }

    /// Mutate the contents inside a critical section.
    pub fn update<R>(&self, f: impl FnOnce(&mut PersistentBootState) -> R) -> R {
        // SAFETY: exclusive access inside the critical section
        critical_section::with(|_| f(unsafe { &mut *self.cell.get() }))
    }

    /// Classify this boot against the stored flags.
    ///
    /// After a power-on reset the region is overwritten with zeroes without
    /// being read, since its contents are undefined.
    pub fn classify_boot(&self, core0: ResetReason, core1: ResetReason) -> BootClassification {
        critical_section::with(|_| {
            if core0.is_power_on() {
                // SAFETY: exclusive inside the critical section; the write
                // does not read or drop the previous contents
                unsafe { ptr::write(self.cell.get(), PersistentBootState::zeroed()) };
            }
            // SAFETY: exclusive inside the critical section
            classify(unsafe { &mut *self.cell.get() }, core0, core1)
        })
    }

    pub fn mark_stable(&self) {
        self.update(mark_stable);
    }

    pub fn set_soft_reset(&self) {
        self.update(|state| state.set_soft_reset(true));
    }

    pub fn set_firmware_update(&self) {
        self.update(|state| state.set_firmware_update(true));
    }

    /// Direct access for the fatal-exception handler.
    ///
    /// # Safety
    ///
    /// Only callable from the fatal-exception context, where nothing else
    /// will run again before the restart. The caller must not hold the
    /// returned reference past the handler.
    #[allow(clippy::mut_from_ref)]
    pub unsafe fn exception_context(&self) -> &mut PersistentBootState {
        // SAFETY: guaranteed by the caller
        unsafe { &mut *self.cell.get() }
    }
}

/// The device's reset-persistent store.
#[cfg_attr(feature = "esp32", link_section = ".rtc_noinit")]
pub static BOOT_DATA: ResetPersistentStore = ResetPersistentStore::zeroed();

#[cfg(test)]
mod tests {
    use super::*;
    use bootdiag_core::boot::BootReason;

    #[test]
    fn test_power_on_zeroes_store() {
        let store = ResetPersistentStore::zeroed();
        store.update(|s| {
            s.boot_count = 9;
            s.crash_count_total = 4;
        });

        let c = store.classify_boot(ResetReason::PowerOn, ResetReason::ExternalCpu);

        assert_eq!(c.reason, BootReason::PowerOn);
        let state = store.read();
        assert_eq!(state.boot_count, 0);
        assert_eq!(state.crash_count_total, 0);
        assert_eq!(state.reset_reason_core1(), ResetReason::ExternalCpu);
    }

    #[test]
    fn test_soft_reset_handshake() {
        let store = ResetPersistentStore::zeroed();
        store.classify_boot(ResetReason::PowerOn, ResetReason::PowerOn);
        store.set_soft_reset();

        let c = store.classify_boot(ResetReason::Software, ResetReason::SoftwareCpu);

        assert_eq!(c.reason, BootReason::SoftReset);
        assert!(!store.read().soft_reset());
        assert_eq!(store.read().boot_count, 1);
    }

    #[test]
    fn test_firmware_update_handshake() {
        let store = ResetPersistentStore::zeroed();
        store.set_firmware_update();
        let c = store.classify_boot(ResetReason::Software, ResetReason::SoftwareCpu);
        assert_eq!(c.reason, BootReason::FirmwareUpdate);
    }

    #[test]
    fn test_mark_stable() {
        let store = ResetPersistentStore::zeroed();
        store.classify_boot(ResetReason::TimerGroup0Watchdog, ResetReason::NoMean);
        assert_eq!(store.read().crash_count_early, 1);

        store.mark_stable();

        let state = store.read();
        assert!(state.stable_reached());
        assert_eq!(state.crash_count_early, 0);
        assert_eq!(state.crash_count_total, 1);
    }
}
