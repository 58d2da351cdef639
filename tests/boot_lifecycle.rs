//! Host-side walk through several boot sessions using the mock platform.
//!
//! Run with `cargo test --features mock`.

#![cfg(feature = "mock")]

use bootdiag::core::events::{Event, EventBus, EventDispatcher, EventListener, Signal};
use bootdiag::parameters::DiagnosticsParams;
use bootdiag::platform::mock::{MockCommandRegistry, MockPlatform, MockStackMemory};
use bootdiag::subsystems::boot::{
    capture_crash, register_commands, BootCommand, BootDiagnostics, ResetPersistentStore,
    ShutdownCoordinator,
};
use bootdiag_core::boot::{BootReason, ResetReason, REGISTER_COUNT};
use bootdiag_core::crash::ExceptionFrame;

type Bus = EventDispatcher<8>;
type Coordinator = ShutdownCoordinator<'static, Bus, MockPlatform>;

fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

/// A logger that needs a moment to flush on shutdown.
struct Logger {
    coordinator: &'static Coordinator,
}

impl EventListener for Logger {
    fn on_event(&self, event: &Event) {
        if event.signal == Signal::SystemShuttingDown {
            self.coordinator.register_pending("logger");
        }
    }
}

fn session(
    store: &'static ResetPersistentStore,
    platform: &'static MockPlatform,
) -> (&'static BootDiagnostics<'static, MockPlatform>, &'static Bus, &'static Coordinator) {
    let diag = leak(BootDiagnostics::start(store, platform, DiagnosticsParams::default()).unwrap());
    let bus = leak(Bus::new());
    let timings = diag.params().timings();
    let coordinator = leak(ShutdownCoordinator::new(bus, store, platform, timings));
    (diag, bus, coordinator)
}

#[test]
fn test_soft_restart_then_crash() {
    let store = leak(ResetPersistentStore::zeroed());
    let platform = leak(MockPlatform::new());

    // Session 1: power on, become stable, restart with a slow subsystem
    let (diag, bus, coordinator) = session(store, platform);
    assert_eq!(diag.boot_reason(), BootReason::PowerOn);
    diag.mark_stable();

    let logger = leak(Logger { coordinator });
    bus.subscribe("logger", Signal::SystemShuttingDown, logger).unwrap();
    coordinator.request_restart(false);
    assert_eq!(coordinator.status().pending, 1);

    for _ in 0..3 {
        bus.publish(&Event::new(Signal::Ticker1), None);
    }
    coordinator.acknowledge("logger");
    for _ in 0..2 {
        bus.publish(&Event::new(Signal::Ticker1), None);
    }
    assert_eq!(platform.reset.restart_count(), 1);

    // Session 2: deliberate restart, then a crash after stability
    platform
        .reset
        .set_reasons(ResetReason::Software, ResetReason::SoftwareCpu);
    let (diag, _, _) = session(store, platform);
    assert_eq!(diag.boot_reason(), BootReason::SoftReset);
    assert_eq!(diag.notify_debug_crash(), Ok(false));
    diag.mark_stable();

    let mut regs = [0u32; REGISTER_COUNT];
    regs[0] = 0x400d_5678;
    regs[19] = 28;
    unsafe {
        capture_crash(
            store,
            &ExceptionFrame::new(regs),
            0,
            false,
            &MockStackMemory::default(),
        )
    };

    // Session 3: the crash is reported
    platform
        .reset
        .set_reasons(ResetReason::TimerGroup0Watchdog, ResetReason::TimerGroup0Watchdog);
    let (diag, _, _) = session(store, platform);
    assert_eq!(diag.boot_reason(), BootReason::Crash);
    assert_eq!(diag.crash_count(), 1);
    assert_eq!(diag.snapshot().boot_count, 2);
    assert_eq!(diag.notify_debug_crash(), Ok(true));

    let record = platform.notifier.last().unwrap();
    assert_eq!(record.text.split(',').count(), 14);
    assert!(record.text.contains(",Crash,7,7,1,0,LoadProhibited,0,"));

    let mut shell = MockCommandRegistry::new();
    register_commands(&mut shell, leak(BootCommand::new(diag, None))).unwrap();
    let mut out = String::new();
    shell.execute(&["boot", "status"], &mut out).unwrap();
    assert!(out.contains("Last crash: LoadProhibited exception on core 0"));
    assert!(out.contains("  Backtrace:\n  0x400d5678\n"));
}

#[test]
fn test_hard_restart_skips_drain() {
    let store = leak(ResetPersistentStore::zeroed());
    let platform = leak(MockPlatform::new());
    let (_, bus, coordinator) = session(store, platform);

    coordinator.request_restart(true);

    assert_eq!(platform.reset.restart_count(), 1);
    assert!(!coordinator.is_shutting_down());
    assert_eq!(bus.subscriber_count(Signal::Ticker1), 0);
    assert!(store.read().soft_reset());
}
