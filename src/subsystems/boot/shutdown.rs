//! Shutdown coordinator
//!
//! Drives [`ShutdownState`] from restart requests, subsystem
//! acknowledgements and the one-second ticker, and performs the final
//! unmount and hardware restart.
//!
//! # Sequence
//!
//! ```text
//! request_restart(false)
//!   ├─ set soft_reset flag
//!   ├─ publish system.shuttingdown ──► subscribers may register_pending()
//!   │    └─ completion: nothing pending? countdown = fast path
//!   └─ subscribe ticker.1
//! ticker.1 (every second)
//!   └─ countdown -= 1; at 0:
//!        ├─ unsubscribe ticker.1
//!        └─ publish system.shutdown
//!             └─ completion: unmount config, restart
//! ```

use bootdiag_core::report::RestartProgress;
use bootdiag_core::shutdown::{ShutdownPhase, ShutdownState, ShutdownTimings, TickOutcome};

use super::store::ResetPersistentStore;
use crate::core::events::{Event, EventBus, EventListener, Signal};
use crate::core::traits::{CriticalState, SharedState};
use crate::platform::traits::{ConfigStore, Platform, ResetController};

/// Subscription tag for the countdown ticker
const TICKER_TAG: &str = "boot.shutdown";

/// Process-wide restart coordinator.
///
/// Counter updates happen inside short critical sections; events are always
/// published with the state lock released.
pub struct ShutdownCoordinator<'a, B, P>
where
    B: EventBus + Sync,
    P: Platform + Sync,
{
    state: CriticalState<ShutdownState>,
    bus: &'a B,
    store: &'a ResetPersistentStore,
    platform: &'a P,
}

impl<'a, B, P> ShutdownCoordinator<'a, B, P>
where
    B: EventBus + Sync,
    P: Platform + Sync,
{
    /// The platform supplies the config store unmounted before the restart
    /// and the reset controller that performs it.
    pub fn new(
        bus: &'a B,
        store: &'a ResetPersistentStore,
        platform: &'a P,
        timings: ShutdownTimings,
    ) -> Self {
        Self {
            state: CriticalState::new(ShutdownState::new(timings)),
            bus,
            store,
            platform,
        }
    }

    /// A subsystem needs time to flush before the restart.
    ///
    /// `tag` is only used for diagnostics; calls must be balanced by
    /// [`acknowledge`](Self::acknowledge).
    pub fn register_pending(&self, tag: &str) {
        let pending = self.state.with_mut(|s| {
            s.register_pending();
            s.pending()
        });
        crate::log_debug!("Shutdown pending: {} ({} pending)", tag, pending);
    }

    /// A subsystem finished flushing.
    pub fn acknowledge(&self, tag: &str) {
        let (shortened, pending) = self.state.with_mut(|s| (s.acknowledge(), s.pending()));
        crate::log_debug!("Shutdown done: {} ({} pending)", tag, pending);
        if shortened {
            crate::log_info!("All subsystems ready, restarting shortly");
        }
    }

    /// True while a soft restart is counting down.
    pub fn is_shutting_down(&self) -> bool {
        self.state.with(|s| s.is_shutting_down())
    }

    /// Remaining countdown and pending subsystem count.
    pub fn status(&self) -> RestartProgress {
        self.state.with(|s| RestartProgress {
            countdown_secs: s.countdown(),
            pending: s.pending(),
        })
    }

    pub fn phase(&self) -> ShutdownPhase {
        self.state.with(|s| s.phase())
    }

    fn on_announced(&self) {
        let (phase, countdown) = self.state.with_mut(|s| {
            s.announced();
            (s.phase(), s.countdown())
        });
        if phase == ShutdownPhase::CountingDown {
            crate::log_info!("Nothing pending, restart in {} seconds", countdown);
        }
    }

    fn on_tick(&self) {
        match self.state.with_mut(|s| s.tick()) {
            TickOutcome::Idle | TickOutcome::Counting => {}
            TickOutcome::Progress { remaining, pending } => {
                crate::log_info!("Restart in {} seconds ({} pending)...", remaining, pending);
            }
            TickOutcome::RestartImminent => crate::log_info!("Restart now"),
            TickOutcome::Expired => self.shutdown(),
        }
    }

    /// Final stage: stop ticking and tell everyone we are going down.
    fn shutdown(&self) {
        self.bus.unsubscribe(TICKER_TAG, Signal::Ticker1);
        self.bus.publish(
            &Event::new(Signal::SystemShutdown),
            Some(&|_: &Event| self.restart_now()),
        );
    }

    fn restart_now(&self) {
        if let Err(e) = self.platform.config_store().unmount() {
            crate::log_warn!("Config unmount failed: {:?}", e);
        }
        self.state.with_mut(|s| s.restarted());
        self.platform.reset_controller().restart();
    }
}

impl<B, P> ShutdownCoordinator<'static, B, P>
where
    B: EventBus + Sync + 'static,
    P: Platform + Sync + 'static,
{
    /// Restart the device.
    ///
    /// Sets the deliberate-reset flag first so the next boot classifies as a
    /// soft reset. A hard restart happens immediately with no events. A soft
    /// restart announces `system.shuttingdown` and counts down the drain
    /// budget; requesting it again while draining re-arms the budget.
    pub fn request_restart(&'static self, hard: bool) {
        self.store.set_soft_reset();

        if hard {
            crate::log_warn!("Hard restart requested");
            self.state.with_mut(|s| s.restarted());
            self.platform.reset_controller().restart();
            return;
        }

        let budget = self.state.with_mut(|s| {
            s.begin();
            s.countdown()
        });
        crate::log_info!("Shutting down for restart ({} seconds max)...", budget);

        self.bus.publish(
            &Event::new(Signal::SystemShuttingDown),
            Some(&|_: &Event| self.on_announced()),
        );

        if let Err(e) = self.bus.subscribe(TICKER_TAG, Signal::Ticker1, self) {
            // Without a ticker the countdown would never expire
            crate::log_error!("Cannot schedule restart countdown: {:?}", e);
            self.shutdown();
        }
    }
}

/// Read-only view of an in-progress restart, for status displays.
pub trait RestartMonitor: Sync {
    /// Countdown and pending count while a soft restart is draining.
    fn restart_progress(&self) -> Option<RestartProgress>;
}

impl<B, P> RestartMonitor for ShutdownCoordinator<'_, B, P>
where
    B: EventBus + Sync,
    P: Platform + Sync,
{
    fn restart_progress(&self) -> Option<RestartProgress> {
        self.is_shutting_down().then(|| self.status())
    }
}

impl<B, P> EventListener for ShutdownCoordinator<'_, B, P>
where
    B: EventBus + Sync,
    P: Platform + Sync,
{
    fn on_event(&self, event: &Event) {
        if event.signal == Signal::Ticker1 {
            self.on_tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};

    use crate::core::events::EventDispatcher;
    use crate::platform::mock::{MockPlatform, MockResetController};

    type Bus = EventDispatcher<8>;
    type Coordinator = ShutdownCoordinator<'static, Bus, MockPlatform>;

    struct Fixture {
        bus: &'static Bus,
        store: &'static ResetPersistentStore,
        platform: &'static MockPlatform,
        coordinator: &'static Coordinator,
    }

    fn leak<T>(value: T) -> &'static T {
        Box::leak(Box::new(value))
    }

    fn fixture() -> Fixture {
        let bus = leak(Bus::new());
        let store = leak(ResetPersistentStore::zeroed());
        let platform = leak(MockPlatform::new());
        let coordinator = leak(ShutdownCoordinator::new(
            bus,
            store,
            platform,
            ShutdownTimings::default(),
        ));
        Fixture {
            bus,
            store,
            platform,
            coordinator,
        }
    }

    fn tick(bus: &Bus, times: u32) {
        for _ in 0..times {
            bus.publish(&Event::new(Signal::Ticker1), None);
        }
    }

    /// Counts deliveries of one signal.
    struct Counter(AtomicU32);

    impl EventListener for Counter {
        fn on_event(&self, _event: &Event) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    /// Registers as pending when the shutdown is announced.
    struct SlowSubsystem(&'static Coordinator);

    impl EventListener for SlowSubsystem {
        fn on_event(&self, _event: &Event) {
            self.0.register_pending("slow");
        }
    }

    #[test]
    fn test_hard_restart_is_immediate() {
        let f = fixture();
        let announced = leak(Counter(AtomicU32::new(0)));
        f.bus.subscribe("t", Signal::SystemShuttingDown, announced).unwrap();
        f.bus.subscribe("t", Signal::SystemShutdown, announced).unwrap();

        f.coordinator.request_restart(true);

        assert_eq!(f.platform.reset.restart_count(), 1);
        assert!(f.store.read().soft_reset());
        assert_eq!(announced.0.load(Ordering::SeqCst), 0);
        assert!(!f.bus.is_subscribed(TICKER_TAG, Signal::Ticker1));
        assert_eq!(f.platform.config.unmount_count(), 0);
    }

    #[test]
    fn test_soft_restart_without_pending_uses_fast_path() {
        let f = fixture();
        f.coordinator.request_restart(false);

        assert!(f.store.read().soft_reset());
        assert!(f.coordinator.is_shutting_down());
        assert_eq!(f.coordinator.status().countdown_secs, 2);
        assert_eq!(f.coordinator.phase(), ShutdownPhase::CountingDown);
        assert!(f.bus.is_subscribed(TICKER_TAG, Signal::Ticker1));

        tick(f.bus, 1);
        assert_eq!(f.platform.reset.restart_count(), 0);
        tick(f.bus, 1);

        assert_eq!(f.platform.reset.restart_count(), 1);
        assert_eq!(f.platform.config.unmount_count(), 1);
        assert!(!f.coordinator.is_shutting_down());
        assert_eq!(f.coordinator.phase(), ShutdownPhase::Restarted);
        assert!(!f.bus.is_subscribed(TICKER_TAG, Signal::Ticker1));
    }

    #[test]
    fn test_pending_subsystem_holds_full_budget() {
        let f = fixture();
        let slow = leak(SlowSubsystem(f.coordinator));
        f.bus.subscribe("slow", Signal::SystemShuttingDown, slow).unwrap();

        f.coordinator.request_restart(false);

        assert_eq!(f.coordinator.phase(), ShutdownPhase::AwaitingAcks);
        assert_eq!(
            f.coordinator.status(),
            RestartProgress {
                countdown_secs: 60,
                pending: 1
            }
        );

        tick(f.bus, 59);
        assert_eq!(f.platform.reset.restart_count(), 0);
        tick(f.bus, 1);
        assert_eq!(f.platform.reset.restart_count(), 1);
    }

    #[test]
    fn test_acknowledge_shortens_countdown() {
        let f = fixture();
        let slow = leak(SlowSubsystem(f.coordinator));
        f.bus.subscribe("slow", Signal::SystemShuttingDown, slow).unwrap();
        f.coordinator.request_restart(false);

        tick(f.bus, 10);
        assert_eq!(f.coordinator.status().countdown_secs, 50);

        f.coordinator.acknowledge("slow");

        assert_eq!(f.coordinator.status().countdown_secs, 2);
        assert_eq!(f.coordinator.phase(), ShutdownPhase::CountingDown);
        tick(f.bus, 2);
        assert_eq!(f.platform.reset.restart_count(), 1);
    }

    #[test]
    fn test_shutdown_event_precedes_restart() {
        struct SeesRestart {
            reset: &'static MockResetController,
            restarts_seen: AtomicU32,
        }
        impl EventListener for SeesRestart {
            fn on_event(&self, _event: &Event) {
                self.restarts_seen
                    .store(self.reset.restart_count() + 1, Ordering::SeqCst);
            }
        }

        let f = fixture();
        let watcher = leak(SeesRestart {
            reset: &f.platform.reset,
            restarts_seen: AtomicU32::new(0),
        });
        f.bus.subscribe("watch", Signal::SystemShutdown, watcher).unwrap();

        f.coordinator.request_restart(false);
        tick(f.bus, 2);

        // Delivered while no restart had happened yet
        assert_eq!(watcher.restarts_seen.load(Ordering::SeqCst), 1);
        assert_eq!(f.platform.reset.restart_count(), 1);
    }

    #[test]
    fn test_second_request_rearms_budget() {
        let f = fixture();
        let slow = leak(SlowSubsystem(f.coordinator));
        f.bus.subscribe("slow", Signal::SystemShuttingDown, slow).unwrap();

        f.coordinator.request_restart(false);
        tick(f.bus, 30);
        f.coordinator.request_restart(false);

        assert_eq!(f.coordinator.status().countdown_secs, 60);
        assert_eq!(f.bus.subscriber_count(Signal::Ticker1), 1);
    }

    #[test]
    fn test_ticker_table_full_restarts_without_countdown() {
        let bus = leak(EventDispatcher::<1>::new());
        let store = leak(ResetPersistentStore::zeroed());
        let platform = leak(MockPlatform::new());
        let coordinator = leak(ShutdownCoordinator::new(
            bus,
            store,
            platform,
            ShutdownTimings::default(),
        ));
        let other = leak(Counter(AtomicU32::new(0)));
        bus.subscribe("other", Signal::Named("x"), other).unwrap();

        coordinator.request_restart(false);

        assert_eq!(platform.reset.restart_count(), 1);
        assert_eq!(platform.config.unmount_count(), 1);
    }

    #[test]
    fn test_restart_progress_only_while_draining() {
        let f = fixture();
        assert_eq!(f.coordinator.restart_progress(), None);

        f.coordinator.request_restart(false);
        assert_eq!(
            f.coordinator.restart_progress(),
            Some(RestartProgress {
                countdown_secs: 2,
                pending: 0
            })
        );
    }

    #[test]
    fn test_acknowledge_while_idle_does_not_start_countdown() {
        let f = fixture();
        f.coordinator.acknowledge("stray");
        assert!(!f.coordinator.is_shutting_down());
        assert_eq!(f.coordinator.phase(), ShutdownPhase::Idle);
        tick(f.bus, 5);
        assert_eq!(f.platform.reset.restart_count(), 0);
    }
}
