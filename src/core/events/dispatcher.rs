//! Fixed-capacity in-process event dispatcher

use heapless::Vec;

use super::{Completion, Event, EventBus, EventError, EventListener, Signal};
use crate::core::traits::{CriticalState, SharedState};

#[derive(Clone, Copy)]
struct Subscription {
    tag: &'static str,
    signal: Signal,
    listener: &'static dyn EventListener,
}

/// Synchronous dispatcher with room for `N` subscriptions.
///
/// Delivery happens on the publisher's context. The subscriber list is
/// copied out of the lock before delivery, so listeners may publish,
/// subscribe or unsubscribe from inside `on_event`; changes take effect from
/// the next publish.
pub struct EventDispatcher<const N: usize> {
    subscriptions: CriticalState<Vec<Subscription, N>>,
}

impl<const N: usize> EventDispatcher<N> {
    pub const fn new() -> Self {
        Self {
            subscriptions: CriticalState::new(Vec::new()),
        }
    }

    /// Number of subscriptions for `signal`
    pub fn subscriber_count(&self, signal: Signal) -> usize {
        self.subscriptions
            .with(|subs| subs.iter().filter(|s| s.signal == signal).count())
    }

    pub fn is_subscribed(&self, tag: &'static str, signal: Signal) -> bool {
        self.subscriptions
            .with(|subs| subs.iter().any(|s| s.tag == tag && s.signal == signal))
    }
}

impl<const N: usize> Default for EventDispatcher<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventBus for EventDispatcher<N> {
    fn subscribe(
        &self,
        tag: &'static str,
        signal: Signal,
        listener: &'static dyn EventListener,
    ) -> Result<(), EventError> {
        let result = self.subscriptions.with_mut(|subs| {
            if subs.iter().any(|s| s.tag == tag && s.signal == signal) {
                return Ok(());
            }
            subs.push(Subscription {
                tag,
                signal,
                listener,
            })
            .map_err(|_| EventError::TableFull)
        });

        if result.is_err() {
            crate::log_warn!("No slot for {} subscription to {}", tag, signal.name());
        }
        result
    }

    fn unsubscribe(&self, tag: &'static str, signal: Signal) {
        self.subscriptions
            .with_mut(|subs| subs.retain(|s| !(s.tag == tag && s.signal == signal)));
    }

    fn publish(&self, event: &Event, on_complete: Option<Completion<'_>>) {
        let targets: Vec<&'static dyn EventListener, N> = self.subscriptions.with(|subs| {
            subs.iter()
                .filter(|s| s.signal == event.signal)
                .map(|s| s.listener)
                .collect()
        });

        for listener in targets {
            listener.on_event(event);
        }

        if let Some(done) = on_complete {
            done(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicU32, Ordering};
    use std::sync::atomic::AtomicBool;

    #[derive(Default)]
    struct Counter {
        hits: AtomicU32,
    }

    impl EventListener for Counter {
        fn on_event(&self, _event: &Event) {
            self.hits.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn counter() -> &'static Counter {
        Box::leak(Box::new(Counter::default()))
    }

    #[test]
    fn test_publish_reaches_matching_subscribers_only() {
        let bus = EventDispatcher::<4>::new();
        let ticks = counter();
        let shutdowns = counter();
        bus.subscribe("a", Signal::Ticker1, ticks).unwrap();
        bus.subscribe("b", Signal::SystemShutdown, shutdowns).unwrap();

        bus.publish(&Event::new(Signal::Ticker1), None);
        bus.publish(&Event::new(Signal::Ticker1), None);

        assert_eq!(ticks.hits.load(Ordering::SeqCst), 2);
        assert_eq!(shutdowns.hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_completion_runs_after_subscribers() {
        struct Flag(AtomicBool);
        impl EventListener for Flag {
            fn on_event(&self, _event: &Event) {
                self.0.store(true, Ordering::SeqCst);
            }
        }
        let flag: &'static Flag = Box::leak(Box::new(Flag(AtomicBool::new(false))));
        let bus = EventDispatcher::<2>::new();
        bus.subscribe("flag", Signal::SystemShuttingDown, flag).unwrap();

        let seen_after = AtomicBool::new(false);
        bus.publish(
            &Event::new(Signal::SystemShuttingDown),
            Some(&|_: &Event| {
                seen_after.store(flag.0.load(Ordering::SeqCst), Ordering::SeqCst)
            }),
        );

        assert!(seen_after.load(Ordering::SeqCst));
    }

    #[test]
    fn test_completion_runs_without_subscribers() {
        let bus = EventDispatcher::<2>::new();
        let done = AtomicU32::new(0);
        bus.publish(
            &Event::new(Signal::SystemShutdown),
            Some(&|event: &Event| {
                assert_eq!(event.signal, Signal::SystemShutdown);
                done.fetch_add(1, Ordering::SeqCst);
            }),
        );
        assert_eq!(done.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_duplicate_subscription_is_idempotent() {
        let bus = EventDispatcher::<2>::new();
        let c = counter();
        bus.subscribe("dup", Signal::Ticker1, c).unwrap();
        bus.subscribe("dup", Signal::Ticker1, c).unwrap();
        assert_eq!(bus.subscriber_count(Signal::Ticker1), 1);
    }

    #[test]
    fn test_table_full() {
        let bus = EventDispatcher::<1>::new();
        bus.subscribe("one", Signal::Ticker1, counter()).unwrap();
        assert_eq!(
            bus.subscribe("two", Signal::Ticker1, counter()),
            Err(EventError::TableFull)
        );
    }

    #[test]
    fn test_unsubscribe() {
        let bus = EventDispatcher::<2>::new();
        let c = counter();
        bus.subscribe("boot", Signal::Ticker1, c).unwrap();
        assert!(bus.is_subscribed("boot", Signal::Ticker1));

        bus.unsubscribe("boot", Signal::Ticker1);
        bus.publish(&Event::new(Signal::Ticker1), None);

        assert!(!bus.is_subscribed("boot", Signal::Ticker1));
        assert_eq!(c.hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_may_unsubscribe_itself() {
        struct Once {
            bus: &'static EventDispatcher<2>,
            hits: AtomicU32,
        }
        impl EventListener for Once {
            fn on_event(&self, _event: &Event) {
                self.hits.fetch_add(1, Ordering::SeqCst);
                self.bus.unsubscribe("once", Signal::Ticker1);
            }
        }

        let bus: &'static EventDispatcher<2> = Box::leak(Box::new(EventDispatcher::new()));
        let once: &'static Once = Box::leak(Box::new(Once {
            bus,
            hits: AtomicU32::new(0),
        }));
        bus.subscribe("once", Signal::Ticker1, once).unwrap();

        bus.publish(&Event::new(Signal::Ticker1), None);
        bus.publish(&Event::new(Signal::Ticker1), None);

        assert_eq!(once.hits.load(Ordering::SeqCst), 1);
    }
}
