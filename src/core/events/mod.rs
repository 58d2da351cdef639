//! Named-event publish/subscribe
//!
//! Subsystems announce state changes (`system.shuttingdown`,
//! `system.shutdown`) and react to periodic signals (`ticker.1`) through an
//! [`EventBus`] instead of calling each other directly. A publisher may pass
//! a completion continuation that runs once every subscriber has returned.
//!
//! # Usage
//!
//! ```ignore
//! use bootdiag::core::events::{Event, EventBus, EventListener, Signal};
//!
//! struct Logger;
//! impl EventListener for Logger {
//!     fn on_event(&self, event: &Event) {
//!         bootdiag::log_info!("event {}", event.signal.name());
//!     }
//! }
//! static LOGGER: Logger = Logger;
//!
//! bus.subscribe("logger", Signal::SystemShutdown, &LOGGER)?;
//! bus.publish(&Event::new(Signal::SystemShutdown), Some(&|_| restart()));
//! ```

pub mod dispatcher;
#[cfg(feature = "embassy")]
pub mod ticker;

pub use dispatcher::EventDispatcher;

use core::fmt;

/// Event names
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Once per second
    Ticker1,
    /// A soft restart is draining; subsystems should flush and acknowledge
    SystemShuttingDown,
    /// Final notice before the hardware restart
    SystemShutdown,
    /// Any other producer's signal
    Named(&'static str),
}

impl Signal {
    pub fn name(&self) -> &'static str {
        match self {
            Signal::Ticker1 => "ticker.1",
            Signal::SystemShuttingDown => "system.shuttingdown",
            Signal::SystemShutdown => "system.shutdown",
            Signal::Named(name) => name,
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A published signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub signal: Signal,
}

impl Event {
    pub const fn new(signal: Signal) -> Self {
        Self { signal }
    }
}

/// Receiver of published events.
pub trait EventListener: Sync {
    fn on_event(&self, event: &Event);
}

/// Completion continuation, run after all subscribers of a publish returned
pub type Completion<'c> = &'c dyn Fn(&Event);

/// Publish/subscribe interface between subsystems.
pub trait EventBus {
    /// Deliver `signal` to `listener` until unsubscribed. Subscribing the
    /// same `(tag, signal)` pair again is a no-op.
    fn subscribe(
        &self,
        tag: &'static str,
        signal: Signal,
        listener: &'static dyn EventListener,
    ) -> Result<(), EventError>;

    /// Stop delivering `signal` to the subscription registered under `tag`.
    fn unsubscribe(&self, tag: &'static str, signal: Signal);

    /// Deliver `event` to every subscriber, then run `on_complete`.
    fn publish(&self, event: &Event, on_complete: Option<Completion<'_>>);
}

/// Event dispatch errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventError {
    /// No free subscription slot
    TableFull,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::TableFull => write!(f, "Event subscription table full"),
        }
    }
}
