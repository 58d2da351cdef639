//! One-second ticker
//!
//! Publishes `ticker.1` once per second. Spawn from an embassy task:
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn ticker(bus: &'static EventDispatcher<16>) {
//!     bootdiag::core::events::ticker::run_ticker(bus).await
//! }
//! ```

use embassy_time::{Duration, Ticker};

use super::{Event, EventBus, Signal};

/// Publish `ticker.1` every second, forever.
pub async fn run_ticker<B: EventBus + ?Sized>(bus: &B) -> ! {
    let event = Event::new(Signal::Ticker1);
    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        ticker.next().await;
        bus.publish(&event, None);
    }
}
