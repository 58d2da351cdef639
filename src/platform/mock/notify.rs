//! Mock notification transport

use heapless::{String, Vec};

use crate::core::traits::{CriticalState, SharedState};
use crate::platform::{
    error::{NotifyError, PlatformError},
    traits::Notifier,
    Result,
};

/// Maximum queued notifications
const QUEUE_DEPTH: usize = 4;

/// One captured notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockNotification {
    pub kind: String<16>,
    pub subtype: String<32>,
    pub text: String<1024>,
}

/// Mock notifier
///
/// Captures up to four notifications; further ones fail with `QueueFull`.
pub struct MockNotifier {
    sent: CriticalState<Vec<MockNotification, QUEUE_DEPTH>>,
    enabled: CriticalState<bool>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            sent: CriticalState::new(Vec::new()),
            enabled: CriticalState::new(true),
        }
    }

    /// Reject everything with `Disabled`, as when no server is configured.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.with_mut(|e| *e = enabled);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.with(|s| s.len())
    }

    pub fn last(&self) -> Option<MockNotification> {
        self.sent.with(|s| s.last().cloned())
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

fn copy_str<const N: usize>(s: &str) -> Result<String<N>> {
    let mut out = String::new();
    out.push_str(s)
        .map_err(|_| PlatformError::Notify(NotifyError::TooLong))?;
    Ok(out)
}

impl Notifier for MockNotifier {
    fn notify_string(&self, kind: &str, subtype: &str, text: &str) -> Result<()> {
        if !self.enabled.with(|e| *e) {
            return Err(PlatformError::Notify(NotifyError::Disabled));
        }
        let notification = MockNotification {
            kind: copy_str(kind)?,
            subtype: copy_str(subtype)?,
            text: copy_str(text)?,
        };
        self.sent
            .with_mut(|s| s.push(notification))
            .map_err(|_| PlatformError::Notify(NotifyError::QueueFull))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captures_notification() {
        let notifier = MockNotifier::new();
        notifier.notify_string("data", "debug.crash", "a,b,c").unwrap();

        let last = notifier.last().unwrap();
        assert_eq!(last.kind.as_str(), "data");
        assert_eq!(last.subtype.as_str(), "debug.crash");
        assert_eq!(last.text.as_str(), "a,b,c");
    }

    #[test]
    fn test_queue_full() {
        let notifier = MockNotifier::new();
        for _ in 0..QUEUE_DEPTH {
            notifier.notify_string("info", "x", "y").unwrap();
        }
        assert_eq!(
            notifier.notify_string("info", "x", "y"),
            Err(PlatformError::Notify(NotifyError::QueueFull))
        );
    }

    #[test]
    fn test_disabled() {
        let notifier = MockNotifier::new();
        notifier.set_enabled(false);
        assert_eq!(
            notifier.notify_string("info", "x", "y"),
            Err(PlatformError::Notify(NotifyError::Disabled))
        );
        assert_eq!(notifier.sent_count(), 0);
    }
}
