//! Outbound notification interface

use crate::platform::Result;

/// Queue of text notifications for the server connections.
pub trait Notifier {
    /// Queue `text` as a notification of `kind` (e.g. `data`) and `subtype`
    /// (e.g. `debug.crash`).
    fn notify_string(&self, kind: &str, subtype: &str, text: &str) -> Result<()>;
}
