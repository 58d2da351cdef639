//! Platform error types

use core::fmt;

/// Result type for platform operations
pub type Result<T> = core::result::Result<T, PlatformError>;

/// Platform-level errors
///
/// All platform implementations map their driver-specific errors to these
/// variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlatformError {
    /// Configuration store operation failed
    Storage(StorageError),
    /// Notification could not be queued
    Notify(NotifyError),
}

/// Configuration store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Store is not mounted
    NotMounted,
}

/// Notification transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NotifyError {
    /// Outbound queue is full
    QueueFull,
    /// No transport accepts this notification type
    Disabled,
    /// Text exceeds the transport's message size
    TooLong,
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Storage(e) => write!(f, "Storage error: {:?}", e),
            PlatformError::Notify(e) => write!(f, "Notify error: {:?}", e),
        }
    }
}

impl From<StorageError> for PlatformError {
    fn from(e: StorageError) -> Self {
        PlatformError::Storage(e)
    }
}

impl From<NotifyError> for PlatformError {
    fn from(e: NotifyError) -> Self {
        PlatformError::Notify(e)
    }
}
