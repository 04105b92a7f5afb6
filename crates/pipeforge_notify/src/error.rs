//! Error types for the notify module.

use thiserror::Error;

/// Result type alias for notification operations.
pub type NotifyResult<T> = Result<T, NotifyError>;

/// Errors raised while delivering a completion notification.
///
/// None of these are fatal to a generation run; callers log them and move on.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Queue not found: {0}")]
    QueueNotFound(String),

    #[error("Failed to connect to queue {queue}: {message}")]
    ConnectionFailed { queue: String, message: String },

    #[error("Failed to publish to queue {queue}: {message}")]
    PublishFailed { queue: String, message: String },

    #[error("Empty message body")]
    EmptyMessage,
}
