//! Queue Error Types

use crate::core::error_handling::ContextualError;
use crate::store::StoreError;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    #[error("Store failure during {operation}: {source}")]
    Store {
        operation: &'static str,
        #[source]
        source: StoreError,
    },

    #[error("Queue is closed (attempted {operation})")]
    InvalidState { operation: &'static str },

    #[error("Timed out after {waited:?} waiting to {operation}")]
    Timeout {
        operation: &'static str,
        waited: Duration,
    },

    #[error("Wait cancelled by shutdown during {operation}")]
    Cancelled { operation: &'static str },

    #[error("Queue is empty")]
    Empty,

    #[error("Queue is full (capacity: {capacity})")]
    Full { capacity: u64 },

    #[error("No record stored at position {position}")]
    MissingRecord { position: u64 },

    #[error("Corrupt {cursor} cursor: {reason}")]
    CorruptCursor {
        cursor: &'static str,
        reason: String,
    },

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl QueueError {
    pub(crate) fn store(operation: &'static str, source: StoreError) -> Self {
        QueueError::Store { operation, source }
    }

    /// True when the error came from a wait that never reached the store
    pub fn is_wait_interrupted(&self) -> bool {
        matches!(
            self,
            QueueError::Timeout { .. } | QueueError::Cancelled { .. }
        )
    }
}

impl ContextualError for QueueError {
    fn is_user_actionable(&self) -> bool {
        matches!(
            self,
            QueueError::Config { .. }
                | QueueError::Empty
                | QueueError::Full { .. }
                | QueueError::Timeout { .. }
        )
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            QueueError::Config { message } => Some(message.as_str()),
            QueueError::Empty => Some("Queue is empty"),
            QueueError::Full { .. } => Some("Queue is at capacity"),
            QueueError::Timeout { .. } => Some("Timed out waiting on the queue"),
            _ => None,
        }
    }
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
