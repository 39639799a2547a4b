//! Errors from running a single CLI command

use crate::core::error_handling::{exit_code_for, ContextualError};
use crate::queue::QueueError;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CommandError {
    /// Process exit code; output failures count as I/O errors (74)
    pub fn exit_code(&self) -> i32 {
        match self {
            CommandError::Queue(e) => exit_code_for(e),
            CommandError::Output(_) => 74,
        }
    }
}

impl ContextualError for CommandError {
    fn is_user_actionable(&self) -> bool {
        match self {
            CommandError::Queue(e) => e.is_user_actionable(),
            CommandError::Output(_) => false,
        }
    }

    fn user_message(&self) -> Option<&str> {
        match self {
            CommandError::Queue(e) => e.user_message(),
            CommandError::Output(_) => None,
        }
    }
}
