//! Store Error Types

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {message}")]
    Backend { message: String },

    #[error("Injected failure on {operation} of key {key:02x?}")]
    Injected { operation: &'static str, key: Vec<u8> },
}

impl From<fjall::Error> for StoreError {
    fn from(e: fjall::Error) -> Self {
        StoreError::Backend {
            message: e.to_string(),
        }
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;
