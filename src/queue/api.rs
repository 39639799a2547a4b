//! Public API for the queue system
//!
//! External modules should import from here rather than directly from the
//! internal modules.

// Core queue
pub use crate::queue::persistent::PersistentQueue;

// Configuration
pub use crate::queue::config::{QueueConfig, QueueOptions};

// Error handling
pub use crate::queue::error::{QueueError, QueueResult};

// Statistics
pub use crate::queue::types::QueueStats;

// Store backends the queue can run on
pub use crate::store::{Durability, FjallStore, MemoryStore, Store};
