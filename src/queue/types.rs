//! Type definitions for the queue

use crate::store::StoreStats;

/// Snapshot of queue state returned by `PersistentQueue::stats`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueStats {
    /// Next position to read
    pub read_position: u64,
    /// Next position to write
    pub write_position: u64,
    /// Records currently queued
    pub len: u64,
    /// Configured capacity (0 = unbounded)
    pub capacity: u64,
    pub reset_on_empty: bool,
    pub shutdown_requested: bool,
    pub store: StoreStats,
}

impl QueueStats {
    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.len >= self.capacity
    }
}
