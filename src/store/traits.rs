//! Traits for the store layer
//!
//! The queue consumes its backing store only through [`Store`]. Backends are
//! expected to make every successful `put`/`delete` durable before returning.

use crate::store::error::StoreResult;
use crate::store::types::{BatchOp, StoreStats};

/// Minimal synchronous key-value contract required by the queue
///
/// Keys are ordered byte strings. A `get` for an absent key is `Ok(None)`,
/// never an error.
pub trait Store: Send {
    /// Fetch the value stored under `key`
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>>;

    /// Durably store `value` under `key`, replacing any previous value
    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()>;

    /// Durably remove `key`. Removing an absent key succeeds.
    fn delete(&mut self, key: &[u8]) -> StoreResult<()>;

    /// Apply several operations in order
    ///
    /// The default applies them one at a time and stops at the first failure,
    /// so a failed batch may be partially applied. Backends with native
    /// atomic batches override this.
    fn write_batch(&mut self, ops: &[BatchOp]) -> StoreResult<()> {
        for op in ops {
            match op {
                BatchOp::Put { key, value } => self.put(key, value)?,
                BatchOp::Delete { key } => self.delete(key)?,
            }
        }
        Ok(())
    }

    /// Backend statistics, best effort
    fn stats(&self) -> StoreStats {
        StoreStats::default()
    }

    /// Release the handle, flushing anything still buffered
    fn close(self) -> StoreResult<()>
    where
        Self: Sized;
}
