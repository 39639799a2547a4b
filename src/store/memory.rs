//! In-memory store backend
//!
//! `MemoryStore` keeps everything in a shared `BTreeMap`. Clones share the same
//! map, so dropping one handle and building a queue on a clone behaves like a
//! reopen of the same path. One-shot fault injection lets tests fail a specific
//! operation on a specific key.

use crate::store::error::{StoreError, StoreResult};
use crate::store::traits::Store;
use crate::store::types::StoreStats;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Store operation targeted by an injected fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultOp {
    Get,
    Put,
    Delete,
}

impl FaultOp {
    fn name(self) -> &'static str {
        match self {
            FaultOp::Get => "get",
            FaultOp::Put => "put",
            FaultOp::Delete => "delete",
        }
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    faults: Vec<(FaultOp, Vec<u8>)>,
}

impl MemoryInner {
    /// Consume a matching fault, if one is armed
    fn trip(&mut self, op: FaultOp, key: &[u8]) -> StoreResult<()> {
        if let Some(index) = self
            .faults
            .iter()
            .position(|(fault_op, fault_key)| *fault_op == op && fault_key == key)
        {
            self.faults.remove(index);
            return Err(StoreError::Injected {
                operation: op.name(),
                key: key.to_vec(),
            });
        }
        Ok(())
    }
}

/// BTreeMap-backed [`Store`] for tests and ephemeral queues
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next `op` on `key` fail once with [`StoreError::Injected`]
    pub fn fail_once(&self, op: FaultOp, key: impl Into<Vec<u8>>) {
        self.lock().faults.push((op, key.into()));
    }

    /// Copy of every key/value currently held
    pub fn snapshot(&self) -> BTreeMap<Vec<u8>, Vec<u8>> {
        self.lock().entries.clone()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.lock().entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        let mut inner = self.lock();
        inner.trip(FaultOp::Get, key)?;
        Ok(inner.entries.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.trip(FaultOp::Put, key)?;
        inner.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        let mut inner = self.lock();
        inner.trip(FaultOp::Delete, key)?;
        inner.entries.remove(key);
        Ok(())
    }

    fn stats(&self) -> StoreStats {
        StoreStats {
            backend: "memory",
            approximate_keys: Some(self.len() as u64),
            disk_space_bytes: None,
        }
    }

    fn close(self) -> StoreResult<()> {
        Ok(())
    }
}
