//! Shared helpers for queue tests

use crate::queue::api::{MemoryStore, PersistentQueue, QueueOptions};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// How long a call must stay parked before we treat it as blocked
pub const BLOCKED_FOR: Duration = Duration::from_millis(150);

/// Upper bound for a call that should complete promptly once unblocked
pub const UNBLOCK_WITHIN: Duration = Duration::from_secs(5);

/// Fresh queue over a new in-memory store; the store handle is returned for inspection
pub fn memory_queue(options: QueueOptions) -> (Arc<PersistentQueue<MemoryStore>>, MemoryStore) {
    let store = MemoryStore::new();
    let queue = PersistentQueue::with_store(store.clone(), options).unwrap();
    (Arc::new(queue), store)
}

pub fn unbounded_queue() -> (Arc<PersistentQueue<MemoryStore>>, MemoryStore) {
    memory_queue(QueueOptions::default())
}

/// Run `f` on its own thread and hand back a receiver for its result
pub fn spawn_reporting<T, F>(f: F) -> Receiver<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(f());
    });
    rx
}

pub fn assert_still_blocked<T: std::fmt::Debug>(rx: &Receiver<T>, what: &str) {
    if let Ok(value) = rx.recv_timeout(BLOCKED_FOR) {
        panic!("{} should still be blocked, but returned {:?}", what, value);
    }
}
