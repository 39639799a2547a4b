//! PersistentQueue - durable single-reader FIFO over a key-value store
//!
//! All mutable state (the store handle and both cursors) sits behind one
//! mutex. Producers wait on `not_full`, consumers on `not_empty`; every wait
//! re-checks its predicate after waking. Cursors are only advanced in memory
//! after the store has accepted the matching writes, so a woken consumer can
//! always read the record it was signalled for.

use crate::queue::codec::{decode_position, encode_position, Cursor};
use crate::queue::config::{QueueConfig, QueueOptions};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::types::QueueStats;
use crate::store::{BatchOp, FjallStore, Store};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

/// Which side of the queue a waiter is on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Producer,
    Consumer,
}

#[derive(Debug, Clone, Copy)]
enum WaitMode {
    Block,
    Deadline { deadline: Instant, timeout: Duration },
    NoWait,
}

impl WaitMode {
    /// A deadline too far out to represent waits without one
    fn timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => WaitMode::Deadline { deadline, timeout },
            None => WaitMode::Block,
        }
    }
}

/// Position after `position` on `cursor`; the key space ends at `u64::MAX`
fn next_position(position: u64, cursor: Cursor) -> QueueResult<u64> {
    position
        .checked_add(1)
        .ok_or_else(|| QueueError::CorruptCursor {
            cursor: cursor.name(),
            reason: format!("position {} cannot advance", position),
        })
}

struct QueueState<S> {
    /// `None` once the queue has been closed
    store: Option<S>,
    read_position: u64,
    write_position: u64,
}

impl<S: Store> QueueState<S> {
    fn len(&self) -> u64 {
        self.write_position - self.read_position
    }

    fn is_empty(&self) -> bool {
        self.read_position >= self.write_position
    }

    fn store(&self, operation: &'static str) -> QueueResult<&S> {
        self.store
            .as_ref()
            .ok_or(QueueError::InvalidState { operation })
    }

    fn store_mut(&mut self, operation: &'static str) -> QueueResult<&mut S> {
        self.store
            .as_mut()
            .ok_or(QueueError::InvalidState { operation })
    }
}

/// Durable, blocking FIFO queue
///
/// Share between threads with `Arc<PersistentQueue<S>>`. Exactly one queue
/// instance may have a given store open at a time; this is a precondition,
/// not something the queue checks.
///
/// # Example
///
/// ```rust,no_run
/// use durq::queue::PersistentQueue;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let queue = PersistentQueue::open("/tmp/jobs", 100)?;
/// queue.push(b"first job")?;
/// assert_eq!(queue.pop()?, b"first job".to_vec());
/// queue.close()?;
/// # Ok(())
/// # }
/// ```
pub struct PersistentQueue<S: Store = FjallStore> {
    state: Mutex<QueueState<S>>,
    not_empty: Condvar,
    not_full: Condvar,
    shutdown: AtomicBool,
    options: QueueOptions,
}

impl PersistentQueue<FjallStore> {
    /// Open the queue stored under `path`; `capacity` 0 means unbounded
    pub fn open(path: impl AsRef<Path>, capacity: u64) -> QueueResult<Self> {
        let config = QueueConfig::new(path.as_ref()).with_capacity(capacity);
        Self::open_with_config(&config)
    }

    pub fn open_with_config(config: &QueueConfig) -> QueueResult<Self> {
        config.validate()?;
        let store = FjallStore::open(&config.path, config.fjall_options())
            .map_err(|source| QueueError::store("open", source))?;
        log::info!("Opening queue at {}", config.path.display());
        Self::with_store(store, config.options())
    }
}

impl<S: Store> PersistentQueue<S> {
    /// Build a queue over an already opened store, reloading its cursors
    pub fn with_store(store: S, options: QueueOptions) -> QueueResult<Self> {
        let read_position = Self::load_cursor(&store, Cursor::Read)?;
        let write_position = Self::load_cursor(&store, Cursor::Write)?;

        if read_position > write_position {
            return Err(QueueError::CorruptCursor {
                cursor: Cursor::Read.name(),
                reason: format!(
                    "read position {} is ahead of write position {}",
                    read_position, write_position
                ),
            });
        }

        let backlog = write_position - read_position;
        if options.capacity > 0 && backlog > options.capacity {
            log::warn!(
                "Reopened queue holds {} records, above capacity {}; producers will block until it drains",
                backlog,
                options.capacity
            );
        }

        log::debug!(
            "Queue ready: read={}, write={}, capacity={}, reset_on_empty={}",
            read_position,
            write_position,
            options.capacity,
            options.reset_on_empty
        );

        Ok(Self {
            state: Mutex::new(QueueState {
                store: Some(store),
                read_position,
                write_position,
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            shutdown: AtomicBool::new(false),
            options,
        })
    }

    /// Read a persisted cursor; an absent key means a fresh queue
    fn load_cursor(store: &S, cursor: Cursor) -> QueueResult<u64> {
        match store
            .get(cursor.key())
            .map_err(|source| QueueError::store("open", source))?
        {
            None => Ok(0),
            Some(bytes) => decode_position(&bytes).ok_or_else(|| QueueError::CorruptCursor {
                cursor: cursor.name(),
                reason: format!("expected 8 bytes, found {}", bytes.len()),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn condvar(&self, side: Side) -> &Condvar {
        match side {
            Side::Producer => &self.not_full,
            Side::Consumer => &self.not_empty,
        }
    }

    fn is_blocked(&self, state: &QueueState<S>, side: Side) -> bool {
        match side {
            Side::Producer => self.options.capacity > 0 && state.len() >= self.options.capacity,
            Side::Consumer => state.is_empty(),
        }
    }

    /// Monitor wait: returns the guard once `side` may proceed
    ///
    /// The closed check runs on every pass, so waiters woken by `close`
    /// report `InvalidState`. Shutdown only interrupts callers that would
    /// otherwise sleep.
    fn wait_ready<'a>(
        &self,
        mut guard: MutexGuard<'a, QueueState<S>>,
        side: Side,
        operation: &'static str,
        mode: WaitMode,
    ) -> QueueResult<MutexGuard<'a, QueueState<S>>> {
        loop {
            guard.store(operation)?;

            if side == Side::Consumer
                && self.options.reset_on_empty
                && guard.is_empty()
                && guard.write_position > 0
            {
                self.reset_cursors(&mut guard)?;
            }

            if !self.is_blocked(&guard, side) {
                return Ok(guard);
            }

            if self.shutdown.load(Ordering::Acquire) {
                return Err(QueueError::Cancelled { operation });
            }

            let condvar = self.condvar(side);
            guard = match mode {
                WaitMode::NoWait => {
                    return Err(match side {
                        Side::Producer => QueueError::Full {
                            capacity: self.options.capacity,
                        },
                        Side::Consumer => QueueError::Empty,
                    })
                }
                WaitMode::Block => condvar.wait(guard).unwrap_or_else(PoisonError::into_inner),
                WaitMode::Deadline { deadline, timeout } => {
                    let now = Instant::now();
                    if now >= deadline {
                        return Err(QueueError::Timeout {
                            operation,
                            waited: timeout,
                        });
                    }
                    condvar
                        .wait_timeout(guard, deadline - now)
                        .unwrap_or_else(PoisonError::into_inner)
                        .0
                }
            };
        }
    }

    /// Rewind both cursors to 0 on a drained queue
    ///
    /// Both cursor keys go through one batch; backends with atomic batches
    /// never expose a half-reset state after a crash.
    fn reset_cursors(&self, state: &mut QueueState<S>) -> QueueResult<()> {
        let zero = encode_position(0);
        state
            .store_mut("reset")?
            .write_batch(&[
                BatchOp::put(Cursor::Read.key(), zero),
                BatchOp::put(Cursor::Write.key(), zero),
            ])
            .map_err(|source| QueueError::store("reset", source))?;

        log::debug!(
            "Queue drained at position {}; cursors reset to 0",
            state.write_position
        );
        state.read_position = 0;
        state.write_position = 0;
        Ok(())
    }

    fn produce(&self, payload: &[u8], operation: &'static str, mode: WaitMode) -> QueueResult<u64> {
        let guard = self.lock();
        let mut guard = self.wait_ready(guard, Side::Producer, operation, mode)?;

        let position = guard.write_position;
        let next = next_position(position, Cursor::Write)?;
        let store = guard.store_mut(operation)?;

        store
            .put(&encode_position(position), payload)
            .map_err(|source| QueueError::store(operation, source))?;

        // The record is durable but not yet covered by the cursor. Leaving the
        // in-memory cursor alone means the next push overwrites the orphan.
        if let Err(source) = store.put(Cursor::Write.key(), &encode_position(next)) {
            log::warn!(
                "Record written at position {} but write cursor not persisted: {}",
                position,
                source
            );
            return Err(QueueError::store(operation, source));
        }

        guard.write_position = next;
        drop(guard);
        self.not_empty.notify_all();

        log::debug!("Pushed {} bytes at position {}", payload.len(), position);
        Ok(position)
    }

    fn consume(&self, operation: &'static str, mode: WaitMode, remove: bool) -> QueueResult<Vec<u8>> {
        let guard = self.lock();
        let mut guard = self.wait_ready(guard, Side::Consumer, operation, mode)?;

        let position = guard.read_position;
        let stored = guard
            .store(operation)?
            .get(&encode_position(position))
            .map_err(|source| QueueError::store(operation, source))?;

        let Some(payload) = stored else {
            // Destructive reads step over the hole
            if remove {
                self.advance_read(&mut guard, operation)?;
                drop(guard);
                self.not_full.notify_all();
                log::warn!("No record at position {}; read cursor moved past it", position);
            }
            return Err(QueueError::MissingRecord { position });
        };

        if remove {
            self.advance_read(&mut guard, operation)?;
            drop(guard);
            self.not_full.notify_all();
            log::debug!("Popped {} bytes from position {}", payload.len(), position);
        } else {
            log::trace!("Peeked {} bytes at position {}", payload.len(), position);
        }

        Ok(payload)
    }

    /// Delete the record at the read cursor and persist the advanced cursor
    ///
    /// Deletion is ordered before the cursor update. On backends without
    /// atomic batches a failure between the two leaves the cursor in place
    /// over a missing record, which the next `pop` or `delete_last` steps past.
    fn advance_read(&self, state: &mut QueueState<S>, operation: &'static str) -> QueueResult<()> {
        let position = state.read_position;
        let next = next_position(position, Cursor::Read)?;
        state
            .store_mut(operation)?
            .write_batch(&[
                BatchOp::delete(encode_position(position)),
                BatchOp::put(Cursor::Read.key(), encode_position(next)),
            ])
            .map_err(|source| QueueError::store(operation, source))?;
        state.read_position = next;
        Ok(())
    }

    /// Append a record, blocking while the queue is at capacity
    ///
    /// Returns the position the record was stored at.
    pub fn push(&self, payload: &[u8]) -> QueueResult<u64> {
        self.produce(payload, "push", WaitMode::Block)
    }

    /// Like [`push`](Self::push) but gives up with `Timeout` after `timeout`
    pub fn push_timeout(&self, payload: &[u8], timeout: Duration) -> QueueResult<u64> {
        self.produce(payload, "push", WaitMode::timeout(timeout))
    }

    /// Like [`push`](Self::push) but fails with `Full` instead of blocking
    pub fn try_push(&self, payload: &[u8]) -> QueueResult<u64> {
        self.produce(payload, "push", WaitMode::NoWait)
    }

    /// Remove and return the oldest record, blocking while the queue is empty
    pub fn pop(&self) -> QueueResult<Vec<u8>> {
        self.consume("pop", WaitMode::Block, true)
    }

    pub fn pop_timeout(&self, timeout: Duration) -> QueueResult<Vec<u8>> {
        self.consume("pop", WaitMode::timeout(timeout), true)
    }

    pub fn try_pop(&self) -> QueueResult<Vec<u8>> {
        self.consume("pop", WaitMode::NoWait, true)
    }

    /// Return the oldest record without removing it
    ///
    /// Blocks like [`pop`](Self::pop). Pair with
    /// [`delete_last`](Self::delete_last) to acknowledge the record once it
    /// has been handled.
    pub fn last(&self) -> QueueResult<Vec<u8>> {
        self.consume("last", WaitMode::Block, false)
    }

    pub fn last_timeout(&self, timeout: Duration) -> QueueResult<Vec<u8>> {
        self.consume("last", WaitMode::timeout(timeout), false)
    }

    pub fn try_last(&self) -> QueueResult<Vec<u8>> {
        self.consume("last", WaitMode::NoWait, false)
    }

    /// Acknowledge the record returned by [`last`](Self::last)
    ///
    /// Never blocks: an empty queue yields `Empty`.
    pub fn delete_last(&self) -> QueueResult<()> {
        let mut guard = self.lock();
        guard.store("delete_last")?;
        if guard.is_empty() {
            return Err(QueueError::Empty);
        }

        let position = guard.read_position;
        self.advance_read(&mut guard, "delete_last")?;
        drop(guard);
        self.not_full.notify_all();

        log::debug!("Acknowledged record at position {}", position);
        Ok(())
    }

    /// Wake every blocked caller with `Cancelled`
    ///
    /// Calls that can proceed without waiting are unaffected; the store stays
    /// open until [`close`](Self::close).
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Release);
        // Taking the lock orders the flag against waiters between check and sleep
        drop(self.lock());
        self.not_empty.notify_all();
        self.not_full.notify_all();
        log::debug!("Queue shutdown requested");
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Release the store handle
    ///
    /// Every later call fails with `InvalidState`, including a second `close`.
    /// Blocked callers are woken and fail the same way.
    pub fn close(&self) -> QueueResult<()> {
        let store = {
            let mut guard = self.lock();
            guard
                .store
                .take()
                .ok_or(QueueError::InvalidState { operation: "close" })?
        };
        self.not_empty.notify_all();
        self.not_full.notify_all();

        store
            .close()
            .map_err(|source| QueueError::store("close", source))?;
        log::info!("Queue closed");
        Ok(())
    }

    pub fn is_closed(&self) -> bool {
        self.lock().store.is_none()
    }

    /// Records currently queued
    pub fn len(&self) -> u64 {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> u64 {
        self.options.capacity
    }

    /// Current `(read, write)` cursor pair
    pub fn positions(&self) -> (u64, u64) {
        let guard = self.lock();
        (guard.read_position, guard.write_position)
    }

    pub fn stats(&self) -> QueueResult<QueueStats> {
        let guard = self.lock();
        let store = guard.store("stats")?.stats();
        Ok(QueueStats {
            read_position: guard.read_position,
            write_position: guard.write_position,
            len: guard.len(),
            capacity: self.options.capacity,
            reset_on_empty: self.options.reset_on_empty,
            shutdown_requested: self.is_shutdown(),
            store,
        })
    }
}
