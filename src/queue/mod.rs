//! Persistent Queue Component
//!
//! A durable, crash-recoverable, single-reader FIFO queue on top of an
//! embedded ordered key-value store, with blocking producers and consumers
//! and optional bounded capacity.
//!
//! # Overview
//!
//! - **Durability**: every record and both cursors live in the store; a
//!   reopened queue resumes exactly where the last committed operation left it
//! - **Blocking**: `pop`/`last` sleep while the queue is empty, `push` sleeps
//!   while a bounded queue is full
//! - **Two consume protocols**: destructive `pop`, or `last` + `delete_last`
//!   for peek-then-acknowledge
//! - **Bounded waits**: `*_timeout`, `try_*` and `shutdown` for callers that
//!   cannot block forever
//!
//! # Layout
//!
//! ```text
//!  key                          value
//!  ─────────────────────────    ──────────────────────────
//!  00 00 00 00 00 00 00 03  ->  payload   ◄── read cursor
//!  00 00 00 00 00 00 00 04  ->  payload
//!  00 00 00 00 00 00 00 05  ->  payload
//!                                          ◄── write cursor (6)
//!  FF "cursor/read"         ->  00 .. 03
//!  FF "cursor/write"        ->  00 .. 06
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use durq::queue::PersistentQueue;
//! use std::sync::Arc;
//! use std::thread;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let queue = Arc::new(PersistentQueue::open("/var/lib/durq/jobs", 2)?);
//!
//! let producer = {
//!     let queue = Arc::clone(&queue);
//!     thread::spawn(move || {
//!         for job in ["a", "b", "c"] {
//!             queue.push(job.as_bytes()).unwrap();
//!         }
//!     })
//! };
//!
//! // Peek, handle, then acknowledge
//! for _ in 0..3 {
//!     let job = queue.last()?;
//!     println!("handling {}", String::from_utf8_lossy(&job));
//!     queue.delete_last()?;
//! }
//!
//! producer.join().unwrap();
//! queue.close()?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod codec;
mod config;
mod error;
mod persistent;
mod types;

pub use config::{QueueConfig, QueueOptions};
pub use error::{QueueError, QueueResult};
pub use persistent::PersistentQueue;
pub use types::QueueStats;

#[cfg(test)]
mod tests;
