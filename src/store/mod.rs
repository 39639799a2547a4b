//! Store Layer
//!
//! The persistent queue sits on an embedded, ordered key-value store and uses
//! it only through point `get`/`put`/`delete` calls (plus an optional batch).
//! Two backends ship with the crate:
//!
//! - [`FjallStore`]: durable, on-disk LSM keyspace
//! - [`MemoryStore`]: shared in-memory map with fault injection, for tests

mod error;
mod fjall_store;
mod memory;
mod traits;
mod types;

pub use error::{StoreError, StoreResult};
pub use fjall_store::{FjallOptions, FjallStore, DEFAULT_CACHE_SIZE};
pub use memory::{FaultOp, MemoryStore};
pub use traits::Store;
pub use types::{BatchOp, Durability, StoreStats};
