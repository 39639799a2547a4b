//! Disk-backed store on a fjall LSM keyspace
//!
//! One keyspace per queue directory with a single `queue` partition. Every
//! write is followed by a keyspace persist at the configured [`Durability`],
//! so a successful `put`/`delete` has reached the journal before returning.
//! A directory must be held by at most one open store at a time.

use crate::store::error::StoreResult;
use crate::store::traits::Store;
use crate::store::types::{BatchOp, Durability, StoreStats};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;

const PARTITION_NAME: &str = "queue";

/// Default block cache size (16 MB)
pub const DEFAULT_CACHE_SIZE: u64 = 16 * 1024 * 1024;

/// Options for [`FjallStore::open`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FjallOptions {
    pub durability: Durability,
    pub cache_size_bytes: u64,
}

impl Default for FjallOptions {
    fn default() -> Self {
        Self {
            durability: Durability::default(),
            cache_size_bytes: DEFAULT_CACHE_SIZE,
        }
    }
}

pub struct FjallStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
    durability: Durability,
}

impl FjallStore {
    /// Open (or create) the keyspace rooted at `path`
    pub fn open(path: &Path, options: FjallOptions) -> StoreResult<Self> {
        std::fs::create_dir_all(path)?;

        let keyspace = fjall::Config::new(path)
            .cache_size(options.cache_size_bytes)
            .open()?;

        let partition = keyspace.open_partition(
            PARTITION_NAME,
            PartitionCreateOptions::default()
                .block_size(16 * 1024)
                .compression(fjall::CompressionType::None),
        )?;

        log::debug!(
            "fjall store opened at {} (durability: {})",
            path.display(),
            options.durability
        );

        Ok(Self {
            keyspace,
            partition,
            durability: options.durability,
        })
    }

    fn persist(&self) -> StoreResult<()> {
        self.keyspace.persist(self.durability.into())?;
        Ok(())
    }
}

impl Store for FjallStore {
    fn get(&self, key: &[u8]) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.partition.get(key)?.map(|value| value.to_vec()))
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> StoreResult<()> {
        self.partition.insert(key, value)?;
        self.persist()
    }

    fn delete(&mut self, key: &[u8]) -> StoreResult<()> {
        self.partition.remove(key)?;
        self.persist()
    }

    /// All operations land in one fjall batch, so the batch is atomic
    fn write_batch(&mut self, ops: &[BatchOp]) -> StoreResult<()> {
        let mut batch = self.keyspace.batch();
        for op in ops {
            match op {
                BatchOp::Put { key, value } => {
                    batch.insert(&self.partition, key.as_slice(), value.as_slice())
                }
                BatchOp::Delete { key } => batch.remove(&self.partition, key.as_slice()),
            }
        }
        batch.commit()?;
        self.persist()
    }

    fn stats(&self) -> StoreStats {
        StoreStats {
            backend: "fjall",
            approximate_keys: Some(self.partition.approximate_len() as u64),
            disk_space_bytes: Some(self.keyspace.disk_space()),
        }
    }

    fn close(self) -> StoreResult<()> {
        self.keyspace.persist(fjall::PersistMode::SyncAll)?;
        log::debug!("fjall store closed");
        Ok(())
    }
}
