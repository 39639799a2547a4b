//! Type definitions for the store layer

/// A single write inside [`Store::write_batch`](crate::store::Store::write_batch)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    Put { key: Vec<u8>, value: Vec<u8> },
    Delete { key: Vec<u8> },
}

impl BatchOp {
    pub fn put(key: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>) -> Self {
        BatchOp::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn delete(key: impl Into<Vec<u8>>) -> Self {
        BatchOp::Delete { key: key.into() }
    }
}

/// Backend statistics reported alongside queue statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Short backend identifier ("fjall", "memory")
    pub backend: &'static str,
    /// Approximate number of keys held, including reserved cursor keys
    pub approximate_keys: Option<u64>,
    /// Bytes used on disk, if the backend is disk-backed
    pub disk_space_bytes: Option<u64>,
}

/// How hard a disk-backed store flushes after each write
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    serde::Serialize,
    serde::Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Durability {
    /// fsync data and metadata before returning
    #[default]
    SyncAll,
    /// fsync data only
    SyncData,
    /// Hand writes to the OS without fsync; survives process crashes only
    Buffer,
}

impl From<Durability> for fjall::PersistMode {
    fn from(durability: Durability) -> Self {
        match durability {
            Durability::SyncAll => fjall::PersistMode::SyncAll,
            Durability::SyncData => fjall::PersistMode::SyncData,
            Durability::Buffer => fjall::PersistMode::Buffer,
        }
    }
}
