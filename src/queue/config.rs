//! Queue configuration
//!
//! A [`QueueConfig`] can be built in code or loaded from a TOML file:
//!
//! ```toml
//! path = "/var/lib/durq/jobs"
//! capacity = 1000
//! reset_on_empty = false
//! durability = "sync_all"   # sync_all | sync_data | buffer
//! cache_size_bytes = 16777216
//! ```

use crate::queue::error::{QueueError, QueueResult};
use crate::store::{Durability, FjallOptions, DEFAULT_CACHE_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Behavioural options independent of the store backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueOptions {
    /// Maximum backlog before producers block; 0 means unbounded
    pub capacity: u64,
    /// Rewind both cursors to 0 whenever a consumer finds the queue drained
    pub reset_on_empty: bool,
}

impl QueueOptions {
    pub fn bounded(capacity: u64) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    pub fn with_reset_on_empty(mut self, reset_on_empty: bool) -> Self {
        self.reset_on_empty = reset_on_empty;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueueConfig {
    /// Directory holding the queue's store
    pub path: PathBuf,
    pub capacity: u64,
    pub reset_on_empty: bool,
    pub durability: Durability,
    pub cache_size_bytes: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::new(),
            capacity: 0,
            reset_on_empty: false,
            durability: Durability::default(),
            cache_size_bytes: DEFAULT_CACHE_SIZE,
        }
    }
}

impl QueueConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_capacity(mut self, capacity: u64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_reset_on_empty(mut self, reset_on_empty: bool) -> Self {
        self.reset_on_empty = reset_on_empty;
        self
    }

    pub fn with_durability(mut self, durability: Durability) -> Self {
        self.durability = durability;
        self
    }

    pub fn with_cache_size(mut self, bytes: u64) -> Self {
        self.cache_size_bytes = bytes;
        self
    }

    /// Parse a TOML document; missing fields take their defaults
    pub fn from_toml_str(contents: &str) -> QueueResult<Self> {
        let config = Self::parse_toml(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    ///
    /// A relative `path` inside the file is resolved against the file's directory.
    pub fn from_file(file: &Path) -> QueueResult<Self> {
        let config = Self::load_file(file)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML configuration file without validating it
    ///
    /// For callers that layer further overrides (such as command-line flags)
    /// on top of the file before validating.
    pub fn load_file(file: &Path) -> QueueResult<Self> {
        let contents = std::fs::read_to_string(file).map_err(|e| QueueError::Config {
            message: format!("Cannot read {}: {}", file.display(), e),
        })?;
        let mut config = Self::parse_toml(&contents).map_err(|e| match e {
            QueueError::Config { message } => QueueError::Config {
                message: format!("{}: {}", file.display(), message),
            },
            other => other,
        })?;
        if !config.path.as_os_str().is_empty() && config.path.is_relative() {
            if let Some(parent) = file.parent() {
                config.path = parent.join(&config.path);
            }
        }
        Ok(config)
    }

    fn parse_toml(contents: &str) -> QueueResult<Self> {
        toml::from_str(contents).map_err(|e| QueueError::Config {
            message: e.to_string(),
        })
    }

    pub fn validate(&self) -> QueueResult<()> {
        if self.path.as_os_str().is_empty() {
            return Err(QueueError::Config {
                message: "Queue path must not be empty".to_string(),
            });
        }
        if self.cache_size_bytes == 0 {
            return Err(QueueError::Config {
                message: "cache_size_bytes must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn options(&self) -> QueueOptions {
        QueueOptions {
            capacity: self.capacity,
            reset_on_empty: self.reset_on_empty,
        }
    }

    pub fn fjall_options(&self) -> FjallOptions {
        FjallOptions {
            durability: self.durability,
            cache_size_bytes: self.cache_size_bytes,
        }
    }
}
