//! Configuration file discovery and command-line overrides
//!
//! An explicit `--config-file` must exist; otherwise the default file under
//! the user's config directory is used when present. Flags win over the file.

use std::path::{Path, PathBuf};

use super::args::Args;
use crate::queue::{QueueConfig, QueueError, QueueResult};

/// `<config dir>/durq/durq.toml`, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("durq").join("durq.toml"))
}

impl Args {
    /// Build the effective queue configuration
    pub fn resolve_queue_config(&self) -> QueueResult<QueueConfig> {
        self.resolve_queue_config_from(default_config_path().as_deref())
    }

    pub(crate) fn resolve_queue_config_from(
        &self,
        default_file: Option<&Path>,
    ) -> QueueResult<QueueConfig> {
        let mut config = match (&self.config_file, default_file) {
            (Some(file), _) => {
                if !file.exists() {
                    return Err(QueueError::Config {
                        message: format!(
                            "The specified configuration file does not exist: {}",
                            file.display()
                        ),
                    });
                }
                log::debug!("Loading configuration from {}", file.display());
                QueueConfig::load_file(file)?
            }
            (None, Some(file)) if file.exists() => {
                log::debug!("Loading default configuration from {}", file.display());
                QueueConfig::load_file(file)?
            }
            _ => QueueConfig::default(),
        };

        if let Some(path) = &self.path {
            config.path = path.clone();
        }
        if let Some(capacity) = self.capacity {
            config.capacity = capacity;
        }
        if self.reset_on_empty {
            config.reset_on_empty = true;
        }
        if let Some(durability) = self.durability() {
            config.durability = durability;
        }

        if config.path.as_os_str().is_empty() {
            return Err(QueueError::Config {
                message: "No queue path: pass --path or set `path` in the configuration file"
                    .to_string(),
            });
        }
        config.validate()?;
        Ok(config)
    }
}
