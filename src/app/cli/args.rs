//! Command-line arguments for the `durq` binary
//!
//! Global flags select the queue and logging; each subcommand maps onto one
//! queue operation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::logging::LogFormat;
use crate::store::Durability;

#[derive(Parser, Debug, Clone)]
#[command(name = "durq")]
#[command(about = "Durable FIFO queue backed by an embedded key-value store")]
#[command(version, long_version = crate::core::version::long_version())]
pub struct Args {
    /// Queue directory (overrides the config file)
    #[arg(short = 'p', long = "path", value_name = "DIR")]
    pub path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short = 'c', long = "config-file", value_name = "FILE")]
    pub config_file: Option<PathBuf>,

    /// Maximum number of live records (0 = unbounded)
    #[arg(short = 'k', long = "capacity", value_name = "COUNT")]
    pub capacity: Option<u64>,

    /// Rewind both cursors to zero whenever a consumer drains the queue
    #[arg(long = "reset-on-empty")]
    pub reset_on_empty: bool,

    /// Flush policy after each write
    #[arg(long = "durability", value_name = "MODE", value_parser = ["sync_all", "sync_data", "buffer"])]
    pub durability: Option<String>,

    /// Colorize log output
    #[arg(short = 'g', long = "color")]
    pub color: bool,

    /// Log level
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error", "off"])]
    pub log_level: Option<String>,

    /// Log file path
    #[arg(short = 'f', long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log output format
    #[arg(short = 'o', long = "log-format", value_name = "FORMAT", value_parser = ["text", "ext", "json"])]
    pub log_format: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append one record per argument, in order
    Push {
        #[arg(value_name = "DATA", required = true)]
        data: Vec<String>,
    },
    /// Remove and print the oldest record
    Pop {
        /// Wait up to this long for a record instead of failing at once
        #[arg(short = 't', long = "timeout-ms", value_name = "MILLIS")]
        timeout_ms: Option<u64>,
    },
    /// Print the oldest record without removing it
    Peek {
        /// Wait up to this long for a record instead of failing at once
        #[arg(short = 't', long = "timeout-ms", value_name = "MILLIS")]
        timeout_ms: Option<u64>,
    },
    /// Remove the oldest record without printing it
    Ack,
    /// Show cursor positions and store statistics
    Stats,
}

impl Args {
    /// Parse `--durability`; clap has already restricted the accepted values
    pub fn durability(&self) -> Option<Durability> {
        self.durability
            .as_deref()
            .and_then(|value| value.parse::<Durability>().ok())
    }

    pub fn log_format(&self) -> LogFormat {
        self.log_format
            .as_deref()
            .and_then(|value| value.parse::<LogFormat>().ok())
            .unwrap_or_default()
    }

    pub fn log_settings(&self) -> crate::core::logging::LogSettings {
        let mut settings = crate::core::logging::LogSettings {
            format: self.log_format(),
            file: self.log_file.clone(),
            color: self.color,
            ..Default::default()
        };
        if let Some(level) = &self.log_level {
            settings.level = level.clone();
        }
        settings
    }
}
