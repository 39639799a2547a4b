//! Common test utilities and helpers

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A scratch directory holding a queue and an isolated config home
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn queue_path(&self) -> PathBuf {
        self.dir.path().join("queue")
    }

    pub fn config_home(&self) -> PathBuf {
        self.dir.path().join("config")
    }

    /// Write `<config home>/durq/durq.toml`, the file discovered by default
    pub fn write_default_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home().join("durq");
        std::fs::create_dir_all(&dir).expect("create config dir");
        let file = dir.join("durq.toml");
        std::fs::write(&file, contents).expect("write config");
        file
    }

    /// Run the `durq` binary with HOME and XDG_CONFIG_HOME inside the sandbox
    pub fn durq(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_durq"))
            .args(args)
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.config_home())
            .output()
            .expect("run durq binary")
    }

    /// Run `durq --path <queue> <args>`
    pub fn durq_at_queue(&self, args: &[&str]) -> Output {
        let path = self.queue_path();
        let mut full = vec!["--path", path_str(&path)];
        full.extend_from_slice(args);
        self.durq(&full)
    }
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 temp path")
}

pub fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
