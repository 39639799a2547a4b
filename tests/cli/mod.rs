//! CLI Integration Test Modules

pub mod commands;
pub mod config_file;
pub mod exit_codes;
