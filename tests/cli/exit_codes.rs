//! Exit status tests

use crate::common::{stderr_of, Sandbox};

#[test]
fn test_pop_on_empty_queue_is_temporary_failure() {
    let sandbox = Sandbox::new();
    let output = sandbox.durq_at_queue(&["pop"]);
    assert_eq!(output.status.code(), Some(75));
    assert!(stderr_of(&output).contains("Queue is empty"));
}

#[test]
fn test_pop_timeout_expires() {
    let sandbox = Sandbox::new();
    let output = sandbox.durq_at_queue(&["pop", "--timeout-ms", "50"]);
    assert_eq!(output.status.code(), Some(75));
}

#[test]
fn test_push_to_full_queue() {
    let sandbox = Sandbox::new();
    let output = sandbox.durq_at_queue(&["--capacity", "1", "push", "a", "b"]);
    assert_eq!(output.status.code(), Some(75));
    assert!(stderr_of(&output).contains("Queue is at capacity"));
}

#[test]
fn test_missing_path_is_config_error() {
    let sandbox = Sandbox::new();
    let output = sandbox.durq(&["stats"]);
    assert_eq!(output.status.code(), Some(78));
}

#[test]
fn test_missing_explicit_config_file() {
    let sandbox = Sandbox::new();
    let output = sandbox.durq_at_queue(&["--config-file", "/nonexistent/durq.toml", "stats"]);
    assert_eq!(output.status.code(), Some(78));
    assert!(stderr_of(&output).contains("does not exist"));
}
