//! Command round-trip tests against the built binary

use crate::common::{stdout_of, Sandbox};

#[test]
fn test_push_prints_positions() {
    let sandbox = Sandbox::new();

    let output = sandbox.durq_at_queue(&["push", "alpha", "beta"]);
    assert!(output.status.success());
    assert_eq!(stdout_of(&output), "0\n1\n");

    let output = sandbox.durq_at_queue(&["push", "gamma"]);
    assert_eq!(stdout_of(&output), "2\n");
}

#[test]
fn test_pop_returns_records_in_order() {
    let sandbox = Sandbox::new();
    sandbox.durq_at_queue(&["push", "alpha", "beta"]);

    let first = sandbox.durq_at_queue(&["pop"]);
    assert!(first.status.success());
    assert_eq!(stdout_of(&first), "alpha\n");

    let second = sandbox.durq_at_queue(&["pop"]);
    assert_eq!(stdout_of(&second), "beta\n");
}

#[test]
fn test_peek_and_ack() {
    let sandbox = Sandbox::new();
    sandbox.durq_at_queue(&["push", "job-1", "job-2"]);

    assert_eq!(stdout_of(&sandbox.durq_at_queue(&["peek"])), "job-1\n");
    assert_eq!(stdout_of(&sandbox.durq_at_queue(&["peek"])), "job-1\n");

    let ack = sandbox.durq_at_queue(&["ack"]);
    assert!(ack.status.success());
    assert!(stdout_of(&ack).is_empty());

    assert_eq!(stdout_of(&sandbox.durq_at_queue(&["peek"])), "job-2\n");
}

#[test]
fn test_stats_table() {
    let sandbox = Sandbox::new();
    sandbox.durq_at_queue(&["push", "a", "b", "c"]);
    sandbox.durq_at_queue(&["pop"]);

    let output = sandbox.durq_at_queue(&["--capacity", "10", "stats"]);
    assert!(output.status.success());
    let table = stdout_of(&output);
    assert!(table.contains("read position"), "got: {table}");
    assert!(table.contains("fjall"), "got: {table}");
}

#[test]
fn test_version_includes_build_metadata() {
    let sandbox = Sandbox::new();
    let output = sandbox.durq(&["--version"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("storage format: v1"));
}
