//! Configuration file discovery tests

use crate::common::{path_str, stderr_of, stdout_of, Sandbox};

#[test]
fn test_default_config_supplies_path() {
    let sandbox = Sandbox::new();
    let queue = sandbox.queue_path();
    sandbox.write_default_config(&format!("path = {:?}\n", path_str(&queue)));

    let output = sandbox.durq(&["push", "from-default-config"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let output = sandbox.durq_at_queue(&["pop"]);
    assert_eq!(stdout_of(&output), "from-default-config\n");
}

#[test]
fn test_explicit_config_file_with_relative_path() {
    let sandbox = Sandbox::new();
    let file = sandbox.dir.path().join("custom.toml");
    std::fs::write(&file, "path = \"queue\"\ncapacity = 1\n").unwrap();

    let output = sandbox.durq(&["--config-file", path_str(&file), "push", "one"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    // Relative to the config file, so the same queue as the sandbox's
    let output = sandbox.durq_at_queue(&["peek"]);
    assert_eq!(stdout_of(&output), "one\n");
}

#[test]
fn test_capacity_flag_overrides_file() {
    let sandbox = Sandbox::new();
    let queue = sandbox.queue_path();
    sandbox.write_default_config(&format!("path = {:?}\ncapacity = 1\n", path_str(&queue)));

    assert!(!sandbox.durq(&["push", "a", "b"]).status.success());
    assert!(sandbox.durq(&["--capacity", "5", "push", "c"]).status.success());
}

#[test]
fn test_unknown_config_key_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox.write_default_config("path = \"q\"\nretention = 3\n");

    let output = sandbox.durq(&["stats"]);
    assert_eq!(output.status.code(), Some(78));
}
