//! Tests for the `reducegen` binary.

mod common;

use common::temp_file;
use serde_json::{json, Value};
use std::process::Command;

fn reducegen_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_reducegen"))
}

#[test]
fn help_lists_subcommands() {
    let output = reducegen_cmd()
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("replay"));
    assert!(stdout.contains("describe"));
}

#[test]
fn replay_prints_final_state() {
    let (dir, state) = temp_file("state.json", r#"{"count": 1}"#);
    let ops = dir.path().join("ops.jsonl");
    std::fs::write(
        &ops,
        "{\"op\":\"set\",\"field\":\"user.name\",\"value\":\"ada\"}\n\
         {\"op\":\"event\",\"field\":\"query\",\"value\":\"cars\"}\n\
         {\"op\":\"raw\",\"type\":\"UNKNOWN\"}\n",
    )
    .unwrap();
    let config = dir.path().join("missing.toml");

    let output = reducegen_cmd()
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg("--state")
        .arg(&state)
        .arg("--ops")
        .arg(&ops)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        json!({"count": 1, "user": {"name": "ada"}, "query": "cars"})
    );
}

#[test]
fn strict_replay_fails_on_unknown_action() {
    let (dir, ops) = temp_file("ops.jsonl", "{\"op\":\"raw\",\"type\":\"UNKNOWN\"}\n");
    let config = dir.path().join("missing.toml");

    let output = reducegen_cmd()
        .arg("--config")
        .arg(&config)
        .arg("replay")
        .arg("--ops")
        .arg(&ops)
        .arg("--strict")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Reducer not found for action 'UNKNOWN'"));
}

#[test]
fn describe_prints_init_actions() {
    let (_dir, config) = temp_file("config.toml", "[dispatch]\ninit_actions = [\"@@BOOT\"]\n");

    let output = reducegen_cmd()
        .arg("--config")
        .arg(&config)
        .arg("describe")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(printed, json!({"@@BOOT": {"kind": "identity"}}));
}

#[test]
fn describe_with_ops_lists_generated_transitions() {
    let (dir, config) = temp_file("config.toml", "[dispatch]\ninit_actions = [\"@@BOOT\"]\n");
    let ops = dir.path().join("ops.jsonl");
    std::fs::write(
        &ops,
        "{\"op\":\"set\",\"field\":\"user.name\",\"value\":\"ada\"}\n\
         {\"op\":\"event\",\"field\":\"query\",\"value\":\"cars\"}\n",
    )
    .unwrap();

    let output = reducegen_cmd()
        .arg("--config")
        .arg(&config)
        .arg("describe")
        .arg("--ops")
        .arg(&ops)
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let printed: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        printed,
        json!({
            "@@BOOT": {"kind": "identity"},
            "SET_QUERY": {"kind": "set", "path": "query"},
            "SET_USER.NAME": {"kind": "set", "path": "user.name"}
        })
    );
}
