//! `rcpt steps` specs

use crate::prelude::*;

#[test]
fn steps_lists_vocabulary_in_workflow_order() {
    let run = cli().args(&["steps"]).passes();
    let stdout = run.stdout();
    let keys: Vec<&str> = stdout.lines().filter_map(|line| line.split_whitespace().next()).collect();
    assert_eq!(keys.first(), Some(&"preflight"));
    assert_eq!(keys.last(), Some(&"done"));
    assert_eq!(keys.len(), 16);
}

#[test]
fn steps_text_shows_title_and_anchor() {
    cli()
        .args(&["steps"])
        .passes()
        .stdout_has("amazon_decide_print")
        .stdout_has("Decide Amazon print targets")
        .stdout_has("#step-amazon-decide-print");
}

#[test]
fn steps_json_is_machine_readable() {
    let json = cli().args(&["steps", "-o", "json"]).passes().json();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 16);
    assert_eq!(rows[15]["key"], "done");
    assert_eq!(rows[15]["block"], serde_json::Value::Null);
    assert_eq!(rows[15]["anchor"], "step-archive");
}
