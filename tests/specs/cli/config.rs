//! Configuration layering specs: config file, then environment, then flags.

use crate::prelude::*;

const CONFIG: &str = r#"
target_period = "2026-01"

[guidance]
wizard_path = "/workflow"

[guidance.step_anchors]
preflight = "setup"
"#;

#[test]
fn config_file_sets_period_path_and_anchor() {
    let project = Project::empty();
    project.file("rcpt.toml", CONFIG);
    let json = project
        .rcpt()
        .args(&["derive", "--config", "rcpt.toml", "-o", "json"])
        .stdin("{}")
        .passes()
        .json();
    assert_eq!(json["guidance"]["href"], "/workflow?ym=2026-01#setup");
}

#[test]
fn environment_overrides_config_file() {
    let project = Project::empty();
    project.file("rcpt.toml", CONFIG);
    let json = project
        .rcpt()
        .env("RCPT_TARGET_PERIOD", "2026-02")
        .env("RCPT_WIZARD_PATH", "/expense-workflow")
        .args(&["derive", "--config", "rcpt.toml", "-o", "json"])
        .stdin("{}")
        .passes()
        .json();
    assert_eq!(json["guidance"]["href"], "/expense-workflow?ym=2026-02#setup");
}

#[test]
fn period_flag_overrides_environment() {
    let json = cli()
        .env("RCPT_TARGET_PERIOD", "2026-02")
        .args(&["derive", "--period", "2026-03", "-o", "json"])
        .stdin("{}")
        .passes()
        .json();
    assert_eq!(json["guidance"]["href"], "/expense-workflow?ym=2026-03#step-preflight");
}

#[test]
fn blank_anchor_override_falls_back_to_wizard() {
    let project = Project::empty();
    project.file("rcpt.toml", "[guidance.step_anchors]\npreflight = \"\"\n");
    let json = project
        .rcpt()
        .args(&["derive", "--config", "rcpt.toml", "-o", "json"])
        .stdin("{}")
        .passes()
        .json();
    assert_eq!(json["guidance"]["href"], "/expense-workflow#wizard");
    assert_eq!(json["fallback"]["fallback_type"], "next_step_anchor");
}

#[test]
fn bad_config_is_a_usage_error() {
    let project = Project::empty();
    project.file("rcpt.toml", "target_period = \"January\"\n");
    project
        .rcpt()
        .args(&["derive", "--config", "rcpt.toml"])
        .stdin("{}")
        .exits(2)
        .stderr_has("invalid config rcpt.toml");
}

#[test]
fn rcpt_log_enables_debug_output() {
    cli()
        .env("RCPT_LOG", "debug")
        .args(&["derive"])
        .stdin("{}")
        .passes()
        .stderr_has("derived workflow state");
}
