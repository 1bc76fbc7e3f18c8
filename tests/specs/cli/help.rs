//! CLI help output specs
//!
//! Verify help text displays for all commands.

use crate::prelude::*;

#[test]
fn rcpt_help_shows_usage() {
    cli().args(&["--help"]).passes().stdout_has("Usage:").stdout_has("derive").stdout_has("steps");
}

#[test]
fn rcpt_no_args_shows_usage_and_fails() {
    cli().exits(2).stderr_has("Usage:");
}

#[test]
fn rcpt_derive_help_lists_flags() {
    cli()
        .args(&["derive", "--help"])
        .passes()
        .stdout_has("--period")
        .stdout_has("--config")
        .stdout_has("--checklist-complete")
        .stdout_has("--fail-on-fallback")
        .stdout_has("--output");
}

#[test]
fn rcpt_version_shows_version() {
    cli().args(&["--version"]).passes().stdout_has("0.2");
}

#[test]
fn unknown_output_format_is_rejected() {
    cli().args(&["steps", "-o", "yaml"]).exits(2).stderr_has("yaml");
}
