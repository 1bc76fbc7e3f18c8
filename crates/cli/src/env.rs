// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI.

/// Tracing filter directive (default `warn`)
pub fn log_filter() -> String {
    non_blank("RCPT_LOG").unwrap_or_else(|| "warn".to_string())
}

/// Target period override, `YYYY-MM`
pub fn target_period() -> Option<String> {
    non_blank("RCPT_TARGET_PERIOD")
}

/// Wizard page path override
pub fn wizard_path() -> Option<String> {
    non_blank("RCPT_WIZARD_PATH")
}

fn non_blank(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
