// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Allowed run modes: which actions may be started right now.

use indexmap::IndexSet;
use rcpt_core::{RunMode, Source, StatusSnapshot};
use serde::Serialize;

use crate::readiness;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModesOrigin {
    /// Taken from the snapshot's `allowed_run_modes`
    Backend,
    Inferred,
}

/// Ordered, duplicate-free set of action identifiers.
///
/// Identifiers are kept as strings: a backend-supplied list may name actions
/// this client does not know, and those are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllowedModes {
    pub modes: IndexSet<String>,
    pub origin: ModesOrigin,
}

impl AllowedModes {
    pub fn contains(&self, mode: &str) -> bool {
        self.modes.contains(mode)
    }

    pub fn contains_mode(&self, mode: RunMode) -> bool {
        self.contains(mode.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.modes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}

/// Compute the permitted actions for a snapshot.
///
/// A non-empty backend list wins (trimmed, blanks dropped, first occurrence
/// kept). Otherwise the set follows the workflow order from the raw flags.
pub fn infer_allowed_modes(snapshot: &StatusSnapshot) -> AllowedModes {
    let supplied: IndexSet<String> = snapshot
        .allowed_run_modes
        .iter()
        .map(|mode| mode.trim())
        .filter(|mode| !mode.is_empty())
        .map(str::to_string)
        .collect();
    if !supplied.is_empty() {
        return AllowedModes { modes: supplied, origin: ModesOrigin::Backend };
    }

    let mut modes = IndexSet::new();
    let mut allow = |mode: RunMode| {
        modes.insert(mode.as_str().to_string());
    };

    allow(RunMode::Preflight);
    allow(RunMode::PreflightMf);
    if snapshot.preflight.done {
        for &source in Source::ALL {
            allow(RunMode::download_for(source));
        }
    }
    for &source in Source::ALL {
        if snapshot.source(source).downloaded {
            allow(RunMode::print_for(source));
        }
    }
    if readiness::can_reconcile(snapshot) {
        allow(RunMode::MfReconcile);
    }

    AllowedModes { modes, origin: ModesOrigin::Inferred }
}

#[cfg(test)]
#[path = "modes_tests.rs"]
mod tests;
