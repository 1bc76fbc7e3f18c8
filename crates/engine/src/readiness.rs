// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Readiness predicates shared by step inference, the allowed-mode fallback,
//! and the close checklist.
//!
//! `can_reconcile` in particular must be computed in exactly one place: the
//! resolver and the allowed-mode calculator have to agree on it.

use rcpt_core::{Source, StatusSnapshot, StepKey};

/// First source (Amazon before Rakuten) whose print decision is still open,
/// with the step that resolves it.
pub fn pending_print(snapshot: &StatusSnapshot) -> Option<(Source, StepKey)> {
    Source::ALL.iter().find_map(|&source| {
        let status = snapshot.source(source);
        if !status.has_pending_print() {
            return None;
        }
        let step =
            if status.confirmed { source.print_step() } else { source.decide_print_step() };
        Some((source, step))
    })
}

pub fn any_downloaded(snapshot: &StatusSnapshot) -> bool {
    snapshot.amazon.downloaded || snapshot.rakuten.downloaded
}

pub fn is_reconciled(snapshot: &StatusSnapshot) -> bool {
    snapshot.mf.reconciled || snapshot.mf.step_done
}

/// An explicit `can_reconcile: true`, or at least one source downloaded with
/// no print decision left open.
pub fn can_reconcile(snapshot: &StatusSnapshot) -> bool {
    snapshot.can_reconcile == Some(true)
        || (any_downloaded(snapshot) && pending_print(snapshot).is_none())
}

#[cfg(test)]
#[path = "readiness_tests.rs"]
mod tests;
