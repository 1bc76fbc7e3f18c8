// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Action-availability gate: which dashboard buttons are enabled, and why
//! the others are not.
//!
//! Preconditions are independent and combined with AND. A disabled action
//! lists every precondition it fails, most urgent first: a running task,
//! then workflow order, then the close checklist.

use std::fmt;

use rcpt_core::{RunMode, RunningMode, Source, StatusSnapshot};
use serde::Serialize;

use crate::modes::{AllowedModes, ModesOrigin};
use crate::readiness;

rcpt_core::vocabulary! {
    /// Controllable dashboard actions.
    ///
    /// Every run mode is an action; archiving and month close are actions
    /// with no run mode of their own.
    pub enum Action {
        Preflight => "preflight",
        PreflightMf => "preflight_mf",
        AmazonDownload => "amazon_download",
        AmazonPrint => "amazon_print",
        RakutenDownload => "rakuten_download",
        RakutenPrint => "rakuten_print",
        ProviderIngest => "provider_ingest",
        ImportProviderReceipts => "import_provider_receipts",
        MfBulkUpload => "mf_bulk_upload",
        MfCsvImport => "mf_csv_import",
        MfReconcile => "mf_reconcile",
        ArchiveOutputs => "archive_outputs",
        MonthClose => "month_close",
    }
}

impl Action {
    /// The run mode this action starts, if it is one.
    pub fn run_mode(&self) -> Option<RunMode> {
        RunMode::from_ident(self.as_str())
    }

    pub fn requires_checklist(&self) -> bool {
        matches!(self, Action::ArchiveOutputs | Action::MonthClose)
    }

    pub fn title(&self) -> &'static str {
        match self {
            Action::ArchiveOutputs => "Archive outputs",
            Action::MonthClose => "Close month",
            _ => self.run_mode().map_or("", |mode| mode.title()),
        }
    }
}

rcpt_core::vocabulary! {
    /// Conditions that must hold before the month can be archived or closed.
    pub enum ChecklistItem {
        SourcesFinished => "sources_finished",
        ProviderReceiptsIngested => "provider_receipts_ingested",
        MfReconciled => "mf_reconciled",
        NoMissingCandidates => "no_missing_candidates",
    }
}

impl ChecklistItem {
    pub fn label(&self) -> &'static str {
        match self {
            ChecklistItem::SourcesFinished => "every downloaded source is printed",
            ChecklistItem::ProviderReceiptsIngested => "provider receipts are ingested",
            ChecklistItem::MfReconciled => "MF reconciliation is done",
            ChecklistItem::NoMissingCandidates => "no receipts are missing in MF",
        }
    }
}

/// Month-close checklist; records the unchecked items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CloseChecklist {
    missing: Vec<ChecklistItem>,
}

impl CloseChecklist {
    /// Every item checked.
    pub fn checked() -> Self {
        Self::default()
    }

    /// Evaluate each item from the snapshot's flags.
    pub fn from_snapshot(snapshot: &StatusSnapshot) -> Self {
        let sources_finished = readiness::any_downloaded(snapshot)
            && Source::ALL.iter().all(|&source| !snapshot.source(source).has_pending_print());
        let missing = ChecklistItem::ALL
            .iter()
            .copied()
            .filter(|item| match item {
                ChecklistItem::SourcesFinished => !sources_finished,
                ChecklistItem::ProviderReceiptsIngested => snapshot.providers.pending_total > 0,
                ChecklistItem::MfReconciled => !readiness::is_reconciled(snapshot),
                ChecklistItem::NoMissingCandidates => snapshot.mf.summary.missing_candidates > 0,
            })
            .collect();
        Self { missing }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn missing(&self) -> &[ChecklistItem] {
        &self.missing
    }
}

/// Why an action is disabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BlockReason {
    /// Only one run may be active system-wide
    TaskRunning { mode: String },
    /// The action is not in the allowed-mode set
    WorkflowOrder,
    ChecklistIncomplete { missing: Vec<ChecklistItem> },
}

impl fmt::Display for BlockReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockReason::TaskRunning { mode } => {
                write!(f, "Another task is running (`{mode}`). Wait for it to finish.")
            }
            BlockReason::WorkflowOrder => {
                f.write_str("Workflow order: finish the earlier steps first.")
            }
            BlockReason::ChecklistIncomplete { missing } => {
                let labels: Vec<&str> = missing.iter().map(ChecklistItem::label).collect();
                write!(f, "Checklist incomplete: {}.", labels.join(", "))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateDecision {
    pub action: Action,
    pub enabled: bool,
    pub blocked: Vec<BlockReason>,
}

impl GateDecision {
    /// Text for the most urgent failing precondition.
    pub fn message(&self) -> Option<String> {
        self.blocked.first().map(ToString::to_string)
    }
}

/// Decide whether one action is enabled.
///
/// Run-mode actions must be in the allowed set. Archive and month close are
/// held to the allowed set only when a backend list names either of them;
/// an inferred set never does.
pub fn evaluate(
    action: Action,
    running: &RunningMode,
    allowed: &AllowedModes,
    checklist: &CloseChecklist,
) -> GateDecision {
    let mut blocked = Vec::new();
    if !running.is_idle() {
        blocked.push(BlockReason::TaskRunning { mode: running.as_str().to_string() });
    }
    if follows_workflow_order(action, allowed) && !allowed.contains(action.as_str()) {
        blocked.push(BlockReason::WorkflowOrder);
    }
    if action.requires_checklist() && !checklist.is_complete() {
        blocked.push(BlockReason::ChecklistIncomplete { missing: checklist.missing().to_vec() });
    }
    GateDecision { action, enabled: blocked.is_empty(), blocked }
}

fn follows_workflow_order(action: Action, allowed: &AllowedModes) -> bool {
    if action.run_mode().is_some() {
        return true;
    }
    allowed.origin == ModesOrigin::Backend
        && Action::ALL
            .iter()
            .filter(|a| a.requires_checklist())
            .any(|a| allowed.contains(a.as_str()))
}

/// Decide every action, in [`Action::ALL`] order.
pub fn evaluate_actions(
    snapshot: &StatusSnapshot,
    allowed: &AllowedModes,
    checklist: &CloseChecklist,
) -> Vec<GateDecision> {
    let running = snapshot.running();
    Action::ALL.iter().map(|&action| evaluate(action, &running, allowed, checklist)).collect()
}

#[cfg(test)]
#[path = "gate_tests.rs"]
mod tests;
