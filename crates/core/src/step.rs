// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow step vocabulary and lifecycle states.

use serde::{Deserialize, Serialize};

crate::vocabulary! {
    /// Canonical workflow step identifiers.
    ///
    /// The set is closed and versioned with the client: any other value the
    /// backend sends is unknown and must be resolved by inference.
    pub enum StepKey {
        Preflight => "preflight",
        PreflightMf => "preflight_mf",
        AmazonOrRakutenDownload => "amazon_or_rakuten_download",
        AmazonDownload => "amazon_download",
        AmazonDecidePrint => "amazon_decide_print",
        AmazonPrint => "amazon_print",
        RakutenDownload => "rakuten_download",
        RakutenDecidePrint => "rakuten_decide_print",
        RakutenPrint => "rakuten_print",
        ProviderIngest => "provider_ingest",
        ImportProviderReceipts => "import_provider_receipts",
        MfBulkUploadTask => "mf_bulk_upload_task",
        MfBulkUpload => "mf_bulk_upload",
        MfCsvImport => "mf_csv_import",
        MfReconcile => "mf_reconcile",
        Done => "done",
    }
}

impl StepKey {
    /// Short human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            StepKey::Preflight => "Preflight check",
            StepKey::PreflightMf => "Refresh MF linkage",
            StepKey::AmazonOrRakutenDownload => "Download receipts",
            StepKey::AmazonDownload => "Download Amazon receipts",
            StepKey::AmazonDecidePrint => "Decide Amazon print targets",
            StepKey::AmazonPrint => "Print Amazon receipts",
            StepKey::RakutenDownload => "Download Rakuten receipts",
            StepKey::RakutenDecidePrint => "Decide Rakuten print targets",
            StepKey::RakutenPrint => "Print Rakuten receipts",
            StepKey::ProviderIngest => "Ingest provider receipts",
            StepKey::ImportProviderReceipts => "Import provider receipts",
            StepKey::MfBulkUploadTask => "Upload to MF",
            StepKey::MfBulkUpload => "MF bulk upload",
            StepKey::MfCsvImport => "MF CSV import",
            StepKey::MfReconcile => "Reconcile with MF",
            StepKey::Done => "Month complete",
        }
    }

    /// The block this step belongs to; `None` for the terminal step.
    pub fn block(&self) -> Option<Block> {
        match self {
            StepKey::Preflight | StepKey::PreflightMf => Some(Block::Preflight),
            StepKey::AmazonOrRakutenDownload
            | StepKey::AmazonDownload
            | StepKey::AmazonDecidePrint
            | StepKey::AmazonPrint => Some(Block::Amazon),
            StepKey::RakutenDownload | StepKey::RakutenDecidePrint | StepKey::RakutenPrint => {
                Some(Block::Rakuten)
            }
            StepKey::ProviderIngest | StepKey::ImportProviderReceipts => {
                Some(Block::ProviderIngest)
            }
            StepKey::MfBulkUploadTask | StepKey::MfBulkUpload | StepKey::MfCsvImport => {
                Some(Block::MfBulkUploadTask)
            }
            StepKey::MfReconcile => Some(Block::MfReconcile),
            StepKey::Done => None,
        }
    }
}

/// The backend's next-step hint after normalization.
///
/// Resolving this with a `match` keeps the "trusted vs. inferred" boundary
/// visible: only `Known` is taken at face value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepHint {
    /// No hint supplied (absent, or blank after trimming)
    Absent,
    Known(StepKey),
    /// A non-blank hint outside the vocabulary, as sent
    Unrecognized(String),
}

impl StepHint {
    /// Trim and lowercase the raw hint, then classify it.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(hint) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
            return StepHint::Absent;
        };
        match StepKey::from_ident(&hint.to_ascii_lowercase()) {
            Some(key) => StepHint::Known(key),
            None => StepHint::Unrecognized(hint.to_string()),
        }
    }

    pub fn known(&self) -> Option<StepKey> {
        match self {
            StepHint::Known(key) => Some(*key),
            _ => None,
        }
    }

    pub fn unrecognized(&self) -> Option<&str> {
        match self {
            StepHint::Unrecognized(raw) => Some(raw),
            _ => None,
        }
    }
}

/// Lifecycle state of a block or task.
///
/// Precedence when several apply: `Running` > `Done` > `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Pending,
    Running,
    Done,
}

impl StepState {
    /// Apply the precedence rule to the raw running/done signals.
    pub fn from_flags(running: bool, done: bool) -> Self {
        if running {
            StepState::Running
        } else if done {
            StepState::Done
        } else {
            StepState::Pending
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, StepState::Running)
    }

    pub fn is_done(&self) -> bool {
        matches!(self, StepState::Done)
    }
}

crate::simple_display! {
    StepState {
        Pending => "pending",
        Running => "running",
        Done => "done",
    }
}

crate::vocabulary! {
    /// Logical grouping of steps rendered as one card on the dashboard.
    pub enum Block {
        Preflight => "preflight",
        Amazon => "amazon",
        Rakuten => "rakuten",
        ProviderIngest => "provider_ingest",
        MfBulkUploadTask => "mf_bulk_upload_task",
        MfReconcile => "mf_reconcile",
    }
}

/// Receipt sources with a download + print-decision flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Amazon,
    Rakuten,
}

impl Source {
    pub const ALL: &'static [Source] = &[Source::Amazon, Source::Rakuten];

    pub fn download_step(&self) -> StepKey {
        match self {
            Source::Amazon => StepKey::AmazonDownload,
            Source::Rakuten => StepKey::RakutenDownload,
        }
    }

    pub fn decide_print_step(&self) -> StepKey {
        match self {
            Source::Amazon => StepKey::AmazonDecidePrint,
            Source::Rakuten => StepKey::RakutenDecidePrint,
        }
    }

    pub fn print_step(&self) -> StepKey {
        match self {
            Source::Amazon => StepKey::AmazonPrint,
            Source::Rakuten => StepKey::RakutenPrint,
        }
    }

    pub fn block(&self) -> Block {
        match self {
            Source::Amazon => Block::Amazon,
            Source::Rakuten => Block::Rakuten,
        }
    }
}

crate::simple_display! {
    Source {
        Amazon => "amazon",
        Rakuten => "rakuten",
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
