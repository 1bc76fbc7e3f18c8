// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Run modes: identifiers of the actions the dashboard can start.
//!
//! Only one run may be active system-wide; the backend reports it as
//! `running_mode`.

use crate::step::{Block, Source};

crate::vocabulary! {
    /// Action identifiers the client knows how to start.
    pub enum RunMode {
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
    }
}

impl RunMode {
    pub fn title(&self) -> &'static str {
        match self {
            RunMode::Preflight => "Preflight check",
            RunMode::PreflightMf => "MF linkage refresh",
            RunMode::AmazonDownload => "Amazon download",
            RunMode::AmazonPrint => "Amazon print",
            RunMode::RakutenDownload => "Rakuten download",
            RunMode::RakutenPrint => "Rakuten print",
            RunMode::ProviderIngest => "Provider receipt ingest",
            RunMode::ImportProviderReceipts => "Provider receipt import",
            RunMode::MfBulkUpload => "MF bulk upload",
            RunMode::MfCsvImport => "MF CSV import",
            RunMode::MfReconcile => "MF reconciliation",
        }
    }

    /// The block whose state this mode drives to `running`.
    pub fn block(&self) -> Block {
        match self {
            RunMode::Preflight | RunMode::PreflightMf => Block::Preflight,
            RunMode::AmazonDownload | RunMode::AmazonPrint => Block::Amazon,
            RunMode::RakutenDownload | RunMode::RakutenPrint => Block::Rakuten,
            RunMode::ProviderIngest | RunMode::ImportProviderReceipts => Block::ProviderIngest,
            RunMode::MfBulkUpload | RunMode::MfCsvImport => Block::MfBulkUploadTask,
            RunMode::MfReconcile => Block::MfReconcile,
        }
    }

    pub fn download_for(source: Source) -> Self {
        match source {
            Source::Amazon => RunMode::AmazonDownload,
            Source::Rakuten => RunMode::RakutenDownload,
        }
    }

    pub fn print_for(source: Source) -> Self {
        match source {
            Source::Amazon => RunMode::AmazonPrint,
            Source::Rakuten => RunMode::RakutenPrint,
        }
    }
}

/// The snapshot's `running_mode`, classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunningMode {
    Idle,
    Known(RunMode),
    /// Something is running that this client has no vocabulary for
    Unrecognized(String),
}

impl RunningMode {
    /// Trim and classify. Matching is exact after trimming.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return RunningMode::Idle;
        }
        match RunMode::from_ident(trimmed) {
            Some(mode) => RunningMode::Known(mode),
            None => RunningMode::Unrecognized(trimmed.to_string()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, RunningMode::Idle)
    }

    pub fn known(&self) -> Option<RunMode> {
        match self {
            RunningMode::Known(mode) => Some(*mode),
            _ => None,
        }
    }

    /// Whether `mode` is the one currently running.
    pub fn is(&self, mode: RunMode) -> bool {
        self.known() == Some(mode)
    }

    pub fn as_str(&self) -> &str {
        match self {
            RunningMode::Idle => "",
            RunningMode::Known(mode) => mode.as_str(),
            RunningMode::Unrecognized(raw) => raw,
        }
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
