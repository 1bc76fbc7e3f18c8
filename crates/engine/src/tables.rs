// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Static guidance tables.
//!
//! Four lookups feed the composer: guidance by next step (idle), guidance by
//! running mode (busy), refinements by reason code, and section anchors.
//! Lookups return `None` for unmapped keys; the composer owns the fallbacks.

use rcpt_core::{RunMode, StepKey};

/// Anchor of the wizard itself, used when nothing more specific is mapped.
pub const FALLBACK_ANCHOR: &str = "wizard";

/// Default text for one table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuidanceText {
    pub message: &'static str,
    pub reason: &'static str,
    pub link_label: &'static str,
}

/// Refinement applied on top of a step's default text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReasonText {
    pub message: &'static str,
    pub reason: &'static str,
}

const fn text(message: &'static str, reason: &'static str, link_label: &'static str) -> GuidanceText {
    GuidanceText { message, reason, link_label }
}

const fn refine(message: &'static str, reason: &'static str) -> ReasonText {
    ReasonText { message, reason }
}

rcpt_core::vocabulary! {
    /// Reason codes the backend attaches to its `next_step` hint.
    pub enum ReasonCode {
        PreflightRequired => "preflight_required",
        MfLinkageExpired => "mf_linkage_expired",
        SourceDownloadRequired => "source_download_required",
        AmazonDownloadRequired => "amazon_download_required",
        RakutenDownloadRequired => "rakuten_download_required",
        AmazonPrintPending => "amazon_print_pending",
        RakutenPrintPending => "rakuten_print_pending",
        ProviderReceiptsPending => "provider_receipts_pending",
        MfBulkUploadPending => "mf_bulk_upload_pending",
        MfReconcileReady => "mf_reconcile_ready",
        MfMissingCandidates => "mf_missing_candidates",
        AllStepsDone => "all_steps_done",
    }
}

static STEP_GUIDANCE: &[(StepKey, GuidanceText)] = &[
    (StepKey::Preflight, text(
        "Run the preflight check.",
        "Downloads need fresh sessions for every receipt source and a valid MF linkage.",
        "Open preflight",
    )),
    (StepKey::PreflightMf, text(
        "Refresh the MF linkage.",
        "Reconciliation cannot read MF until the linkage is renewed.",
        "Open preflight",
    )),
    (StepKey::AmazonOrRakutenDownload, text(
        "Download this month's receipts from Amazon or Rakuten.",
        "No receipts have been collected for the month yet.",
        "Open downloads",
    )),
    (StepKey::AmazonDownload, text(
        "Download Amazon receipts.",
        "Amazon receipts for the month have not been collected yet.",
        "Open Amazon",
    )),
    (StepKey::AmazonDecidePrint, text(
        "Decide which Amazon receipts to print.",
        "Downloaded Amazon receipts are waiting for a print decision.",
        "Open Amazon",
    )),
    (StepKey::AmazonPrint, text(
        "Print the selected Amazon receipts.",
        "The print selection is confirmed but printing has not finished.",
        "Open Amazon",
    )),
    (StepKey::RakutenDownload, text(
        "Download Rakuten receipts.",
        "Rakuten receipts for the month have not been collected yet.",
        "Open Rakuten",
    )),
    (StepKey::RakutenDecidePrint, text(
        "Decide which Rakuten receipts to print.",
        "Downloaded Rakuten receipts are waiting for a print decision.",
        "Open Rakuten",
    )),
    (StepKey::RakutenPrint, text(
        "Print the selected Rakuten receipts.",
        "The print selection is confirmed but printing has not finished.",
        "Open Rakuten",
    )),
    (StepKey::ProviderIngest, text(
        "Ingest receipts from other providers.",
        "Provider receipts are waiting in the inbox.",
        "Open provider inbox",
    )),
    (StepKey::ImportProviderReceipts, text(
        "Import the collected provider receipts.",
        "Provider receipts were collected but not imported yet.",
        "Open provider inbox",
    )),
    (StepKey::MfBulkUploadTask, text(
        "Upload receipts to MF.",
        "Receipts prepared for MF still need to be uploaded or imported.",
        "Open MF upload",
    )),
    (StepKey::MfBulkUpload, text(
        "Run the MF bulk upload.",
        "Receipt files are ready for bulk upload.",
        "Open MF upload",
    )),
    (StepKey::MfCsvImport, text(
        "Run the MF CSV import.",
        "The expense CSV is ready for import.",
        "Open MF upload",
    )),
    (StepKey::MfReconcile, text(
        "Reconcile receipts with MF.",
        "Collected receipts have not been matched against MF expenses yet.",
        "Open reconciliation",
    )),
    (StepKey::Done, text(
        "All steps for this month are finished.",
        "Archive the month's outputs and close the month.",
        "Open archive",
    )),
];

static RUNNING_GUIDANCE: &[(RunMode, GuidanceText)] = &[
    (RunMode::Preflight, text(
        "Preflight check is running.",
        "Wait for it to finish before starting another task.",
        "View preflight",
    )),
    (RunMode::PreflightMf, text(
        "MF linkage refresh is running.",
        "Wait for it to finish before starting another task.",
        "View preflight",
    )),
    (RunMode::AmazonDownload, text(
        "Amazon receipts are downloading.",
        "Downloads can take several minutes for a full month.",
        "View Amazon",
    )),
    (RunMode::AmazonPrint, text(
        "Amazon receipts are printing.",
        "Wait for the print job to finish before changing the selection.",
        "View Amazon",
    )),
    (RunMode::RakutenDownload, text(
        "Rakuten receipts are downloading.",
        "Downloads can take several minutes for a full month.",
        "View Rakuten",
    )),
    (RunMode::RakutenPrint, text(
        "Rakuten receipts are printing.",
        "Wait for the print job to finish before changing the selection.",
        "View Rakuten",
    )),
    (RunMode::ProviderIngest, text(
        "Provider receipts are being ingested.",
        "Wait for the ingest to finish before starting another task.",
        "View provider inbox",
    )),
    (RunMode::ImportProviderReceipts, text(
        "Provider receipts are being imported.",
        "Wait for the import to finish before starting another task.",
        "View provider inbox",
    )),
    (RunMode::MfBulkUpload, text(
        "MF bulk upload is running.",
        "Uploaded receipts appear in MF once the upload completes.",
        "View MF upload",
    )),
    (RunMode::MfCsvImport, text(
        "MF CSV import is running.",
        "Imported expenses appear in MF once the import completes.",
        "View MF upload",
    )),
    (RunMode::MfReconcile, text(
        "Reconciliation with MF is running.",
        "Results appear in the reconciliation section when it completes.",
        "View reconciliation",
    )),
];

/// Guidance while a mode the client does not know is running.
pub const UNKNOWN_RUNNING_GUIDANCE: GuidanceText = text(
    "A task is running.",
    "Other actions are locked until it finishes.",
    "View progress",
);

/// Guidance for a step with no table row.
pub const UNKNOWN_STEP_GUIDANCE: GuidanceText = text(
    "Continue the monthly workflow.",
    "Follow the wizard from the first unfinished step.",
    "Open wizard",
);

static REASON_GUIDANCE: &[(ReasonCode, ReasonText)] = &[
    (ReasonCode::PreflightRequired, refine(
        "Run the preflight check before anything else.",
        "No preflight has completed for this month.",
    )),
    (ReasonCode::MfLinkageExpired, refine(
        "Refresh the MF linkage.",
        "The MF session expired since the last preflight.",
    )),
    (ReasonCode::SourceDownloadRequired, refine(
        "Start with an Amazon or Rakuten download.",
        "Either source can go first.",
    )),
    (ReasonCode::AmazonDownloadRequired, refine(
        "Download Amazon receipts next.",
        "Rakuten is already collected.",
    )),
    (ReasonCode::RakutenDownloadRequired, refine(
        "Download Rakuten receipts next.",
        "Amazon is already collected.",
    )),
    (ReasonCode::AmazonPrintPending, refine(
        "Finish the Amazon print decision.",
        "Reconciliation waits until every downloaded receipt has a print decision.",
    )),
    (ReasonCode::RakutenPrintPending, refine(
        "Finish the Rakuten print decision.",
        "Reconciliation waits until every downloaded receipt has a print decision.",
    )),
    (ReasonCode::ProviderReceiptsPending, refine(
        "Ingest the waiting provider receipts.",
        "Unprocessed provider receipts would be missing from reconciliation.",
    )),
    (ReasonCode::MfBulkUploadPending, refine(
        "Finish the MF upload.",
        "MF has not received every prepared receipt.",
    )),
    (ReasonCode::MfReconcileReady, refine(
        "Reconcile with MF now.",
        "All receipt sources are collected.",
    )),
    (ReasonCode::MfMissingCandidates, refine(
        "Review receipts still missing in MF.",
        "The last reconciliation left unmatched candidates.",
    )),
    (ReasonCode::AllStepsDone, refine(
        "Everything for this month is finished.",
        "Nothing is left to run.",
    )),
];

static STEP_ANCHORS: &[(StepKey, &str)] = &[
    (StepKey::Preflight, "step-preflight"),
    (StepKey::PreflightMf, "step-preflight"),
    (StepKey::AmazonOrRakutenDownload, "step-amazon-download"),
    (StepKey::AmazonDownload, "step-amazon-download"),
    (StepKey::AmazonDecidePrint, "step-amazon-decide-print"),
    (StepKey::AmazonPrint, "step-amazon-print"),
    (StepKey::RakutenDownload, "step-rakuten-download"),
    (StepKey::RakutenDecidePrint, "step-rakuten-decide-print"),
    (StepKey::RakutenPrint, "step-rakuten-print"),
    (StepKey::ProviderIngest, "step-provider-ingest"),
    (StepKey::ImportProviderReceipts, "step-provider-ingest"),
    (StepKey::MfBulkUploadTask, "step-mf-bulk-upload"),
    (StepKey::MfBulkUpload, "step-mf-bulk-upload"),
    (StepKey::MfCsvImport, "step-mf-bulk-upload"),
    (StepKey::MfReconcile, "step-mf-reconcile"),
    (StepKey::Done, "step-archive"),
];

static RUNNING_ANCHORS: &[(RunMode, &str)] = &[
    (RunMode::Preflight, "step-preflight"),
    (RunMode::PreflightMf, "step-preflight"),
    (RunMode::AmazonDownload, "step-amazon-download"),
    (RunMode::AmazonPrint, "step-amazon-print"),
    (RunMode::RakutenDownload, "step-rakuten-download"),
    (RunMode::RakutenPrint, "step-rakuten-print"),
    (RunMode::ProviderIngest, "step-provider-ingest"),
    (RunMode::ImportProviderReceipts, "step-provider-ingest"),
    (RunMode::MfBulkUpload, "step-mf-bulk-upload"),
    (RunMode::MfCsvImport, "step-mf-bulk-upload"),
    (RunMode::MfReconcile, "step-mf-reconcile"),
];

fn lookup<K: PartialEq + Copy, V: Copy>(table: &[(K, V)], key: K) -> Option<V> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

pub fn step_guidance(step: StepKey) -> Option<GuidanceText> {
    lookup(STEP_GUIDANCE, step)
}

pub fn running_guidance(mode: RunMode) -> Option<GuidanceText> {
    lookup(RUNNING_GUIDANCE, mode)
}

pub fn reason_guidance(code: ReasonCode) -> Option<ReasonText> {
    lookup(REASON_GUIDANCE, code)
}

pub fn step_anchor(step: StepKey) -> Option<&'static str> {
    lookup(STEP_ANCHORS, step)
}

pub fn running_anchor(mode: RunMode) -> Option<&'static str> {
    lookup(RUNNING_ANCHORS, mode)
}

#[cfg(test)]
#[path = "tables_tests.rs"]
mod tests;
