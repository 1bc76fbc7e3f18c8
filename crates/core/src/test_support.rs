// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::snapshot::{SourceStatus, StatusSnapshot};
use crate::step::Source;

// ── Proptest strategies ─────────────────────────────────────────────────

/// Proptest strategies for snapshots, including hints and modes the client
/// has never heard of.
pub mod strategies {
    use crate::mode::RunMode;
    use crate::snapshot::{
        MfStatus, MfSummary, PreflightStatus, ProviderStatus, SourceStatus, StatusSnapshot,
        TaskFlag,
    };
    use crate::step::StepKey;
    use proptest::prelude::*;

    pub fn arb_source_status() -> impl Strategy<Value = SourceStatus> {
        (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
            |(downloaded, confirmed, printed)| SourceStatus { downloaded, confirmed, printed },
        )
    }

    pub fn arb_running_mode() -> impl Strategy<Value = String> {
        prop_oneof![
            3 => Just(String::new()),
            3 => prop::sample::select(RunMode::ALL).prop_map(|m| m.as_str().to_string()),
            1 => "[a-z_]{1,12}",
        ]
    }

    pub fn arb_next_step() -> impl Strategy<Value = Option<String>> {
        prop_oneof![
            2 => Just(None),
            1 => Just(Some("  ".to_string())),
            3 => prop::sample::select(StepKey::ALL).prop_map(|k| Some(k.as_str().to_string())),
            2 => "legacy_[a-z]{1,8}".prop_map(Some),
        ]
    }

    pub fn arb_reason() -> impl Strategy<Value = Option<String>> {
        prop_oneof![Just(None), "[a-z_]{1,20}".prop_map(Some)]
    }

    pub fn arb_allowed_modes() -> impl Strategy<Value = Vec<String>> {
        prop_oneof![
            2 => Just(Vec::new()),
            1 => prop::collection::vec(
                prop::sample::select(RunMode::ALL).prop_map(|m| m.as_str().to_string()),
                0..6,
            ),
        ]
    }

    pub fn arb_snapshot() -> impl Strategy<Value = StatusSnapshot> {
        let flags = (
            any::<bool>(),
            arb_source_status(),
            arb_source_status(),
            (0u64..5, any::<bool>()),
            (any::<bool>(), any::<bool>(), 0u64..3),
            (any::<bool>(), any::<bool>()),
        );
        let signals = (
            arb_running_mode(),
            arb_next_step(),
            arb_reason(),
            arb_allowed_modes(),
            prop::option::of(any::<bool>()),
        );
        (flags, signals).prop_map(
            |(
                (preflight, amazon, rakuten, (pending_total, providers_done), mf, (bulk, csv)),
                (running_mode, next_step, next_step_reason, allowed_run_modes, can_reconcile),
            )| StatusSnapshot {
                preflight: PreflightStatus { done: preflight },
                amazon,
                rakuten,
                providers: ProviderStatus { pending_total, step_done: providers_done },
                mf: MfStatus {
                    reconciled: mf.0,
                    step_done: mf.1,
                    summary: MfSummary { missing_candidates: mf.2, targets_total: 10 },
                },
                mf_bulk_upload: TaskFlag { done: bulk },
                mf_csv_import: TaskFlag { done: csv },
                running_mode,
                next_step,
                next_step_reason,
                allowed_run_modes,
                can_reconcile,
            },
        )
    }
}

// ── Snapshot builder ────────────────────────────────────────────────────

/// Fluent builder for snapshots at a given point in the month's workflow.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    snapshot: StatusSnapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preflight_done(mut self) -> Self {
        self.snapshot.preflight.done = true;
        self
    }

    pub fn downloaded(mut self, source: Source) -> Self {
        source_mut(&mut self.snapshot, source).downloaded = true;
        self
    }

    pub fn confirmed(mut self, source: Source) -> Self {
        let status = source_mut(&mut self.snapshot, source);
        status.downloaded = true;
        status.confirmed = true;
        self
    }

    /// Downloaded, confirmed and printed.
    pub fn finished(mut self, source: Source) -> Self {
        *source_mut(&mut self.snapshot, source) =
            SourceStatus { downloaded: true, confirmed: true, printed: true };
        self
    }

    pub fn providers_pending(mut self, count: u64) -> Self {
        self.snapshot.providers.pending_total = count;
        self
    }

    pub fn providers_done(mut self) -> Self {
        self.snapshot.providers.step_done = true;
        self
    }

    pub fn bulk_upload_done(mut self) -> Self {
        self.snapshot.mf_bulk_upload.done = true;
        self
    }

    pub fn csv_import_done(mut self) -> Self {
        self.snapshot.mf_csv_import.done = true;
        self
    }

    pub fn reconciled(mut self) -> Self {
        self.snapshot.mf.reconciled = true;
        self.snapshot.mf.step_done = true;
        self
    }

    pub fn missing_candidates(mut self, count: u64) -> Self {
        self.snapshot.mf.summary.missing_candidates = count;
        self
    }

    pub fn running(mut self, mode: &str) -> Self {
        self.snapshot.running_mode = mode.to_string();
        self
    }

    pub fn next_step(mut self, hint: &str) -> Self {
        self.snapshot.next_step = Some(hint.to_string());
        self
    }

    pub fn reason(mut self, code: &str) -> Self {
        self.snapshot.next_step_reason = Some(code.to_string());
        self
    }

    pub fn allowed(mut self, modes: &[&str]) -> Self {
        self.snapshot.allowed_run_modes = modes.iter().map(|m| m.to_string()).collect();
        self
    }

    pub fn can_reconcile(mut self, value: bool) -> Self {
        self.snapshot.can_reconcile = Some(value);
        self
    }

    pub fn build(self) -> StatusSnapshot {
        self.snapshot
    }
}

fn source_mut(snapshot: &mut StatusSnapshot, source: Source) -> &mut SourceStatus {
    match source {
        Source::Amazon => &mut snapshot.amazon,
        Source::Rakuten => &mut snapshot.rakuten,
    }
}

/// Everything up to (but not including) reconciliation is finished.
pub fn ready_to_reconcile() -> StatusSnapshot {
    SnapshotBuilder::new()
        .preflight_done()
        .finished(Source::Amazon)
        .finished(Source::Rakuten)
        .providers_done()
        .build()
}

/// The whole month is closed out.
pub fn month_complete() -> StatusSnapshot {
    SnapshotBuilder::new()
        .preflight_done()
        .finished(Source::Amazon)
        .finished(Source::Rakuten)
        .providers_done()
        .reconciled()
        .build()
}
