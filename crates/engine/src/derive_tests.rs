// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::fallback::FallbackKind;
use crate::gate::Action;
use crate::resolve::StepOrigin;
use proptest::prelude::*;
use rcpt_core::test_support::strategies::arb_snapshot;
use rcpt_core::test_support::{month_complete, SnapshotBuilder};
use rcpt_core::{FakeClock, Source, StepKey, StepState};

fn run(snapshot: &StatusSnapshot, log: &FallbackLog<FakeClock>) -> Derivation {
    derive(snapshot, None, &GuidanceConfig::default(), None, log)
}

#[test]
fn unknown_hint_is_logged_once_per_pass() {
    let snapshot = SnapshotBuilder::new().preflight_done().next_step("legacy_step_x").build();
    let log = FallbackLog::new(FakeClock::new());

    let derivation = run(&snapshot, &log);

    assert_eq!(derivation.next_step.step, StepKey::AmazonOrRakutenDownload);
    assert_eq!(derivation.next_step.origin, StepOrigin::Inferred);
    assert_eq!(log.len(), 1);
    assert_eq!(derivation.fallback.fallback_type, "next_step_unknown");
    assert_eq!(derivation.fallback.step, "legacy_step_x");
    assert_eq!(derivation.fallback.count, 1);
}

#[test]
fn decide_print_before_other_download() {
    let snapshot = SnapshotBuilder::new().preflight_done().downloaded(Source::Amazon).build();
    let log = FallbackLog::new(FakeClock::new());

    let derivation = run(&snapshot, &log);

    assert_eq!(derivation.next_step.step, StepKey::AmazonDecidePrint);
    assert_eq!(derivation.guidance.href, "/expense-workflow#step-amazon-decide-print");
    assert_eq!(derivation.tasks.amazon.download, StepState::Done);
    assert_eq!(derivation.tasks.amazon.state, StepState::Pending);
}

#[test]
fn completed_month_enables_close() {
    let log = FallbackLog::new(FakeClock::new());
    let derivation = run(&month_complete(), &log);

    assert_eq!(derivation.next_step.step, StepKey::Done);
    assert!(derivation.checklist.is_complete());
    let close = derivation.actions.iter().find(|d| d.action == Action::MonthClose).unwrap();
    assert!(close.enabled);
    assert_eq!(derivation.blocks.mf_reconcile, StepState::Done);
    assert_eq!(derivation.blocks.mf_bulk_upload_task, StepState::Pending);
}

#[test]
fn caller_checklist_replaces_derived_one() {
    let log = FallbackLog::new(FakeClock::new());
    let derivation = derive(
        &StatusSnapshot::default(),
        None,
        &GuidanceConfig::default(),
        Some(CloseChecklist::checked()),
        &log,
    );
    assert!(derivation.checklist.is_complete());
    let archive = derivation.actions.iter().find(|d| d.action == Action::ArchiveOutputs).unwrap();
    assert!(archive.enabled);
}

#[test]
fn fallback_attributes_reflect_latest_entry() {
    let snapshot = SnapshotBuilder::new().running("pptx_refresh").build();
    let clock = FakeClock::new();
    clock.set_epoch_ms(42_000);
    let log = FallbackLog::new(clock);

    let derivation = run(&snapshot, &log);

    assert_eq!(derivation.fallback.fallback_type, FallbackKind::RunningModeAnchor.to_string());
    assert_eq!(derivation.fallback.mode, "pptx_refresh");
    assert_eq!(derivation.fallback.anchor, "/expense-workflow#step-preflight");
    assert_eq!(derivation.fallback.at_ms, Some(42_000));
}

#[test]
fn derivation_serializes() {
    let log = FallbackLog::new(FakeClock::new());
    let value = serde_json::to_value(run(&month_complete(), &log)).unwrap();
    assert_eq!(value["next_step"]["step"], "done");
    assert_eq!(value["blocks"]["mf_reconcile"], "done");
    assert_eq!(value["actions"][0]["action"], "preflight");
}

proptest! {
    #[test]
    fn derive_is_idempotent(snapshot in arb_snapshot()) {
        let log = FallbackLog::new(FakeClock::new());
        let first = run(&snapshot, &log);
        let recorded = log.recorded();
        let second = run(&snapshot, &log);
        prop_assert_eq!(first, second);
        prop_assert_eq!(log.recorded(), recorded);
    }

    #[test]
    fn derive_agrees_with_compute_next_step(snapshot in arb_snapshot()) {
        let log = FallbackLog::new(FakeClock::new());
        let derivation = run(&snapshot, &log);
        let entry = crate::guidance::compute_next_step(&snapshot, None, &GuidanceConfig::default(), &log);
        prop_assert_eq!(derivation.guidance, entry);
    }
}
