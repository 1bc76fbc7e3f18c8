// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use proptest::prelude::*;
use rcpt_core::test_support::strategies::arb_snapshot;
use rcpt_core::test_support::{month_complete, SnapshotBuilder};

#[test]
fn fresh_month_is_all_pending() {
    let states = derive_block_states(&StatusSnapshot::default());
    assert!(states.iter().all(|(_, state)| state == StepState::Pending));
}

#[test]
fn completed_month_is_all_done() {
    let states = derive_block_states(&month_complete());
    assert_eq!(states.preflight, StepState::Done);
    assert_eq!(states.amazon, StepState::Done);
    assert_eq!(states.rakuten, StepState::Done);
    assert_eq!(states.provider_ingest, StepState::Done);
    assert_eq!(states.mf_reconcile, StepState::Done);
    // Bulk upload is optional and was not used
    assert_eq!(states.mf_bulk_upload_task, StepState::Pending);
}

#[yare::parameterized(
    preflight     = { "preflight",                Block::Preflight },
    preflight_mf  = { "preflight_mf",             Block::Preflight },
    amazon_dl     = { "amazon_download",          Block::Amazon },
    amazon_print  = { "amazon_print",             Block::Amazon },
    rakuten_dl    = { "rakuten_download",         Block::Rakuten },
    rakuten_print = { "rakuten_print",            Block::Rakuten },
    ingest        = { "provider_ingest",          Block::ProviderIngest },
    import        = { "import_provider_receipts", Block::ProviderIngest },
    bulk          = { "mf_bulk_upload",           Block::MfBulkUploadTask },
    csv           = { "mf_csv_import",            Block::MfBulkUploadTask },
    reconcile     = { "mf_reconcile",             Block::MfReconcile },
)]
fn running_mode_marks_only_its_block(mode: &str, block: Block) {
    let states = derive_block_states(&SnapshotBuilder::new().running(mode).build());
    for (candidate, state) in states.iter() {
        if candidate == block {
            assert_eq!(state, StepState::Running, "{candidate}");
        } else {
            assert_eq!(state, StepState::Pending, "{candidate}");
        }
    }
}

#[test]
fn running_takes_priority_over_done() {
    let snapshot = SnapshotBuilder::new().preflight_done().running("preflight_mf").build();
    assert_eq!(derive_block_states(&snapshot).preflight, StepState::Running);
}

#[test]
fn unknown_running_mode_marks_nothing() {
    let states = derive_block_states(&SnapshotBuilder::new().running("pptx_refresh").build());
    assert!(states.iter().all(|(_, state)| state == StepState::Pending));
}

#[test]
fn source_needs_confirm_and_print_to_be_done() {
    let snapshot = SnapshotBuilder::new().confirmed(Source::Amazon).build();
    assert_eq!(derive_block_states(&snapshot).amazon, StepState::Pending);
}

#[test]
fn csv_import_completes_bulk_upload_block() {
    let snapshot = SnapshotBuilder::new().csv_import_done().build();
    assert_eq!(derive_block_states(&snapshot).mf_bulk_upload_task, StepState::Done);
}

#[yare::parameterized(
    idle_nothing      = { SnapshotBuilder::new(),                                         StepState::Pending, StepState::Pending, StepState::Pending },
    downloaded        = { SnapshotBuilder::new().downloaded(Source::Amazon),              StepState::Done,    StepState::Pending, StepState::Pending },
    finished          = { SnapshotBuilder::new().finished(Source::Amazon),                StepState::Done,    StepState::Done,    StepState::Done },
    downloading       = { SnapshotBuilder::new().running("amazon_download"),              StepState::Running, StepState::Pending, StepState::Running },
    printing          = { SnapshotBuilder::new().downloaded(Source::Amazon).running("amazon_print"), StepState::Done, StepState::Running, StepState::Running },
    other_source_runs = { SnapshotBuilder::new().finished(Source::Amazon).running("rakuten_print"), StepState::Done, StepState::Done, StepState::Done },
)]
fn amazon_task_state(
    builder: SnapshotBuilder,
    download: StepState,
    print: StepState,
    state: StepState,
) {
    let tasks = derive_task_states(&builder.build());
    assert_eq!(tasks.amazon, TaskState { download, print, state });
}

#[test]
fn task_state_lookup_by_source() {
    let tasks = derive_task_states(&SnapshotBuilder::new().finished(Source::Rakuten).build());
    assert_eq!(tasks.get(Source::Rakuten).state, StepState::Done);
    assert_eq!(tasks.get(Source::Amazon).state, StepState::Pending);
}

proptest! {
    #[test]
    fn task_running_iff_a_sub_step_runs(snapshot in arb_snapshot()) {
        let tasks = derive_task_states(&snapshot);
        for source in Source::ALL {
            let task = tasks.get(*source);
            let sub_running = task.download.is_running() || task.print.is_running();
            prop_assert_eq!(task.state.is_running(), sub_running);
        }
    }

    #[test]
    fn at_most_one_block_runs(snapshot in arb_snapshot()) {
        let running = derive_block_states(&snapshot)
            .iter()
            .filter(|(_, state)| state.is_running())
            .count();
        prop_assert!(running <= 1);
    }
}
