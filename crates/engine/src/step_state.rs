// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Step-state derivation: snapshot flags → per-block and per-task states.

use rcpt_core::{Block, RunMode, RunningMode, Source, StatusSnapshot, StepState};
use serde::Serialize;

use crate::readiness;

/// State of every block, for the dashboard's status badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BlockStates {
    pub preflight: StepState,
    pub amazon: StepState,
    pub rakuten: StepState,
    pub provider_ingest: StepState,
    pub mf_bulk_upload_task: StepState,
    pub mf_reconcile: StepState,
}

impl BlockStates {
    pub fn get(&self, block: Block) -> StepState {
        match block {
            Block::Preflight => self.preflight,
            Block::Amazon => self.amazon,
            Block::Rakuten => self.rakuten,
            Block::ProviderIngest => self.provider_ingest,
            Block::MfBulkUploadTask => self.mf_bulk_upload_task,
            Block::MfReconcile => self.mf_reconcile,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Block, StepState)> + '_ {
        Block::ALL.iter().map(move |&block| (block, self.get(block)))
    }
}

/// Compact state of a source's download + print task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskState {
    pub download: StepState,
    pub print: StepState,
    /// Aggregate of the two sub-steps
    pub state: StepState,
}

impl TaskState {
    /// `running` if either sub-step runs, else `done` once printing is done.
    pub fn aggregate(download: StepState, print: StepState) -> Self {
        let state = if download.is_running() || print.is_running() {
            StepState::Running
        } else if print.is_done() {
            StepState::Done
        } else {
            StepState::Pending
        };
        Self { download, print, state }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TaskStates {
    pub amazon: TaskState,
    pub rakuten: TaskState,
}

impl TaskStates {
    pub fn get(&self, source: Source) -> TaskState {
        match source {
            Source::Amazon => self.amazon,
            Source::Rakuten => self.rakuten,
        }
    }
}

/// Derive the state of one block.
pub fn block_state(snapshot: &StatusSnapshot, running: &RunningMode, block: Block) -> StepState {
    let running = running.known().is_some_and(|mode| mode.block() == block);
    let done = match block {
        Block::Preflight => snapshot.preflight.done,
        Block::Amazon => snapshot.amazon.is_finished(),
        Block::Rakuten => snapshot.rakuten.is_finished(),
        Block::ProviderIngest => snapshot.providers.step_done,
        Block::MfBulkUploadTask => snapshot.mf_bulk_upload.done || snapshot.mf_csv_import.done,
        Block::MfReconcile => readiness::is_reconciled(snapshot),
    };
    StepState::from_flags(running, done)
}

pub fn derive_block_states(snapshot: &StatusSnapshot) -> BlockStates {
    let running = snapshot.running();
    let state = |block| block_state(snapshot, &running, block);
    BlockStates {
        preflight: state(Block::Preflight),
        amazon: state(Block::Amazon),
        rakuten: state(Block::Rakuten),
        provider_ingest: state(Block::ProviderIngest),
        mf_bulk_upload_task: state(Block::MfBulkUploadTask),
        mf_reconcile: state(Block::MfReconcile),
    }
}

pub fn task_state(snapshot: &StatusSnapshot, running: &RunningMode, source: Source) -> TaskState {
    let status = snapshot.source(source);
    let download =
        StepState::from_flags(running.is(RunMode::download_for(source)), status.downloaded);
    let print = StepState::from_flags(running.is(RunMode::print_for(source)), status.is_finished());
    TaskState::aggregate(download, print)
}

pub fn derive_task_states(snapshot: &StatusSnapshot) -> TaskStates {
    let running = snapshot.running();
    TaskStates {
        amazon: task_state(snapshot, &running, Source::Amazon),
        rakuten: task_state(snapshot, &running, Source::Rakuten),
    }
}

#[cfg(test)]
#[path = "step_state_tests.rs"]
mod tests;
