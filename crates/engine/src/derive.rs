// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One derivation pass over a snapshot.

use rcpt_core::{Clock, StatusSnapshot, TargetPeriod};
use serde::Serialize;

use crate::fallback::{FallbackAttributes, FallbackLog};
use crate::gate::{evaluate_actions, CloseChecklist, GateDecision};
use crate::guidance::{compose_guidance, GuidanceConfig, GuidanceEntry};
use crate::modes::{infer_allowed_modes, AllowedModes};
use crate::resolve::{resolve_next_step, Resolution};
use crate::step_state::{derive_block_states, derive_task_states, BlockStates, TaskStates};

/// Everything the dashboard renders for one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Derivation {
    pub blocks: BlockStates,
    pub tasks: TaskStates,
    pub next_step: Resolution,
    pub guidance: GuidanceEntry,
    pub allowed_modes: AllowedModes,
    pub checklist: CloseChecklist,
    pub actions: Vec<GateDecision>,
    /// Fallback diagnostics as of the end of this pass
    pub fallback: FallbackAttributes,
}

/// Run every component once.
///
/// The next step is resolved a single time and shared with the composer, so
/// an anomaly in the snapshot is logged at most once per pass. A `checklist`
/// supplied by the caller replaces the one derived from the snapshot.
pub fn derive<C: Clock>(
    snapshot: &StatusSnapshot,
    period: Option<&TargetPeriod>,
    config: &GuidanceConfig,
    checklist: Option<CloseChecklist>,
    log: &FallbackLog<C>,
) -> Derivation {
    let next_step = resolve_next_step(snapshot, log);
    let guidance = compose_guidance(snapshot, &next_step, period, config, log);
    let allowed_modes = infer_allowed_modes(snapshot);
    let checklist = checklist.unwrap_or_else(|| CloseChecklist::from_snapshot(snapshot));
    let actions = evaluate_actions(snapshot, &allowed_modes, &checklist);

    tracing::debug!(
        next_step = %next_step.step,
        origin = ?next_step.origin,
        running_mode = %snapshot.running().as_str(),
        allowed = allowed_modes.len(),
        "derived workflow state"
    );

    Derivation {
        blocks: derive_block_states(snapshot),
        tasks: derive_task_states(snapshot),
        next_step,
        guidance,
        allowed_modes,
        checklist,
        actions,
        fallback: log.attributes(),
    }
}

#[cfg(test)]
#[path = "derive_tests.rs"]
mod tests;
