// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rcpt-engine: Derives step states, the next step, guidance and action
//! availability from a status snapshot

mod readiness;

pub mod derive;
pub mod fallback;
pub mod gate;
pub mod guidance;
pub mod modes;
pub mod resolve;
pub mod step_state;
pub mod tables;

pub use derive::{derive, Derivation};
pub use fallback::{
    FallbackAttributes, FallbackEntry, FallbackKind, FallbackLog, FALLBACK_LOG_CAPACITY,
};
pub use gate::{
    evaluate, evaluate_actions, Action, BlockReason, ChecklistItem, CloseChecklist, GateDecision,
};
pub use guidance::{
    compose_guidance, compute_next_step, GuidanceConfig, GuidanceEntry, DEFAULT_WIZARD_PATH,
};
pub use modes::{infer_allowed_modes, AllowedModes, ModesOrigin};
pub use resolve::{infer_next_step_from_flags, resolve_next_step, Resolution, StepOrigin};
pub use step_state::{
    block_state, derive_block_states, derive_task_states, task_state, BlockStates, TaskState,
    TaskStates,
};
