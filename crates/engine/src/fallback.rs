// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded diagnostic log of guidance fallbacks.
//!
//! Every time the resolver or the composer meets a value outside the client's
//! vocabulary it substitutes an inferred or default value and records what it
//! could not resolve here, so support tooling can spot client/backend drift.

use std::collections::VecDeque;

use parking_lot::Mutex;
use rcpt_core::{Clock, SystemClock};
use serde::Serialize;

/// Maximum number of retained entries; the oldest is evicted first.
pub const FALLBACK_LOG_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackKind {
    /// Backend `next_step` hint not in the step vocabulary
    NextStepUnknown,
    /// Backend `next_step_reason` code not in the reason table
    NextStepReasonUnknown,
    /// Resolved step has no anchor; generic wizard anchor used
    NextStepAnchor,
    /// Running mode has no anchor; next step's anchor used
    RunningModeAnchor,
}

rcpt_core::simple_display! {
    FallbackKind {
        NextStepUnknown => "next_step_unknown",
        NextStepReasonUnknown => "next_step_reason_unknown",
        NextStepAnchor => "next_step_anchor",
        RunningModeAnchor => "running_mode_anchor",
    }
}

/// One recorded fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackEntry {
    /// Set by the log when the entry is recorded
    pub timestamp_ms: u64,
    pub kind: FallbackKind,
    pub running_mode: String,
    pub next_step: String,
    pub next_step_reason: String,
    pub href: String,
}

impl FallbackEntry {
    pub fn new(kind: FallbackKind) -> Self {
        Self {
            timestamp_ms: 0,
            kind,
            running_mode: String::new(),
            next_step: String::new(),
            next_step_reason: String::new(),
            href: String::new(),
        }
    }

    rcpt_core::setters! {
        into {
            running_mode: String,
            next_step: String,
            next_step_reason: String,
            href: String,
        }
    }

    /// Equal in every field except the timestamp.
    pub fn same_signal(&self, other: &FallbackEntry) -> bool {
        self.kind == other.kind
            && self.running_mode == other.running_mode
            && self.next_step == other.next_step
            && self.next_step_reason == other.next_step_reason
            && self.href == other.href
    }
}

#[derive(Debug, Default)]
struct LogState {
    entries: VecDeque<FallbackEntry>,
    recorded: u64,
}

/// Ring buffer of the most recent fallbacks.
///
/// Shared by reference between the resolver and the composer; appends are
/// serialized by an internal mutex so the log can sit behind an `Arc` on a
/// multi-threaded runtime.
#[derive(Debug)]
pub struct FallbackLog<C: Clock = SystemClock> {
    clock: C,
    state: Mutex<LogState>,
}

impl FallbackLog<SystemClock> {
    pub fn system() -> Self {
        Self::new(SystemClock)
    }
}

impl Default for FallbackLog<SystemClock> {
    fn default() -> Self {
        Self::system()
    }
}

impl<C: Clock> FallbackLog<C> {
    pub fn new(clock: C) -> Self {
        Self { clock, state: Mutex::new(LogState::default()) }
    }

    /// Record a fallback. Returns `false` when the entry was suppressed.
    ///
    /// An entry is suppressed when it repeats the most recent entry of the
    /// same kind, so polling an unchanged snapshot adds nothing.
    pub fn record(&self, mut entry: FallbackEntry) -> bool {
        let mut state = self.state.lock();
        let repeated = state
            .entries
            .iter()
            .rev()
            .find(|existing| existing.kind == entry.kind)
            .is_some_and(|last| last.same_signal(&entry));
        if repeated {
            tracing::trace!(kind = %entry.kind, "fallback repeated, suppressed");
            return false;
        }

        entry.timestamp_ms = self.clock.epoch_ms();
        tracing::warn!(
            kind = %entry.kind,
            running_mode = %entry.running_mode,
            next_step = %entry.next_step,
            next_step_reason = %entry.next_step_reason,
            href = %entry.href,
            "guidance fallback"
        );
        if state.entries.len() == FALLBACK_LOG_CAPACITY {
            state.entries.pop_front();
        }
        state.entries.push_back(entry);
        state.recorded += 1;
        true
    }

    /// Retained entries, oldest first.
    pub fn entries(&self) -> Vec<FallbackEntry> {
        self.state.lock().entries.iter().cloned().collect()
    }

    pub fn latest(&self) -> Option<FallbackEntry> {
        self.state.lock().entries.back().cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries recorded since creation, including evicted ones.
    pub fn recorded(&self) -> u64 {
        self.state.lock().recorded
    }

    pub fn attributes(&self) -> FallbackAttributes {
        let state = self.state.lock();
        FallbackAttributes::new(state.entries.back(), state.recorded)
    }
}

/// Latest fallback flattened into named diagnostic attributes for support
/// tooling. Not shown to end users.
///
/// The latest entry is the latest *distinct* signal: a suppressed repeat of
/// an older entry of the same kind does not move it back to the front.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FallbackAttributes {
    pub fallback_type: String,
    pub step: String,
    pub mode: String,
    pub reason: String,
    pub anchor: String,
    pub at_ms: Option<u64>,
    pub count: u64,
}

impl FallbackAttributes {
    fn new(latest: Option<&FallbackEntry>, count: u64) -> Self {
        match latest {
            Some(entry) => Self {
                fallback_type: entry.kind.to_string(),
                step: entry.next_step.clone(),
                mode: entry.running_mode.clone(),
                reason: entry.next_step_reason.clone(),
                anchor: entry.href.clone(),
                at_ms: Some(entry.timestamp_ms),
                count,
            },
            None => Self { count, ..Self::default() },
        }
    }

    /// `data-*` attribute pairs, in a stable order.
    pub fn data_attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("data-fallback-type", self.fallback_type.clone()),
            ("data-fallback-step", self.step.clone()),
            ("data-fallback-mode", self.mode.clone()),
            ("data-fallback-reason", self.reason.clone()),
            ("data-fallback-anchor", self.anchor.clone()),
            ("data-fallback-at", self.at_ms.map(|ms| ms.to_string()).unwrap_or_default()),
            ("data-fallback-count", self.count.to_string()),
        ]
    }
}

#[cfg(test)]
#[path = "fallback_tests.rs"]
mod tests;
