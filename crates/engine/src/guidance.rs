// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Guidance composition: what the "next step" panel says and links to.
//!
//! Busy snapshots are described from the running-mode table; idle snapshots
//! from the next-step table, refined by the backend's reason code. Every
//! fallback taken along the way is recorded in the [`FallbackLog`].

use std::collections::BTreeMap;

use rcpt_core::{Clock, RunningMode, StatusSnapshot, StepKey, TargetPeriod};
use serde::{Deserialize, Serialize};

use crate::fallback::{FallbackEntry, FallbackKind, FallbackLog};
use crate::resolve::{resolve_next_step, Resolution};
use crate::tables::{self, ReasonCode, FALLBACK_ANCHOR};

pub const DEFAULT_WIZARD_PATH: &str = "/expense-workflow";

/// Where guidance links point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuidanceConfig {
    /// Path of the workflow wizard page
    pub wizard_path: String,
    /// Per-step anchor overrides keyed by step identifier; a blank value
    /// leaves the step unmapped
    pub step_anchors: BTreeMap<String, String>,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self { wizard_path: DEFAULT_WIZARD_PATH.to_string(), step_anchors: BTreeMap::new() }
    }
}

impl GuidanceConfig {
    rcpt_core::setters! {
        into {
            wizard_path: String,
        }
    }

    pub fn step_anchor_override(mut self, step: StepKey, anchor: impl Into<String>) -> Self {
        self.step_anchors.insert(step.as_str().to_string(), anchor.into());
        self
    }

    /// Anchor for a step, honoring overrides.
    pub fn step_anchor(&self, step: StepKey) -> Option<&str> {
        match self.step_anchors.get(step.as_str()) {
            Some(anchor) => Some(anchor.trim()).filter(|a| !a.is_empty()),
            None => tables::step_anchor(step),
        }
    }

    /// `{wizard_path}?ym=YYYY-MM#anchor`, without the query when no period is set.
    pub fn href(&self, period: Option<&TargetPeriod>, anchor: &str) -> String {
        match period {
            Some(period) => format!("{}?ym={}#{}", self.wizard_path, period, anchor),
            None => format!("{}#{}", self.wizard_path, anchor),
        }
    }
}

/// Display-ready guidance for the "next step" panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuidanceEntry {
    pub message: String,
    pub reason: String,
    pub href: String,
    pub link_label: String,
}

/// Resolve the next step and compose its guidance.
pub fn compute_next_step<C: Clock>(
    snapshot: &StatusSnapshot,
    period: Option<&TargetPeriod>,
    config: &GuidanceConfig,
    log: &FallbackLog<C>,
) -> GuidanceEntry {
    let resolution = resolve_next_step(snapshot, log);
    compose_guidance(snapshot, &resolution, period, config, log)
}

/// Compose guidance for an already-resolved next step.
pub fn compose_guidance<C: Clock>(
    snapshot: &StatusSnapshot,
    resolution: &Resolution,
    period: Option<&TargetPeriod>,
    config: &GuidanceConfig,
    log: &FallbackLog<C>,
) -> GuidanceEntry {
    let composer = Composer { snapshot, step: resolution.step, period, config, log };
    let running = snapshot.running();
    let mut entry = if running.is_idle() { composer.idle() } else { composer.running(&running) };

    if let Some(hint) = &resolution.unrecognized_hint {
        entry.reason.push_str(&format!(
            " (backend step `{hint}` is not recognized; showing the step inferred from status flags)"
        ));
    }
    entry
}

struct Composer<'a, C: Clock> {
    snapshot: &'a StatusSnapshot,
    step: StepKey,
    period: Option<&'a TargetPeriod>,
    config: &'a GuidanceConfig,
    log: &'a FallbackLog<C>,
}

impl<C: Clock> Composer<'_, C> {
    fn running(&self, running: &RunningMode) -> GuidanceEntry {
        let known = running.known();
        let text = known.and_then(tables::running_guidance).unwrap_or(tables::UNKNOWN_RUNNING_GUIDANCE);
        let message = match running {
            RunningMode::Unrecognized(raw) => format!("Task `{raw}` is running."),
            _ => text.message.to_string(),
        };

        let href = match known.and_then(tables::running_anchor) {
            Some(anchor) => self.config.href(self.period, anchor),
            None => {
                let anchor = self.config.step_anchor(self.step).unwrap_or(FALLBACK_ANCHOR);
                let href = self.config.href(self.period, anchor);
                self.record(FallbackKind::RunningModeAnchor, &href);
                href
            }
        };

        GuidanceEntry {
            message,
            reason: text.reason.to_string(),
            href,
            link_label: text.link_label.to_string(),
        }
    }

    fn idle(&self) -> GuidanceEntry {
        let text = tables::step_guidance(self.step).unwrap_or(tables::UNKNOWN_STEP_GUIDANCE);
        let anchor = self.config.step_anchor(self.step).unwrap_or(FALLBACK_ANCHOR);
        let href = self.config.href(self.period, anchor);
        let mut message = text.message.to_string();
        let mut reason = text.reason.to_string();

        if let Some(code) = self.snapshot.reason_code() {
            let refined = ReasonCode::from_ident(&code.to_ascii_lowercase())
                .and_then(tables::reason_guidance);
            match refined {
                Some(refined) => {
                    message = refined.message.to_string();
                    reason = append_reason(&reason, refined.reason);
                }
                None => self.record(FallbackKind::NextStepReasonUnknown, &href),
            }
        }

        if anchor == FALLBACK_ANCHOR {
            self.record(FallbackKind::NextStepAnchor, &href);
        }

        GuidanceEntry { message, reason, href, link_label: text.link_label.to_string() }
    }

    fn record(&self, kind: FallbackKind, href: &str) {
        self.log.record(
            FallbackEntry::new(kind)
                .running_mode(self.snapshot.running().as_str())
                .next_step(self.step.as_str())
                .next_step_reason(self.snapshot.reason_code().unwrap_or_default())
                .href(href),
        );
    }
}

fn append_reason(base: &str, extra: &str) -> String {
    match (base.is_empty(), extra.is_empty()) {
        (true, _) => extra.to_string(),
        (_, true) => base.to_string(),
        _ => format!("{base} {extra}"),
    }
}

#[cfg(test)]
#[path = "guidance_tests.rs"]
mod tests;
