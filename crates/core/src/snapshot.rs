// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status snapshot: the point-in-time record of workflow progress for one
//! target period, as delivered by the status endpoint.
//!
//! Every field is optional on the wire. Missing fields, `null`s and values of
//! the wrong JSON type read as `false` / `0` / empty so that version skew
//! between client and backend never fails a derivation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::mode::RunningMode;
use crate::step::{Source, StepHint};

/// Preflight (environment and MF linkage check).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreflightStatus {
    #[serde(deserialize_with = "lenient::flag")]
    pub done: bool,
}

/// Progress of one receipt source (Amazon, Rakuten).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceStatus {
    #[serde(deserialize_with = "lenient::flag")]
    pub downloaded: bool,
    /// Print decisions (which receipts to print) have been confirmed
    #[serde(deserialize_with = "lenient::flag")]
    pub confirmed: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub printed: bool,
}

impl SourceStatus {
    /// Downloaded, confirmed and printed.
    pub fn is_finished(&self) -> bool {
        self.confirmed && self.printed
    }

    /// Downloaded but the print decision is still open.
    pub fn has_pending_print(&self) -> bool {
        self.downloaded && !self.is_finished()
    }
}

/// Receipts from other providers waiting to be ingested.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderStatus {
    #[serde(deserialize_with = "lenient::count")]
    pub pending_total: u64,
    #[serde(deserialize_with = "lenient::flag")]
    pub step_done: bool,
}

/// Counters reported by the last MF reconciliation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfSummary {
    #[serde(deserialize_with = "lenient::count")]
    pub missing_candidates: u64,
    #[serde(deserialize_with = "lenient::count")]
    pub targets_total: u64,
}

/// Reconciliation against the MF accounting system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MfStatus {
    #[serde(deserialize_with = "lenient::flag")]
    pub reconciled: bool,
    #[serde(deserialize_with = "lenient::flag")]
    pub step_done: bool,
    #[serde(deserialize_with = "lenient::or_default")]
    pub summary: MfSummary,
}

/// A task that only reports completion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFlag {
    #[serde(deserialize_with = "lenient::flag")]
    pub done: bool,
}

/// Point-in-time workflow status for one target period.
///
/// The engine only ever borrows a snapshot; nothing in a derivation pass
/// mutates it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSnapshot {
    #[serde(deserialize_with = "lenient::or_default")]
    pub preflight: PreflightStatus,
    #[serde(deserialize_with = "lenient::or_default")]
    pub amazon: SourceStatus,
    #[serde(deserialize_with = "lenient::or_default")]
    pub rakuten: SourceStatus,
    #[serde(deserialize_with = "lenient::or_default")]
    pub providers: ProviderStatus,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mf: MfStatus,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mf_bulk_upload: TaskFlag,
    #[serde(deserialize_with = "lenient::or_default")]
    pub mf_csv_import: TaskFlag,
    /// Identifier of the action currently executing; empty when idle
    #[serde(deserialize_with = "lenient::text")]
    pub running_mode: String,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    #[serde(deserialize_with = "lenient::opt_text", skip_serializing_if = "Option::is_none")]
    pub next_step_reason: Option<String>,
    #[serde(deserialize_with = "lenient::text_list", skip_serializing_if = "Vec::is_empty")]
    pub allowed_run_modes: Vec<String>,
    #[serde(deserialize_with = "lenient::opt_flag", skip_serializing_if = "Option::is_none")]
    pub can_reconcile: Option<bool>,
}

impl StatusSnapshot {
    /// Parse a snapshot from status-endpoint JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn source(&self, source: Source) -> &SourceStatus {
        match source {
            Source::Amazon => &self.amazon,
            Source::Rakuten => &self.rakuten,
        }
    }

    /// The backend's next-step hint, normalized and classified.
    pub fn step_hint(&self) -> StepHint {
        StepHint::parse(self.next_step.as_deref())
    }

    /// The currently running action, classified.
    pub fn running(&self) -> RunningMode {
        RunningMode::parse(&self.running_mode)
    }

    /// Trimmed reason code, `None` when absent or blank.
    pub fn reason_code(&self) -> Option<&str> {
        self.next_step_reason.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Trimmed backend hint, `None` when absent or blank.
    pub fn raw_hint(&self) -> Option<&str> {
        self.next_step.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// Deserializers that never reject a value: anything unusable reads as the
/// type's empty value.
mod lenient {
    use super::*;

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de> + Default,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(T::deserialize(value).unwrap_or_default())
    }

    pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(as_flag(&Value::deserialize(deserializer)?).unwrap_or(false))
    }

    pub fn opt_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
        Ok(as_flag(&Value::deserialize(deserializer)?))
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let count = match &value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
                .unwrap_or(0),
            Value::String(s) => s.trim().parse().unwrap_or(0),
            _ => 0,
        };
        Ok(count)
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(opt_text(deserializer)?.unwrap_or_default())
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(Some(s)),
            _ => Ok(None),
        }
    }

    pub fn text_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => Ok(items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect()),
            _ => Ok(Vec::new()),
        }
    }

    fn as_flag(value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => n.as_f64().map(|f| f != 0.0),
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" | "" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
