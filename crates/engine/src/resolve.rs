// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Next-step resolution.
//!
//! The backend's `next_step` hint is authoritative when it names a known step.
//! Otherwise the step is inferred from the snapshot's raw flags using a fixed
//! priority order.

use rcpt_core::{Clock, Source, StatusSnapshot, StepHint, StepKey};
use serde::Serialize;

use crate::fallback::{FallbackEntry, FallbackKind, FallbackLog};
use crate::readiness;

/// Where the resolved step came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepOrigin {
    Backend,
    Inferred,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub step: StepKey,
    pub origin: StepOrigin,
    /// Hint the backend sent that is outside the step vocabulary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unrecognized_hint: Option<String>,
}

/// Resolve the canonical next step for a snapshot.
///
/// An unrecognized hint is recorded as `next_step_unknown` before falling
/// back to inference. An absent or blank hint falls through silently.
pub fn resolve_next_step<C: Clock>(snapshot: &StatusSnapshot, log: &FallbackLog<C>) -> Resolution {
    match snapshot.step_hint() {
        StepHint::Known(step) => {
            Resolution { step, origin: StepOrigin::Backend, unrecognized_hint: None }
        }
        StepHint::Absent => Resolution {
            step: infer_next_step_from_flags(snapshot),
            origin: StepOrigin::Inferred,
            unrecognized_hint: None,
        },
        StepHint::Unrecognized(hint) => {
            let step = infer_next_step_from_flags(snapshot);
            tracing::debug!(hint = %hint, inferred = %step, "next_step hint not recognized");
            log.record(
                FallbackEntry::new(FallbackKind::NextStepUnknown)
                    .running_mode(snapshot.running().as_str())
                    .next_step(hint.as_str())
                    .next_step_reason(snapshot.reason_code().unwrap_or_default()),
            );
            Resolution { step, origin: StepOrigin::Inferred, unrecognized_hint: Some(hint) }
        }
    }
}

/// Infer the next step from raw flags. First match wins.
pub fn infer_next_step_from_flags(snapshot: &StatusSnapshot) -> StepKey {
    if !snapshot.preflight.done {
        return StepKey::Preflight;
    }

    // Finish an open print decision before starting the other source
    if let Some((_, step)) = readiness::pending_print(snapshot) {
        return step;
    }

    match (snapshot.amazon.downloaded, snapshot.rakuten.downloaded) {
        (false, false) => return StepKey::AmazonOrRakutenDownload,
        (false, true) => return Source::Amazon.download_step(),
        (true, false) => return Source::Rakuten.download_step(),
        (true, true) => {}
    }

    if snapshot.providers.pending_total > 0 {
        return StepKey::ProviderIngest;
    }

    if readiness::is_reconciled(snapshot) {
        return StepKey::Done;
    }
    if snapshot.mf_bulk_upload.done || snapshot.mf_csv_import.done {
        return StepKey::MfBulkUploadTask;
    }
    // Whether or not `can_reconcile` holds yet, reconciliation is the only
    // step left until MF reports it done.
    StepKey::MfReconcile
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
