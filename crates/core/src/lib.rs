// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rcpt-core: Status snapshot model and workflow vocabulary for the receipt
//! reconciliation dashboard

pub mod macros;

pub mod clock;
pub mod mode;
pub mod period;
pub mod snapshot;
pub mod step;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, FakeClock, SystemClock};
pub use mode::{RunMode, RunningMode};
pub use period::{PeriodError, TargetPeriod};
pub use snapshot::{
    MfStatus, MfSummary, PreflightStatus, ProviderStatus, SourceStatus, StatusSnapshot, TaskFlag,
};
pub use step::{Block, Source, StepHint, StepKey, StepState};
