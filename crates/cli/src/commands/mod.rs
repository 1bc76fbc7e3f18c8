// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod derive;
pub(crate) mod derive_display;
pub mod steps;
