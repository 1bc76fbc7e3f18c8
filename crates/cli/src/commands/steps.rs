// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rcpt steps`: list the recognized step vocabulary.

use anyhow::Result;
use rcpt_core::StepKey;
use rcpt_engine::tables;
use serde::Serialize;

use crate::color;
use crate::output::{format_or_json, pad, OutputFormat};

#[derive(Debug, Serialize)]
pub struct StepRow {
    pub key: StepKey,
    pub title: &'static str,
    pub block: Option<&'static str>,
    pub anchor: Option<&'static str>,
}

pub fn rows() -> Vec<StepRow> {
    StepKey::ALL
        .iter()
        .map(|&key| StepRow {
            key,
            title: key.title(),
            block: key.block().map(|b| b.as_str()),
            anchor: tables::step_anchor(key),
        })
        .collect()
}

pub fn handle(format: OutputFormat) -> Result<()> {
    let rows = rows();
    format_or_json(format, &rows, || {
        for row in &rows {
            println!(
                "{}{} {}",
                pad(row.key.as_str(), 28, color::literal),
                row.title,
                color::muted(&format!("#{}", row.anchor.unwrap_or(tables::FALLBACK_ANCHOR)))
            );
        }
    })
}

#[cfg(test)]
#[path = "steps_tests.rs"]
mod tests;
