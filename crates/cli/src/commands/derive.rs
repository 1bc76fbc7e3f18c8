// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `rcpt derive`: run one derivation pass over a snapshot.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rcpt_core::StatusSnapshot;
use rcpt_engine::{derive, CloseChecklist, FallbackLog};

use super::derive_display::render;
use crate::config::Settings;
use crate::exit_error::{ExitError, EXIT_FALLBACK};
use crate::output::{format_or_json, OutputFormat};

#[derive(Args)]
pub struct DeriveArgs {
    /// Snapshot JSON file (reads stdin when omitted or `-`)
    pub snapshot: Option<PathBuf>,
    /// Target period, YYYY-MM, used in guidance links
    #[arg(long)]
    pub period: Option<String>,
    /// TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Treat the month-close checklist as complete
    #[arg(long)]
    pub checklist_complete: bool,
    /// Exit with status 3 when any guidance fallback was needed
    #[arg(long)]
    pub fail_on_fallback: bool,
}

pub fn handle(args: DeriveArgs, format: OutputFormat) -> Result<()> {
    let settings = Settings::resolve(args.config.as_deref(), args.period.as_deref())
        .map_err(ExitError::usage)?;
    let snapshot = read_snapshot(args.snapshot.as_deref())?;

    let log = FallbackLog::system();
    let checklist = args.checklist_complete.then(CloseChecklist::checked);
    let derivation =
        derive(&snapshot, settings.period.as_ref(), &settings.guidance, checklist, &log);

    format_or_json(format, &derivation, || print!("{}", render(&derivation)))?;

    if args.fail_on_fallback && derivation.fallback.count > 0 {
        return Err(ExitError::new(
            EXIT_FALLBACK,
            format!(
                "{} guidance fallback(s) recorded; latest: {}",
                derivation.fallback.count, derivation.fallback.fallback_type
            ),
        )
        .into());
    }
    Ok(())
}

fn read_snapshot(path: Option<&Path>) -> Result<StatusSnapshot> {
    let (label, text) = match path.filter(|p| p.as_os_str() != "-") {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read snapshot {}", path.display()))?;
            (path.display().to_string(), text)
        }
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text).context("failed to read snapshot from stdin")?;
            ("stdin".to_string(), text)
        }
    };
    StatusSnapshot::from_json(&text).with_context(|| format!("invalid snapshot JSON in {label}"))
}

#[cfg(test)]
#[path = "derive_tests.rs"]
mod tests;
