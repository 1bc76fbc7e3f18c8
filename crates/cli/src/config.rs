// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Layered settings: TOML file, then environment, then command-line flags.
//!
//! ```toml
//! target_period = "2026-09"
//!
//! [guidance]
//! wizard_path = "/expense-workflow"
//!
//! [guidance.step_anchors]
//! mf_reconcile = "reconcile"
//! ```

use std::path::{Path, PathBuf};

use rcpt_core::{PeriodError, StepKey, TargetPeriod};
use rcpt_engine::GuidanceConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::env;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("{source} (from {origin})")]
    Period {
        origin: &'static str,
        #[source]
        source: PeriodError,
    },
}

/// Contents of a config file. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub target_period: Option<TargetPeriod>,
    pub guidance: GuidanceConfig,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Settings {
    pub period: Option<TargetPeriod>,
    pub guidance: GuidanceConfig,
}

impl Settings {
    /// Resolve settings; later layers win.
    pub fn resolve(config: Option<&Path>, period_flag: Option<&str>) -> Result<Self, ConfigError> {
        let file = match config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        for key in file.guidance.step_anchors.keys() {
            if StepKey::from_ident(key).is_none() {
                tracing::warn!(step = %key, "ignoring anchor override for unknown step");
            }
        }
        let mut settings = Settings { period: file.target_period, guidance: file.guidance };

        if let Some(raw) = env::target_period() {
            settings.period = Some(parse_period(&raw, "RCPT_TARGET_PERIOD")?);
        }
        if let Some(path) = env::wizard_path() {
            settings.guidance.wizard_path = path;
        }
        if let Some(raw) = period_flag {
            settings.period = Some(parse_period(raw, "--period")?);
        }

        tracing::debug!(
            period = ?settings.period.map(|p| p.to_string()),
            wizard_path = %settings.guidance.wizard_path,
            "resolved settings"
        );
        Ok(settings)
    }
}

fn parse_period(raw: &str, origin: &'static str) -> Result<TargetPeriod, ConfigError> {
    raw.parse().map_err(|source| ConfigError::Period { origin, source })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
