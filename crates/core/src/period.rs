// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Target period (the month being reconciled).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("invalid target period `{0}`: expected YYYY-MM")]
    Format(String),
    #[error("invalid month {month} in target period `{raw}`")]
    Month { raw: String, month: u32 },
}

/// A calendar month, written `YYYY-MM` (e.g. `2026-09`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetPeriod {
    year: u16,
    month: u8,
}

impl TargetPeriod {
    pub fn new(year: u16, month: u8) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::Month {
                raw: format!("{year:04}-{month:02}"),
                month: u32::from(month),
            });
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }
}

impl fmt::Display for TargetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for TargetPeriod {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let format_err = || PeriodError::Format(raw.to_string());
        let (year, month) = raw.split_once('-').ok_or_else(format_err)?;
        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(format_err());
        }
        let year: u16 = year.parse().map_err(|_| format_err())?;
        let month: u32 = month.parse().map_err(|_| format_err())?;
        if !(1..=12).contains(&month) {
            return Err(PeriodError::Month { raw: raw.to_string(), month });
        }
        Ok(Self { year, month: month as u8 })
    }
}

impl Serialize for TargetPeriod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TargetPeriod {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "period_tests.rs"]
mod tests;
