// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `data` as pretty JSON, or run `text_fn` for text output.
pub fn format_or_json<T: Serialize>(
    format: OutputFormat,
    data: &T,
    text_fn: impl FnOnce(),
) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(data)?);
        }
        OutputFormat::Text => {
            text_fn();
        }
    }
    Ok(())
}

/// Left-align `label` in a column of `width`, measuring before coloring.
pub fn pad(label: &str, width: usize, paint: impl Fn(&str) -> String) -> String {
    let padding = width.saturating_sub(label.chars().count());
    format!("{}{}", paint(label), " ".repeat(padding))
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
