// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Text rendering for `rcpt derive`.

use std::fmt::Write;

use rcpt_engine::{Derivation, ModesOrigin, StepOrigin};

use crate::color;
use crate::output::pad;

const LABEL_WIDTH: usize = 26;

pub(crate) fn render(derivation: &Derivation) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = write_all(&mut out, derivation);
    out
}

fn write_all(out: &mut String, d: &Derivation) -> std::fmt::Result {
    let origin = match d.next_step.origin {
        StepOrigin::Backend => "from backend",
        StepOrigin::Inferred => "inferred",
    };
    writeln!(
        out,
        "{} {} {}",
        color::header("Next step:"),
        d.next_step.step.title(),
        color::muted(&format!("({}, {origin})", d.next_step.step))
    )?;
    writeln!(out, "  {}", d.guidance.message)?;
    if !d.guidance.reason.is_empty() {
        writeln!(out, "  {}", color::context(&d.guidance.reason))?;
    }
    writeln!(out, "  {} {}", d.guidance.link_label, color::literal(&d.guidance.href))?;

    writeln!(out, "\n{}", color::header("Blocks:"))?;
    for (block, state) in d.blocks.iter() {
        writeln!(out, "  {}{}", pad(block.as_str(), LABEL_WIDTH, color::literal), state)?;
    }

    writeln!(out, "\n{}", color::header("Tasks:"))?;
    for (name, task) in [("amazon", d.tasks.amazon), ("rakuten", d.tasks.rakuten)] {
        writeln!(
            out,
            "  {}{} {}",
            pad(name, LABEL_WIDTH, color::literal),
            task.state,
            color::muted(&format!("(download {}, print {})", task.download, task.print))
        )?;
    }

    let modes_origin = match d.allowed_modes.origin {
        ModesOrigin::Backend => "from backend",
        ModesOrigin::Inferred => "inferred",
    };
    let modes: Vec<&str> = d.allowed_modes.iter().collect();
    writeln!(
        out,
        "\n{} {}",
        color::header("Allowed modes:"),
        color::muted(&format!("({modes_origin})"))
    )?;
    writeln!(out, "  {}", if modes.is_empty() { "-".to_string() } else { modes.join(", ") })?;

    writeln!(out, "\n{}", color::header("Actions:"))?;
    for decision in &d.actions {
        let status = match decision.message() {
            None => "enabled".to_string(),
            Some(message) => color::blocked(&format!("blocked: {message}")),
        };
        writeln!(out, "  {}{}", pad(decision.action.as_str(), LABEL_WIDTH, color::literal), status)?;
    }

    if d.fallback.count > 0 {
        writeln!(out, "\n{}", color::header("Fallbacks:"))?;
        writeln!(
            out,
            "  {} {}",
            d.fallback.fallback_type,
            color::muted(&format!(
                "(step `{}`, mode `{}`, {} recorded)",
                d.fallback.step, d.fallback.mode, d.fallback.count
            ))
        )?;
    }
    Ok(())
}
