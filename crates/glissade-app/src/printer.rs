//! Text and JSON rendering of a replay outcome.

use std::io::Write;

use glissade_types::error::Result;

use crate::replay::Outcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write `outcome` to `out`.
pub fn print(outcome: &Outcome, format: OutputFormat, out: &mut dyn Write) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(outcome, out),
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, outcome)?;
            writeln!(out)?;
            Ok(())
        },
    }
}

fn print_text(outcome: &Outcome, out: &mut dyn Write) -> Result<()> {
    if !outcome.name.is_empty() {
        writeln!(out, "== {} ==", outcome.name)?;
    }
    for entry in &outcome.entries {
        writeln!(out, "{:>7}ms  {}", entry.at_ms, entry.command)?;
    }

    let waypoints = outcome
        .visible_waypoints
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ");
    writeln!(out, "--")?;
    writeln!(
        out,
        "offset {} (progress {:.3}) at {}ms{}",
        outcome.final_offset,
        outcome.progress,
        outcome.ended_at_ms,
        if outcome.navigating { ", navigating" } else { "" }
    )?;
    if waypoints.is_empty() {
        writeln!(out, "visible waypoints: none")?;
    } else {
        writeln!(out, "visible waypoints: {waypoints}")?;
    }
    Ok(())
}
