//! Terminal formatting.

use std::fmt::Write as _;

use colored::Colorize;
use dado_application::RollReport;
use dado_core::assets::AssetCatalog;
use dado_core::dice::{DiceSet, SumOutcome};
use dado_core::history::HistoryLog;

fn modifier_note(modifier: i32) -> String {
    match modifier {
        m if m > 1 => format!("advantage, best of {}", m),
        m if m < -1 => format!("disadvantage, worst of {}", m.unsigned_abs()),
        _ => "single roll".to_string(),
    }
}

/// `D20: 17  (rolls: [3, 17], advantage, best of 2)`
pub fn roll_report(report: &RollReport) -> String {
    format!(
        "{}: {}  {}",
        report.request.die.label().bold(),
        report.outcome.final_value.to_string().bright_green().bold(),
        format!(
            "(rolls: {:?}, {})",
            report.outcome.all_rolls,
            modifier_note(report.request.modifier)
        )
        .dimmed()
    )
}

pub fn sum_outcome(outcome: &SumOutcome) -> String {
    if outcome.details.is_empty() {
        return "Total: 0 (no dice selected)".to_string();
    }
    format!(
        "Total: {}\nDetails: {}",
        outcome.total.to_string().bright_green().bold(),
        outcome.details_line()
    )
}

/// Newest first, optionally truncated to `limit` lines.
pub fn history(log: &HistoryLog, limit: Option<usize>) -> String {
    if log.is_empty() {
        return "No rolls yet.\n".to_string();
    }

    let mut out = String::new();
    for entry in log.recent_first().take(limit.unwrap_or(usize::MAX)) {
        let _ = writeln!(out, "{}", entry);
    }
    if let Some(limit) = limit
        && log.len() > limit
    {
        let _ = writeln!(out, "{}", format!("... {} older roll(s)", log.len() - limit).dimmed());
    }
    out
}

pub fn dice(dice: &DiceSet, assets: &AssetCatalog) -> String {
    let mut out = String::new();
    for die in dice.iter() {
        let _ = write!(out, "{:<6} {:>4} sides", die.label().bold(), die.sides());
        if let Some(image) = assets.image_for(die.label()) {
            let _ = write!(out, "  {}", format!("image: {}", image).dimmed());
        }
        out.push('\n');
    }
    if let Some(sound) = assets.roll_sound() {
        let _ = writeln!(out, "Roll sound: {}", sound);
    }
    out
}
