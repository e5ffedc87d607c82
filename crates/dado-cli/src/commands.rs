//! User actions shared by the one-shot subcommands and the shell.

use std::io::Write;

use anyhow::Result;
use dado_application::DiceService;
use dado_core::history::HistoryRepository;

use crate::render;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Roll { die: String, modifier: String },
    Sum { counts: Vec<(String, u32)> },
    History { limit: Option<usize> },
    Clear,
    Dice,
}

/// Parses `LABEL=COUNT` (or `LABEL:COUNT`), e.g. `d6=2`.
pub fn parse_count(arg: &str) -> Result<(String, u32), String> {
    let (label, count) = arg
        .split_once(['=', ':'])
        .ok_or_else(|| format!("expected LABEL=COUNT, got '{}'", arg))?;

    let label = label.trim();
    if label.is_empty() {
        return Err(format!("missing die label in '{}'", arg));
    }
    let count = count
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid count in '{}'", arg))?;

    Ok((label.to_string(), count))
}

/// Runs one action against the service and prints its result to `out`.
pub fn execute<R, W>(service: &mut DiceService<R>, action: &Action, out: &mut W) -> Result<()>
where
    R: HistoryRepository,
    W: Write,
{
    match action {
        Action::Roll { die, modifier } => {
            let report = service.roll(die, modifier)?;
            writeln!(out, "{}", render::roll_report(&report))?;
        }
        Action::Sum { counts } => {
            let outcome = service.roll_sum(counts.as_slice())?;
            writeln!(out, "{}", render::sum_outcome(&outcome))?;
        }
        Action::History { limit } => {
            write!(out, "{}", render::history(service.history(), *limit))?;
        }
        Action::Clear => {
            let removed = service.history().len();
            service.clear_history()?;
            writeln!(out, "Cleared {} roll(s) from history.", removed)?;
        }
        Action::Dice => {
            write!(out, "{}", render::dice(service.dice(), service.assets()))?;
        }
    }
    Ok(())
}
