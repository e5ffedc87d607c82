//! History domain models.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::dice::{RollOutcome, RollRequest};

/// Day-first wall-clock format used for every stored timestamp.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Formats a local wall-clock time the way history entries store it.
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// One recorded single-die roll.
///
/// Serialized field names (`datetime`, `dice`, `modifier`, `result`,
/// `rolls`) are the on-disk format. The timestamp is kept as the formatted
/// string and never parsed back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(rename = "datetime")]
    timestamp: String,
    #[serde(rename = "dice")]
    die_label: String,
    modifier: i32,
    #[serde(rename = "result")]
    final_value: u32,
    #[serde(rename = "rolls")]
    all_rolls: Vec<u32>,
}

impl HistoryEntry {
    pub fn new(
        timestamp: impl Into<String>,
        die_label: impl Into<String>,
        modifier: i32,
        final_value: u32,
        all_rolls: Vec<u32>,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            die_label: die_label.into(),
            modifier,
            final_value,
            all_rolls,
        }
    }

    /// Records `outcome` of `request` as rolled at `at`.
    pub fn from_roll(at: &NaiveDateTime, request: &RollRequest, outcome: &RollOutcome) -> Self {
        Self::new(
            format_timestamp(at),
            request.die.label(),
            request.modifier,
            outcome.final_value,
            outcome.all_rolls.clone(),
        )
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn die_label(&self) -> &str {
        &self.die_label
    }

    pub fn modifier(&self) -> i32 {
        self.modifier
    }

    pub fn final_value(&self) -> u32 {
        self.final_value
    }

    pub fn all_rolls(&self) -> &[u32] {
        &self.all_rolls
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | Mod: {} | Result: {} | Rolls: {:?}",
            self.timestamp, self.die_label, self.modifier, self.final_value, self.all_rolls
        )
    }
}

/// Append-only, chronologically ordered sequence of history entries.
///
/// Serializes as a bare JSON array.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<HistoryEntry>) -> Self {
        Self { entries }
    }

    /// Entries oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Entries newest first, the order they are displayed in.
    pub fn recent_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// A copy of this log with `entry` appended.
    pub fn appended(&self, entry: HistoryEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry);
        Self { entries }
    }
}
