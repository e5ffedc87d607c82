//! Die descriptions and the configured dice set.

use std::fmt;

use crate::dice::engine::{RollOutcome, roll};
use crate::dice::random::RandomSource;
use crate::error::{DiceError, Result};

/// Standard dice, in the order they are presented and enumerated for sums.
pub const STANDARD_DICE: [(&str, u32); 6] = [
    ("D20", 20),
    ("D12", 12),
    ("D10", 10),
    ("D8", 8),
    ("D6", 6),
    ("D4", 4),
];

/// A die: a display label and a number of sides.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DieSpec {
    label: String,
    sides: u32,
}

impl DieSpec {
    /// Creates a die, rejecting zero sides and blank labels.
    pub fn new(label: impl Into<String>, sides: u32) -> Result<Self> {
        let label = label.into();
        if sides == 0 {
            return Err(DiceError::InvalidSides { sides });
        }
        if label.trim().is_empty() {
            return Err(DiceError::config("die label must not be empty"));
        }
        Ok(Self { label, sides })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Case-insensitive label comparison, so `d20` selects `D20`.
    pub fn matches(&self, label: &str) -> bool {
        self.label.eq_ignore_ascii_case(label.trim())
    }
}

impl fmt::Display for DieSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label, self.sides)
    }
}

/// A single-die roll with its advantage (+) or disadvantage (-) modifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollRequest {
    pub die: DieSpec,
    pub modifier: i32,
}

impl RollRequest {
    pub fn new(die: DieSpec, modifier: i32) -> Self {
        Self { die, modifier }
    }

    pub fn roll<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<RollOutcome> {
        roll(rng, self.die.sides, self.modifier)
    }
}

/// Ordered collection of the dice available to the user.
///
/// Labels are unique (case-insensitively). Iteration order is the
/// configured order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceSet {
    dice: Vec<DieSpec>,
}

impl DiceSet {
    /// The six standard polyhedral dice.
    pub fn standard() -> Self {
        let dice = STANDARD_DICE
            .iter()
            .map(|&(label, sides)| DieSpec {
                label: label.to_string(),
                sides,
            })
            .collect();
        Self { dice }
    }

    /// Builds a set from explicit dice, rejecting duplicate labels.
    pub fn from_specs(dice: Vec<DieSpec>) -> Result<Self> {
        if dice.is_empty() {
            return Err(DiceError::config("at least one die must be configured"));
        }
        for (i, die) in dice.iter().enumerate() {
            if dice[..i].iter().any(|d| d.matches(die.label())) {
                return Err(DiceError::config(format!(
                    "duplicate die label '{}'",
                    die.label()
                )));
            }
        }
        Ok(Self { dice })
    }

    pub fn get(&self, label: &str) -> Result<&DieSpec> {
        self.dice
            .iter()
            .find(|d| d.matches(label))
            .ok_or_else(|| DiceError::unknown_die(label.trim()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DieSpec> {
        self.dice.iter()
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    /// Resolves `(label, count)` pairs into dice, in set order.
    ///
    /// Repeated labels accumulate. Dice with a total count of zero are
    /// dropped. Any label outside the set is an error.
    pub fn resolve_counts<S: AsRef<str>>(&self, counts: &[(S, u32)]) -> Result<Vec<(DieSpec, u32)>> {
        if let Some((label, _)) = counts
            .iter()
            .find(|(label, _)| self.get(label.as_ref()).is_err())
        {
            return Err(DiceError::unknown_die(label.as_ref().trim()));
        }

        Ok(self
            .dice
            .iter()
            .filter_map(|die| {
                let count: u32 = counts
                    .iter()
                    .filter(|(label, _)| die.matches(label.as_ref()))
                    .map(|(_, count)| *count)
                    .sum();
                (count > 0).then(|| (die.clone(), count))
            })
            .collect())
    }
}

impl Default for DiceSet {
    fn default() -> Self {
        Self::standard()
    }
}
