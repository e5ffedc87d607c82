//! Roll computation.

use std::cmp::Ordering;
use std::fmt;

use crate::dice::model::DieSpec;
use crate::dice::random::RandomSource;
use crate::error::{DiceError, Result};

/// Result of a single-die roll with advantage/disadvantage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollOutcome {
    /// The selected face: max with advantage, min with disadvantage.
    pub final_value: u32,
    /// Every face drawn, in draw order. Never empty.
    pub all_rolls: Vec<u32>,
}

/// One drawn face in a mixed-dice sum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SumDetail {
    pub label: String,
    pub value: u32,
}

impl fmt::Display for SumDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.label, self.value)
    }
}

/// Result of rolling several dice of mixed sizes and adding them up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SumOutcome {
    pub total: u64,
    pub details: Vec<SumDetail>,
}

impl SumOutcome {
    /// `D6:3 | D6:5 | D4:2`
    pub fn details_line(&self) -> String {
        self.details
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Number of dice a modifier asks for: `max(1, |modifier|)`.
pub fn dice_count(modifier: i32) -> usize {
    modifier.unsigned_abs().max(1) as usize
}

/// Rolls a die with `sides` faces under an advantage/disadvantage modifier.
///
/// A positive modifier rolls that many dice and keeps the highest, a
/// negative one keeps the lowest, and zero rolls exactly once.
pub fn roll<R: RandomSource + ?Sized>(rng: &mut R, sides: u32, modifier: i32) -> Result<RollOutcome> {
    if sides == 0 {
        return Err(DiceError::InvalidSides { sides });
    }

    let all_rolls: Vec<u32> = (0..dice_count(modifier))
        .map(|_| rng.roll_die(sides))
        .collect();

    let first = all_rolls[0];
    let final_value = match modifier.cmp(&0) {
        Ordering::Greater => all_rolls.iter().copied().fold(first, u32::max),
        Ordering::Less => all_rolls.iter().copied().fold(first, u32::min),
        Ordering::Equal => first,
    };

    Ok(RollOutcome {
        final_value,
        all_rolls,
    })
}

/// Rolls `count` of each die and sums every face.
///
/// Details follow the order of `counts`, then draw order within a die.
pub fn roll_sum<R: RandomSource + ?Sized>(rng: &mut R, counts: &[(DieSpec, u32)]) -> SumOutcome {
    let mut outcome = SumOutcome::default();

    for (die, count) in counts {
        for _ in 0..*count {
            let value = rng.roll_die(die.sides());
            outcome.total += u64::from(value);
            outcome.details.push(SumDetail {
                label: die.label().to_string(),
                value,
            });
        }
    }

    outcome
}

/// Reads a modifier typed by the user.
///
/// Accepts an optional sign and surrounding whitespace. Anything that is not
/// an integer, or does not fit an `i32`, counts as no modifier.
pub fn parse_modifier(text: &str) -> i32 {
    text.trim().parse().unwrap_or(0)
}
