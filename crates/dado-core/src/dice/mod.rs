//! Dice models and the roll engine.
//!
//! The engine functions are pure: every draw goes through a caller-supplied
//! [`RandomSource`], so a fixed source gives a fixed result.

mod engine;
mod model;
mod random;

pub use engine::{
    RollOutcome, SumDetail, SumOutcome, dice_count, parse_modifier, roll, roll_sum,
};
pub use model::{DiceSet, DieSpec, RollRequest, STANDARD_DICE};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
