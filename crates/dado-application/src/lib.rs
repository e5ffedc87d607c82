pub mod clock;
pub mod dice_service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dice_service::{DiceService, RollReport};
