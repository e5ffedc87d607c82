//! Domain layer for dado: the roll engine, the history log and the
//! configuration model.
//!
//! Nothing in this crate touches the filesystem. Persistence is expressed
//! through [`history::HistoryRepository`], implemented in
//! `dado-infrastructure`.

pub mod assets;
pub mod config;
pub mod dice;
pub mod error;
pub mod history;

// Re-export common error type
pub use error::DiceError;
