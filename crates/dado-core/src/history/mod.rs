//! Roll history: the entry model, the persistence port and the store that
//! keeps the two in step.

mod model;
mod repository;
mod store;

pub use model::{HistoryEntry, HistoryLog, TIMESTAMP_FORMAT, format_timestamp};
pub use repository::HistoryRepository;
pub use store::HistoryStore;
