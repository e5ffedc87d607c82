//! History repository trait.

use crate::error::Result;
use crate::history::model::HistoryLog;

/// Persistence port for the roll history.
///
/// Implementations store the whole log as one document.
pub trait HistoryRepository {
    /// Reads the persisted log.
    ///
    /// A missing storage location is not an error and yields an empty log.
    /// Unreadable or malformed content is reported as an error; recovering
    /// from it is the caller's decision.
    fn load(&self) -> Result<HistoryLog>;

    /// Replaces the persisted log with `log`.
    fn save(&self, log: &HistoryLog) -> Result<()>;
}
