//! JSON file implementation of [`HistoryRepository`].
//!
//! The whole history is one JSON array, rewritten on every save:
//!
//! ```json
//! [
//!   {
//!     "datetime": "05/03/2024 14:07:09",
//!     "dice": "D12",
//!     "modifier": -2,
//!     "result": 4,
//!     "rolls": [4, 9]
//!   }
//! ]
//! ```

use std::path::{Path, PathBuf};

use dado_core::DiceError;
use dado_core::error::Result;
use dado_core::history::{HistoryLog, HistoryRepository};

use crate::storage::AtomicJsonFile;

pub struct JsonHistoryRepository {
    file: AtomicJsonFile<HistoryLog>,
}

impl JsonHistoryRepository {
    /// Repository at an explicit path.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

impl HistoryRepository for JsonHistoryRepository {
    fn load(&self) -> Result<HistoryLog> {
        let log = self.file.load()?.unwrap_or_default();
        tracing::debug!(
            "[JsonHistoryRepository] Read {} entries from {:?}",
            log.len(),
            self.path()
        );
        Ok(log)
    }

    fn save(&self, log: &HistoryLog) -> Result<()> {
        self.file.save(log).map_err(|e| {
            tracing::error!(
                "[JsonHistoryRepository] Failed to write {:?}: {}",
                self.path(),
                e
            );
            DiceError::from(e)
        })
    }
}
