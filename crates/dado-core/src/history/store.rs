//! In-memory history backed by a repository.

use crate::error::Result;
use crate::history::model::{HistoryEntry, HistoryLog};
use crate::history::repository::HistoryRepository;

/// The roll history as seen by the application.
///
/// Holds the log in memory and rewrites the whole document through the
/// repository on every mutation. A mutation only takes effect in memory once
/// the write has succeeded, so the two never diverge.
pub struct HistoryStore<R> {
    repository: R,
    log: HistoryLog,
}

impl<R: HistoryRepository> HistoryStore<R> {
    /// Opens the store, reading whatever the repository holds.
    ///
    /// Never fails: unreadable history is logged and replaced by an empty
    /// log. The bad file stays on disk until the next write replaces it.
    pub fn load(repository: R) -> Self {
        let log = Self::read(&repository);
        Self { repository, log }
    }

    /// Re-reads the repository, discarding the in-memory copy.
    pub fn reload(&mut self) -> &HistoryLog {
        self.log = Self::read(&self.repository);
        &self.log
    }

    /// Appends `entry` and persists the full log.
    ///
    /// On a write failure the error is returned and the in-memory log is
    /// left unchanged.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<()> {
        let next = self.log.appended(entry);
        self.repository.save(&next)?;
        self.log = next;
        tracing::debug!("[HistoryStore] Appended entry ({} total)", self.log.len());
        Ok(())
    }

    /// Empties the log and persists the empty state.
    pub fn clear(&mut self) -> Result<()> {
        let empty = HistoryLog::new();
        self.repository.save(&empty)?;
        let removed = self.log.len();
        self.log = empty;
        tracing::info!("[HistoryStore] Cleared {} entries", removed);
        Ok(())
    }

    pub fn log(&self) -> &HistoryLog {
        &self.log
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    fn read(repository: &R) -> HistoryLog {
        match repository.load() {
            Ok(log) => {
                tracing::debug!("[HistoryStore] Loaded {} entries", log.len());
                log
            }
            Err(e) => {
                tracing::warn!("[HistoryStore] Ignoring unreadable history: {}", e);
                HistoryLog::new()
            }
        }
    }
}
