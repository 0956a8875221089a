//! In-memory board state store.

use crate::board::{BoardState, GameMetadata, MetadataUpdate};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, instrument};

/// Everything one store holds: the board plus optional game metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRecord {
    /// Current canonical board.
    pub state: BoardState,
    /// Game metadata, for profiles that carry it.
    pub metadata: Option<GameMetadata>,
}

/// Holds exactly one [`BoardRecord`]; writers replace it whole.
///
/// Cloning shares the underlying record.
#[derive(Debug, Clone)]
pub struct BoardStore {
    record: Arc<Mutex<BoardRecord>>,
}

impl BoardStore {
    /// Creates a store seeded with `initial`.
    #[instrument(skip(initial), fields(cells = initial.state.len()))]
    pub fn new(initial: BoardRecord) -> Self {
        debug!("Creating board store");
        Self {
            record: Arc::new(Mutex::new(initial)),
        }
    }

    /// Swaps in a whole new record.
    #[instrument(skip_all)]
    pub fn replace(&self, record: BoardRecord) {
        *self.lock() = record;
        debug!("Board record replaced");
    }

    /// Replaces the board and applies `update` to the metadata in one step.
    ///
    /// Records without metadata ignore the update.
    #[instrument(skip_all)]
    pub fn commit(&self, state: BoardState, update: &MetadataUpdate) {
        let mut record = self.lock();
        record.state = state;
        if let Some(metadata) = record.metadata.as_mut() {
            update.apply(metadata);
        }
        debug!(metadata = ?record.metadata, "Board state committed");
    }

    /// Returns a copy of the latest record.
    pub fn read(&self) -> BoardRecord {
        self.lock().clone()
    }

    // A writer that panicked mid-assignment cannot leave a half-written record
    // behind: every write is a single move into the guard.
    fn lock(&self) -> MutexGuard<'_, BoardRecord> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
