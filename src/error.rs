//! Error types for board state synchronization.

use derive_more::{Display, Error};
use tracing::instrument;

/// Why an update was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum SyncErrorKind {
    /// State field missing, or a cell/metadata value outside its domain.
    #[display("Bad request: {}", _0)]
    MalformedPayload(String),
    /// Decoded cell count differs from the profile's fixed length.
    #[display("Invalid board state length: {} (expected {})", actual, expected)]
    LengthMismatch {
        /// Profile length.
        expected: usize,
        /// Cells found in the update.
        actual: usize,
    },
}

/// Rejected update with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Sync error: {} at {}:{}", kind, file, line)]
pub struct SyncError {
    /// What went wrong.
    pub kind: SyncErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl SyncError {
    /// Creates a new sync error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: SyncErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Creates a malformed-payload error.
    #[track_caller]
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::new(SyncErrorKind::MalformedPayload(reason.into()))
    }

    /// Creates a length-mismatch error.
    #[track_caller]
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::new(SyncErrorKind::LengthMismatch { expected, actual })
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &SyncErrorKind {
        &self.kind
    }
}
