//! Board Relay library - shared board-state synchronization
//!
//! Embedded boards push their physical state over HTTP; browser pages poll the
//! same server to render it.
//!
//! # Architecture
//!
//! - **Board**: profiles, canonical cell types, and the wire encoding
//! - **Store**: the single current board record, replaced whole on every write
//! - **Sync**: `submit`/`snapshot`, validation before commit
//! - **Server**: axum routes mapping HTTP onto the sync service
//!
//! # Example
//!
//! ```
//! use board_relay::{BoardProfile, SubmitRequest, SyncService};
//!
//! let service = SyncService::new(BoardProfile::Reversi);
//! service
//!     .submit(&SubmitRequest::with_state("0,0,0,0,0,2,1,0,0,1,2,0,0,0,0,0").current_player("2"))
//!     .unwrap();
//!
//! let snapshot = service.snapshot();
//! assert_eq!(snapshot.typed_array[5], 2);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod board;
mod config;
mod error;
mod server;
mod store;
mod sync;

// Crate-level exports - Board types and encoding
pub use board::{
    BoardProfile, BoardState, CellLayout, Color, GameMetadata, MetadataUpdate, Piece, PieceKind,
    Player, Projection, RawState, Square, View, Winner, decode, encode, encode_grid, encode_raw,
    encode_typed,
};

// Crate-level exports - Configuration
pub use config::{ConfigError, RelayConfig};

// Crate-level exports - Errors
pub use error::{SyncError, SyncErrorKind};

// Crate-level exports - Server
pub use server::{UpdatePayload, local_ip, router, serve};

// Crate-level exports - Store
pub use store::{BoardRecord, BoardStore};

// Crate-level exports - Sync service
pub use sync::{Snapshot, SubmitRequest, SyncService};
