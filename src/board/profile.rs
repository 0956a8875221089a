//! Board profiles: which physical board a relay instance serves.

use super::types::{BoardState, GameMetadata, Player, Square};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How a profile's wire payload is split into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellLayout {
    /// Cells separated by commas (`0,1,2,...`).
    CommaSeparated,
    /// One character per cell.
    CharIndexed,
}

/// A fixed board configuration selected when the service is built.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum BoardProfile {
    /// 4x4 reversi board with game metadata.
    #[default]
    Reversi,
    /// Six-cell sensor array.
    Sensor,
    /// 8x8 chess board in piece-letter notation.
    ChessPieces,
    /// 8x8 chess occupancy bit-string.
    ChessBinary,
}

impl BoardProfile {
    /// Fixed number of cells every update must carry.
    pub fn cell_count(self) -> usize {
        match self {
            BoardProfile::Reversi => 16,
            BoardProfile::Sensor => 6,
            BoardProfile::ChessPieces | BoardProfile::ChessBinary => 64,
        }
    }

    /// How the payload is split into cells.
    pub fn layout(self) -> CellLayout {
        match self {
            BoardProfile::Reversi | BoardProfile::Sensor => CellLayout::CommaSeparated,
            BoardProfile::ChessPieces | BoardProfile::ChessBinary => CellLayout::CharIndexed,
        }
    }

    /// Row width of the 2-D grid projection, if this profile has one.
    pub fn grid_width(self) -> Option<usize> {
        match self {
            BoardProfile::ChessPieces | BoardProfile::ChessBinary => Some(8),
            BoardProfile::Reversi | BoardProfile::Sensor => None,
        }
    }

    /// Optional separator between rows in the payload.
    pub fn row_separator(self) -> Option<char> {
        match self {
            BoardProfile::ChessPieces => Some('/'),
            _ => None,
        }
    }

    /// Whether updates may carry `currentPlayer`/`gameOver`/`winner`.
    pub fn has_metadata(self) -> bool {
        matches!(self, BoardProfile::Reversi)
    }

    /// One-line description for listings.
    pub fn description(self) -> &'static str {
        match self {
            BoardProfile::Reversi => "4x4 reversi board, comma-separated 0/1/2 cells, with game metadata",
            BoardProfile::Sensor => "6-cell sensor array, comma-separated 0/1 flags",
            BoardProfile::ChessPieces => "8x8 chess board, 64 piece letters or blanks, optional '/' between rows",
            BoardProfile::ChessBinary => "8x8 chess occupancy, 64-character 0/1 string",
        }
    }

    /// State the store is seeded with on (re)initialization.
    pub fn initial_state(self) -> BoardState {
        let len = self.cell_count();
        match self {
            BoardProfile::Reversi => {
                let mut cells = vec![None; len];
                // Four center cells, same colours on each diagonal.
                cells[5] = Some(Player::Two);
                cells[6] = Some(Player::One);
                cells[9] = Some(Player::One);
                cells[10] = Some(Player::Two);
                BoardState::Discs(cells)
            }
            BoardProfile::Sensor => BoardState::Flags(vec![false; len]),
            BoardProfile::ChessBinary => BoardState::Bits(vec![false; len]),
            BoardProfile::ChessPieces => BoardState::Squares(vec![Square::Blank(' '); len]),
        }
    }

    /// Metadata the store is seeded with, for profiles that carry it.
    pub fn initial_metadata(self) -> Option<GameMetadata> {
        self.has_metadata().then(GameMetadata::default)
    }
}
