//! Wire encoding: payload strings in, client projections out.
//!
//! Decoding validates a producer payload against a [`BoardProfile`] and yields
//! a canonical [`BoardState`]. Encoding is a pure projection of that state into
//! the shapes consumers read: the raw form, an integer array, and (for 8x8
//! profiles) a row-major grid.

use super::profile::{BoardProfile, CellLayout};
use super::types::{BoardState, Piece, Player, Square};
use crate::error::SyncError;
use serde::Serialize;
use tracing::{debug, instrument};

/// Raw form of a state as echoed back to consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RawState {
    /// One string per cell (comma-separated profiles).
    Cells(Vec<String>),
    /// The whole board as one string (character-indexed profiles).
    Text(String),
}

/// A client-facing shape to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// [`RawState`].
    Raw,
    /// Integer array, one entry per cell.
    Typed,
    /// Integer rows of the given width.
    Grid {
        /// Cells per row.
        width: usize,
    },
}

/// A rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Projection {
    /// Output of [`View::Raw`].
    Raw(RawState),
    /// Output of [`View::Typed`].
    Typed(Vec<u8>),
    /// Output of [`View::Grid`].
    Grid(Vec<Vec<u8>>),
}

/// Decodes a raw payload into the canonical state for `profile`.
///
/// Only a missing payload or a wrong cell count is an error. Cell values are
/// coerced: anything but `1` is an unset flag, anything but `1`/`2` is an
/// empty disc, and any non-letter character is a blank square.
#[instrument(skip(raw), fields(payload_len = raw.map(str::len)))]
pub fn decode(raw: Option<&str>, profile: BoardProfile) -> Result<BoardState, SyncError> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(SyncError::malformed("missing board state data")),
    };

    let cells = split_cells(raw, profile);
    let expected = profile.cell_count();
    if cells.len() != expected {
        debug!(%profile, expected, actual = cells.len(), "Cell count mismatch");
        return Err(SyncError::length_mismatch(expected, cells.len()));
    }
    if let Some(separator) = profile.row_separator() {
        check_rows(raw, separator, profile)?;
    }

    let state = match profile {
        BoardProfile::Reversi => BoardState::Discs(parse_cells(&cells, parse_disc)),
        BoardProfile::Sensor => BoardState::Flags(parse_cells(&cells, |cell| parse_flag(cell.trim()))),
        BoardProfile::ChessBinary => BoardState::Bits(parse_cells(&cells, parse_flag)),
        BoardProfile::ChessPieces => BoardState::Squares(parse_cells(&cells, parse_square)),
    };

    debug!(%profile, cells = state.len(), "Decoded board state");
    Ok(state)
}

/// Renders one view of `state`.
pub fn encode(state: &BoardState, view: View) -> Projection {
    match view {
        View::Raw => Projection::Raw(encode_raw(state)),
        View::Typed => Projection::Typed(encode_typed(state)),
        View::Grid { width } => Projection::Grid(encode_grid(state, width)),
    }
}

/// Raw form: per-cell strings, or one string for character-indexed boards.
///
/// Piece boards are written as rows joined by `/`.
pub fn encode_raw(state: &BoardState) -> RawState {
    match state {
        BoardState::Discs(cells) => RawState::Cells(
            cells
                .iter()
                .map(|cell| cell.map_or(0, Player::number).to_string())
                .collect(),
        ),
        BoardState::Flags(cells) => {
            RawState::Cells(cells.iter().map(|&on| flag_char(on).to_string()).collect())
        }
        BoardState::Bits(cells) => RawState::Text(cells.iter().map(|&on| flag_char(on)).collect()),
        BoardState::Squares(cells) => {
            let width = cells.len().isqrt().max(1);
            let rows: Vec<String> = cells
                .chunks(width)
                .map(|row| row.iter().map(|square| square.symbol()).collect())
                .collect();
            RawState::Text(rows.join("/"))
        }
    }
}

/// Integer array: disc numbers, flags as 0/1, or square occupancy.
pub fn encode_typed(state: &BoardState) -> Vec<u8> {
    match state {
        BoardState::Discs(cells) => cells.iter().map(|cell| cell.map_or(0, Player::number)).collect(),
        BoardState::Flags(cells) | BoardState::Bits(cells) => {
            cells.iter().map(|&on| u8::from(on)).collect()
        }
        BoardState::Squares(cells) => cells
            .iter()
            .map(|square| u8::from(square.is_occupied()))
            .collect(),
    }
}

/// Row-major grid: cell `i` lands at `grid[i / width][i % width]`.
pub fn encode_grid(state: &BoardState, width: usize) -> Vec<Vec<u8>> {
    encode_typed(state)
        .chunks(width.max(1))
        .map(<[u8]>::to_vec)
        .collect()
}

fn split_cells(raw: &str, profile: BoardProfile) -> Vec<&str> {
    match profile.layout() {
        CellLayout::CommaSeparated => raw.split(',').collect(),
        CellLayout::CharIndexed => raw
            .char_indices()
            .filter(|&(_, c)| Some(c) != profile.row_separator())
            .map(|(i, c)| &raw[i..i + c.len_utf8()])
            .collect(),
    }
}

// Only called once the total is known to be right, so every row must be full.
fn check_rows(raw: &str, separator: char, profile: BoardProfile) -> Result<(), SyncError> {
    if !raw.contains(separator) {
        return Ok(());
    }
    let width = profile.grid_width().unwrap_or(profile.cell_count());
    for (row, text) in raw.split(separator).enumerate() {
        let squares = text.chars().count();
        if squares != width {
            debug!(row, expected = width, actual = squares, "Row width mismatch");
            return Err(SyncError::length_mismatch(width, squares));
        }
    }
    Ok(())
}

fn parse_cells<T>(cells: &[&str], parse: impl Fn(&str) -> T) -> Vec<T> {
    cells.iter().map(|&cell| parse(cell)).collect()
}

fn parse_disc(cell: &str) -> Option<Player> {
    cell.trim().parse::<i64>().ok().and_then(Player::from_number)
}

fn parse_flag(cell: &str) -> bool {
    cell == "1"
}

fn parse_square(cell: &str) -> Square {
    let c = cell.chars().next().unwrap_or(' ');
    Piece::from_letter(c).map_or(Square::Blank(c), Square::Piece)
}

fn flag_char(on: bool) -> char {
    if on { '1' } else { '0' }
}
