//! Board state synchronization service.
//!
//! [`SyncService`] is the only way in or out of a [`BoardStore`]: producers call
//! [`SyncService::submit`], consumers call [`SyncService::snapshot`]. Updates are
//! fully validated before anything is written, so a rejected update leaves the
//! previous state and metadata in place.

use crate::board::{
    BoardProfile, MetadataUpdate, Player, RawState, Winner, decode, encode_grid,
    encode_raw, encode_typed,
};
use crate::error::SyncError;
use crate::store::{BoardRecord, BoardStore};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, instrument};

/// An update as sent by the producer.
///
/// Every field arrives as loosely-typed text. Numbers and booleans are also
/// accepted in JSON bodies and converted to their decimal/`"1"`/`"0"` form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    /// Delimited board state string.
    #[serde(default, alias = "boardState", alias = "sensorState")]
    pub state: Option<String>,
    /// Player to move, as a decimal string.
    #[serde(default, deserialize_with = "wire_text")]
    pub current_player: Option<String>,
    /// `"1"` when the game is over; anything else means it is not.
    #[serde(default, deserialize_with = "wire_text")]
    pub game_over: Option<String>,
    /// Winning player (`0` for none or tie), as a decimal string.
    #[serde(default, deserialize_with = "wire_text")]
    pub winner: Option<String>,
}

impl SubmitRequest {
    /// Creates a request carrying only a board state.
    pub fn with_state(state: impl Into<String>) -> Self {
        Self {
            state: Some(state.into()),
            ..Self::default()
        }
    }

    /// Sets the `currentPlayer` field.
    pub fn current_player(mut self, value: impl Into<String>) -> Self {
        self.current_player = Some(value.into());
        self
    }

    /// Sets the `gameOver` field.
    pub fn game_over(mut self, value: impl Into<String>) -> Self {
        self.game_over = Some(value.into());
        self
    }

    /// Sets the `winner` field.
    pub fn winner(mut self, value: impl Into<String>) -> Self {
        self.winner = Some(value.into());
        self
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireText {
    Text(String),
    Integer(i64),
    Flag(bool),
}

fn wire_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<WireText>::deserialize(deserializer)?.map(|value| match value {
        WireText::Text(text) => text,
        WireText::Integer(n) => n.to_string(),
        WireText::Flag(flag) => (if flag { "1" } else { "0" }).to_string(),
    }))
}

/// Everything a consumer needs to render the board, computed eagerly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Profile the service runs.
    pub profile: BoardProfile,
    /// State in its raw form.
    pub raw_state: RawState,
    /// Integer array, one entry per cell.
    pub typed_array: Vec<u8>,
    /// Row-major grid, for 8x8 profiles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grid: Option<Vec<Vec<u8>>>,
    /// Player to move, for profiles with metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_player: Option<Player>,
    /// Game-over flag, for profiles with metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over: Option<bool>,
    /// Winner, for profiles with metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<Winner>,
}

/// Validates producer updates and serves snapshots for one board profile.
///
/// Cloning shares the underlying store.
#[derive(Debug, Clone)]
pub struct SyncService {
    profile: BoardProfile,
    store: BoardStore,
}

impl SyncService {
    /// Creates a service seeded with the profile's initial state.
    #[instrument]
    pub fn new(profile: BoardProfile) -> Self {
        info!(%profile, cells = profile.cell_count(), "Creating sync service");
        Self {
            profile,
            store: BoardStore::new(initial_record(profile)),
        }
    }

    /// Returns the profile this service was built for.
    pub fn profile(&self) -> BoardProfile {
        self.profile
    }

    /// Validates `request` and, if everything parses, replaces the stored state.
    ///
    /// Metadata fields are ignored by profiles that do not carry metadata.
    #[instrument(skip(self, request), fields(profile = %self.profile))]
    pub fn submit(&self, request: &SubmitRequest) -> Result<(), SyncError> {
        let state = decode(request.state.as_deref(), self.profile)?;

        let update = if self.profile.has_metadata() {
            parse_metadata(request)?
        } else {
            if request.current_player.is_some()
                || request.game_over.is_some()
                || request.winner.is_some()
            {
                debug!("Ignoring metadata fields for profile without metadata");
            }
            MetadataUpdate::default()
        };

        self.store.commit(state, &update);

        info!(
            current_player = ?update.current_player,
            game_over = ?update.game_over,
            winner = ?update.winner,
            "Updated board state"
        );
        Ok(())
    }

    /// Renders the current state in every client-facing shape.
    pub fn snapshot(&self) -> Snapshot {
        let BoardRecord { state, metadata } = self.store.read();
        Snapshot {
            profile: self.profile,
            raw_state: encode_raw(&state),
            typed_array: encode_typed(&state),
            grid: self.profile.grid_width().map(|width| encode_grid(&state, width)),
            current_player: metadata.map(|m| m.current_player),
            game_over: metadata.map(|m| m.game_over),
            winner: metadata.map(|m| m.winner),
        }
    }

    /// Puts the board and metadata back to the profile's initial values.
    #[instrument(skip(self), fields(profile = %self.profile))]
    pub fn reset(&self) {
        self.store.replace(initial_record(self.profile));
        info!("Board reset to initial state");
    }
}

fn initial_record(profile: BoardProfile) -> BoardRecord {
    BoardRecord {
        state: profile.initial_state(),
        metadata: profile.initial_metadata(),
    }
}

// Empty strings count as absent, like a missing form field.
fn present(field: Option<&str>) -> Option<&str> {
    field.filter(|value| !value.is_empty())
}

// Numbers tolerate surrounding whitespace; a blank number is absent.
fn present_number(field: Option<&str>) -> Option<&str> {
    present(field).map(str::trim).filter(|value| !value.is_empty())
}

fn parse_number(name: &str, value: &str) -> Result<i64, SyncError> {
    value.parse::<i64>().map_err(|_| {
        debug!(field = name, value, "Metadata field is not an integer");
        SyncError::malformed(format!("{} must be an integer, got {:?}", name, value))
    })
}

fn parse_metadata(request: &SubmitRequest) -> Result<MetadataUpdate, SyncError> {
    let current_player = present_number(request.current_player.as_deref())
        .map(|value| {
            let n = parse_number("currentPlayer", value)?;
            Player::from_number(n)
                .ok_or_else(|| SyncError::malformed(format!("currentPlayer must be 1 or 2, got {}", n)))
        })
        .transpose()?;

    let winner = present_number(request.winner.as_deref())
        .map(|value| {
            let n = parse_number("winner", value)?;
            Winner::from_number(n)
                .ok_or_else(|| SyncError::malformed(format!("winner must be 0, 1 or 2, got {}", n)))
        })
        .transpose()?;

    // Exact match: " 1 " is present but is not "1".
    let game_over = present(request.game_over.as_deref()).map(|value| value == "1");

    Ok(MetadataUpdate {
        current_player,
        game_over,
        winner,
    })
}
