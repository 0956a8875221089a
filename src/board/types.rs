//! Canonical cell and metadata types shared by every board profile.

use serde::{Deserialize, Serialize};

/// A player (disc colour) on the reversi board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Player {
    /// Player 1 (black, moves first).
    One,
    /// Player 2 (white).
    Two,
}

impl Player {
    /// Returns the wire number of this player (1 or 2).
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    /// Looks up a player by wire number.
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }
}

impl From<Player> for u8 {
    fn from(player: Player) -> Self {
        player.number()
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Player::from_number(i64::from(number)).ok_or_else(|| format!("no player {}", number))
    }
}

/// Outcome reported by the producer once a game ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Winner {
    /// No winner yet, or a tie.
    #[default]
    Nobody,
    /// The given player won.
    Player(Player),
}

impl Winner {
    /// Returns the wire number (0 for nobody, otherwise the player number).
    pub fn number(self) -> u8 {
        match self {
            Winner::Nobody => 0,
            Winner::Player(player) => player.number(),
        }
    }

    /// Looks up a winner by wire number.
    pub fn from_number(number: i64) -> Option<Self> {
        match number {
            0 => Some(Winner::Nobody),
            n => Player::from_number(n).map(Winner::Player),
        }
    }
}

impl From<Winner> for u8 {
    fn from(winner: Winner) -> Self {
        winner.number()
    }
}

impl TryFrom<u8> for Winner {
    type Error = String;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        Winner::from_number(i64::from(number)).ok_or_else(|| format!("no winner {}", number))
    }
}

/// Side of a chess piece. Upper-case letters are white.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    /// Upper-case letters.
    White,
    /// Lower-case letters.
    Black,
}

/// Kind of chess piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    /// `K`
    King,
    /// `Q`
    Queen,
    /// `R`
    Rook,
    /// `B`
    Bishop,
    /// `N`
    Knight,
    /// `P`
    Pawn,
}

/// A chess piece identified by its letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    /// Which side owns the piece.
    pub color: Color,
    /// What the piece is.
    pub kind: PieceKind,
}

impl Piece {
    /// Parses a piece letter (`KQRBNP` white, `kqrbnp` black).
    pub fn from_letter(letter: char) -> Option<Self> {
        let kind = match letter.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { color, kind })
    }

    /// Returns the letter for this piece.
    pub fn letter(self) -> char {
        let letter = match self.kind {
            PieceKind::King => 'k',
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            PieceKind::Pawn => 'p',
        };
        match self.color {
            Color::White => letter.to_ascii_uppercase(),
            Color::Black => letter,
        }
    }
}

/// A square on the piece-letter chess board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Occupied by a piece.
    Piece(Piece),
    /// Empty. Keeps the exact character the producer sent, normally whitespace.
    Blank(char),
}

impl Square {
    /// Returns the character this square is rendered as.
    pub fn symbol(self) -> char {
        match self {
            Square::Piece(piece) => piece.letter(),
            Square::Blank(c) => c,
        }
    }

    /// Checks if a piece stands on this square.
    pub fn is_occupied(self) -> bool {
        matches!(self, Square::Piece(_))
    }
}

/// Canonical board state: one fixed-length cell sequence per profile family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardState {
    /// Reversi discs, `None` for an empty cell.
    Discs(Vec<Option<Player>>),
    /// Sensor flags, sent comma-separated.
    Flags(Vec<bool>),
    /// Occupancy bits, sent as one character per cell.
    Bits(Vec<bool>),
    /// Chess squares in row-major order.
    Squares(Vec<Square>),
}

impl BoardState {
    /// Number of cells in this state.
    pub fn len(&self) -> usize {
        match self {
            BoardState::Discs(cells) => cells.len(),
            BoardState::Flags(cells) | BoardState::Bits(cells) => cells.len(),
            BoardState::Squares(cells) => cells.len(),
        }
    }

    /// Checks if the state has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Game metadata carried alongside the reversi board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct GameMetadata {
    /// Player to move.
    pub current_player: Player,
    /// Whether the producer reported the game as finished.
    pub game_over: bool,
    /// Reported winner.
    pub winner: Winner,
}

impl Default for GameMetadata {
    fn default() -> Self {
        Self::new(Player::One, false, Winner::Nobody)
    }
}

/// Metadata fields present in one update. Absent fields leave the stored value alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetadataUpdate {
    /// New player to move.
    pub current_player: Option<Player>,
    /// New game-over flag.
    pub game_over: Option<bool>,
    /// New winner.
    pub winner: Option<Winner>,
}

impl MetadataUpdate {
    /// Writes the present fields into `metadata`.
    pub fn apply(&self, metadata: &mut GameMetadata) {
        if let Some(player) = self.current_player {
            metadata.current_player = player;
        }
        if let Some(game_over) = self.game_over {
            metadata.game_over = game_over;
        }
        if let Some(winner) = self.winner {
            metadata.winner = winner;
        }
    }
}
