mod encoding;
mod profile;
mod types;

pub use encoding::{
    Projection, RawState, View, decode, encode, encode_grid, encode_raw, encode_typed,
};
pub use profile::{BoardProfile, CellLayout};
pub use types::{
    BoardState, Color, GameMetadata, MetadataUpdate, Piece, PieceKind, Player, Square, Winner,
};
