//! Convert recorded chess games into ML-ready tensors.
//!
//! This crate replays a game's move list with `shakmaty`, serializes
//! every position visited (FEN), and encodes each position as an
//! 8x8x17 binary `ndarray` tensor: 12 piece-occupancy planes, 4
//! castling-rights planes, and a side-to-move plane, with White's back
//! rank at row 0.
//!
//! The principal entry points are [`game_to_fens`] for the position
//! sequence, [`position_to_tensor`] for a single board state, and
//! [`game_to_tensors`] for the whole pipeline. [`pgn`] supplies the
//! surrounding glue: reading games from PGN streams and splitting
//! multi-game archives into one file per game.
//!
//! The library re-exports `shakmaty` and `ndarray` to make position
//! construction and tensor consumption easy.

mod error;
mod extract;
pub mod pgn;
mod tensor;
mod types;

/// Error type produced by library operations.
pub use error::Pgn2TensorError;

/// Position-sequence extraction and the end-to-end pipeline.
pub use extract::{fen_to_position, game_to_fens, game_to_tensors, position_fen};

/// Board encoding and the fixed channel layout.
pub use tensor::{COLORS, NUM_CHANNELS, ROLES, piece_channel, position_to_tensor, setup_to_tensor};

/// Game input record consumed by the pipeline.
pub use types::GameRecord;

/// Re-exports for convenience when building positions and consuming
/// tensors.
pub use {ndarray, shakmaty};
