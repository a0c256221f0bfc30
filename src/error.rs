//! Error types for the PGN-to-tensor pipeline.
//!
//! This crate uses `thiserror` to provide a single enumeration of
//! errors that may occur while replaying a game or encoding a
//! position. The variants wrap underlying errors from FEN parsing and
//! position validation, giving the caller one error type to handle.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Pgn2TensorError {
    /// A FEN string (from a game's `FEN` header or the interchange
    /// sequence) could not be parsed.
    #[error("Invalid FEN: {0}")]
    InvalidFen(#[from] shakmaty::fen::ParseFenError),

    /// A parsed setup does not describe a valid standard-chess position.
    #[error("Invalid chess position: {0}")]
    InvalidPosition(#[from] shakmaty::PositionError<shakmaty::Chess>),

    /// A recorded move does not resolve to a legal move in the position
    /// it is played from. `ply` is the zero-based index into the game's
    /// move list, so the caller can tell which position failed.
    #[error("Illegal move {san:?} at ply {ply}")]
    IllegalMove { ply: usize, san: String },

    /// The board carries a feature the 17-channel encoding cannot
    /// represent (e.g. crazyhouse pockets). Raised instead of silently
    /// dropping information.
    #[error("Board cannot be encoded: {0}")]
    UnsupportedBoard(String),

    /// Filesystem error from the PGN splitting glue.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
