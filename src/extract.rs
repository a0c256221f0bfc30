//! Position sequence extraction: replay a game's move list and emit
//! the FEN of every position visited.
//!
//! The replay accumulator is owned by a single call to
//! [`game_to_fens`]; it is never shared, so games can be processed
//! independently (and in parallel by the caller) without
//! synchronization.

use ndarray::Array3;
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, EnPassantMode, Position};

use crate::error::Pgn2TensorError;
use crate::tensor::position_to_tensor;
use crate::types::GameRecord;

/// Canonical serialized form of a position.
///
/// The en-passant square is written only when a legal capture exists,
/// so serializing, re-parsing, and serializing again yields the same
/// string.
pub fn position_fen(pos: &Chess) -> String {
    Fen(pos.clone().into_setup(EnPassantMode::Legal)).to_string()
}

/// Parse a FEN interchange string back into a queryable position.
pub fn fen_to_position(fen: &str) -> Result<Chess, Pgn2TensorError> {
    Ok(fen.parse::<Fen>()?.into_position(CastlingMode::Standard)?)
}

/// Replay a game and return the FEN of every position visited,
/// starting position included. For a game of N moves the result has
/// length N + 1; a zero-move game yields just the starting position.
///
/// The move list is trusted to be legal; a SAN that does not resolve
/// against the current position fails fast with
/// [`Pgn2TensorError::IllegalMove`] and no partial sequence is
/// returned.
pub fn game_to_fens(record: &GameRecord) -> Result<Vec<String>, Pgn2TensorError> {
    let mut board = record.start_position()?;
    let mut fens = Vec::with_capacity(record.moves.len() + 1);

    for (ply, san_plus) in record.moves.iter().enumerate() {
        fens.push(position_fen(&board));
        let mov = san_plus
            .san
            .to_move(&board)
            .map_err(|_| Pgn2TensorError::IllegalMove {
                ply,
                san: san_plus.to_string(),
            })?;
        board = board.play(&mov).map_err(|_| Pgn2TensorError::IllegalMove {
            ply,
            san: san_plus.to_string(),
        })?;
    }
    // Position after the last move, appended outside the loop.
    fens.push(position_fen(&board));

    Ok(fens)
}

/// Full pipeline for one game: extract the position sequence, then
/// encode every position. One tensor per position visited.
pub fn game_to_tensors(record: &GameRecord) -> Result<Vec<Array3<u8>>, Pgn2TensorError> {
    game_to_fens(record)?
        .iter()
        .map(|fen| position_to_tensor(&fen_to_position(fen)?))
        .collect()
}
