use ndarray::{Array3, Axis};
use shakmaty::{Chess, Color, EnPassantMode, Piece, Position, Role, Setup, Square};

use crate::error::Pgn2TensorError;

/// Color order defining the piece-channel layout: white planes first.
pub const COLORS: [Color; 2] = [Color::White, Color::Black];

/// Role order within each color's block of piece channels.
pub const ROLES: [Role; 6] = [
    Role::Pawn,
    Role::Knight,
    Role::Bishop,
    Role::Rook,
    Role::Queen,
    Role::King,
];

/// Total channels: 12 piece planes, 4 castling planes, 1 turn plane.
pub const NUM_CHANNELS: usize = COLORS.len() * ROLES.len() + 4 + 1;

const CH_CASTLING: usize = 12;
const CH_TURN: usize = 16;

/// Channel index for a piece, derived from the [`COLORS`] × [`ROLES`]
/// ordering so there is a single source of truth for the layout.
pub fn piece_channel(piece: Piece) -> usize {
    let color = COLORS
        .iter()
        .position(|&c| c == piece.color)
        .expect("both colors are listed");
    let role = ROLES
        .iter()
        .position(|&r| r == piece.role)
        .expect("all six roles are listed");
    color * ROLES.len() + role
}

/// Encode one board state as an `8x8x17` binary tensor.
///
/// Channels are stacked on the trailing axis:
/// - 0..12: piece occupancy, `{white, black} x {P, N, B, R, Q, K}`,
///   1 where the piece stands.
/// - 12..16: castling rights (white kingside/queenside, black
///   kingside/queenside), each plane uniformly 0 or 1.
/// - 16: side to move, uniformly 1 when it is White's turn.
///
/// Row 0 is rank 1 (White's back rank) and column 0 is the a-file, so
/// White sits at the bottom of every plane.
///
/// Setups carrying state the channel layout cannot represent (pocket
/// pieces, remaining-check counters) are rejected rather than encoded
/// lossily.
pub fn setup_to_tensor(setup: &Setup) -> Result<Array3<u8>, Pgn2TensorError> {
    if setup.pockets.is_some() {
        return Err(Pgn2TensorError::UnsupportedBoard(
            "pocket pieces have no channel".to_string(),
        ));
    }
    if setup.remaining_checks.is_some() {
        return Err(Pgn2TensorError::UnsupportedBoard(
            "remaining-check counters have no channel".to_string(),
        ));
    }

    let mut tensor = Array3::<u8>::zeros((8, 8, NUM_CHANNELS));

    // Piece planes: rank maps to row directly (rank 1 -> row 0).
    for &color in &COLORS {
        for &role in &ROLES {
            let piece = Piece { color, role };
            let channel = piece_channel(piece);
            for sq in setup.board.by_piece(piece) {
                tensor[[sq.rank() as usize, sq.file() as usize, channel]] = 1;
            }
        }
    }

    // Castling planes keyed by the rook home squares.
    let castling = [
        setup.castling_rights.contains(Square::H1), // K
        setup.castling_rights.contains(Square::A1), // Q
        setup.castling_rights.contains(Square::H8), // k
        setup.castling_rights.contains(Square::A8), // q
    ];
    for (i, &has_right) in castling.iter().enumerate() {
        tensor
            .index_axis_mut(Axis(2), CH_CASTLING + i)
            .fill(has_right as u8);
    }

    tensor
        .index_axis_mut(Axis(2), CH_TURN)
        .fill(setup.turn.is_white() as u8);

    Ok(tensor)
}

/// Encode a legal position by snapshotting it into a [`Setup`] first.
/// The position itself is never mutated.
pub fn position_to_tensor(pos: &Chess) -> Result<Array3<u8>, Pgn2TensorError> {
    setup_to_tensor(&pos.clone().into_setup(EnPassantMode::Legal))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::fen::Fen;
    use shakmaty::san::San;

    fn start_tensor() -> Array3<u8> {
        position_to_tensor(&Chess::default()).unwrap()
    }

    #[test]
    fn channel_layout_follows_constants() {
        assert_eq!(NUM_CHANNELS, 17);
        assert_eq!(
            piece_channel(Piece {
                color: Color::White,
                role: Role::Pawn
            }),
            0
        );
        assert_eq!(
            piece_channel(Piece {
                color: Color::White,
                role: Role::King
            }),
            5
        );
        assert_eq!(
            piece_channel(Piece {
                color: Color::Black,
                role: Role::Pawn
            }),
            6
        );
        assert_eq!(
            piece_channel(Piece {
                color: Color::Black,
                role: Role::King
            }),
            11
        );
    }

    #[test]
    fn starting_position_piece_planes() {
        let tensor = start_tensor();
        assert_eq!(tensor.dim(), (8, 8, 17));

        // White pawns fill row 1 (rank 2), black pawns row 6 (rank 7).
        for file in 0..8 {
            assert_eq!(tensor[[1, file, 0]], 1);
            assert_eq!(tensor[[6, file, 6]], 1);
        }
        // White rooks on a1/h1, black king on e8.
        assert_eq!(tensor[[0, 0, 3]], 1);
        assert_eq!(tensor[[0, 7, 3]], 1);
        assert_eq!(tensor[[7, 4, 11]], 1);
        // e4 is empty in every piece plane.
        for ch in 0..12 {
            assert_eq!(tensor[[3, 4, ch]], 0);
        }
    }

    #[test]
    fn values_are_binary_and_at_most_one_piece_per_square() {
        let fen = "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3";
        let setup: Setup = fen.parse::<Fen>().unwrap().into_setup();
        let tensor = setup_to_tensor(&setup).unwrap();

        for &v in tensor.iter() {
            assert!(v <= 1);
        }
        for row in 0..8 {
            for col in 0..8 {
                let occupancy: u8 = (0..12).map(|ch| tensor[[row, col, ch]]).sum();
                assert!(occupancy <= 1);
            }
        }
    }

    #[test]
    fn castling_planes_are_uniform() {
        // White may only castle kingside; black retains both rights.
        let fen = "r3k2r/8/8/8/8/8/8/4K2R w Kkq - 0 1";
        let setup: Setup = fen.parse::<Fen>().unwrap().into_setup();
        let tensor = setup_to_tensor(&setup).unwrap();

        let plane_sum = |ch: usize| -> u32 {
            tensor
                .index_axis(Axis(2), ch)
                .iter()
                .map(|&v| v as u32)
                .sum()
        };
        assert_eq!(plane_sum(12), 64); // K
        assert_eq!(plane_sum(13), 0); // Q
        assert_eq!(plane_sum(14), 64); // k
        assert_eq!(plane_sum(15), 64); // q
    }

    #[test]
    fn turn_plane_flips_after_one_move() {
        let start = Chess::default();
        let tensor = position_to_tensor(&start).unwrap();
        let turn_sum: u32 = tensor
            .index_axis(Axis(2), CH_TURN)
            .iter()
            .map(|&v| v as u32)
            .sum();
        assert_eq!(turn_sum, 64);

        let mov = "e4".parse::<San>().unwrap().to_move(&start).unwrap();
        let after = start.play(&mov).unwrap();
        let tensor = position_to_tensor(&after).unwrap();
        let turn_sum: u32 = tensor
            .index_axis(Axis(2), CH_TURN)
            .iter()
            .map(|&v| v as u32)
            .sum();
        assert_eq!(turn_sum, 0);
    }

    #[test]
    fn encoding_is_deterministic() {
        let a = start_tensor();
        let b = start_tensor();
        assert_eq!(a, b);
    }

    #[test]
    fn remaining_check_counters_are_rejected() {
        let mut setup: Setup = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
            .parse::<Fen>()
            .unwrap()
            .into_setup();
        setup.remaining_checks = Some(shakmaty::ByColor::default());
        assert!(matches!(
            setup_to_tensor(&setup),
            Err(Pgn2TensorError::UnsupportedBoard(_))
        ));
    }

    #[test]
    fn pocket_pieces_are_rejected() {
        let fen = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR[Qq] w KQkq - 0 1";
        let setup: Setup = fen.parse::<Fen>().unwrap().into_setup();
        assert!(matches!(
            setup_to_tensor(&setup),
            Err(Pgn2TensorError::UnsupportedBoard(_))
        ));
    }
}
