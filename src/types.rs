use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess};

use crate::error::Pgn2TensorError;

/// One recorded game: its PGN headers in source order plus the ordered
/// mainline move list. Read-only input to the extraction pipeline.
#[derive(Debug, Clone, Default)]
pub struct GameRecord {
    pub headers: Vec<(String, String)>,
    pub moves: Vec<SanPlus>,
}

impl GameRecord {
    /// Look up a header value by tag name.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn white(&self) -> &str {
        self.header("White").unwrap_or("unknown")
    }

    pub fn black(&self) -> &str {
        self.header("Black").unwrap_or("unknown")
    }

    pub fn date(&self) -> &str {
        self.header("Date").unwrap_or("unknown")
    }

    /// Game result token for re-emission; `*` when the header is absent.
    pub fn result(&self) -> &str {
        self.header("Result").unwrap_or("*")
    }

    /// Position the game starts from: the `FEN` header when present,
    /// otherwise the standard initial position.
    pub fn start_position(&self) -> Result<Chess, Pgn2TensorError> {
        match self.header("FEN") {
            Some(fen) => Ok(fen
                .parse::<Fen>()?
                .into_position(CastlingMode::Standard)?),
            None => Ok(Chess::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shakmaty::{Color, Position};

    fn record_with(headers: &[(&str, &str)]) -> GameRecord {
        GameRecord {
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            moves: Vec::new(),
        }
    }

    #[test]
    fn missing_headers_fall_back() {
        let record = GameRecord::default();
        assert_eq!(record.white(), "unknown");
        assert_eq!(record.black(), "unknown");
        assert_eq!(record.result(), "*");
    }

    #[test]
    fn start_position_defaults_to_initial() {
        let record = GameRecord::default();
        let pos = record.start_position().unwrap();
        assert_eq!(pos.board(), Chess::default().board());
        assert_eq!(pos.turn(), Color::White);
    }

    #[test]
    fn start_position_honors_fen_header() {
        let record = record_with(&[(
            "FEN",
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
        )]);
        let pos = record.start_position().unwrap();
        assert_eq!(pos.turn(), Color::Black);
        assert!(pos.board().piece_at(shakmaty::Square::E4).is_some());
    }

    #[test]
    fn bad_fen_header_is_an_error() {
        let record = record_with(&[("FEN", "not a fen")]);
        assert!(record.start_position().is_err());
    }
}
