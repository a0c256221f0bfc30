//! PGN ingestion and archive-splitting glue.
//!
//! [`GameCollector`] walks a PGN stream with `pgn-reader` and records
//! each game's headers and mainline moves verbatim; the extraction
//! pipeline consumes the resulting [`GameRecord`]s. The splitting
//! helpers re-emit a multi-game archive as one file per game, with
//! filenames built from the player names and date.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;

use log::{debug, info, warn};
use pgn_reader::{BufferedReader, RawHeader, SanPlus, Skip, Visitor};
use shakmaty::Position;

use crate::error::Pgn2TensorError;
use crate::types::GameRecord;

/// Visitor that collects one [`GameRecord`] per game. Variations are
/// skipped; only the mainline is recorded.
#[derive(Default)]
pub struct GameCollector {
    headers: Vec<(String, String)>,
    moves: Vec<SanPlus>,
}

impl GameCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Visitor for GameCollector {
    type Result = GameRecord;

    fn begin_game(&mut self) {
        self.headers.clear();
        self.moves.clear();
    }

    fn header(&mut self, key: &[u8], value: RawHeader<'_>) {
        self.headers.push((
            String::from_utf8_lossy(key).into_owned(),
            String::from_utf8_lossy(value.as_bytes()).into_owned(),
        ));
    }

    fn begin_variation(&mut self) -> Skip {
        Skip(true)
    }

    fn san(&mut self, san_plus: SanPlus) {
        self.moves.push(san_plus);
    }

    fn end_game(&mut self) -> Self::Result {
        GameRecord {
            headers: std::mem::take(&mut self.headers),
            moves: std::mem::take(&mut self.moves),
        }
    }
}

/// Read every game from a PGN stream.
pub fn read_games<R: Read>(reader: R) -> io::Result<Vec<GameRecord>> {
    let mut reader = BufferedReader::new(reader);
    let mut collector = GameCollector::new();
    let mut games = Vec::new();

    while let Some(record) = reader.read_game(&mut collector)? {
        debug!(
            "parsed game {}: {} vs {}, {} plies",
            games.len() + 1,
            record.white(),
            record.black(),
            record.moves.len()
        );
        games.push(record);
    }
    Ok(games)
}

/// Remove filename-unsafe characters and replace spaces with
/// underscores; empty input becomes `"unknown"`.
pub fn sanitize_for_filename(s: &str, maxlen: usize) -> String {
    let cleaned: String = s
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '-' | '.' | '_'))
        .take(maxlen)
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

/// Unique output name for one game. The running index keeps games with
/// repeated metadata apart.
pub fn game_file_name(record: &GameRecord, index: usize) -> String {
    sanitize_for_filename(
        &format!(
            "{}_vs_{}_{}_{:04}",
            record.white(),
            record.black(),
            record.date(),
            index
        ),
        180,
    ) + ".pgn"
}

/// Re-emit one game in PGN format: header section, blank line, then
/// numbered movetext terminated by the result token.
pub fn write_game<W: Write>(record: &GameRecord, out: &mut W) -> Result<(), Pgn2TensorError> {
    for (key, value) in &record.headers {
        writeln!(out, "[{key} \"{value}\"]")?;
    }
    writeln!(out)?;

    let start = record.start_position()?;
    let mut fullmove = start.fullmoves().get();
    let mut white_to_move = start.turn().is_white();

    let mut tokens = Vec::with_capacity(record.moves.len() + 1);
    for (i, san_plus) in record.moves.iter().enumerate() {
        if white_to_move {
            tokens.push(format!("{fullmove}. {san_plus}"));
        } else {
            if i == 0 {
                // Game starts with black to move (custom FEN header).
                tokens.push(format!("{fullmove}... {san_plus}"));
            } else {
                tokens.push(san_plus.to_string());
            }
            fullmove += 1;
        }
        white_to_move = !white_to_move;
    }
    tokens.push(record.result().to_string());

    let mut line_len = 0;
    for (i, token) in tokens.iter().enumerate() {
        if line_len > 0 && line_len + 1 + token.len() > 80 {
            writeln!(out)?;
            line_len = 0;
        } else if i > 0 {
            write!(out, " ")?;
            line_len += 1;
        }
        write!(out, "{token}")?;
        line_len += token.len();
    }
    writeln!(out)?;
    Ok(())
}

/// Split a multi-game PGN archive into one file per game under
/// `out_dir`, returning the number of games written.
pub fn split_pgn(input: &Path, out_dir: &Path) -> Result<usize, Pgn2TensorError> {
    fs::create_dir_all(out_dir)?;
    let games = read_games(File::open(input)?)?;

    for (i, record) in games.iter().enumerate() {
        let name = game_file_name(record, i + 1);
        let path = out_dir.join(&name);
        let mut out = BufWriter::new(File::create(&path)?);
        write_game(record, &mut out)?;
        out.flush()?;
        info!("wrote {}", path.display());
    }
    Ok(games.len())
}

/// Apply [`split_pgn`] to every `.pgn` file in a directory.
pub fn split_all_pgn(dir: &Path, out_dir: &Path) -> Result<usize, Pgn2TensorError> {
    let mut total = 0;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "pgn") {
            total += split_pgn(&path, out_dir)?;
        } else {
            warn!("skipping non-PGN entry {}", path.display());
        }
    }
    Ok(total)
}
