use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::SystemTime;

use clap::{Parser, Subcommand};
use log::error;
use pgn2tensor::pgn::{read_games, split_all_pgn, split_pgn};
use pgn2tensor::{NUM_CHANNELS, game_to_fens, game_to_tensors};

#[derive(Parser)]
struct Cli {
    /// Log at debug level instead of info
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a multi-game PGN archive (or a directory of archives) into one file per game
    Split {
        /// A .pgn file, or a directory containing .pgn files
        input: PathBuf,

        /// Directory to write the per-game files to
        #[arg(long, default_value = "parsed_master_games")]
        out_dir: PathBuf,
    },
    /// Print the FEN of every position visited in each game
    Fens {
        /// A .pgn file to read games from
        input: PathBuf,
    },
    /// Replay each game and encode every position as an 8x8x17 tensor
    Tensors {
        /// A .pgn file to read games from
        input: PathBuf,
    },
}

fn setup_logger(verbose: bool) -> Result<(), fern::InitError> {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                humantime::format_rfc3339_seconds(SystemTime::now()),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()?;
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Split { input, out_dir } => {
            let count = if input.is_dir() {
                split_all_pgn(&input, &out_dir)?
            } else {
                split_pgn(&input, &out_dir)?
            };
            println!("wrote {} games to {}", count, out_dir.display());
        }
        Commands::Fens { input } => {
            let games = read_games(File::open(&input)?)?;
            for (i, record) in games.iter().enumerate() {
                match game_to_fens(record) {
                    Ok(fens) => {
                        for fen in fens {
                            println!("{fen}");
                        }
                        println!();
                    }
                    Err(e) => error!("game {}: {}", i + 1, e),
                }
            }
        }
        Commands::Tensors { input } => {
            let games = read_games(File::open(&input)?)?;
            for (i, record) in games.iter().enumerate() {
                match game_to_tensors(record) {
                    Ok(tensors) => println!(
                        "game {}: {} vs {}: {} positions encoded as 8x8x{} tensors",
                        i + 1,
                        record.white(),
                        record.black(),
                        tensors.len(),
                        NUM_CHANNELS
                    ),
                    Err(e) => error!("game {}: {}", i + 1, e),
                }
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = setup_logger(cli.verbose) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }
    if let Err(e) = run(cli) {
        error!("{e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
