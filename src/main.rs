//! CLI entry point for the pin maze solver.
//!
//! Usage:
//!   pin-maze-solver solve <puzzle.json> [--stdin] [--render]
//!   pin-maze-solver show <puzzle.json> [--stdin]
//!
//! `solve` prints a JSON report on stdout and exits 0 when the puzzle is
//! solvable, 1 when the search exhausts without a solution. Diagrams
//! requested with --render go to stderr so stdout stays machine-readable.

mod board;
mod puzzle;
mod render;
mod solver;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::Serialize;

use board::Board;
use puzzle::{Coord, PuzzleConfig, TileCode};
use solver::{solve, SearchOutcome, SearchResult};

#[derive(Parser)]
#[command(name = "pin-maze-solver")]
#[command(about = "Exhaustive breadth-first solver for the pin maze sliding-tile puzzle")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a shortest sequence that takes the pin off the board
    Solve {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of a file
        #[arg(long)]
        stdin: bool,

        /// Print the solution boards as diagrams on stderr
        #[arg(long)]
        render: bool,
    },

    /// Render the initial board of a puzzle file
    Show {
        /// Path to puzzle JSON file (use --stdin to read from stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Read puzzle from stdin instead of a file
        #[arg(long)]
        stdin: bool,
    },
}

/// One board of the solution path as it appears in the JSON report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BoardDump {
    /// Row-major tile codes, the same vocabulary the puzzle files use.
    grid: Vec<TileCode>,
    pin: Coord,
    empty: Coord,
}

impl BoardDump {
    fn from_board(board: &Board) -> Self {
        Self {
            grid: board.codes().to_vec(),
            pin: board.pin(),
            empty: board.empty(),
        }
    }
}

/// Output format for a solve run.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<usize>,
    boards_visited: usize,
    max_depth: u32,
    time_elapsed_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<Vec<BoardDump>>,
}

fn read_input(file: Option<PathBuf>, stdin: bool) -> String {
    if stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .expect("Failed to read from stdin");
        buffer
    } else if let Some(path) = file {
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Failed to read file {:?}: {}", path, e))
    } else {
        eprintln!("Error: Must provide either a file path or --stdin");
        std::process::exit(1);
    }
}

fn load_board(json: &str) -> Board {
    let config: PuzzleConfig = match serde_json::from_str(json) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error parsing puzzle JSON: {}", e);
            std::process::exit(1);
        }
    };
    match Board::from_config(&config) {
        Ok(board) => board,
        Err(e) => {
            eprintln!("Error in puzzle layout: {}", e);
            std::process::exit(1);
        }
    }
}

fn format_result(result: &SearchResult) -> SolveOutput {
    let (moves, path) = match &result.outcome {
        SearchOutcome::Solved { path, moves } => (
            Some(*moves),
            Some(path.iter().map(BoardDump::from_board).collect()),
        ),
        SearchOutcome::Exhausted => (None, None),
    };
    SolveOutput {
        solved: result.solved(),
        moves,
        boards_visited: result.boards_visited,
        max_depth: result.max_depth,
        time_elapsed_ms: result.time_elapsed_ms,
        path,
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            file,
            stdin,
            render: render_boards,
        } => {
            let board = load_board(&read_input(file, stdin));
            let result = solve(board);

            let output = format_result(&result);
            println!("{}", serde_json::to_string_pretty(&output).unwrap());

            if render_boards {
                if let SearchOutcome::Solved { path, .. } = &result.outcome {
                    for (step, board) in path.iter().enumerate() {
                        eprintln!("step {}:", step);
                        eprintln!("{}", render::render(board));
                    }
                }
            }

            if result.solved() {
                std::process::exit(0);
            } else {
                std::process::exit(1);
            }
        }

        Commands::Show { file, stdin } => {
            let board = load_board(&read_input(file, stdin));
            print!("{}", render::render(&board));
        }
    }
}
