//! Breadth-first solver for the pin maze sliding-tile puzzle.
//!
//! A 3×3 board of track tiles slides around a single hole while a pin
//! travels the tile connectors, crossing over or under other paths at
//! two-level bridge tiles. This crate models the tile connectivity,
//! enumerates board transitions, and searches exhaustively for a
//! shortest move sequence that takes the pin off the board through the
//! designated exit.

pub mod board;
pub mod puzzle;
pub mod render;
pub mod solver;

// Re-export main types
pub use board::{Board, LayoutError, MoveSet};
pub use puzzle::{Coord, Direction, Move, Position, PuzzleConfig, Tile, TileCode};
pub use render::render;
pub use solver::{solve, verify_path, SearchOutcome, SearchResult};
