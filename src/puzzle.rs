//! Core model types for the pin maze puzzle.
//!
//! A board is a 3×3 grid of track tiles with a single sliding hole and a
//! pin that travels along the tile connectors. Every tile is one of 16
//! (kind, rotation) values from a fixed catalogue; all connectivity is
//! precomputed in static tables indexed by that pair.

use serde::{Deserialize, Serialize};

/// Board side length; the grid is always `SIDE` × `SIDE`.
pub const SIDE: u8 = 3;

/// The four cardinal directions, in the fixed order move generation
/// scans them. The encoding puts inverse pairs at indices summing to 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Left,
    Down,
}

impl Direction {
    /// Scan order for move generation.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Left,
        Direction::Down,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Direction {
        match index {
            0 => Direction::Up,
            1 => Direction::Right,
            2 => Direction::Left,
            3 => Direction::Down,
            _ => panic!("direction index {} out of range", index),
        }
    }

    /// Up↔Down, Right↔Left.
    pub fn inverse(self) -> Direction {
        Direction::from_index(3 - self.index())
    }

    /// (row, col) step offsets, rows growing downward.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Left => (0, -1),
            Direction::Down => (1, 0),
        }
    }
}

/// A concrete in-bounds board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: u8,
    pub col: u8,
}

impl Coord {
    pub fn new(row: u8, col: u8) -> Self {
        assert!(
            row < SIDE && col < SIDE,
            "coordinate ({}, {}) out of range",
            row,
            col
        );
        Self { row, col }
    }

    /// True when stepping further in `dir` would leave the grid.
    pub fn is_edge(self, dir: Direction) -> bool {
        match dir {
            Direction::Up => self.row == 0,
            Direction::Right => self.col == SIDE - 1,
            Direction::Left => self.col == 0,
            Direction::Down => self.row == SIDE - 1,
        }
    }

    /// The neighboring cell in `dir`. Panics at the board edge; callers
    /// check `is_edge` first.
    pub fn step(self, dir: Direction) -> Coord {
        assert!(
            !self.is_edge(dir),
            "stepped {:?} off the board from ({}, {})",
            dir,
            self.row,
            self.col
        );
        let (dr, dc) = dir.delta();
        Coord {
            row: (self.row as i8 + dr) as u8,
            col: (self.col as i8 + dc) as u8,
        }
    }
}

/// Where a crossing attempt ends up.
///
/// The three states are distinct variants rather than sentinel
/// coordinates, so no caller can mistake a dead end or the exit for a
/// real cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// The pin reaches a concrete cell.
    Cell(Coord),
    /// No opening, a height mismatch, or off the board away from the exit.
    Invalid,
    /// The pin has left the board through the designated exit.
    Solution,
}

/// Per-(kind, rotation) opening levels, indexed by `Direction`.
/// 2 is a wall; 0 and 1 are the two independent path heights.
const OPENING_LEVELS: [[[u8; 4]; 4]; 4] = [
    // stop tiles: all sides open, two adjacent raised sides per rotation
    [[1, 0, 1, 0], [1, 1, 0, 0], [0, 1, 0, 1], [0, 0, 1, 1]],
    // pass tiles: same opening geometry, no rest socket
    [[1, 0, 1, 0], [1, 1, 0, 0], [0, 1, 0, 1], [0, 0, 1, 1]],
    // dead ends: a single low opening (down, left, up, right)
    [[2, 2, 2, 0], [2, 2, 0, 2], [0, 2, 2, 2], [2, 0, 2, 2]],
    // specials: two solid blocks, the two-level bridge, the hole
    [[2, 2, 2, 2], [2, 2, 2, 2], [0, 1, 1, 0], [2, 2, 2, 2]],
];

/// Entry/exit direction-index sums for path routing: a tile entered from
/// side `entry` continues toward index `sum - entry`. Inverse direction
/// pairs sum to 3, so 3 is the straight-through sum; the dead-end sums
/// degenerate to `route(d) == d`.
const DIRECTION_SUM: [[i8; 4]; 4] = [
    [3, 3, 3, 3],
    [3, 3, 3, 3],
    [6, 4, 0, 2],
    [0, 0, 3, 0],
];

/// Height tier per kind: 0 = the pin can rest here, 1 = pass-through.
const HEIGHT_TIER: [u8; 4] = [0, 1, 0, 1];

/// One immutable track tile: a (kind, rotation) pair from the fixed
/// 16-entry catalogue.
///
/// Whether the pin currently stands on a tile is not part of the tile:
/// the board tracks the pin cell and the renderer overlays it, so state
/// deduplication never sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    kind: u8,
    rotation: u8,
}

impl Tile {
    pub fn new(kind: u8, rotation: u8) -> Self {
        assert!(
            kind < 4 && rotation < 4,
            "no tile with kind {} rotation {}",
            kind,
            rotation
        );
        Self { kind, rotation }
    }

    pub fn kind(self) -> u8 {
        self.kind
    }

    pub fn rotation(self) -> u8 {
        self.rotation
    }

    /// Stable small integer identity, `kind * 4 + rotation`.
    pub fn value(self) -> u8 {
        self.kind * 4 + self.rotation
    }

    /// The sliding hole marker.
    pub fn is_hole(self) -> bool {
        self.kind == 3 && self.rotation == 3
    }

    /// Opening height toward `dir`: 0 or 1 for the two path levels, 2
    /// for a wall.
    pub fn level_of(self, dir: Direction) -> u8 {
        OPENING_LEVELS[self.kind as usize][self.rotation as usize][dir.index()]
    }

    /// 0 when the pin can rest on this tile, 1 when it must glide
    /// through.
    pub fn height_tier(self) -> u8 {
        HEIGHT_TIER[self.kind as usize]
    }

    /// Continuing direction for a path that entered from the `entry`
    /// side. Only meaningful for open sides; asking through a wall is a
    /// logic error and panics.
    pub fn route(self, entry: Direction) -> Direction {
        assert!(
            self.level_of(entry) != 2,
            "routing through the walled {:?} side of tile {}",
            entry,
            self.value()
        );
        let sum = DIRECTION_SUM[self.kind as usize][self.rotation as usize];
        Direction::from_index((sum - entry.index() as i8) as usize)
    }

    /// The wire name of this tile.
    pub fn code(self) -> TileCode {
        TileCode::ALL[self.value() as usize]
    }
}

/// Wire names for the 16 catalogue tiles, in `kind * 4 + rotation`
/// order: stops `s0..s3`, passes `p0..p3`, dead ends `d0..d3`, the two
/// blocks, the bridge and the hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileCode {
    S0,
    S1,
    S2,
    S3,
    P0,
    P1,
    P2,
    P3,
    D0,
    D1,
    D2,
    D3,
    B0,
    B1,
    X,
    H,
}

impl TileCode {
    /// All codes in catalogue order.
    pub const ALL: [TileCode; 16] = [
        TileCode::S0,
        TileCode::S1,
        TileCode::S2,
        TileCode::S3,
        TileCode::P0,
        TileCode::P1,
        TileCode::P2,
        TileCode::P3,
        TileCode::D0,
        TileCode::D1,
        TileCode::D2,
        TileCode::D3,
        TileCode::B0,
        TileCode::B1,
        TileCode::X,
        TileCode::H,
    ];
}

impl From<TileCode> for Tile {
    fn from(code: TileCode) -> Tile {
        let value = code as u8;
        Tile::new(value / 4, value % 4)
    }
}

/// A single discrete action on a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Slide the hole one cell, swapping it with the neighboring tile.
    Slide(Direction),
    /// Advance the pin along the connectors until it can rest again.
    Advance(Direction),
}

/// The on-disk puzzle description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConfig {
    pub id: String,
    pub title: String,
    /// Row-major 3×3 grid of tile codes.
    pub grid: Vec<Vec<TileCode>>,
    #[serde(rename = "pinStart")]
    pub pin_start: Coord,
}
