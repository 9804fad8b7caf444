//! Board state and the pin movement rules.
//!
//! A board is an immutable value: applying a move clones the grid and
//! produces a successor. Structural equality covers the tile grid and
//! the pin cell, so boards reached by different move sequences collapse
//! to one search state.

use std::fmt;

use smallvec::SmallVec;

use crate::puzzle::{Coord, Direction, Move, Position, PuzzleConfig, Tile, TileCode, SIDE};

/// Why an initial layout was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutError {
    /// The grid is not 3×3.
    BadShape,
    /// No cell carries the hole marker.
    NoHole,
    /// More than one cell carries the hole marker.
    MultipleHoles,
    /// The pin start cell is outside the grid.
    PinOutOfBounds { row: u8, col: u8 },
    /// The pin start tile is not a resting tile.
    PinNotResting(TileCode),
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::BadShape => write!(f, "layout must be a 3x3 grid"),
            LayoutError::NoHole => write!(f, "layout has no hole tile"),
            LayoutError::MultipleHoles => write!(f, "layout has more than one hole tile"),
            LayoutError::PinOutOfBounds { row, col } => {
                write!(f, "pin start ({}, {}) is outside the grid", row, col)
            }
            LayoutError::PinNotResting(code) => {
                write!(f, "pin cannot start on pass-through tile {:?}", code)
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// The legal moves from one board, in the fixed scan order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveSet {
    pub moves: SmallVec<[Move; 8]>,
    /// True when advancing the pin reaches the exit from this board.
    /// Scanning stops at that direction and the exiting move itself is
    /// never part of the set.
    pub solved: bool,
}

/// One complete puzzle state: the tile grid plus the pin and hole cells.
///
/// The hole coordinate is always derivable from the grid, so the derived
/// equality and hash match the structural-equality contract (grid + pin).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    grid: [[Tile; 3]; 3],
    pin: Coord,
    empty: Coord,
}

impl Board {
    /// Build a board from row-major tile codes and the pin start cell.
    pub fn from_codes(codes: [TileCode; 9], pin: Coord) -> Result<Board, LayoutError> {
        let mut grid = [[Tile::from(TileCode::H); 3]; 3];
        let mut hole = None;
        for (i, &code) in codes.iter().enumerate() {
            let tile = Tile::from(code);
            let cell = Coord::new((i / 3) as u8, (i % 3) as u8);
            grid[cell.row as usize][cell.col as usize] = tile;
            if tile.is_hole() {
                if hole.is_some() {
                    return Err(LayoutError::MultipleHoles);
                }
                hole = Some(cell);
            }
        }
        let empty = hole.ok_or(LayoutError::NoHole)?;
        if pin.row >= SIDE || pin.col >= SIDE {
            return Err(LayoutError::PinOutOfBounds {
                row: pin.row,
                col: pin.col,
            });
        }
        let pin_tile = grid[pin.row as usize][pin.col as usize];
        if pin_tile.height_tier() != 0 {
            return Err(LayoutError::PinNotResting(pin_tile.code()));
        }
        Ok(Board { grid, pin, empty })
    }

    /// Build a board from a parsed puzzle file.
    pub fn from_config(config: &PuzzleConfig) -> Result<Board, LayoutError> {
        if config.grid.len() != 3 || config.grid.iter().any(|row| row.len() != 3) {
            return Err(LayoutError::BadShape);
        }
        let mut codes = [TileCode::H; 9];
        for (slot, &code) in codes.iter_mut().zip(config.grid.iter().flatten()) {
            *slot = code;
        }
        Board::from_codes(codes, config.pin_start)
    }

    pub fn tile_at(&self, cell: Coord) -> Tile {
        self.grid[cell.row as usize][cell.col as usize]
    }

    /// The cell the pin is resting on.
    pub fn pin(&self) -> Coord {
        self.pin
    }

    /// The cell holding the hole tile.
    pub fn empty(&self) -> Coord {
        self.empty
    }

    /// Row-major tile codes, the same vocabulary the puzzle files use.
    pub fn codes(&self) -> [TileCode; 9] {
        let mut codes = [TileCode::H; 9];
        for row in 0..3 {
            for col in 0..3 {
                codes[row * 3 + col] = self.grid[row][col].code();
            }
        }
        codes
    }

    /// One crossing step from `pos` toward `dir`.
    ///
    /// Inside the board the pin may cross only when both tiles open
    /// toward each other at the same height. At the board edge the only
    /// way off is the designated exit: a raised (level 1) left-side
    /// opening on row 0.
    pub fn cross_from(&self, pos: Coord, dir: Direction) -> Position {
        let level = self.tile_at(pos).level_of(dir);
        if pos.is_edge(dir) {
            if dir == Direction::Left && pos.row == 0 && level == 1 {
                return Position::Solution;
            }
            return Position::Invalid;
        }
        if level == 2 {
            return Position::Invalid;
        }
        let next = pos.step(dir);
        if self.tile_at(next).level_of(dir.inverse()) == level {
            Position::Cell(next)
        } else {
            Position::Invalid
        }
    }

    /// Advance the pin from its cell toward `dir`.
    ///
    /// The pin glides through pass-through tiles, each one handing it the
    /// continuing direction, until it lands on a tile it can rest on,
    /// exits the board, or runs into a dead end or height mismatch.
    pub fn move_pin(&self, dir: Direction) -> Position {
        let mut dir = dir;
        let mut pos = match self.cross_from(self.pin, dir) {
            Position::Cell(next) => next,
            other => return other,
        };
        while self.tile_at(pos).height_tier() == 1 {
            dir = self.tile_at(pos).route(dir.inverse());
            pos = match self.cross_from(pos, dir) {
                Position::Cell(next) => next,
                other => return other,
            };
        }
        Position::Cell(pos)
    }

    /// Enumerate the legal moves from this board.
    ///
    /// Directions are scanned in the fixed `Direction::ALL` order, the
    /// hole slide checked before the pin advance for each. When a pin
    /// advance reaches the exit the scan reports `solved` and stops;
    /// directions after the winning one are never examined.
    pub fn generate_moves(&self) -> MoveSet {
        let mut set = MoveSet::default();
        for dir in Direction::ALL {
            if !self.empty.is_edge(dir) && self.empty.step(dir) != self.pin {
                set.moves.push(Move::Slide(dir));
            }
            match self.move_pin(dir) {
                Position::Cell(_) => set.moves.push(Move::Advance(dir)),
                Position::Solution => {
                    set.solved = true;
                    return set;
                }
                Position::Invalid => {}
            }
        }
        set
    }

    /// The successor board for a move accepted from `generate_moves`.
    pub fn apply(&self, mv: Move) -> Board {
        let mut next = *self;
        match mv {
            Move::Slide(dir) => {
                let from = next.empty;
                let to = from.step(dir);
                let moved = next.grid[to.row as usize][to.col as usize];
                next.grid[to.row as usize][to.col as usize] =
                    next.grid[from.row as usize][from.col as usize];
                next.grid[from.row as usize][from.col as usize] = moved;
                next.empty = to;
            }
            Move::Advance(dir) => match self.move_pin(dir) {
                Position::Cell(dest) => {
                    assert_eq!(
                        next.tile_at(dest).height_tier(),
                        0,
                        "pin landed on a pass-through tile"
                    );
                    next.pin = dest;
                }
                other => panic!("advance toward {:?} applied but yields {:?}", dir, other),
            },
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::puzzle::TileCode::{B0, D0, D1, D2, D3, H, P2, S0, S1, S2, S3, X};

    fn board(codes: [TileCode; 9], pin: (u8, u8)) -> Board {
        Board::from_codes(codes, Coord::new(pin.0, pin.1)).unwrap()
    }

    #[test]
    fn test_construction_rejects_bad_layouts() {
        let no_hole = [S0, S1, S2, S3, B0, B0, B0, B0, B0];
        assert_eq!(
            Board::from_codes(no_hole, Coord::new(0, 0)),
            Err(LayoutError::NoHole)
        );

        let two_holes = [H, S1, S2, S3, B0, B0, B0, B0, H];
        assert_eq!(
            Board::from_codes(two_holes, Coord::new(0, 1)),
            Err(LayoutError::MultipleHoles)
        );

        let layout = [S0, P2, S2, S3, B0, B0, B0, B0, H];
        assert_eq!(
            Board::from_codes(layout, Coord { row: 0, col: 5 }),
            Err(LayoutError::PinOutOfBounds { row: 0, col: 5 })
        );
        // (0, 1) is a pass tile, (1, 1) a block: neither can hold the pin.
        assert_eq!(
            Board::from_codes(layout, Coord::new(0, 1)),
            Err(LayoutError::PinNotResting(P2))
        );
        assert_eq!(
            Board::from_codes(layout, Coord::new(1, 1)),
            Err(LayoutError::PinNotResting(B0))
        );
        assert!(Board::from_codes(layout, Coord::new(0, 0)).is_ok());
    }

    #[test]
    fn test_cross_matching_levels() {
        let b = board([S1, S2, D1, B0, B0, B0, D2, D0, H], (0, 0));
        // s1 right (level 1) meets s2 left (level 0): mismatch.
        assert_eq!(
            b.cross_from(Coord::new(0, 0), Direction::Right),
            Position::Invalid
        );
        // s2 right (level 1) meets d1 left (level 0): mismatch.
        assert_eq!(
            b.cross_from(Coord::new(0, 1), Direction::Right),
            Position::Invalid
        );
        // d2 opens up, but the block above it is walled all round.
        assert_eq!(
            b.cross_from(Coord::new(2, 0), Direction::Up),
            Position::Invalid
        );
        // d0 at (2, 1) opens down but sits on the bottom edge.
        assert_eq!(
            b.cross_from(Coord::new(2, 1), Direction::Down),
            Position::Invalid
        );
    }

    #[test]
    fn test_cross_symmetry() {
        // Wherever a crossing lands on a cell, the inverse crossing must
        // land back where it started.
        let b = board([S0, S1, S2, S3, P2, X, D2, D0, H], (0, 0));
        for row in 0..3 {
            for col in 0..3 {
                let pos = Coord::new(row, col);
                for dir in Direction::ALL {
                    if let Position::Cell(next) = b.cross_from(pos, dir) {
                        assert_eq!(
                            b.cross_from(next, dir.inverse()),
                            Position::Cell(pos),
                            "asymmetric crossing from ({}, {}) {:?}",
                            row,
                            col,
                            dir
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_pin_glides_through_pass_tile() {
        // s1 at (2, 1) opens up at level 1, p2 accepts from below at
        // level 1 and hands the pin onward, s0 accepts from above at
        // level 0 and lets it rest.
        let b = board([B0, S0, B0, B0, P2, B0, B0, S1, H], (2, 1));
        assert_eq!(b.move_pin(Direction::Up), Position::Cell(Coord::new(0, 1)));
    }

    #[test]
    fn test_pin_crosses_bridge() {
        // The raised horizontal bridge path carries the pin from s3 at
        // (0, 2) over the bridge to s2 at (0, 0); the landing has a
        // raised right side, so the crossing matches all the way.
        let b = board([S2, X, S3, B0, B0, B0, D2, D0, H], (0, 2));
        assert_eq!(
            b.move_pin(Direction::Left),
            Position::Cell(Coord::new(0, 0))
        );
        // The low vertical path glides straight across and off the top
        // edge, which is not the exit.
        let b = board([B0, X, B0, B0, S2, B0, D2, D0, H], (1, 1));
        assert_eq!(b.move_pin(Direction::Up), Position::Invalid);
    }

    #[test]
    fn test_exit_needs_raised_left_opening_on_row_zero() {
        // s0 at (0, 0) has a raised left side: the designated exit.
        let b = board([S0, D3, D1, B0, B0, B0, B0, B0, H], (0, 0));
        assert_eq!(b.move_pin(Direction::Left), Position::Solution);

        // s2's left side is level 0: no exit there.
        let b = board([S2, D3, D1, B0, B0, B0, B0, B0, H], (0, 0));
        assert_eq!(b.move_pin(Direction::Left), Position::Invalid);

        // A raised left opening on any other row stays on the board.
        let b = board([D1, D3, B0, S0, B0, B0, B0, B0, H], (1, 0));
        assert_eq!(b.move_pin(Direction::Left), Position::Invalid);
    }

    #[test]
    fn test_generate_moves_slide_rules() {
        // Hole at the center: four neighbors, one of them the pin tile.
        let b = board([S0, S1, S2, S3, H, D0, D2, D0, D3], (0, 1));
        let set = b.generate_moves();
        assert!(!set.solved);
        // The hole may not swap with the pin tile above it.
        assert!(!set.moves.contains(&Move::Slide(Direction::Up)));
        assert!(set.moves.contains(&Move::Slide(Direction::Right)));
        assert!(set.moves.contains(&Move::Slide(Direction::Left)));
        assert!(set.moves.contains(&Move::Slide(Direction::Down)));
    }

    #[test]
    fn test_generate_moves_idempotent() {
        let b = board([S0, S1, S2, S3, H, D0, D2, D0, D3], (0, 1));
        assert_eq!(b.generate_moves(), b.generate_moves());
    }

    #[test]
    fn test_apply_slide_swaps_tiles() {
        let b = board([H, S1, D1, S0, B0, B0, B0, B0, B0], (0, 1));
        let next = b.apply(Move::Slide(Direction::Down));
        assert_eq!(next.empty(), Coord::new(1, 0));
        assert_eq!(next.tile_at(Coord::new(0, 0)), Tile::from(S0));
        assert!(next.tile_at(Coord::new(1, 0)).is_hole());
        // The original is untouched.
        assert_eq!(b.empty(), Coord::new(0, 0));
    }

    #[test]
    fn test_equality_ignores_history() {
        let b = board([S0, S1, S2, S3, H, D0, D2, D0, D3], (0, 1));
        // Two different excursions that both restore the layout.
        let there_and_back = b
            .apply(Move::Slide(Direction::Right))
            .apply(Move::Slide(Direction::Left));
        let down_and_up = b
            .apply(Move::Slide(Direction::Down))
            .apply(Move::Slide(Direction::Up));
        assert_eq!(there_and_back, b);
        assert_eq!(down_and_up, b);
        assert_eq!(there_and_back, down_and_up);
    }
}
