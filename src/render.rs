//! Text diagrams for boards.
//!
//! Every tile renders as three 5-column lines of box-drawing art, heavy
//! strokes marking raised openings. The pin is an overlay: its cell's
//! rest socket `○` is swapped for `◉` at render time, so the diagram is
//! derived purely from the board's read accessors.

use crate::board::Board;
use crate::puzzle::Coord;

/// Art lines per tile row.
const LINES_PER_TILE: usize = 3;

const SOCKET: &str = "○";
const PIN: &str = "◉";

/// Glyph table indexed by [kind][art line][rotation].
const TILE_ART: [[[&str; 4]; LINES_PER_TILE]; 4] = [
    [
        ["┏━━━┑", "┍━━━┓", "┌───┒", "┎───┐"],
        ["┃ ○ │", "│ ○ ┃", "│ ○ ┃", "┃ ○ │"],
        ["┖───┘", "└───┚", "┕━━━┛", "┗━━━┙"],
    ],
    [
        ["┏━━━┑", "┍━━━┓", "┌───┒", "┎───┐"],
        ["┃░░░│", "│░░░┃", "│░░░┃", "┃░░░│"],
        ["┖───┘", "└───┚", "┕━━━┛", "┗━━━┙"],
    ],
    [
        ["┎▗▄▖┒", "┍━━━┑", "┎───┒", "┍━━━┑"],
        ["┃ ○ ┃", "│ ○ ▌", "┃ ○ ┃", "▐▍○ │"],
        ["┖───┚", "┕━━━┙", "┖▝▀▘┚", "┕━━━┙"],
    ],
    [
        ["┎───┒", "┍━━━┑", " ╲ ╱ ", "░░░░░"],
        ["┃░░░┃", "│░░░│", "  ╳  ", "░░░░░"],
        ["┖───┚", "┕━━━┙", " ╱ ╲ ", "░░░░░"],
    ],
];

/// Render a board as a multi-line diagram, one trailing newline per
/// text row.
pub fn render(board: &Board) -> String {
    let mut out = String::new();
    for row in 0..3u8 {
        for line in 0..LINES_PER_TILE {
            for col in 0..3u8 {
                let cell = Coord::new(row, col);
                let tile = board.tile_at(cell);
                let art = TILE_ART[tile.kind() as usize][line][tile.rotation() as usize];
                if cell == board.pin() && art.contains(SOCKET) {
                    out.push_str(&art.replacen(SOCKET, PIN, 1));
                } else {
                    out.push_str(art);
                }
            }
            out.push('\n');
        }
    }
    out
}
