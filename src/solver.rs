//! Breadth-first search over board states.
//!
//! Search nodes live in an arena and refer to each other by index: a
//! node is allocated exactly once, fully formed, when its board first
//! enters the visited map, and is never touched again. The frontier and
//! the visited map hold indices only. The FIFO frontier makes the first
//! solved board a minimal-depth one, so the reconstructed path is a
//! shortest solution.

use std::collections::{HashMap, VecDeque};
use std::time::Instant;

use crate::board::Board;

/// Index of a node in the search arena.
type NodeId = usize;

/// One discovered board state, immutable from birth.
#[derive(Debug, Clone, Copy)]
struct Node {
    board: Board,
    parent: Option<NodeId>,
    /// Discovery order; doubles as the BFS level-boundary marker.
    generation: u32,
}

/// How a finished search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The pin can exit. `path` holds every board from the root to the
    /// last on-board state. The move that takes the pin off the board is
    /// never materialized as a board, so `moves == path.len() - 1`
    /// counts one action fewer than the pin physically performs.
    Solved { path: Vec<Board>, moves: usize },
    /// The reachable state space holds no exit.
    Exhausted,
}

/// Statistics and outcome for one search run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    /// Distinct boards discovered, the root included.
    pub boards_visited: usize,
    /// Deepest BFS level reached.
    pub max_depth: u32,
    pub time_elapsed_ms: u64,
}

impl SearchResult {
    pub fn solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Solved { .. })
    }
}

/// Run an exhaustive breadth-first search from `root`.
///
/// Termination is guaranteed: the visited map only grows and the state
/// space is finite, so the frontier must eventually drain.
pub fn solve(root: Board) -> SearchResult {
    let start_time = Instant::now();

    let mut arena: Vec<Node> = Vec::new();
    let mut visited: HashMap<Board, NodeId> = HashMap::new();
    let mut frontier: VecDeque<NodeId> = VecDeque::new();

    arena.push(Node {
        board: root,
        parent: None,
        generation: 0,
    });
    visited.insert(root, 0);
    frontier.push_back(0);

    let mut depth: u32 = 0;
    // Generation of the last node enqueued for the current level.
    let mut level_tail: u32 = 0;

    while let Some(id) = frontier.pop_front() {
        let node = arena[id];
        let set = node.board.generate_moves();

        if set.solved {
            let path = reconstruct(&arena, id);
            let moves = path.len() - 1;
            return SearchResult {
                outcome: SearchOutcome::Solved { path, moves },
                boards_visited: visited.len(),
                max_depth: depth,
                time_elapsed_ms: start_time.elapsed().as_millis() as u64,
            };
        }

        for mv in set.moves {
            let child = node.board.apply(mv);
            if visited.contains_key(&child) {
                continue;
            }
            let child_id = arena.len();
            let generation = child_id as u32;
            debug_assert!(generation > node.generation);
            arena.push(Node {
                board: child,
                parent: Some(id),
                generation,
            });
            visited.insert(child, child_id);
            frontier.push_back(child_id);
        }

        // Passing the last node of the current level means everything
        // still queued sits one level deeper.
        if node.generation == level_tail {
            if let Some(&tail) = frontier.back() {
                depth += 1;
                level_tail = arena[tail].generation;
            }
        }
    }

    SearchResult {
        outcome: SearchOutcome::Exhausted,
        boards_visited: visited.len(),
        max_depth: depth,
        time_elapsed_ms: start_time.elapsed().as_millis() as u64,
    }
}

/// Walk parent links from the solved node back to the root, returning
/// boards in root-first order.
fn reconstruct(arena: &[Node], solved: NodeId) -> Vec<Board> {
    let mut path = Vec::new();
    let mut cursor = Some(solved);
    while let Some(id) = cursor {
        path.push(arena[id].board);
        cursor = arena[id].parent;
    }
    path.reverse();
    path
}

/// True when every consecutive pair of boards is exactly one legal move
/// apart. The exiting move is never represented as a pair, so a solved
/// path's final board must itself signal the exit; callers check that
/// separately.
pub fn verify_path(path: &[Board]) -> bool {
    path.windows(2).all(|pair| {
        let set = pair[0].generate_moves();
        set.moves.iter().any(|&mv| pair[0].apply(mv) == pair[1])
    })
}
