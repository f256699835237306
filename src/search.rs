//! Negamax search with alpha-beta pruning.
//!
//! The search explores every legal continuation from a position. Each
//! recursion level swaps the two occupancy sets so that `to_move` is always
//! the side about to play, and the child's score is negated on the way back
//! up. Scores are discounted by depth: a win found `d` plies below the root
//! is worth `WIN_SCORE - d`, so the engine prefers the fastest win and the
//! slowest loss.
//!
//! Squares are tried in ascending index order and the root only replaces
//! its best move on a strictly better score, so ties go to the lowest
//! square. Cutoffs are fail-hard: an interior node that fails high returns
//! `beta` rather than the child's score.
//!
//! ## Example
//!
//! ```
//! use negamax_ttt::board::Occupancy;
//! use negamax_ttt::search::best_move;
//!
//! let ai = Occupancy::from_squares(&[6, 7]);
//! let human = Occupancy::from_squares(&[0, 1]);
//!
//! // Completing the bottom row beats blocking the top row.
//! assert_eq!(best_move(ai, human), Some(8));
//! ```

use tracing::debug;

use crate::board::Occupancy;
use crate::constants::{DRAW_SCORE, NO_MOVE, SEARCH_INF, SQUARES, WIN_SCORE};
use crate::rules::{has_won, is_draw};

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Positions visited, root included
    pub nodes: u64,
    /// Beta cutoffs (fail-high)
    pub cutoffs: u64,
}

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best square for the side to move, `None` if the board is full
    pub best_move: Option<usize>,
    pub stats: SearchStats,
}

#[derive(Default)]
struct Searcher {
    stats: SearchStats,
}

impl Searcher {
    /// Score a finished position from the point of view of `to_move`.
    /// Returns 0 when nobody has won.
    fn evaluate(to_move: Occupancy, opponent: Occupancy, depth: i32) -> i32 {
        if has_won(to_move) {
            return WIN_SCORE - depth;
        }
        if has_won(opponent) {
            return depth - WIN_SCORE;
        }
        DRAW_SCORE
    }

    /// At depth 0 returns the best square (or `NO_MOVE`); deeper it returns
    /// the score of the position for `to_move`.
    fn negamax(
        &mut self,
        to_move: Occupancy,
        opponent: Occupancy,
        depth: i32,
        mut alpha: i32,
        beta: i32,
    ) -> i32 {
        self.stats.nodes += 1;

        if depth > 0 {
            let score = Self::evaluate(to_move, opponent, depth);
            if score != DRAW_SCORE {
                return score;
            }
            if is_draw(to_move | opponent) {
                return DRAW_SCORE;
            }
        }

        let mut best_move = NO_MOVE;
        let occupied = to_move | opponent;
        for sq in 0..SQUARES {
            if occupied.is_occupied(sq) {
                continue;
            }

            // The speculative move lives only in the child's copy of the set.
            let score = -self.negamax(opponent, to_move.occupy(sq), depth + 1, -beta, -alpha);

            if score >= beta {
                self.stats.cutoffs += 1;
                return if depth == 0 { best_move } else { beta };
            }

            if score > alpha {
                alpha = score;
                if depth == 0 {
                    best_move = sq as i32;
                }
            }
        }

        if depth == 0 { best_move } else { alpha }
    }
}

/// Raw negamax entry point.
///
/// `to_move` is the side whose turn it is at this level, `opponent` the other
/// side. At `depth == 0` the return value is a square index in `0..9`, or
/// `-1` if the board is full; at `depth > 0` it is the position's score for
/// `to_move`.
pub fn search(to_move: Occupancy, opponent: Occupancy, depth: i32, alpha: i32, beta: i32) -> i32 {
    Searcher::default().negamax(to_move, opponent, depth, alpha, beta)
}

/// Run a full-window root search and report the chosen square with stats.
pub fn analyze(to_move: Occupancy, opponent: Occupancy) -> SearchResult {
    let mut searcher = Searcher::default();
    let mv = searcher.negamax(to_move, opponent, 0, -SEARCH_INF, SEARCH_INF);
    let result = SearchResult {
        best_move: usize::try_from(mv).ok(),
        stats: searcher.stats,
    };
    debug!(
        best_move = ?result.best_move,
        nodes = result.stats.nodes,
        cutoffs = result.stats.cutoffs,
        "search finished"
    );
    result
}

/// Best square for `to_move`, or `None` if no square is free.
pub fn best_move(to_move: Occupancy, opponent: Occupancy) -> Option<usize> {
    analyze(to_move, opponent).best_move
}

/// Choose the AI's move. Returns `-1` only if the board is already full.
pub fn ai_choose_move(ai: Occupancy, human: Occupancy) -> i32 {
    search(ai, human, 0, -SEARCH_INF, SEARCH_INF)
}

/// Exact score of every legal move for `to_move`, indexed by square.
///
/// Each move is searched with a full window, so the values are true
/// negamax scores rather than bounds. Occupied squares are `None`.
pub fn score_moves(to_move: Occupancy, opponent: Occupancy) -> [Option<i32>; SQUARES] {
    let mut scores = [None; SQUARES];
    let occupied = to_move | opponent;
    let mut searcher = Searcher::default();
    for (sq, slot) in scores.iter_mut().enumerate() {
        if !occupied.is_occupied(sq) {
            let score = searcher.negamax(opponent, to_move.occupy(sq), 1, -SEARCH_INF, SEARCH_INF);
            *slot = Some(-score);
        }
    }
    scores
}
