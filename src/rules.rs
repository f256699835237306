//! Win and draw detection, and the game-state resolver.

use derive_more::Display;

use crate::board::Occupancy;
use crate::constants::{ALL_SQUARES_OCCUPIED, WINNING_LINES};

/// Outcome of the game after a completed turn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum GameState {
    #[display("playing")]
    Playing,
    #[display("human won")]
    HumanWon,
    #[display("computer won")]
    ComputerWon,
    #[display("draw")]
    Draw,
}

impl GameState {
    #[inline]
    pub fn is_over(self) -> bool {
        self != GameState::Playing
    }
}

/// True if `mask` contains every square of at least one winning line.
#[inline]
pub fn has_won(mask: Occupancy) -> bool {
    let bits = mask.bits();
    WINNING_LINES.iter().any(|&line| bits & line == line)
}

/// True if `union` (both players' squares combined) covers the whole board.
#[inline]
pub fn is_draw(union: Occupancy) -> bool {
    union.bits() == ALL_SQUARES_OCCUPIED
}

/// Compute the game state after the player holding `last_mover` has moved.
///
/// A win takes precedence over a full board.
pub fn resolve(last_mover: Occupancy, last_mover_is_human: bool, other: Occupancy) -> GameState {
    if has_won(last_mover) {
        if last_mover_is_human {
            GameState::HumanWon
        } else {
            GameState::ComputerWon
        }
    } else if is_draw(last_mover | other) {
        GameState::Draw
    } else {
        GameState::Playing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_win_on_empty() {
        assert!(!has_won(Occupancy::EMPTY));
    }

    #[test]
    fn test_every_line_wins() {
        for line in WINNING_LINES {
            assert!(has_won(Occupancy::from_bits(line)), "line {line:#011b}");
        }
    }

    #[test]
    fn test_win_with_extra_squares() {
        assert!(has_won(Occupancy::from_squares(&[2, 4, 6, 1])));
        assert!(!has_won(Occupancy::from_squares(&[0, 1, 5, 6])));
    }

    #[test]
    fn test_draw_only_when_full() {
        assert!(is_draw(Occupancy::from_bits(ALL_SQUARES_OCCUPIED)));
        assert!(!is_draw(Occupancy::from_squares(&[0, 1, 2, 3, 4, 5, 6, 7])));
        assert!(!is_draw(Occupancy::EMPTY));
    }

    #[test]
    fn test_resolve_human_win() {
        let human = Occupancy::from_squares(&[0, 4, 8]);
        let ai = Occupancy::from_squares(&[1, 2]);
        assert_eq!(resolve(human, true, ai), GameState::HumanWon);
        assert_eq!(resolve(human, false, ai), GameState::ComputerWon);
    }

    #[test]
    fn test_resolve_win_on_full_board_is_not_draw() {
        // x: 0 1 2 5 6, o: 3 4 7 8 -> x completes the top row with the last square
        let x = Occupancy::from_squares(&[0, 1, 2, 5, 6]);
        let o = Occupancy::from_squares(&[3, 4, 7, 8]);
        assert_eq!(resolve(x, false, o), GameState::ComputerWon);
    }

    #[test]
    fn test_resolve_draw_and_playing() {
        // x o x / x o o / o x x
        let x = Occupancy::from_squares(&[0, 2, 3, 7, 8]);
        let o = Occupancy::from_squares(&[1, 4, 5, 6]);
        assert_eq!(resolve(x, true, o), GameState::Draw);
        assert_eq!(resolve(x.vacate(8), true, o), GameState::Playing);
    }

    #[test]
    fn test_state_display() {
        assert_eq!(GameState::ComputerWon.to_string(), "computer won");
        assert!(GameState::Draw.is_over());
        assert!(!GameState::Playing.is_over());
    }
}
