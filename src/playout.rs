//! Simulated games against the engine.
//!
//! A playout fills in the human side with an [`Opponent`] and plays a game
//! to the end. Running many playouts against a random opponent is a cheap
//! way to check that the engine never loses.

use tracing::{debug, info};

use crate::board::Occupancy;
use crate::constants::SQUARES;
use crate::position::{Game, PlayerKind, Sign, Square};
use crate::rules::GameState;
use crate::search::best_move;

/// Something that picks moves for the human side.
pub trait Opponent {
    /// Choose a free square given both sides' occupancy.
    fn choose(&mut self, own: Occupancy, other: Occupancy) -> Option<Square>;
}

/// Picks uniformly among free squares.
pub struct RandomOpponent {
    rng: fastrand::Rng,
}

impl RandomOpponent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Opponent for RandomOpponent {
    fn choose(&mut self, own: Occupancy, other: Occupancy) -> Option<Square> {
        let occupied = own | other;
        let free: Vec<Square> = (0..SQUARES).filter(|&sq| !occupied.is_occupied(sq)).collect();
        if free.is_empty() {
            None
        } else {
            Some(free[self.rng.usize(..free.len())])
        }
    }
}

/// Plays the same perfect moves as the engine.
pub struct PerfectOpponent;

impl Opponent for PerfectOpponent {
    fn choose(&mut self, own: Occupancy, other: Occupancy) -> Option<Square> {
        best_move(own, other)
    }
}

/// Play one full game with `opponent` on the human side.
///
/// Returns the final state, or `Playing` if the opponent ran out of moves
/// before the game was decided.
pub fn playout(human_sign: Sign, opponent: &mut dyn Opponent) -> GameState {
    let mut game = Game::new(human_sign);
    while !game.state().is_over() {
        let played = match game.side_to_move() {
            PlayerKind::Ai => game.play_ai().map(|_| ()),
            PlayerKind::Human => {
                let Some(sq) = opponent.choose(game.human().occupancy, game.ai().occupancy) else {
                    break;
                };
                game.play_human(sq).map(|_| ())
            }
        };
        if let Err(err) = played {
            debug!(%err, "playout stopped");
            break;
        }
    }
    debug!(moves = ?game.moves(), state = %game.state(), "playout finished");
    game.state()
}

/// Tally of finished games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayoutStats {
    pub games: usize,
    pub human_wins: usize,
    pub computer_wins: usize,
    pub draws: usize,
}

impl PlayoutStats {
    fn record(&mut self, state: GameState) {
        self.games += 1;
        match state {
            GameState::HumanWon => self.human_wins += 1,
            GameState::ComputerWon => self.computer_wins += 1,
            GameState::Draw => self.draws += 1,
            GameState::Playing => {}
        }
    }
}

/// Play `games` random games, alternating which sign the opponent holds.
pub fn selfplay(games: usize, seed: u64) -> PlayoutStats {
    let mut opponent = RandomOpponent::new(seed);
    let mut stats = PlayoutStats::default();
    for i in 0..games {
        let sign = if i % 2 == 0 { Sign::X } else { Sign::O };
        stats.record(playout(sign, &mut opponent));
    }
    info!(
        games = stats.games,
        computer_wins = stats.computer_wins,
        draws = stats.draws,
        human_wins = stats.human_wins,
        "selfplay finished"
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_opponent_picks_free_square() {
        let mut opp = RandomOpponent::new(7);
        let own = Occupancy::from_squares(&[0, 1, 2, 3]);
        let other = Occupancy::from_squares(&[4, 5, 6, 7]);
        assert_eq!(opp.choose(own, other), Some(8));
        assert_eq!(opp.choose(own.occupy(8), other), None);
    }

    #[test]
    fn test_perfect_play_draws() {
        assert_eq!(playout(Sign::X, &mut PerfectOpponent), GameState::Draw);
        assert_eq!(playout(Sign::O, &mut PerfectOpponent), GameState::Draw);
    }

    #[test]
    fn test_selfplay_never_loses() {
        let stats = selfplay(40, 1);
        assert_eq!(stats.games, 40);
        assert_eq!(stats.human_wins, 0);
        assert_eq!(stats.computer_wins + stats.draws, 40);
    }
}
