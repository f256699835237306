//! Negamax-TTT: a perfect-play tic-tac-toe engine.
//!
//! Each player's squares are kept as a 9-bit occupancy set. The engine
//! picks its moves with an exhaustive negamax search with alpha-beta
//! pruning, so it never loses.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, winning-line masks, and scores
//! - [`board`] - Occupancy sets and the display board
//! - [`rules`] - Win/draw detection and game-state resolution
//! - [`search`] - Negamax search with alpha-beta pruning
//! - [`position`] - Game session: players, signs, turn order
//! - [`protocol`] - Line-oriented text protocol
//! - [`console`] - Interactive console game
//! - [`playout`] - Simulated opponents and self-play
//!
//! ## Example
//!
//! ```
//! use negamax_ttt::position::{Game, Sign};
//! use negamax_ttt::rules::GameState;
//!
//! // Human plays x and opens in the centre
//! let mut game = Game::new(Sign::X);
//! assert_eq!(game.play_human(4), Ok(GameState::Playing));
//!
//! // The engine answers in a corner
//! let reply = game.play_ai().unwrap();
//! assert_eq!(reply, 0);
//! println!("{}", game.board());
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod playout;
pub mod position;
pub mod protocol;
pub mod rules;
pub mod search;

pub use position::apply_move;
pub use rules::resolve as evaluate_state;
pub use search::ai_choose_move;
