//! Game session: players, turn order, and move application.
//!
//! A [`Game`] owns both players' occupancy sets and enforces the rules the
//! core search assumes: moves land on free squares inside the board, the
//! sides alternate, and nothing is played once the game is decided. The
//! side holding `'x'` always opens.

use std::str::FromStr;

use derive_more::{Display, Error};
use tracing::{debug, instrument};

use crate::board::{Board, Occupancy};
use crate::constants::{FIRST_SIGN_INDEX, SIGNS, SQUARES};
use crate::rules::{GameState, resolve};
use crate::search::best_move;

/// A square index in `0..9`.
pub type Square = usize;

/// Error returned when a move cannot be played.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum MoveError {
    #[display("Illegal move: square {} is off the board", square + 1)]
    OutOfRange { square: Square },
    #[display("Illegal move: square {} is taken", square + 1)]
    Occupied { square: Square },
    #[display("Illegal move: it is the {}'s turn", to_move)]
    WrongTurn { to_move: PlayerKind },
    #[display("Illegal move: the game is over")]
    GameOver,
}

/// Error returned when user input does not name a square.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseSquareError {
    #[display("not a number: {input:?}")]
    NotANumber { input: String },
    #[display("square must be between 1 and 9, got {value}")]
    OutOfRange { value: i64 },
}

/// Error returned when user input does not name a sign.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unknown sign {input:?}, expected o or x")]
pub struct ParseSignError {
    pub input: String,
}

/// Who controls a player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display)]
pub enum PlayerKind {
    #[display("human")]
    Human,
    #[display("computer")]
    Ai,
}

impl PlayerKind {
    pub fn other(self) -> Self {
        match self {
            PlayerKind::Human => PlayerKind::Ai,
            PlayerKind::Ai => PlayerKind::Human,
        }
    }
}

/// A player's mark. `O` has sign index 0, `X` has sign index 1 and moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, clap::ValueEnum)]
pub enum Sign {
    #[display("o")]
    O,
    #[display("x")]
    X,
}

impl Sign {
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Sign::O),
            1 => Some(Sign::X),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            Sign::O => 0,
            Sign::X => 1,
        }
    }

    #[inline]
    pub fn symbol(self) -> char {
        SIGNS[self.index()]
    }

    pub fn opponent(self) -> Self {
        match self {
            Sign::O => Sign::X,
            Sign::X => Sign::O,
        }
    }

    pub fn moves_first(self) -> bool {
        self.index() == FIRST_SIGN_INDEX
    }
}

impl FromStr for Sign {
    type Err = ParseSignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "o" | "1" => Ok(Sign::O),
            "x" | "2" => Ok(Sign::X),
            _ => Err(ParseSignError {
                input: s.trim().to_string(),
            }),
        }
    }
}

/// One side of the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub kind: PlayerKind,
    pub sign: Sign,
    pub occupancy: Occupancy,
}

impl Player {
    fn new(kind: PlayerKind, sign: Sign) -> Self {
        Self {
            kind,
            sign,
            occupancy: Occupancy::EMPTY,
        }
    }
}

/// Add `square` to `set`. The caller guarantees the square is free.
#[inline]
pub fn apply_move(set: Occupancy, square: Square) -> Occupancy {
    set.occupy(square)
}

/// A game between a human and the engine.
#[derive(Clone, Debug)]
pub struct Game {
    human: Player,
    ai: Player,
    to_move: PlayerKind,
    state: GameState,
    moves: Vec<Square>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Sign::O)
    }
}

impl Game {
    /// Start a game with the human holding `human_sign`.
    pub fn new(human_sign: Sign) -> Self {
        let human = Player::new(PlayerKind::Human, human_sign);
        let ai = Player::new(PlayerKind::Ai, human_sign.opponent());
        let to_move = if human_sign.moves_first() {
            PlayerKind::Human
        } else {
            PlayerKind::Ai
        };
        Self {
            human,
            ai,
            to_move,
            state: GameState::Playing,
            moves: Vec::with_capacity(SQUARES),
        }
    }

    pub fn human(&self) -> &Player {
        &self.human
    }

    pub fn ai(&self) -> &Player {
        &self.ai
    }

    pub fn player(&self, kind: PlayerKind) -> &Player {
        match kind {
            PlayerKind::Human => &self.human,
            PlayerKind::Ai => &self.ai,
        }
    }

    fn player_mut(&mut self, kind: PlayerKind) -> &mut Player {
        match kind {
            PlayerKind::Human => &mut self.human,
            PlayerKind::Ai => &mut self.ai,
        }
    }

    pub fn side_to_move(&self) -> PlayerKind {
        self.to_move
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Squares played so far, in order.
    pub fn moves(&self) -> &[Square] {
        &self.moves
    }

    /// Squares held by either side.
    pub fn occupied(&self) -> Occupancy {
        self.human.occupancy | self.ai.occupancy
    }

    pub fn is_free(&self, square: Square) -> bool {
        square < SQUARES && !self.occupied().is_occupied(square)
    }

    /// The display grid, always consistent with the occupancy sets.
    pub fn board(&self) -> Board {
        let mut by_sign = [Occupancy::EMPTY; 2];
        by_sign[self.human.sign.index()] = self.human.occupancy;
        by_sign[self.ai.sign.index()] = self.ai.occupancy;
        Board::from_occupancy(by_sign)
    }

    /// Check that the side to move may play `square`.
    pub fn validate(&self, square: Square) -> Result<(), MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        if square >= SQUARES {
            return Err(MoveError::OutOfRange { square });
        }
        if self.occupied().is_occupied(square) {
            return Err(MoveError::Occupied { square });
        }
        Ok(())
    }

    /// Play `square` for the side to move and return the resulting state.
    #[instrument(skip(self), fields(side = %self.to_move))]
    pub fn play(&mut self, square: Square) -> Result<GameState, MoveError> {
        self.validate(square)?;

        let mover = self.to_move;
        let player = self.player_mut(mover);
        player.occupancy = apply_move(player.occupancy, square);
        self.moves.push(square);

        let last = *self.player(mover);
        let other = self.player(mover.other()).occupancy;
        self.state = resolve(last.occupancy, mover == PlayerKind::Human, other);
        self.to_move = mover.other();

        debug!(square, state = %self.state, "move played");
        Ok(self.state)
    }

    /// Play `square` for the human.
    pub fn play_human(&mut self, square: Square) -> Result<GameState, MoveError> {
        self.expect_turn(PlayerKind::Human)?;
        self.play(square)
    }

    /// Let the engine choose and play its move. Returns the square played.
    pub fn play_ai(&mut self) -> Result<Square, MoveError> {
        self.expect_turn(PlayerKind::Ai)?;
        let square =
            best_move(self.ai.occupancy, self.human.occupancy).ok_or(MoveError::GameOver)?;
        self.play(square)?;
        Ok(square)
    }

    fn expect_turn(&self, kind: PlayerKind) -> Result<(), MoveError> {
        if self.state.is_over() {
            return Err(MoveError::GameOver);
        }
        if self.to_move != kind {
            return Err(MoveError::WrongTurn {
                to_move: self.to_move,
            });
        }
        Ok(())
    }
}

/// Parse a 1-based square number as typed by a player.
pub fn parse_square(s: &str) -> Result<Square, ParseSquareError> {
    let s = s.trim();
    let value: i64 = s.parse().map_err(|_| ParseSquareError::NotANumber {
        input: s.to_string(),
    })?;
    if !(1..=SQUARES as i64).contains(&value) {
        return Err(ParseSquareError::OutOfRange { value });
    }
    Ok((value - 1) as Square)
}

/// Format a square index as the 1-based number shown to players.
pub fn str_square(square: Square) -> String {
    (square + 1).to_string()
}
