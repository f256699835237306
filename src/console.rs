//! Interactive console game against the engine.
//!
//! Reads 1-based square numbers from the input and writes the board,
//! prompts, and final result to the output. Invalid input is rejected and
//! the prompt repeated, so the engine only ever sees legal moves.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use tracing::{info, instrument, warn};

use crate::position::{Game, PlayerKind, Sign, parse_square, str_square};
use crate::rules::GameState;

/// Read one trimmed line, failing on end of input.
fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let n = input.read_line(&mut line).context("failed to read input")?;
    if n == 0 {
        bail!("input closed before the game finished");
    }
    Ok(line.trim().to_string())
}

/// Ask which sign the human wants to play.
pub fn choose_sign<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<Sign> {
    writeln!(output, "TicTacToe Game")?;
    writeln!(output, "1 - play as o")?;
    writeln!(output, "2 - play as x")?;
    loop {
        write!(output, "Your choice: ")?;
        output.flush()?;
        let line = read_line(input)?;
        writeln!(output)?;
        match line.parse::<Sign>() {
            Ok(sign) => return Ok(sign),
            Err(err) => {
                warn!(%err, "bad sign choice");
                writeln!(output, "Please enter 1 or 2")?;
            }
        }
    }
}

/// Prompt until the human enters a free square.
fn read_human_move<R: BufRead, W: Write>(
    game: &Game,
    input: &mut R,
    output: &mut W,
) -> Result<usize> {
    loop {
        write!(output, "Choose your move: ")?;
        output.flush()?;
        let line = read_line(input)?;
        writeln!(output)?;
        match parse_square(&line) {
            Ok(square) if game.is_free(square) => return Ok(square),
            Ok(square) => warn!(square, "square taken"),
            Err(err) => warn!(%err, "bad move input"),
        }
        writeln!(output, "This move is wrong, choose again")?;
    }
}

/// Play `game` to the end and return the final state.
#[instrument(skip_all, fields(human = %game.human().sign))]
pub fn play_game<R: BufRead, W: Write>(
    game: &mut Game,
    input: &mut R,
    output: &mut W,
) -> Result<GameState> {
    while !game.state().is_over() {
        writeln!(output, "{}", game.board())?;
        match game.side_to_move() {
            PlayerKind::Human => {
                let square = read_human_move(game, input, output)?;
                game.play_human(square)?;
            }
            PlayerKind::Ai => {
                let square = game.play_ai()?;
                writeln!(output, "Computer move is: {}\n", str_square(square))?;
            }
        }
    }

    writeln!(output, "{}", game.board())?;
    let state = game.state();
    match state {
        GameState::HumanWon => writeln!(output, "Human won the game!")?,
        GameState::ComputerWon => writeln!(output, "Computer won the game!")?,
        _ => writeln!(output, "Draw!")?,
    }
    info!(%state, moves = ?game.moves(), "game over");
    Ok(state)
}
