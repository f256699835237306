//! Line-oriented text protocol for driving the engine.
//!
//! The protocol follows the shape of the Go Text Protocol: each request is
//! one line, optionally prefixed with a numeric id, and each response is
//! `=[id] message` on success or `?[id] message` on failure, followed by a
//! blank line. Squares are numbered 1 to 9 from the top-left corner.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `protocol_version` - Return protocol version (1)
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the program
//! - `clear_board` - Start a new game with the same signs
//! - `sign <o|x>` - Choose the human's sign and start a new game
//! - `play <square>` - Play the human's move
//! - `genmove` - Generate and play the computer's move
//! - `showboard` - Print the board
//! - `state` - Report whether the game is decided
//! - `analyze` - Score every free square for the side to move
//!
//! ## Example
//!
//! ```
//! use negamax_ttt::protocol::ProtocolEngine;
//!
//! let mut engine = ProtocolEngine::new();
//! let mut out = Vec::new();
//! engine.run("1 genmove\n2 quit\n".as_bytes(), &mut out).unwrap();
//! assert!(String::from_utf8(out).unwrap().starts_with("=1 1\n"));
//! ```

use std::io::{self, BufRead, Write};

use derive_more::{Display, Error, From};
use tracing::{debug, info};

use crate::position::{
    Game, MoveError, ParseSignError, ParseSquareError, Sign, parse_square, str_square,
};
use crate::search::score_moves;

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "analyze",
    "clear_board",
    "genmove",
    "known_command",
    "list_commands",
    "name",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "sign",
    "state",
    "version",
];

/// Reasons a command can fail.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum ProtocolError {
    #[display("missing argument")]
    #[from(ignore)]
    MissingArgument,
    #[display("unknown command: {command}")]
    #[from(ignore)]
    UnknownCommand { command: String },
    #[display("{_0}")]
    Move(#[error(source)] MoveError),
    #[display("invalid square: {_0}")]
    Square(#[error(source)] ParseSquareError),
    #[display("{_0}")]
    Sign(#[error(source)] ParseSignError),
}

/// Protocol engine state.
pub struct ProtocolEngine {
    /// Current game
    game: Game,
    /// Sign the human plays, kept across `clear_board`
    human_sign: Sign,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    /// Create an engine where the human plays `o` and the computer opens.
    pub fn new() -> Self {
        Self::with_sign(Sign::O)
    }

    /// Create an engine with the human holding `human_sign`.
    pub fn with_sign(human_sign: Sign) -> Self {
        Self {
            game: Game::new(human_sign),
            human_sign,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let response = self.execute(&command, args);
            debug!(%command, ?args, ok = response.is_ok(), "command executed");

            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            match response {
                Ok(message) => writeln!(output, "={id_str} {message}\n")?,
                Err(err) => writeln!(output, "?{id_str} {err}\n")?,
            }
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return its response text.
    pub fn execute(&mut self, command: &str, args: &[&str]) -> Result<String, ProtocolError> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => Ok("1".to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let cmd = args.first().ok_or(ProtocolError::MissingArgument)?;
                let known = KNOWN_COMMANDS.contains(&cmd.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "clear_board" => {
                self.game = Game::new(self.human_sign);
                info!(sign = %self.human_sign, "new game");
                Ok(String::new())
            }

            "sign" => {
                let arg = args.first().ok_or(ProtocolError::MissingArgument)?;
                let sign = arg.parse::<Sign>()?;
                self.human_sign = sign;
                self.game = Game::new(sign);
                info!(%sign, "new game");
                Ok(String::new())
            }

            "play" => {
                let arg = args.first().ok_or(ProtocolError::MissingArgument)?;
                let square = parse_square(arg)?;
                self.game.play_human(square)?;
                Ok(String::new())
            }

            "genmove" => {
                let square = self.game.play_ai()?;
                Ok(str_square(square))
            }

            "showboard" => {
                // The board ends in a newline; the response framing adds its own.
                let board = self.game.board().to_string();
                Ok(format!("\n{}", board.trim_end_matches('\n')))
            }

            "state" => Ok(self.game.state().to_string()),

            "analyze" => {
                if self.game.state().is_over() {
                    return Err(MoveError::GameOver.into());
                }
                let to_move = self.game.player(self.game.side_to_move()).occupancy;
                let other = self.game.player(self.game.side_to_move().other()).occupancy;
                let scores = score_moves(to_move, other)
                    .iter()
                    .map(|s| s.map_or_else(|| ".".to_string(), |v| v.to_string()))
                    .collect::<Vec<_>>()
                    .join(" ");
                Ok(scores)
            }

            _ => Err(ProtocolError::UnknownCommand {
                command: command.to_string(),
            }),
        }
    }
}
