//! End-to-end tests of the text protocol and the console game.

use negamax_ttt::console::play_game;
use negamax_ttt::position::{Game, Sign};
use negamax_ttt::protocol::ProtocolEngine;
use negamax_ttt::rules::GameState;

/// Run a script through a fresh engine and return the responses.
fn run_script(engine: &mut ProtocolEngine, script: &str) -> Vec<String> {
    let mut out = Vec::new();
    engine.run(script.as_bytes(), &mut out).unwrap();
    String::from_utf8(out)
        .unwrap()
        .split("\n\n")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[test]
fn test_ids_and_failures() {
    let mut engine = ProtocolEngine::new();
    let responses = run_script(&mut engine, "1 name\nbogus\n# comment\n\n3 play 12\n");
    assert_eq!(responses[0], "=1 negamax-ttt");
    assert_eq!(responses[1], "? unknown command: bogus");
    assert_eq!(
        responses[2],
        "?3 invalid square: square must be between 1 and 9, got 12"
    );
}

#[test]
fn test_full_game_as_x() {
    let mut engine = ProtocolEngine::new();
    let script = "\
sign x
play 1
genmove
play 2
genmove
play 7
genmove
play 6
genmove
play 9
state
quit
play 5
";
    let responses = run_script(&mut engine, script);
    assert_eq!(
        responses,
        vec!["= ", "= ", "= 5", "= ", "= 3", "= ", "= 4", "= ", "= 8", "= ", "= draw", "= "]
    );
    assert_eq!(engine.game().state(), GameState::Draw);
}

#[test]
fn test_showboard() {
    let mut engine = ProtocolEngine::new();
    let responses = run_script(&mut engine, "genmove\nshowboard\nstate\n");
    assert_eq!(
        responses,
        vec![
            "= 1",
            "= \n x | 2 | 3 \n---|---|---\n 4 | 5 | 6 \n---|---|---\n 7 | 8 | 9 ",
            "= playing",
        ]
    );
}

#[test]
fn test_analyze_scores_side_to_move() {
    let mut engine = ProtocolEngine::with_sign(Sign::X);
    let responses = run_script(&mut engine, "analyze\nplay 5\ngenmove\nanalyze\n");
    assert_eq!(responses[0], "= 0 0 0 0 0 0 0 0 0");
    assert_eq!(responses[2], "= 1");
    // Human to move with x on 5 and o on 1: everything draws
    assert_eq!(responses[3], "= . 0 0 0 . 0 0 0 0");
}

#[test]
fn test_game_over_rejects_moves() {
    let mut engine = ProtocolEngine::with_sign(Sign::X);
    // Human ignores the threat on the left column: x 2, o 1; x 3, o 4; x 5, o 7
    let responses = run_script(
        &mut engine,
        "play 2\ngenmove\nplay 3\ngenmove\nplay 5\ngenmove\nstate\nplay 6\ngenmove\n",
    );
    assert_eq!(responses[1], "= 1");
    assert_eq!(responses[3], "= 4");
    assert_eq!(responses[5], "= 7");
    assert_eq!(responses[6], "= computer won");
    assert_eq!(responses[7], "? Illegal move: the game is over");
    assert_eq!(responses[8], "? Illegal move: the game is over");
}

#[test]
fn test_console_game_to_draw() {
    let mut game = Game::new(Sign::X);
    let mut input = "1\n2\n7\n6\n9\n".as_bytes();
    let mut out = Vec::new();
    let state = play_game(&mut game, &mut input, &mut out).unwrap();
    assert_eq!(state, GameState::Draw);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Computer move is: 5"));
    assert!(text.ends_with("Draw!\n"));
}
