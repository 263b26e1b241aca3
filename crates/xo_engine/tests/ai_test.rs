//! Tests for the three AI tiers.

use strum::IntoEnumIterator;
use xo_engine::{AiEngine, AiError, Board, Cell, Difficulty, Player, Position, best_move};

fn board_from(marks: &str) -> Board {
    let mut cells = [Cell::Empty; 9];
    for (i, c) in marks.chars().filter(|c| !c.is_whitespace()).enumerate() {
        cells[i] = match c {
            'X' => Cell::Occupied(Player::X),
            'O' => Cell::Occupied(Player::O),
            _ => Cell::Empty,
        };
    }
    Board::from_cells(cells)
}

/// Plays one board to completion and returns the winner.
fn play_out(x: &mut AiEngine, o: &mut AiEngine) -> Option<Player> {
    let mut board = Board::new();
    let mut player = Player::X;
    while !board.is_finished() {
        let engine = match player {
            Player::X => &mut *x,
            Player::O => &mut *o,
        };
        let pos = engine.choose_move(&board, player).unwrap();
        board.place(pos.to_index(), player).unwrap();
        player = player.opponent();
    }
    board.winner()
}

#[test]
fn test_medium_blocks_opponent_line() {
    let board = board_from("XX. ... ...");
    let mut engine = AiEngine::seeded(Difficulty::Medium, 11);
    assert_eq!(engine.choose_move(&board, Player::O), Ok(Position::TopRight));
}

#[test]
fn test_medium_prefers_win_over_block() {
    let board = board_from("XX. .OO ...");
    let mut engine = AiEngine::seeded(Difficulty::Medium, 11);
    assert_eq!(engine.choose_move(&board, Player::O), Ok(Position::MiddleLeft));
}

#[test]
fn test_hard_takes_immediate_win() {
    let board = board_from("OO. XX. X..");
    let mut engine = AiEngine::seeded(Difficulty::Hard, 0);
    assert_eq!(engine.choose_move(&board, Player::O), Ok(Position::TopRight));
}

#[test]
fn test_hard_blocks_fork_threat() {
    // X holds opposite corners; O must answer with an edge, not a corner
    let board = board_from("X.. .O. ..X");
    let report = best_move(&board, Player::O).unwrap();
    assert_eq!(report.score, 0);
    assert!(matches!(
        report.position,
        Position::TopCenter | Position::MiddleLeft | Position::MiddleRight | Position::BottomCenter
    ));
}

#[test]
fn test_hard_versus_hard_is_a_draw() {
    let mut x = AiEngine::seeded(Difficulty::Hard, 1);
    let mut o = AiEngine::seeded(Difficulty::Hard, 2);
    assert_eq!(play_out(&mut x, &mut o), None);
}

#[test]
fn test_hard_never_loses_to_easy() {
    for seed in 0..10 {
        let mut easy = AiEngine::seeded(Difficulty::Easy, seed);
        let mut hard = AiEngine::seeded(Difficulty::Hard, seed);
        assert_ne!(play_out(&mut easy, &mut hard), Some(Player::X), "seed {seed}");
    }
}

#[test]
fn test_every_tier_picks_an_empty_cell() {
    let board = board_from("XO. .X. O..");
    for difficulty in Difficulty::iter() {
        for seed in 0..5 {
            let mut engine = AiEngine::seeded(difficulty, seed);
            let pos = engine.choose_move(&board, Player::O).unwrap();
            assert!(board.is_empty(pos), "{difficulty} chose occupied {pos}");
        }
    }
}

#[test]
fn test_no_moves_on_finished_board() {
    let full = board_from("XOX XOO OXX");
    let won = board_from("XXX OO. ...");
    for difficulty in Difficulty::iter() {
        let mut engine = AiEngine::seeded(difficulty, 0);
        assert_eq!(engine.choose_move(&full, Player::X), Err(AiError::NoMoves));
        assert_eq!(engine.choose_move(&won, Player::O), Err(AiError::NoMoves));
    }
}

#[test]
fn test_seeded_engines_are_reproducible() {
    let board = Board::new();
    let mut a = AiEngine::seeded(Difficulty::Easy, 42);
    let mut b = AiEngine::seeded(Difficulty::Easy, 42);
    for _ in 0..10 {
        assert_eq!(a.choose_move(&board, Player::X), b.choose_move(&board, Player::X));
    }
}

#[test]
fn test_difficulty_parses_case_insensitively() {
    assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
    assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
    assert!("impossible".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::Medium.to_string(), "medium");
}
