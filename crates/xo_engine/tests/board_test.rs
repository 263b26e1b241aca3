//! Tests for single-board placement and outcome detection.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use xo_engine::{Board, Cell, MoveError, Player, Position, WINNING_LINES, check_winner};

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

#[test]
fn test_place_returns_position() {
    let mut board = Board::new();
    assert_eq!(board.place(4, Player::X), Ok(Position::Center));
    assert_eq!(board.get(Position::Center), Cell::Occupied(Player::X));
    assert_eq!(board.empty_positions().len(), 8);
}

#[test]
fn test_place_rejects_occupied_without_change() {
    let mut board = Board::new();
    board.place(0, Player::X).unwrap();
    let before = board.clone();

    assert_eq!(
        board.place(0, Player::O),
        Err(MoveError::CellOccupied(Position::TopLeft))
    );
    assert_eq!(board, before);
}

#[test]
fn test_place_rejects_out_of_range() {
    let mut board = Board::new();
    assert_eq!(board.place(9, Player::X), Err(MoveError::CellOutOfRange(9)));
    assert_eq!(board, Board::new());
}

#[test]
fn test_place_rejects_finished_board() {
    let mut won = board_from("XXX OO. ...");
    let before = won.clone();
    assert_eq!(won.place(8, Player::O), Err(MoveError::BoardFinished));
    assert_eq!(won, before);
}

#[test]
fn test_every_line_wins() {
    for line in WINNING_LINES {
        for player in [Player::X, Player::O] {
            let mut cells = [Cell::Empty; 9];
            for pos in line {
                cells[pos.to_index()] = Cell::Occupied(player);
            }
            let board = Board::from_cells(cells);
            assert_eq!(check_winner(&board), Some(player), "line {line:?}");
            assert!(board.is_finished());
            assert!(!board.is_draw());
        }
    }
}

fn completed_lines(board: &Board, player: Player) -> usize {
    WINNING_LINES
        .iter()
        .filter(|line| line.iter().all(|&pos| board.get(pos) == Cell::Occupied(player)))
        .count()
}

#[test]
fn test_random_playouts_never_have_two_winners() {
    for seed in 0..500 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();

        while !board.is_finished() {
            // Either symbol may move; tournament boards often see only one
            let player = if rng.gen_bool(0.5) { Player::X } else { Player::O };
            let pos = *board
                .empty_positions()
                .choose(&mut rng)
                .expect("Unfinished board has an empty cell");
            board.place(pos.to_index(), player).unwrap();

            let x_lines = completed_lines(&board, Player::X);
            let o_lines = completed_lines(&board, Player::O);
            assert!(x_lines == 0 || o_lines == 0, "seed {seed}: both symbols hold a line");

            let expected = match (x_lines, o_lines) {
                (0, 0) => None,
                (_, 0) => Some(Player::X),
                _ => Some(Player::O),
            };
            assert_eq!(board.winner(), expected, "seed {seed}\n{board}");
        }
    }
}

#[test]
fn test_two_in_a_row_is_not_a_win() {
    let board = board_from("XX. OO. ...");
    assert_eq!(board.winner(), None);
    assert!(!board.is_finished());
}

#[test]
fn test_full_board_without_line_is_draw() {
    let board = board_from("XOX XOO OXX");
    assert_eq!(board.winner(), None);
    assert!(board.is_draw());
    assert!(board.is_finished());
    assert!(board.empty_positions().is_empty());
}

#[test]
fn test_winning_move_finds_lowest_completion() {
    // X can complete the top row at 2 or the left column at 6
    let board = board_from("XX. X.. ...");
    assert_eq!(board.winning_move(Player::X), Some(Position::TopRight));
    assert_eq!(board.winning_move(Player::O), None);
}

#[test]
fn test_reset_clears_cells() {
    let mut board = board_from("XOX ... O..");
    board.reset();
    assert_eq!(board, Board::new());
    assert_eq!(board.count(Player::X), 0);
}

#[test]
fn test_display_grid() {
    let board = board_from("X.. .O. ...");
    let text = board.to_string();
    assert!(text.starts_with("X|2|3"));
    assert!(text.contains("4|O|6"));
}
