//! Draw detection.

use super::super::{Board, Cell};
use super::win::check_winner;

/// Checks if the board is full (all cells occupied).
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| *c != Cell::Empty)
}

/// A full board with no winner is a draw.
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && check_winner(board).is_none()
}

#[cfg(test)]
mod tests {
    use super::super::super::{Player, Position};
    use super::*;

    fn board_from(layout: [Option<Player>; 9]) -> Board {
        let mut board = Board::new();
        for (pos, mark) in Position::ALL.into_iter().zip(layout) {
            if let Some(p) = mark {
                board.set(pos, Cell::Occupied(p));
            }
        }
        board
    }

    #[test]
    fn test_empty_board_not_full() {
        assert!(!is_full(&Board::new()));
    }

    #[test]
    fn test_draw_detection() {
        // X O X / O X X / O X O
        let (x, o) = (Some(Player::X), Some(Player::O));
        let board = board_from([x, o, x, o, x, x, o, x, o]);
        assert!(is_full(&board));
        assert!(is_draw(&board));
    }

    #[test]
    fn test_full_board_with_winner_is_not_draw() {
        // X X X / O O X / X O O
        let (x, o) = (Some(Player::X), Some(Player::O));
        let board = board_from([x, x, x, o, o, x, x, o, o]);
        assert!(is_full(&board));
        assert!(!is_draw(&board));
    }
}
