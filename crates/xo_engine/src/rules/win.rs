//! Win detection.

use super::super::{Board, Cell, Player, Position};
use tracing::instrument;

/// The 8 winning lines: rows, columns, diagonals.
pub const WINNING_LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Checks if there is a winner on the board.
///
/// Returns `Some(player)` if the player holds all three cells of a line,
/// `None` otherwise.
pub fn check_winner(board: &Board) -> Option<Player> {
    for [a, b, c] in WINNING_LINES {
        let cell = board.get(a);
        if cell != Cell::Empty && cell == board.get(b) && cell == board.get(c) {
            return cell.player();
        }
    }

    None
}

/// Finds a cell that would immediately win the board for `player`.
///
/// Each empty cell is tried on a scratch copy and checked with
/// [`check_winner`]. The lowest index wins ties.
#[instrument(skip(board))]
pub fn winning_move(board: &Board, player: Player) -> Option<Position> {
    if board.is_finished() {
        return None;
    }

    board.empty_positions().into_iter().find(|&pos| {
        let mut scratch = board.clone();
        scratch.set(pos, Cell::Occupied(player));
        check_winner(&scratch) == Some(player)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_every_line_wins_for_either_player() {
        for player in [Player::X, Player::O] {
            for line in WINNING_LINES {
                let mut board = Board::new();
                for pos in line {
                    board.set(pos, Cell::Occupied(player));
                }
                assert_eq!(check_winner(&board), Some(player), "line {:?}", line);
            }
        }
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Cell::Occupied(Player::X));
        board.set(Position::TopCenter, Cell::Occupied(Player::X));
        board.set(Position::TopRight, Cell::Occupied(Player::O));
        assert_eq!(check_winner(&board), None);
    }

    #[test]
    fn test_winning_move_prefers_lowest_index() {
        // X X . / . . . / X . .  -> both 2 and 3 complete a line
        let mut board = Board::new();
        board.set(Position::TopLeft, Cell::Occupied(Player::X));
        board.set(Position::TopCenter, Cell::Occupied(Player::X));
        board.set(Position::BottomLeft, Cell::Occupied(Player::X));
        assert_eq!(winning_move(&board, Player::X), Some(Position::TopRight));
        assert_eq!(winning_move(&board, Player::O), None);
    }
}
