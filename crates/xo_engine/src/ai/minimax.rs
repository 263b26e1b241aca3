//! Hard tier: exhaustive minimax with alpha-beta pruning.
//!
//! A board has at most 9 empty cells, so the search always runs to terminal
//! states. Scores are from the searching player's point of view: a win at
//! ply `d` is worth `WIN_SCORE - d`, a loss `d - WIN_SCORE`, a draw 0. The
//! root move itself is ply 1, so quicker wins and slower losses rank higher.

use crate::{Board, Cell, Player, Position};
use tracing::{debug, instrument};

/// Base score of a win.
pub const WIN_SCORE: i32 = 10;

const INFINITY: i32 = 1_000;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchReport {
    /// The chosen cell.
    pub position: Position,
    /// Minimax value of the chosen cell.
    pub score: i32,
    /// Number of positions visited below the root.
    pub nodes: u64,
}

/// Searches the best move for `player`.
///
/// Returns `None` if the board is already finished. Ties between root moves
/// go to the first cell in index order reaching the best score.
#[instrument(skip(board))]
pub fn best_move(board: &Board, player: Player) -> Option<SearchReport> {
    if board.is_finished() {
        return None;
    }

    let mut scratch = board.clone();
    let mut nodes = 0u64;
    let mut alpha = -INFINITY;
    let mut best: Option<(Position, i32)> = None;

    for pos in board.empty_positions() {
        scratch.set(pos, Cell::Occupied(player));
        let score = minimax(
            &mut scratch,
            player.opponent(),
            player,
            1,
            alpha,
            INFINITY,
            &mut nodes,
        );
        scratch.set(pos, Cell::Empty);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
        alpha = alpha.max(score);
    }

    let (position, score) = best?;
    debug!(position = %position, score, nodes, "Search complete");
    Some(SearchReport {
        position,
        score,
        nodes,
    })
}

/// Alpha-beta minimax. `root` is the maximizing player; `depth` is the
/// number of plies already played below the root.
fn minimax(
    board: &mut Board,
    to_move: Player,
    root: Player,
    depth: i32,
    mut alpha: i32,
    mut beta: i32,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    if let Some(winner) = board.winner() {
        return if winner == root {
            WIN_SCORE - depth
        } else {
            depth - WIN_SCORE
        };
    }

    let moves = board.empty_positions();
    if moves.is_empty() {
        return 0;
    }

    if to_move == root {
        let mut best = -INFINITY;
        for pos in moves {
            board.set(pos, Cell::Occupied(to_move));
            let score = minimax(board, to_move.opponent(), root, depth + 1, alpha, beta, nodes);
            board.set(pos, Cell::Empty);

            best = best.max(score);
            alpha = alpha.max(best);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for pos in moves {
            board.set(pos, Cell::Occupied(to_move));
            let score = minimax(board, to_move.opponent(), root, depth + 1, alpha, beta, nodes);
            board.set(pos, Cell::Empty);

            best = best.min(score);
            beta = beta.min(best);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plain minimax without pruning, counting nodes the same way.
    fn exhaustive(board: &mut Board, to_move: Player, root: Player, depth: i32, nodes: &mut u64) -> i32 {
        *nodes += 1;
        if let Some(winner) = board.winner() {
            return if winner == root { WIN_SCORE - depth } else { depth - WIN_SCORE };
        }
        let moves = board.empty_positions();
        if moves.is_empty() {
            return 0;
        }
        let scores = moves.into_iter().map(|pos| {
            board.set(pos, Cell::Occupied(to_move));
            let s = exhaustive(board, to_move.opponent(), root, depth + 1, nodes);
            board.set(pos, Cell::Empty);
            s
        });
        if to_move == root {
            scores.max().unwrap_or(0)
        } else {
            scores.min().unwrap_or(0)
        }
    }

    #[test]
    fn test_pruning_visits_fewer_nodes_than_exhaustive_search() {
        let board = Board::new();
        let report = best_move(&board, Player::X).unwrap();

        let mut scratch = board.clone();
        let mut full_nodes = 0;
        for pos in board.empty_positions() {
            scratch.set(pos, Cell::Occupied(Player::X));
            exhaustive(&mut scratch, Player::O, Player::X, 1, &mut full_nodes);
            scratch.set(pos, Cell::Empty);
        }

        assert!(report.nodes < full_nodes, "{} >= {}", report.nodes, full_nodes);
        assert_eq!(report.score, 0, "empty board is a theoretical draw");
    }

    #[test]
    fn test_pruned_values_match_exhaustive_values() {
        // X . . / . O . / . . .  with X to move
        let mut board = Board::new();
        board.set(Position::TopLeft, Cell::Occupied(Player::X));
        board.set(Position::Center, Cell::Occupied(Player::O));

        for pos in board.empty_positions() {
            let mut scratch = board.clone();
            scratch.set(pos, Cell::Occupied(Player::X));
            let mut n = 0;
            let expected = exhaustive(&mut scratch, Player::O, Player::X, 1, &mut n);
            let actual = minimax(&mut scratch, Player::O, Player::X, 1, -INFINITY, INFINITY, &mut n);
            assert_eq!(actual, expected, "position {}", pos);
        }
    }

    #[test]
    fn test_immediate_win_scores_highest() {
        // X X . / O O . / . . .  with X to move: 2 wins at ply 1
        let mut board = Board::new();
        board.set(Position::TopLeft, Cell::Occupied(Player::X));
        board.set(Position::TopCenter, Cell::Occupied(Player::X));
        board.set(Position::MiddleLeft, Cell::Occupied(Player::O));
        board.set(Position::Center, Cell::Occupied(Player::O));

        let report = best_move(&board, Player::X).unwrap();
        assert_eq!(report.position, Position::TopRight);
        assert_eq!(report.score, WIN_SCORE - 1);
    }

    #[test]
    fn test_finished_board_has_no_move() {
        let mut board = Board::new();
        for pos in [Position::TopLeft, Position::Center, Position::BottomRight] {
            board.set(pos, Cell::Occupied(Player::O));
        }
        assert_eq!(best_move(&board, Player::X), None);
    }
}
