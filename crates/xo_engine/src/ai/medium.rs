//! Medium tier: take a win, else block, else play randomly.

use super::easy::random_move;
use crate::{Board, Player, Position};
use rand::Rng;
use tracing::trace;

/// One-ply heuristic move for `player`.
///
/// Winning beats blocking; among several winning (or blocking) cells the
/// lowest index is played.
pub fn heuristic_move<R: Rng + ?Sized>(
    board: &Board,
    player: Player,
    rng: &mut R,
) -> Option<Position> {
    if let Some(pos) = board.winning_move(player) {
        trace!(position = %pos, "Completing own line");
        return Some(pos);
    }

    if let Some(pos) = board.winning_move(player.opponent()) {
        trace!(position = %pos, "Blocking opponent line");
        return Some(pos);
    }

    random_move(board, rng)
}
