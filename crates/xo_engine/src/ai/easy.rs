//! Easy tier: uniform random play.

use crate::{Board, Position};
use rand::Rng;
use rand::seq::SliceRandom;

/// Picks a uniformly random empty cell, or `None` if the board is full.
pub fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    board.empty_positions().choose(rng).copied()
}
