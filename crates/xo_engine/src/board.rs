//! A single 3x3 board.

use super::action::MoveError;
use super::rules;
use super::{Cell, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 3x3 XO board.
///
/// Cells are stored in row-major order (index = row * 3 + col). The only
/// public mutators are [`Board::place`], which validates, and
/// [`Board::reset`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
        }
    }

    /// Builds a board from a row-major cell array.
    pub fn from_cells(cells: [Cell; 9]) -> Self {
        Self { cells }
    }

    /// Places `player`'s mark at `cell_index`.
    ///
    /// # Errors
    ///
    /// - [`MoveError::BoardFinished`] if the board already has a winner or is full
    /// - [`MoveError::CellOutOfRange`] if `cell_index` is not 0-8
    /// - [`MoveError::CellOccupied`] if the cell is taken
    ///
    /// The board is left untouched on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, cell_index: usize, player: Player) -> Result<Position, MoveError> {
        if self.is_finished() {
            return Err(MoveError::BoardFinished);
        }

        let pos = Position::from_index(cell_index).ok_or(MoveError::CellOutOfRange(cell_index))?;

        if !self.is_empty(pos) {
            return Err(MoveError::CellOccupied(pos));
        }

        self.set(pos, Cell::Occupied(player));
        debug!(position = %pos, player = %player, "Mark placed");
        Ok(pos)
    }

    /// Returns the winner, if any line is held by one player.
    pub fn winner(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// True iff there is no winner and all 9 cells are occupied.
    pub fn is_draw(&self) -> bool {
        rules::is_draw(self)
    }

    /// True once the board is won or drawn.
    pub fn is_finished(&self) -> bool {
        self.winner().is_some() || rules::is_full(self)
    }

    /// Clears all 9 cells.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; 9];
    }

    /// Gets the cell at the given position.
    pub fn get(&self, pos: Position) -> Cell {
        self.cells[pos.to_index()]
    }

    /// Checks if a cell is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Cell::Empty
    }

    /// Returns all cells in row-major order.
    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Empty positions in index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|pos| self.is_empty(*pos))
            .collect()
    }

    /// Number of cells held by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Occupied(player))
            .count()
    }

    /// A cell that immediately wins the board for `player`, lowest index first.
    pub fn winning_move(&self, player: Player) -> Option<Position> {
        rules::winning_move(self, player)
    }

    /// Unchecked write, for rule evaluation and search.
    pub(crate) fn set(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.to_index()] = cell;
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let idx = row * 3 + col;
                match self.cells[idx] {
                    Cell::Empty => write!(f, "{}", idx + 1)?,
                    Cell::Occupied(p) => write!(f, "{}", p)?,
                }
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            if row < 2 {
                write!(f, "\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}
