// SPDX-License-Identifier: MIT OR Apache-2.0

//! Board representation and manipulation

use crate::{Piece, Position, BOARD_SIZE, CELL_COUNT};
use serde::{Deserialize, Serialize};

/// The 25 intersections of a Baag-Chal board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Cells in row-major order
    cells: [Piece; CELL_COUNT],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Create a board with no pieces
    pub fn empty() -> Self {
        Self {
            cells: [Piece::Empty; CELL_COUNT],
        }
    }

    /// Starting layout: a tiger on each corner, everything else empty
    pub fn starting() -> Self {
        let mut board = Self::empty();
        for corner in Position::CORNERS {
            board.set(corner, Piece::Tiger);
        }
        board
    }

    /// Get the piece at the specified position, `None` when off the board
    pub fn get(&self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        Some(self.cells[pos.index()])
    }

    /// True if `pos` is on the board and unoccupied
    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get(pos) == Some(Piece::Empty)
    }

    /// Overwrite the cell at `pos`. Returns false when off the board.
    pub fn set(&mut self, pos: Position, piece: Piece) -> bool {
        if !pos.is_valid() {
            return false;
        }
        self.cells[pos.index()] = piece;
        true
    }

    /// Clear the cell at `pos`, returning what was there
    pub fn take(&mut self, pos: Position) -> Option<Piece> {
        if !pos.is_valid() {
            return None;
        }
        Some(std::mem::take(&mut self.cells[pos.index()]))
    }

    /// Count pieces of the given kind
    pub fn count(&self, piece: Piece) -> usize {
        self.cells.iter().filter(|cell| **cell == piece).count()
    }

    /// Positions holding the given kind, row-major
    pub fn positions_of(&self, piece: Piece) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(move |pos| self.cells[pos.index()] == piece)
    }

    /// Cells as rows, `rows()[row][col]`
    pub fn rows(&self) -> [[Piece; BOARD_SIZE as usize]; BOARD_SIZE as usize] {
        let mut rows = [[Piece::Empty; BOARD_SIZE as usize]; BOARD_SIZE as usize];
        for pos in Position::all() {
            rows[pos.row as usize][pos.col as usize] = self.cells[pos.index()];
        }
        rows
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(Piece::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
