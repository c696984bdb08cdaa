// SPDX-License-Identifier: MIT OR Apache-2.0

//! Move legality
//!
//! A step follows one line segment. A jump crosses a goat along two
//! segments that continue each other; both halves must exist on the
//! connectivity graph, so two points at the right distance are not enough.

use crate::{board::Board, graph::ConnectivityGraph, Piece, Position};
use serde::{Deserialize, Serialize};

/// Classification of a proposed move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Illegal,
    /// One step along a line to an adjacent empty point
    Step,
    /// A tiger capture over the goat at the midpoint
    Jump,
}

impl MoveKind {
    pub fn is_legal(&self) -> bool {
        !matches!(self, MoveKind::Illegal)
    }
}

/// Checks moves against a board and its line layout
pub struct MoveValidator<'a> {
    /// The board being checked
    board: &'a Board,
    /// Which points are joined by lines
    graph: &'a ConnectivityGraph,
}

impl<'a> MoveValidator<'a> {
    /// Create a validator for the traditional board layout
    pub fn new(board: &'a Board) -> Self {
        Self::with_graph(board, ConnectivityGraph::traditional())
    }

    pub fn with_graph(board: &'a Board, graph: &'a ConnectivityGraph) -> Self {
        Self { board, graph }
    }

    /// Classify the move of the piece at `from` to `to`
    pub fn classify(&self, from: Position, to: Position) -> MoveKind {
        let mover = match self.board.get(from) {
            Some(piece) if !piece.is_empty() => piece,
            _ => return MoveKind::Illegal,
        };

        if !self.board.is_empty_at(to) {
            return MoveKind::Illegal;
        }

        let dr = from.row.abs_diff(to.row);
        let dc = from.col.abs_diff(to.col);

        match (dr, dc) {
            (1, 0) | (0, 1) | (1, 1) => {
                if self.graph.is_connected(from, to) {
                    MoveKind::Step
                } else {
                    MoveKind::Illegal
                }
            }
            (2, 0) | (0, 2) | (2, 2) => {
                if mover != Piece::Tiger {
                    return MoveKind::Illegal;
                }
                let mid = midpoint(from, to);
                if self.board.get(mid) != Some(Piece::Goat) {
                    return MoveKind::Illegal;
                }
                if self.graph.is_connected(from, mid) && self.graph.is_connected(mid, to) {
                    MoveKind::Jump
                } else {
                    MoveKind::Illegal
                }
            }
            _ => MoveKind::Illegal,
        }
    }

    /// Every legal destination for the piece at `from`, row-major
    pub fn destinations(&self, from: Position) -> Vec<(Position, MoveKind)> {
        Position::all()
            .map(|to| (to, self.classify(from, to)))
            .filter(|(_, kind)| kind.is_legal())
            .collect()
    }

    /// True if the piece at `from` has any legal step or jump
    pub fn has_any_move(&self, from: Position) -> bool {
        Position::all().any(|to| self.classify(from, to).is_legal())
    }
}

/// Classify a move on the traditional board
pub fn is_legal_move(board: &Board, from: Position, to: Position) -> MoveKind {
    let kind = MoveValidator::new(board).classify(from, to);
    tracing::debug!("{} -> {} classified as {:?}", from, to, kind);
    kind
}

/// Point halfway between two points an even distance apart
pub fn midpoint(from: Position, to: Position) -> Position {
    Position::new((from.row + to.row) / 2, (from.col + to.col) / 2)
}
