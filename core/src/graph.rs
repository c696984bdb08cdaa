// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line connectivity of the Baag-Chal board
//!
//! The board is not a uniform grid: every point connects orthogonally, but
//! diagonal lines only run through points whose `row + col` is even. The
//! table below is the single source of truth for which points are joined.

use crate::{GameError, Position, CELL_COUNT};
use once_cell::sync::Lazy;

/// Direct neighbors of every point, row-major from (0,0) to (4,4)
const TRADITIONAL_TABLE: [&[(u8, u8)]; CELL_COUNT] = [
    // row 0
    &[(0, 1), (1, 0), (1, 1)],
    &[(0, 0), (0, 2), (1, 1)],
    &[(0, 1), (0, 3), (1, 2), (1, 1), (1, 3)],
    &[(0, 2), (0, 4), (1, 3)],
    &[(0, 3), (1, 4), (1, 3)],
    // row 1
    &[(0, 0), (2, 0), (1, 1)],
    &[(0, 1), (2, 1), (1, 0), (1, 2), (0, 0), (0, 2), (2, 0), (2, 2)],
    &[(0, 2), (2, 2), (1, 1), (1, 3)],
    &[(0, 3), (2, 3), (1, 2), (1, 4), (0, 2), (0, 4), (2, 2), (2, 4)],
    &[(0, 4), (2, 4), (1, 3)],
    // row 2
    &[(1, 0), (3, 0), (2, 1), (1, 1), (3, 1)],
    &[(1, 1), (3, 1), (2, 0), (2, 2)],
    &[(1, 2), (3, 2), (2, 1), (2, 3), (1, 1), (1, 3), (3, 1), (3, 3)],
    &[(1, 3), (3, 3), (2, 2), (2, 4)],
    &[(1, 4), (3, 4), (2, 3), (1, 3), (3, 3)],
    // row 3
    &[(2, 0), (4, 0), (3, 1)],
    &[(2, 1), (4, 1), (3, 0), (3, 2), (2, 0), (2, 2), (4, 0), (4, 2)],
    &[(2, 2), (4, 2), (3, 1), (3, 3)],
    &[(2, 3), (4, 3), (3, 2), (3, 4), (2, 2), (2, 4), (4, 2), (4, 4)],
    &[(2, 4), (4, 4), (3, 3)],
    // row 4
    &[(3, 0), (4, 1), (3, 1)],
    &[(3, 1), (4, 0), (4, 2)],
    &[(3, 2), (4, 1), (4, 3), (3, 1), (3, 3)],
    &[(3, 3), (4, 2), (4, 4)],
    &[(3, 4), (4, 3), (3, 3)],
];

static TRADITIONAL: Lazy<ConnectivityGraph> =
    Lazy::new(|| ConnectivityGraph::from_table(&TRADITIONAL_TABLE));

/// Set of board points, one bit per row-major index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct NeighborSet(u32);

impl NeighborSet {
    pub fn contains(&self, pos: Position) -> bool {
        pos.is_valid() && self.0 & (1u32 << pos.index()) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Members in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        let bits = self.0;
        (0..CELL_COUNT)
            .filter(move |idx| bits & (1u32 << *idx) != 0)
            .filter_map(Position::from_index)
    }

    fn insert(&mut self, pos: Position) {
        self.0 |= 1u32 << pos.index();
    }
}

/// Immutable adjacency of the 25 board points
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectivityGraph {
    neighbors: [NeighborSet; CELL_COUNT],
}

impl ConnectivityGraph {
    /// The traditional Baag-Chal board, built once per process
    pub fn traditional() -> &'static ConnectivityGraph {
        &TRADITIONAL
    }

    fn from_table(table: &[&[(u8, u8)]; CELL_COUNT]) -> Self {
        let mut neighbors = [NeighborSet::default(); CELL_COUNT];
        for (set, row) in neighbors.iter_mut().zip(table.iter()) {
            for &(r, c) in row.iter() {
                set.insert(Position::new(r, c));
            }
        }
        Self { neighbors }
    }

    /// Points joined to `pos` by a single line segment
    pub fn neighbors(&self, pos: Position) -> Result<NeighborSet, GameError> {
        let pos = pos.validate()?;
        Ok(self.neighbors[pos.index()])
    }

    /// True if a line joins `a` and `b` directly. Off-board points are never connected.
    pub fn is_connected(&self, a: Position, b: Position) -> bool {
        self.neighbors(a).map(|set| set.contains(b)).unwrap_or(false)
    }

    /// Number of undirected line segments
    pub fn edge_count(&self) -> usize {
        self.neighbors.iter().map(NeighborSet::len).sum::<usize>() / 2
    }

    /// Pairs (a, b) where b lists a as neighbor but a does not list b
    pub fn asymmetric_pairs(&self) -> Vec<(Position, Position)> {
        let mut pairs = Vec::new();
        for a in Position::all() {
            for b in self.neighbors[a.index()].iter() {
                if !self.neighbors[b.index()].contains(a) {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }

    pub fn is_symmetric(&self) -> bool {
        self.asymmetric_pairs().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(row: u8, col: u8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn test_traditional_graph_is_symmetric() {
        let graph = ConnectivityGraph::traditional();
        assert!(graph.is_symmetric(), "asymmetric: {:?}", graph.asymmetric_pairs());
    }

    #[test]
    fn test_edge_count() {
        // 40 orthogonal segments plus 16 diagonal ones
        assert_eq!(ConnectivityGraph::traditional().edge_count(), 56);
    }

    #[test]
    fn test_diagonals_only_on_even_points() {
        let graph = ConnectivityGraph::traditional();
        for a in Position::all() {
            for b in graph.neighbors(a).unwrap().iter() {
                let dr = a.row.abs_diff(b.row);
                let dc = a.col.abs_diff(b.col);
                assert!(dr <= 1 && dc <= 1 && dr + dc > 0, "{} -> {} is not one step", a, b);
                if dr == 1 && dc == 1 {
                    assert_eq!((a.row + a.col) % 2, 0, "diagonal from odd point {}", a);
                }
            }
        }
    }

    #[test]
    fn test_neighbor_counts() {
        let graph = ConnectivityGraph::traditional();
        let count = |r, c| graph.neighbors(p(r, c)).unwrap().len();

        // Corners: two orthogonal lines plus one diagonal into the board
        for corner in Position::CORNERS {
            assert_eq!(graph.neighbors(corner).unwrap().len(), 3);
        }
        // Inner cross points and the centre connect in all 8 directions
        for (r, c) in [(1, 1), (1, 3), (3, 1), (3, 3), (2, 2)] {
            assert_eq!(count(r, c), 8);
        }
        // Edge midpoints have no outward diagonal
        for (r, c) in [(0, 2), (2, 0), (2, 4), (4, 2)] {
            assert_eq!(count(r, c), 5);
        }
        assert_eq!(count(0, 1), 3);
        assert_eq!(count(1, 2), 4);
    }

    #[test]
    fn test_odd_points_not_diagonally_connected() {
        let graph = ConnectivityGraph::traditional();
        assert!(!graph.is_connected(p(0, 1), p(1, 2)));
        assert!(!graph.is_connected(p(1, 2), p(2, 3)));
        assert!(graph.is_connected(p(1, 1), p(2, 2)));
    }

    #[test]
    fn test_out_of_range_lookup() {
        let graph = ConnectivityGraph::traditional();
        assert_eq!(
            graph.neighbors(p(5, 2)),
            Err(GameError::InvalidPosition(p(5, 2)))
        );
        assert!(!graph.is_connected(p(4, 4), p(5, 5)));
    }
}
