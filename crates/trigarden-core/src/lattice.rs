//! Triangular lattice coordinate system.
//!
//! This module provides the foundational coordinate types for the triangular
//! game board:
//! - `Position`: identifies a lattice point (a corner of the triangulation)
//! - `Flower`: identifies a unit triangle, the atomic cell of territory
//! - `Ditch`: identifies an edge between two adjacent lattice points
//!
//! Positions are 1-based `(column, row)` pairs. All arithmetic here is raw,
//! without bounds checks; the [`crate::board::Board`] filters results to the
//! playable area. Flowers and ditches store their corners sorted, so equality
//! and hashing never depend on the order the corners were supplied in.

use serde::{Deserialize, Serialize};

/// Orientation of a unit triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Tip pointing away from the board's long edge
    Upright,
    /// Mirror image of an upright triangle
    Inverted,
}

/// A lattice point, 1-based
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct Position {
    /// Column, counted from the left edge
    pub column: i32,
    /// Row, counted from the bottom edge
    pub row: i32,
}

impl Position {
    /// The six lattice directions in rotational order.
    ///
    /// Consecutive entries (cyclically) are themselves adjacent, which is what
    /// lets [`crate::board::Board::flowers_touching`] form triangles by
    /// pairing neighbors.
    pub const DIRECTIONS: [(i32, i32); 6] = [(1, 0), (0, 1), (-1, 1), (-1, 0), (0, -1), (1, -1)];

    /// Create a new position
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// The position one step away in the given direction
    pub const fn offset(&self, delta: (i32, i32)) -> Position {
        Position::new(self.column + delta.0, self.row + delta.1)
    }

    /// The six surrounding lattice points in rotational order, unfiltered
    pub fn neighbors(&self) -> [Position; 6] {
        Self::DIRECTIONS.map(|d| self.offset(d))
    }

    /// Whether the two positions share a lattice edge
    pub fn is_adjacent_to(&self, other: &Position) -> bool {
        let delta = (other.column - self.column, other.row - self.row);
        Self::DIRECTIONS.contains(&delta)
    }
}

/// A single triangular cell, identified by its three corners.
///
/// Corners are stored sorted, so two flowers built from the same corners in
/// any order compare and hash equal. The constructor is total: a corner
/// triple that does not form a unit triangle yields a flower whose
/// [`orientation`](Flower::orientation) is `None`; such a value can never be
/// part of a board's cell list, so it is harmless to hold one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Flower {
    corners: [Position; 3],
}

impl Flower {
    /// Create a flower from its three corners, in any order
    pub fn new(a: Position, b: Position, c: Position) -> Self {
        let mut corners = [a, b, c];
        corners.sort();
        Self { corners }
    }

    /// The three corners, in canonical (sorted) order
    pub fn corners(&self) -> [Position; 3] {
        self.corners
    }

    /// Whether the given position is one of this flower's corners
    pub fn has_corner(&self, position: &Position) -> bool {
        self.corners.contains(position)
    }

    /// The orientation of this flower, or `None` if the corners do not form
    /// a unit triangle of the lattice.
    pub fn orientation(&self) -> Option<Orientation> {
        let [a, b, c] = self.corners;
        if b == a.offset((0, 1)) && c == a.offset((1, 0)) {
            Some(Orientation::Upright)
        } else if b == a.offset((1, -1)) && c == a.offset((1, 0)) {
            Some(Orientation::Inverted)
        } else {
            None
        }
    }

    /// The three edges of this flower
    pub fn edges(&self) -> [Ditch; 3] {
        let [a, b, c] = self.corners;
        [Ditch::new(a, b), Ditch::new(a, c), Ditch::new(b, c)]
    }

    /// The three mirror triangles, unfiltered.
    ///
    /// Each is obtained by reflecting one corner through the midpoint of the
    /// opposite edge: the reflection of `c` over the edge `(a, b)` is
    /// `a + b - c`, which keeps everything in integer arithmetic.
    pub fn mirrored(&self) -> [Flower; 3] {
        let [a, b, c] = self.corners;
        [
            Flower::new(b, c, Self::reflect(b, c, a)),
            Flower::new(a, c, Self::reflect(a, c, b)),
            Flower::new(a, b, Self::reflect(a, b, c)),
        ]
    }

    fn reflect(a: Position, b: Position, over: Position) -> Position {
        Position::new(a.column + b.column - over.column, a.row + b.row - over.row)
    }

    /// Whether the two flowers share a full edge (two corners)
    pub fn shares_edge_with(&self, other: &Flower) -> bool {
        self != other && self.corners.iter().filter(|p| other.has_corner(p)).count() == 2
    }
}

/// A claimed edge between two adjacent lattice points.
///
/// Endpoints are stored sorted for order-independent equality. Adjacency of
/// the endpoints is a query rather than a constructor requirement; a
/// non-adjacent pair is simply never offered as a move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Ditch {
    ends: [Position; 2],
}

impl Ditch {
    /// Create a ditch from its two endpoints, in any order
    pub fn new(a: Position, b: Position) -> Self {
        let mut ends = [a, b];
        ends.sort();
        Self { ends }
    }

    /// The two endpoints, in canonical (sorted) order
    pub fn ends(&self) -> [Position; 2] {
        self.ends
    }

    /// Whether the given position is one of this ditch's endpoints
    pub fn has_end(&self, position: &Position) -> bool {
        self.ends.contains(position)
    }

    /// Whether the endpoints are distinct and lattice-adjacent
    pub fn is_span(&self) -> bool {
        self.ends[0].is_adjacent_to(&self.ends[1])
    }

    /// Whether the two ditches share an endpoint
    pub fn shares_end_with(&self, other: &Ditch) -> bool {
        self.ends.iter().any(|p| other.has_end(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn pos(column: i32, row: i32) -> Position {
        Position::new(column, row)
    }

    #[test]
    fn test_position_neighbors_are_adjacent() {
        let center = pos(3, 3);
        let neighbors = center.neighbors();

        let unique: HashSet<_> = neighbors.iter().collect();
        assert_eq!(unique.len(), 6);

        for neighbor in &neighbors {
            assert!(center.is_adjacent_to(neighbor));
            assert!(neighbor.is_adjacent_to(&center));
        }
    }

    #[test]
    fn test_position_not_adjacent_to_itself() {
        let p = pos(2, 2);
        assert!(!p.is_adjacent_to(&p));
        assert!(!p.is_adjacent_to(&pos(4, 2)));
        assert!(!p.is_adjacent_to(&pos(3, 3)));
    }

    #[test]
    fn test_flower_corner_order_is_irrelevant() {
        let a = pos(1, 1);
        let b = pos(2, 1);
        let c = pos(1, 2);

        let f1 = Flower::new(a, b, c);
        let f2 = Flower::new(c, a, b);
        let f3 = Flower::new(b, c, a);

        assert_eq!(f1, f2);
        assert_eq!(f2, f3);

        let mut set = HashSet::new();
        set.insert(f1);
        set.insert(f2);
        set.insert(f3);
        assert_eq!(set.len(), 1, "Equal flowers must hash equal");
    }

    #[test]
    fn test_flower_orientation() {
        let upright = Flower::new(pos(1, 1), pos(2, 1), pos(1, 2));
        assert_eq!(upright.orientation(), Some(Orientation::Upright));

        let inverted = Flower::new(pos(2, 2), pos(2, 1), pos(1, 2));
        assert_eq!(inverted.orientation(), Some(Orientation::Inverted));

        let degenerate = Flower::new(pos(1, 1), pos(3, 1), pos(1, 3));
        assert_eq!(degenerate.orientation(), None);
    }

    #[test]
    fn test_flower_edges_are_spans() {
        let flower = Flower::new(pos(2, 2), pos(3, 2), pos(2, 3));
        for edge in flower.edges() {
            assert!(edge.is_span());
            let [x, y] = edge.ends();
            assert!(flower.has_corner(&x) && flower.has_corner(&y));
        }
    }

    #[test]
    fn test_mirrored_neighbors_of_upright_are_inverted() {
        let upright = Flower::new(pos(2, 2), pos(3, 2), pos(2, 3));
        for mirror in upright.mirrored() {
            assert_eq!(mirror.orientation(), Some(Orientation::Inverted));
            assert!(mirror.shares_edge_with(&upright));
        }
    }

    #[test]
    fn test_mirrored_neighbors_of_inverted_are_upright() {
        let inverted = Flower::new(pos(3, 3), pos(3, 2), pos(2, 3));
        for mirror in inverted.mirrored() {
            assert_eq!(mirror.orientation(), Some(Orientation::Upright));
            assert!(mirror.shares_edge_with(&inverted));
        }
    }

    #[test]
    fn test_ditch_end_order_is_irrelevant() {
        let d1 = Ditch::new(pos(1, 2), pos(2, 2));
        let d2 = Ditch::new(pos(2, 2), pos(1, 2));
        assert_eq!(d1, d2);

        let mut set = HashSet::new();
        set.insert(d1);
        set.insert(d2);
        assert_eq!(set.len(), 1, "Equal ditches must hash equal");
    }

    #[test]
    fn test_ditch_span_and_shared_ends() {
        let d = Ditch::new(pos(2, 2), pos(3, 2));
        assert!(d.is_span());
        assert!(!Ditch::new(pos(2, 2), pos(4, 2)).is_span());

        assert!(d.shares_end_with(&Ditch::new(pos(3, 2), pos(3, 1))));
        assert!(!d.shares_end_with(&Ditch::new(pos(1, 3), pos(2, 3))));
    }
}
