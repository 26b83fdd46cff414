//! The sized game board.
//!
//! A board of size `N` is the triangular subdivision of a large triangle into
//! `N * N` unit cells. This module owns:
//! - the bounds predicate for positions, flowers, and ditches
//! - the fixed enumeration of every cell on the board
//! - bounds-filtered neighbor queries that everything above builds on
//!
//! All queries are pure integer functions of the board size. Out-of-bounds
//! arithmetic is filtered here, never reported as an error; every boundary
//! cell of every query hits that case.

use crate::lattice::{Ditch, Flower, Position};
use serde::{Deserialize, Serialize};

/// The playable area for one game, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// Number of cell rows along each side of the outer triangle
    size: i32,
    /// Every cell of the board, in enumeration order
    flowers: Vec<Flower>,
}

impl Board {
    /// Create a board of the given size and enumerate its cells.
    ///
    /// Row `i` contributes `N - i + 1` upright cells and, where the next row
    /// exists above them, the interleaved inverted cells.
    pub fn new(size: i32) -> Self {
        assert!(size >= 1, "board size must be at least 1");

        let mut flowers = Vec::with_capacity((size * size) as usize);
        for i in 1..=size {
            for j in 1..=(size - i + 1) {
                flowers.push(Flower::new(
                    Position::new(i, j),
                    Position::new(i + 1, j),
                    Position::new(i, j + 1),
                ));
                if i + j <= size {
                    flowers.push(Flower::new(
                        Position::new(i + 1, j + 1),
                        Position::new(i + 1, j),
                        Position::new(i, j + 1),
                    ));
                }
            }
        }

        Self { size, flowers }
    }

    /// The board size
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Every cell of the board, in enumeration order
    pub fn flowers(&self) -> &[Flower] {
        &self.flowers
    }

    // ==================== Bounds ====================

    /// Whether a lattice point lies on the board
    pub fn contains(&self, position: &Position) -> bool {
        position.column > 0 && position.row > 0 && position.column + position.row < self.size + 3
    }

    /// Whether a flower is a cell of this board
    pub fn contains_flower(&self, flower: &Flower) -> bool {
        flower.orientation().is_some() && flower.corners().iter().all(|p| self.contains(p))
    }

    /// Whether a ditch runs between two board points
    pub fn contains_ditch(&self, ditch: &Ditch) -> bool {
        ditch.is_span() && ditch.ends().iter().all(|p| self.contains(p))
    }

    // ==================== Neighbor queries ====================

    /// The up-to-6 on-board lattice points around a position, in rotational
    /// order.
    pub fn positions_around(&self, position: &Position) -> Vec<Position> {
        position
            .neighbors()
            .into_iter()
            .filter(|p| self.contains(p))
            .collect()
    }

    /// All cells that have the given position as a corner.
    ///
    /// Each cell is formed by the position and a cyclically consecutive pair
    /// of lattice directions.
    pub fn flowers_touching(&self, position: &Position) -> Vec<Flower> {
        if !self.contains(position) {
            return Vec::new();
        }
        let around = position.neighbors();
        let mut touching = Vec::with_capacity(6);
        for i in 0..around.len() {
            let a = around[i];
            let b = around[(i + 1) % around.len()];
            if self.contains(&a) && self.contains(&b) {
                touching.push(Flower::new(*position, a, b));
            }
        }
        touching
    }

    /// One ditch from the position to each on-board neighbor
    pub fn ditches_around(&self, position: &Position) -> Vec<Ditch> {
        self.positions_around(position)
            .into_iter()
            .map(|neighbor| Ditch::new(*position, neighbor))
            .collect()
    }

    /// The up-to-3 cells sharing a full edge with the given flower
    pub fn edge_neighbors(&self, flower: &Flower) -> Vec<Flower> {
        flower
            .mirrored()
            .into_iter()
            .filter(|f| self.contains_flower(f))
            .collect()
    }

    /// All cells sharing at least a corner with the given flower.
    ///
    /// Edge neighbors come first, then the remaining cells found by walking
    /// around each corner, deduplicated, the flower itself excluded.
    pub fn corner_neighbors(&self, flower: &Flower) -> Vec<Flower> {
        let mut neighbors = self.edge_neighbors(flower);
        for corner in flower.corners() {
            for touching in self.flowers_touching(&corner) {
                if touching != *flower && !neighbors.contains(&touching) {
                    neighbors.push(touching);
                }
            }
        }
        neighbors
    }

    /// The up-to-2 cells lying on either side of a ditch
    pub fn flowers_beside(&self, ditch: &Ditch) -> Vec<Flower> {
        let [a, b] = ditch.ends();
        let mut beside = Vec::with_capacity(2);
        for third in a.neighbors() {
            if third.is_adjacent_to(&b) {
                let candidate = Flower::new(a, b, third);
                if self.contains_flower(&candidate) {
                    beside.push(candidate);
                }
            }
        }
        beside
    }
}
