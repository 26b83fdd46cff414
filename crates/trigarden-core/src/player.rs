//! Player colors and per-player records.

use crate::game::GARDEN_CAP;
use crate::lattice::{Ditch, Flower};
use crate::move_index::MoveIndex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The two player colors. Red always moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
}

impl PlayerColor {
    /// Both colors, in turn order
    pub const ALL: [PlayerColor; 2] = [PlayerColor::Red, PlayerColor::Blue];

    /// The other color
    pub fn opponent(&self) -> PlayerColor {
        match self {
            PlayerColor::Red => PlayerColor::Blue,
            PlayerColor::Blue => PlayerColor::Red,
        }
    }

    /// Index into per-player arrays
    pub(crate) fn index(&self) -> usize {
        match self {
            PlayerColor::Red => 0,
            PlayerColor::Blue => 1,
        }
    }
}

/// One player's side of the game: claims, legal moves, and points.
///
/// Records are owned exclusively by the game state; everything outside the
/// engine reads them through `&` access or the [`crate::viewer::Viewer`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// This player's color
    pub color: PlayerColor,
    /// Flowers claimed so far
    pub(crate) flowers: HashSet<Flower>,
    /// Ditches claimed so far
    pub(crate) ditches: HashSet<Ditch>,
    /// Moves this player may currently submit
    pub(crate) legal_moves: MoveIndex,
    /// Current points
    pub(crate) score: i32,
}

impl Player {
    pub(crate) fn new(color: PlayerColor) -> Self {
        Self {
            color,
            flowers: HashSet::new(),
            ditches: HashSet::new(),
            legal_moves: MoveIndex::new(),
            score: 0,
        }
    }

    /// Flowers claimed so far
    pub fn flowers(&self) -> &HashSet<Flower> {
        &self.flowers
    }

    /// Ditches claimed so far
    pub fn ditches(&self) -> &HashSet<Ditch> {
        &self.ditches
    }

    /// Moves this player may currently submit
    pub fn legal_moves(&self) -> &MoveIndex {
        &self.legal_moves
    }

    /// Current points
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Recompute points from the sizes of this player's gardens.
    ///
    /// A garden scores its size; a completed garden scores double.
    pub(crate) fn rescore(&mut self, garden_sizes: &[usize]) {
        self.score = garden_sizes
            .iter()
            .map(|&cells| {
                if cells == GARDEN_CAP {
                    2 * cells as i32
                } else {
                    cells as i32
                }
            })
            .sum();
    }
}
