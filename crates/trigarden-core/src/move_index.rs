//! Indexed collection of one player's legal moves.
//!
//! Moves are partitioned by kind so that "all flower moves" and "all ditch
//! moves" are ready-made sets, and a symmetric pair index answers "which
//! flowers can still be combined with this one" without scanning the full
//! collection. Every operation is constant time or proportional to the
//! degree of the flower involved, never to the size of the move universe.

use crate::lattice::Flower;
use crate::moves::Move;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// The legal moves of a single player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveIndex {
    /// All `PlaceFlowers` moves
    flower_moves: HashSet<Move>,
    /// All `PlaceDitch` moves
    ditch_moves: HashSet<Move>,
    /// `End` and `Surrender`
    other_moves: HashSet<Move>,
    /// `flower_pairs[f]` is exactly the set of partners `g` for which
    /// `PlaceFlowers(f, g)` is currently present. Keys with no partners are
    /// dropped, so key presence doubles as "has any flower move".
    flower_pairs: HashMap<Flower, HashSet<Flower>>,
}

impl MoveIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Mutation ====================

    /// Insert a move. Returns `true` iff it was not already present.
    ///
    /// A pair of two equal flowers is not a move and is ignored.
    pub fn add(&mut self, mv: Move) -> bool {
        match mv {
            Move::PlaceFlowers(a, b) => {
                if a == b || !self.flower_moves.insert(mv) {
                    return false;
                }
                self.flower_pairs.entry(a).or_default().insert(b);
                self.flower_pairs.entry(b).or_default().insert(a);
                true
            }
            Move::PlaceDitch(_) => self.ditch_moves.insert(mv),
            Move::End | Move::Surrender => self.other_moves.insert(mv),
        }
    }

    /// Remove a move. Returns `true` iff it was present.
    pub fn remove(&mut self, mv: &Move) -> bool {
        match mv {
            Move::PlaceFlowers(a, b) => {
                if !self.flower_moves.remove(mv) {
                    return false;
                }
                self.unlink(a, b);
                self.unlink(b, a);
                true
            }
            Move::PlaceDitch(_) => self.ditch_moves.remove(mv),
            Move::End | Move::Surrender => self.other_moves.remove(mv),
        }
    }

    /// Remove every flower move that references the given flower.
    ///
    /// Returns `true` iff at least one move was removed.
    pub fn remove_all_containing(&mut self, flower: &Flower) -> bool {
        let Some(partners) = self.flower_pairs.remove(flower) else {
            return false;
        };
        for partner in partners {
            self.flower_moves.remove(&Move::pair(*flower, partner));
            self.unlink(&partner, flower);
        }
        true
    }

    fn unlink(&mut self, from: &Flower, to: &Flower) {
        if let Some(partners) = self.flower_pairs.get_mut(from) {
            partners.remove(to);
            if partners.is_empty() {
                self.flower_pairs.remove(from);
            }
        }
    }

    // ==================== Queries ====================

    /// Whether the move is present
    pub fn contains(&self, mv: &Move) -> bool {
        match mv {
            Move::PlaceFlowers(_, _) => self.flower_moves.contains(mv),
            Move::PlaceDitch(_) => self.ditch_moves.contains(mv),
            Move::End | Move::Surrender => self.other_moves.contains(mv),
        }
    }

    /// Whether any flower move references the given flower
    pub fn contains_any_with(&self, flower: &Flower) -> bool {
        self.flower_pairs.contains_key(flower)
    }

    /// The flowers that can still be paired with the given flower
    pub fn combinable_with(&self, flower: &Flower) -> HashSet<Flower> {
        self.flower_pairs.get(flower).cloned().unwrap_or_default()
    }

    /// All flower moves referencing the given flower
    pub fn moves_with(&self, flower: &Flower) -> HashSet<Move> {
        match self.flower_pairs.get(flower) {
            Some(partners) => partners
                .iter()
                .map(|partner| Move::pair(*flower, *partner))
                .collect(),
            None => HashSet::new(),
        }
    }

    /// Every flower that still appears in at least one flower move
    pub fn candidate_flowers(&self) -> HashSet<Flower> {
        self.flower_pairs.keys().copied().collect()
    }

    /// All `PlaceFlowers` moves
    pub fn flower_moves(&self) -> &HashSet<Move> {
        &self.flower_moves
    }

    /// All `PlaceDitch` moves
    pub fn ditch_moves(&self) -> &HashSet<Move> {
        &self.ditch_moves
    }

    /// `End` and `Surrender` moves
    pub fn other_moves(&self) -> &HashSet<Move> {
        &self.other_moves
    }

    /// Total number of moves across all partitions
    pub fn len(&self) -> usize {
        self.flower_moves.len() + self.ditch_moves.len() + self.other_moves.len()
    }

    /// Whether no move is present
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All moves: flower moves first, then ditch moves, then the rest.
    ///
    /// No order is guaranteed within a partition.
    pub fn iter(&self) -> impl Iterator<Item = &Move> {
        self.flower_moves
            .iter()
            .chain(self.ditch_moves.iter())
            .chain(self.other_moves.iter())
    }

    /// Check that the pair index and the flower-move partition agree.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut expected: HashMap<Flower, HashSet<Flower>> = HashMap::new();
        for mv in &self.flower_moves {
            let Move::PlaceFlowers(a, b) = mv else {
                panic!("non-pair move in the flower partition: {mv:?}");
            };
            expected.entry(*a).or_default().insert(*b);
            expected.entry(*b).or_default().insert(*a);
        }
        assert_eq!(self.flower_pairs, expected, "pair index out of sync");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{Ditch, Position};

    fn flower(i: i32, j: i32) -> Flower {
        Flower::new(
            Position::new(i, j),
            Position::new(i + 1, j),
            Position::new(i, j + 1),
        )
    }

    fn ditch(i: i32, j: i32) -> Ditch {
        Ditch::new(Position::new(i, j), Position::new(i + 1, j))
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut index = MoveIndex::new();
        let mv = Move::pair(flower(1, 1), flower(2, 1));

        assert!(index.add(mv));
        assert!(!index.add(mv));
        assert!(!index.add(Move::pair(flower(2, 1), flower(1, 1))));
        assert_eq!(index.len(), 1);
        index.assert_consistent();
    }

    #[test]
    fn test_degenerate_pair_is_rejected() {
        let mut index = MoveIndex::new();
        assert!(!index.add(Move::PlaceFlowers(flower(1, 1), flower(1, 1))));
        assert!(index.is_empty());
    }

    #[test]
    fn test_add_maintains_pair_index_symmetrically() {
        let mut index = MoveIndex::new();
        let a = flower(1, 1);
        let b = flower(2, 1);
        let c = flower(1, 2);

        index.add(Move::pair(a, b));
        index.add(Move::pair(a, c));

        assert!(index.contains_any_with(&a));
        assert_eq!(index.combinable_with(&a), [b, c].into_iter().collect());
        assert_eq!(index.combinable_with(&b), [a].into_iter().collect());
        assert_eq!(
            index.moves_with(&a),
            [Move::pair(a, b), Move::pair(a, c)].into_iter().collect()
        );
        index.assert_consistent();
    }

    #[test]
    fn test_remove_drops_emptied_flowers() {
        let mut index = MoveIndex::new();
        let a = flower(1, 1);
        let b = flower(2, 1);

        index.add(Move::pair(a, b));
        assert!(index.remove(&Move::pair(b, a)));
        assert!(!index.remove(&Move::pair(a, b)));

        assert!(!index.contains_any_with(&a));
        assert!(!index.contains_any_with(&b));
        assert!(index.candidate_flowers().is_empty());
        index.assert_consistent();
    }

    #[test]
    fn test_remove_all_containing() {
        let mut index = MoveIndex::new();
        let a = flower(1, 1);
        let b = flower(2, 1);
        let c = flower(1, 2);

        index.add(Move::pair(a, b));
        index.add(Move::pair(a, c));
        index.add(Move::pair(b, c));

        assert!(index.remove_all_containing(&a));
        assert!(!index.remove_all_containing(&a));

        assert!(!index.contains_any_with(&a));
        assert!(index.contains(&Move::pair(b, c)));
        assert_eq!(index.flower_moves().len(), 1);
        index.assert_consistent();
    }

    #[test]
    fn test_partitions_and_len() {
        let mut index = MoveIndex::new();
        index.add(Move::pair(flower(1, 1), flower(2, 1)));
        index.add(Move::PlaceDitch(ditch(1, 1)));
        index.add(Move::PlaceDitch(ditch(1, 2)));
        index.add(Move::Surrender);
        index.add(Move::End);

        assert_eq!(index.flower_moves().len(), 1);
        assert_eq!(index.ditch_moves().len(), 2);
        assert_eq!(index.other_moves().len(), 2);
        assert_eq!(
            index.len(),
            index.flower_moves().len() + index.ditch_moves().len() + index.other_moves().len()
        );
    }

    #[test]
    fn test_iteration_order_is_by_category() {
        let mut index = MoveIndex::new();
        index.add(Move::Surrender);
        index.add(Move::PlaceDitch(ditch(1, 1)));
        index.add(Move::pair(flower(1, 1), flower(2, 1)));

        let kinds: Vec<u8> = index
            .iter()
            .map(|mv| match mv {
                Move::PlaceFlowers(_, _) => 0,
                Move::PlaceDitch(_) => 1,
                Move::End | Move::Surrender => 2,
            })
            .collect();
        assert_eq!(kinds, vec![0, 1, 2]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut index = MoveIndex::new();
        let a = flower(1, 1);
        let b = flower(2, 1);
        index.add(Move::pair(a, b));

        let copy = index.clone();
        index.remove_all_containing(&a);

        assert!(index.is_empty());
        assert!(copy.contains(&Move::pair(a, b)));
        assert_eq!(copy.combinable_with(&a), [b].into_iter().collect());
    }
}
