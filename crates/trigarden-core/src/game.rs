//! Core game state machine.
//!
//! `GameState` owns both players' claims and legal moves, applies moves, and
//! keeps the legal-move indices exact as the game evolves. The full universe
//! of flower-pair moves is built once at construction and only ever pruned;
//! the alternative of recomputing legality from scratch every turn was
//! rejected because the interesting queries ("which partners remain for this
//! flower") have to be cheap for AI callers that probe many moves per turn.

use crate::board::Board;
use crate::lattice::{Ditch, Flower};
use crate::moves::{Move, Status};
use crate::player::{Player, PlayerColor};
use crate::viewer::Viewer;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Maximum number of flowers in a garden
pub const GARDEN_CAP: usize = 4;

/// The complete state of one game.
///
/// Cloning produces a fully independent copy, sharing no mutable state with
/// the original; a clone is the supported way to explore hypothetical
/// continuations, there is no in-place undo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// The playable area, fixed at construction
    board: Board,
    /// Per-color records, indexed by `PlayerColor::index`
    players: [Player; 2],
    /// Whose turn it is
    active: PlayerColor,
    /// Current outcome state
    status: Status,
    /// Every move submitted while the game was running, in order
    history: Vec<Move>,
}

impl GameState {
    /// Create a game on a fresh board of the given size.
    ///
    /// Both players start with every unordered pair of distinct flowers as a
    /// legal move, plus `Surrender`. Ditch moves only appear once flowers are
    /// placed next to open edges. Red moves first.
    pub fn new(size: i32) -> Self {
        let board = Board::new(size);
        let mut players = [
            Player::new(PlayerColor::Red),
            Player::new(PlayerColor::Blue),
        ];

        let flowers = board.flowers();
        for player in &mut players {
            for (i, &a) in flowers.iter().enumerate() {
                for &b in &flowers[i + 1..] {
                    player.legal_moves.add(Move::pair(a, b));
                }
            }
            player.legal_moves.add(Move::Surrender);
        }

        Self {
            board,
            players,
            active: PlayerColor::Red,
            status: Status::Ok,
            history: Vec::new(),
        }
    }

    // ==================== Accessors ====================

    /// The board this game is played on
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The board size
    pub fn size(&self) -> i32 {
        self.board.size()
    }

    /// Current outcome state
    pub fn status(&self) -> Status {
        self.status
    }

    /// The color whose turn it is
    pub fn active_color(&self) -> PlayerColor {
        self.active
    }

    /// The color waiting for its turn
    pub fn inactive_color(&self) -> PlayerColor {
        self.active.opponent()
    }

    /// One player's record
    pub fn player(&self, color: PlayerColor) -> &Player {
        &self.players[color.index()]
    }

    /// Read-only projection for players, UIs, and AIs
    pub fn viewer(&self) -> Viewer<'_> {
        Viewer::new(self)
    }

    /// Every move submitted while the game was running, in submission order.
    ///
    /// A rejected move that voided the game is included, so replaying the
    /// history onto a fresh board of the same size reproduces this state
    /// exactly, terminal status and all.
    pub fn moves(&self) -> &[Move] {
        &self.history
    }

    /// The color that claimed the given flower, if any
    pub fn color_of_flower(&self, flower: &Flower) -> Option<PlayerColor> {
        PlayerColor::ALL
            .into_iter()
            .find(|color| self.players[color.index()].flowers.contains(flower))
    }

    /// The color that claimed the given ditch, if any
    pub fn color_of_ditch(&self, ditch: &Ditch) -> Option<PlayerColor> {
        PlayerColor::ALL
            .into_iter()
            .find(|color| self.players[color.index()].ditches.contains(ditch))
    }

    /// The garden containing the given flower, or empty if it is unclaimed
    pub fn garden_of(&self, flower: &Flower) -> HashSet<Flower> {
        match self.color_of_flower(flower) {
            Some(color) => self.garden_of_color(color, flower),
            None => HashSet::new(),
        }
    }

    // ==================== Applying a move ====================

    /// Apply a move for the active player and return the resulting status.
    ///
    /// A move that is not in the active player's legal set voids the game:
    /// the status becomes `Illegal` and no claim is recorded. Malformed
    /// moves, such as a pair referencing an off-board flower, take the same
    /// path, since they can never be members of the legal set. Once the
    /// status is terminal the state is immutable and further calls only
    /// echo it.
    pub fn make(&mut self, mv: Move) -> Status {
        if self.status.is_over() {
            return self.status;
        }

        let mover = self.active;
        self.history.push(mv);
        if !self.players[mover.index()].legal_moves.contains(&mv) {
            self.status = Status::Illegal;
            return self.status;
        }

        match mv {
            Move::PlaceFlowers(a, b) => {
                let record = &mut self.players[mover.index()];
                record.flowers.insert(a);
                record.flowers.insert(b);
                self.after_flowers_placed(mover, [a, b]);

                let sizes = self.garden_sizes(mover);
                self.players[mover.index()].rescore(&sizes);
            }
            Move::PlaceDitch(ditch) => {
                self.players[mover.index()].ditches.insert(ditch);
                self.after_ditch_placed(mover, ditch);
            }
            Move::End => {
                let red = self.players[PlayerColor::Red.index()].score;
                let blue = self.players[PlayerColor::Blue.index()].score;
                self.status = match red.cmp(&blue) {
                    Ordering::Greater => Status::RedWin,
                    Ordering::Less => Status::BlueWin,
                    Ordering::Equal => Status::Draw,
                };
                return self.status;
            }
            Move::Surrender => {
                self.status = Status::win_for(mover.opponent());
                return self.status;
            }
        }

        self.offer_end_moves();
        self.active = mover.opponent();
        self.status
    }

    // ==================== Incremental legality ====================

    /// Bookkeeping after the mover claimed two flowers.
    fn after_flowers_placed(&mut self, mover: PlayerColor, placed: [Flower; 2]) {
        for flower in placed {
            // A claimed flower can never again be part of anyone's move.
            for color in PlayerColor::ALL {
                self.players[color.index()]
                    .legal_moves
                    .remove_all_containing(&flower);
            }
            // Outstanding ditch offers on its edges are dead for everyone.
            for edge in flower.edges() {
                let mv = Move::PlaceDitch(edge);
                for color in PlayerColor::ALL {
                    self.players[color.index()].legal_moves.remove(&mv);
                }
            }
        }
        for flower in placed {
            self.prune_overflowing_pairs(mover, flower);
            self.offer_ditches(mover, &flower);
        }
    }

    /// Remove the mover's pair moves that would grow the garden around the
    /// just-placed flower past the cap.
    ///
    /// Each candidate next to the garden is claimed hypothetically, checked,
    /// and reverted. The check runs a second ply on top of the first: one
    /// move claims two flowers, so a pair that is harmless one flower at a
    /// time can still overflow when both land in the same garden.
    fn prune_overflowing_pairs(&mut self, mover: PlayerColor, flower: Flower) {
        let garden = self.garden_of_color(mover, &flower);

        for first in self.frontier(mover, &garden) {
            self.players[mover.index()].flowers.insert(first);
            let extended = self.garden_of_color(mover, &first);

            if self.violates_garden_rules(mover, &extended) {
                self.players[mover.index()].flowers.remove(&first);
                self.players[mover.index()]
                    .legal_moves
                    .remove_all_containing(&first);
                continue;
            }

            for second in self.frontier(mover, &extended) {
                self.players[mover.index()].flowers.insert(second);
                let doubled = self.garden_of_color(mover, &second);
                let violates = self.violates_garden_rules(mover, &doubled);
                self.players[mover.index()].flowers.remove(&second);

                if violates {
                    self.players[mover.index()]
                        .legal_moves
                        .remove(&Move::pair(first, second));
                }
            }

            self.players[mover.index()].flowers.remove(&first);
        }
    }

    /// Offer the mover the open ditches around a just-placed flower.
    ///
    /// A ditch qualifies unless it would retrace one of the flower's own
    /// edges, is already claimed, or already has a claimed flower on either
    /// side. The last condition keeps offers on the exposed perimeter only;
    /// claiming a flower later revokes offers on its edges for both colors.
    fn offer_ditches(&mut self, mover: PlayerColor, flower: &Flower) {
        let mut offers: Vec<Ditch> = Vec::new();
        for corner in flower.corners() {
            for ditch in self.board.ditches_around(&corner) {
                let [x, y] = ditch.ends();
                if flower.has_corner(&x) && flower.has_corner(&y) {
                    continue;
                }
                if self.color_of_ditch(&ditch).is_some() {
                    continue;
                }
                let blocked = self
                    .board
                    .flowers_beside(&ditch)
                    .iter()
                    .any(|beside| self.color_of_flower(beside).is_some());
                if !blocked {
                    offers.push(ditch);
                }
            }
        }

        let legal = &mut self.players[mover.index()].legal_moves;
        for ditch in offers {
            legal.add(Move::PlaceDitch(ditch));
        }
    }

    /// Bookkeeping after the mover claimed a ditch.
    fn after_ditch_placed(&mut self, mover: PlayerColor, ditch: Ditch) {
        // The ditch permanently blocks flower placement on either side.
        for flower in self.board.flowers_beside(&ditch) {
            for color in PlayerColor::ALL {
                self.players[color.index()]
                    .legal_moves
                    .remove_all_containing(&flower);
            }
        }

        // A position anchors at most one claimed ditch.
        let mut stale: Vec<Move> = Vec::new();
        for end in ditch.ends() {
            for other in self.board.ditches_around(&end) {
                stale.push(Move::PlaceDitch(other));
            }
        }
        for mv in stale {
            self.players[mover.index()].legal_moves.remove(&mv);
        }

        // The claimed ditch itself is gone from both sides.
        for color in PlayerColor::ALL {
            self.players[color.index()]
                .legal_moves
                .remove(&Move::PlaceDitch(ditch));
        }
    }

    /// A player who has run out of flower placements but still holds ditch
    /// options must be offered a way to end the game.
    fn offer_end_moves(&mut self) {
        for color in PlayerColor::ALL {
            let legal = &mut self.players[color.index()].legal_moves;
            if legal.flower_moves().is_empty() && !legal.ditch_moves().is_empty() {
                legal.add(Move::End);
            }
        }
    }

    // ==================== Gardens ====================

    /// The connected component of same-color claimed flowers reachable from
    /// the given flower, or empty if that color has not claimed it.
    pub(crate) fn garden_of_color(&self, color: PlayerColor, flower: &Flower) -> HashSet<Flower> {
        let claimed = &self.players[color.index()].flowers;
        let mut garden = HashSet::new();
        if !claimed.contains(flower) {
            return garden;
        }

        garden.insert(*flower);
        let mut pending = vec![*flower];
        while let Some(current) = pending.pop() {
            for neighbor in self.board.edge_neighbors(&current) {
                if claimed.contains(&neighbor) && garden.insert(neighbor) {
                    pending.push(neighbor);
                }
            }
        }
        garden
    }

    /// Sizes of all of a color's gardens
    fn garden_sizes(&self, color: PlayerColor) -> Vec<usize> {
        let claimed = &self.players[color.index()].flowers;
        let mut seen: HashSet<Flower> = HashSet::new();
        let mut sizes = Vec::new();
        for flower in claimed {
            if seen.contains(flower) {
                continue;
            }
            let garden = self.garden_of_color(color, flower);
            sizes.push(garden.len());
            seen.extend(garden);
        }
        sizes
    }

    /// Whether a (possibly hypothetical) garden breaks the size rules: over
    /// the cap, or exactly at the cap while corner-touching another full
    /// garden of the same color.
    fn violates_garden_rules(&self, color: PlayerColor, garden: &HashSet<Flower>) -> bool {
        if garden.len() > GARDEN_CAP {
            return true;
        }
        garden.len() == GARDEN_CAP && self.touches_other_full_garden(color, garden)
    }

    fn touches_other_full_garden(&self, color: PlayerColor, garden: &HashSet<Flower>) -> bool {
        let claimed = &self.players[color.index()].flowers;
        let mut checked: HashSet<Flower> = HashSet::new();
        for flower in garden {
            for neighbor in self.board.corner_neighbors(flower) {
                if garden.contains(&neighbor)
                    || !claimed.contains(&neighbor)
                    || checked.contains(&neighbor)
                {
                    continue;
                }
                let other = self.garden_of_color(color, &neighbor);
                if other.len() == GARDEN_CAP {
                    return true;
                }
                checked.extend(other);
            }
        }
        false
    }

    /// Unclaimed flowers edge-adjacent to the garden that are still part of
    /// at least one of the mover's pair moves.
    fn frontier(&self, mover: PlayerColor, garden: &HashSet<Flower>) -> Vec<Flower> {
        let legal = &self.players[mover.index()].legal_moves;
        let mut candidates = Vec::new();
        for flower in garden {
            for neighbor in self.board.edge_neighbors(flower) {
                if !garden.contains(&neighbor)
                    && legal.contains_any_with(&neighbor)
                    && !candidates.contains(&neighbor)
                {
                    candidates.push(neighbor);
                }
            }
        }
        candidates
    }

    // ==================== Snapshots ====================

    /// A JSON-friendly projection of this state.
    ///
    /// The live state uses flower-keyed maps, which JSON cannot express as
    /// object keys, so external consumers get plain sorted arrays instead.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            size: self.board.size(),
            active: self.active,
            status: self.status,
            red: self.player_snapshot(PlayerColor::Red),
            blue: self.player_snapshot(PlayerColor::Blue),
            moves: self.history.clone(),
        }
    }

    fn player_snapshot(&self, color: PlayerColor) -> PlayerSnapshot {
        let record = &self.players[color.index()];
        let mut flowers: Vec<Flower> = record.flowers.iter().copied().collect();
        flowers.sort();
        let mut ditches: Vec<Ditch> = record.ditches.iter().copied().collect();
        ditches.sort();
        PlayerSnapshot {
            flowers,
            ditches,
            score: record.score,
        }
    }
}

/// JSON-friendly game state with sorted arrays instead of keyed sets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub size: i32,
    pub active: PlayerColor,
    pub status: Status,
    pub red: PlayerSnapshot,
    pub blue: PlayerSnapshot,
    /// The move record, enough to replay the game from scratch
    pub moves: Vec<Move>,
}

/// One player's share of a [`GameSnapshot`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub flowers: Vec<Flower>,
    pub ditches: Vec<Ditch>,
    pub score: i32,
}

impl GameSnapshot {
    /// Serialize to a JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> serde_json::Result<GameSnapshot> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::Position;

    fn upright(i: i32, j: i32) -> Flower {
        Flower::new(
            Position::new(i, j),
            Position::new(i + 1, j),
            Position::new(i, j + 1),
        )
    }

    fn inverted(i: i32, j: i32) -> Flower {
        Flower::new(
            Position::new(i + 1, j + 1),
            Position::new(i + 1, j),
            Position::new(i, j + 1),
        )
    }

    #[test]
    fn test_new_game_has_full_pair_universe() {
        let game = GameState::new(3);
        assert_eq!(game.status(), Status::Ok);
        assert_eq!(game.active_color(), PlayerColor::Red);

        // 9 cells give C(9, 2) pair moves, plus Surrender
        for color in PlayerColor::ALL {
            let legal = game.player(color).legal_moves();
            assert_eq!(legal.flower_moves().len(), 36);
            assert!(legal.ditch_moves().is_empty());
            assert!(legal.contains(&Move::Surrender));
            assert_eq!(legal.len(), 37);
        }
    }

    #[test]
    fn test_placing_a_pair_claims_and_prunes() {
        let mut game = GameState::new(3);
        let a = upright(1, 1);
        let b = inverted(1, 1);

        let status = game.make(Move::pair(a, b));
        assert_eq!(status, Status::Ok);
        assert_eq!(game.active_color(), PlayerColor::Blue);

        assert!(game.player(PlayerColor::Red).flowers().contains(&a));
        assert!(game.player(PlayerColor::Red).flowers().contains(&b));
        assert_eq!(game.color_of_flower(&a), Some(PlayerColor::Red));

        for color in PlayerColor::ALL {
            let legal = game.player(color).legal_moves();
            assert!(!legal.contains_any_with(&a));
            assert!(!legal.contains_any_with(&b));
        }

        assert_eq!(game.garden_of(&a).len(), 2);
        assert_eq!(game.player(PlayerColor::Red).score(), 2);
    }

    #[test]
    fn test_mover_receives_ditch_offers() {
        let mut game = GameState::new(3);
        game.make(Move::pair(upright(1, 1), inverted(1, 1)));

        let red = game.player(PlayerColor::Red).legal_moves();
        let blue = game.player(PlayerColor::Blue).legal_moves();
        assert!(!red.ditch_moves().is_empty());
        assert!(blue.ditch_moves().is_empty());

        // None of the offers retraces an edge of a claimed flower
        for mv in red.ditch_moves() {
            let Move::PlaceDitch(ditch) = mv else {
                panic!("non-ditch move in ditch partition");
            };
            for flower in [upright(1, 1), inverted(1, 1)] {
                assert!(!flower.edges().contains(ditch));
            }
        }
    }

    #[test]
    fn test_unlisted_move_voids_the_game() {
        let mut game = GameState::new(3);
        game.make(Move::pair(upright(1, 1), inverted(1, 1)));

        // Blue tries to reuse a flower Red just claimed
        let status = game.make(Move::pair(upright(1, 1), upright(3, 1)));
        assert_eq!(status, Status::Illegal);
        assert!(game.player(PlayerColor::Blue).flowers().is_empty());
    }

    #[test]
    fn test_off_board_move_voids_the_game() {
        let mut game = GameState::new(3);
        let outside = Flower::new(
            Position::new(9, 9),
            Position::new(10, 9),
            Position::new(9, 10),
        );
        assert_eq!(game.make(Move::pair(outside, upright(1, 1))), Status::Illegal);
    }

    #[test]
    fn test_terminal_state_is_immutable() {
        let mut game = GameState::new(3);
        let bad = Move::pair(upright(1, 1), upright(1, 1));
        assert_eq!(game.make(bad), Status::Illegal);

        let snapshot = game.snapshot();
        assert_eq!(game.make(bad), Status::Illegal);
        assert_eq!(game.make(Move::Surrender), Status::Illegal);
        assert_eq!(game.snapshot(), snapshot);
    }

    #[test]
    fn test_surrender_hands_the_win_to_the_opponent() {
        let mut game = GameState::new(3);
        assert_eq!(game.make(Move::Surrender), Status::BlueWin);
        assert!(game.player(PlayerColor::Red).flowers().is_empty());
        assert!(game.player(PlayerColor::Blue).flowers().is_empty());
        assert_eq!(game.status().winner(), Some(PlayerColor::Blue));
    }

    #[test]
    fn test_end_is_not_offered_while_flower_moves_remain() {
        let mut game = GameState::new(3);
        game.make(Move::pair(upright(1, 1), inverted(1, 1)));
        for color in PlayerColor::ALL {
            assert!(!game.player(color).legal_moves().contains(&Move::End));
        }
    }

    #[test]
    fn test_clone_is_fully_independent() {
        let mut original = GameState::new(3);
        original.make(Move::pair(upright(1, 1), inverted(1, 1)));

        let mut fork = original.clone();
        let before = original.snapshot();

        fork.make(Move::pair(upright(1, 3), inverted(1, 2)));
        assert_eq!(original.snapshot(), before);
        assert!(original.player(PlayerColor::Blue).flowers().is_empty());
        assert_eq!(fork.player(PlayerColor::Blue).flowers().len(), 2);
    }

    #[test]
    fn test_history_records_the_voiding_move() {
        let mut game = GameState::new(3);
        let good = Move::pair(upright(1, 1), inverted(1, 1));
        let bad = Move::pair(upright(1, 1), upright(3, 1));

        game.make(good);
        game.make(bad);
        assert_eq!(game.moves(), [good, bad]);

        // Nothing submitted after the terminal transition is recorded
        game.make(Move::Surrender);
        assert_eq!(game.moves(), [good, bad]);
    }

    #[test]
    fn test_snapshot_json_round_trip() {
        let mut game = GameState::new(3);
        game.make(Move::pair(upright(1, 1), inverted(1, 1)));

        let snapshot = game.snapshot();
        let json = snapshot.to_json().expect("snapshot serializes");
        let restored = GameSnapshot::from_json(&json).expect("snapshot parses");
        assert_eq!(restored, snapshot);
        assert_eq!(restored.red.score, 2);
    }
}
