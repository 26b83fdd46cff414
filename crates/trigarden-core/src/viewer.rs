//! Read-only projection of a game.
//!
//! A `Viewer` is what gets handed to players, renderers, and AIs: the full
//! query surface of the engine with no way to mutate it. Move queries answer
//! for the currently active player; ownership and geometry queries are
//! color-explicit. Returned collections are snapshots or borrowed views, so
//! nothing a consumer does to them can disturb the game.

use crate::game::GameState;
use crate::lattice::{Ditch, Flower};
use crate::moves::{Move, Status};
use crate::player::PlayerColor;
use std::collections::HashSet;

/// Read-only window onto a [`GameState`]
#[derive(Debug, Clone, Copy)]
pub struct Viewer<'a> {
    game: &'a GameState,
}

impl<'a> Viewer<'a> {
    pub(crate) fn new(game: &'a GameState) -> Self {
        Self { game }
    }

    /// The color whose turn it is
    pub fn turn(&self) -> PlayerColor {
        self.game.active_color()
    }

    /// The board size
    pub fn size(&self) -> i32 {
        self.game.size()
    }

    /// Current outcome state
    pub fn status(&self) -> Status {
        self.game.status()
    }

    /// Every move submitted so far, in submission order
    pub fn moves(&self) -> &[Move] {
        self.game.moves()
    }

    /// Flowers claimed by the given color
    pub fn flowers_of(&self, color: PlayerColor) -> &HashSet<Flower> {
        self.game.player(color).flowers()
    }

    /// Ditches claimed by the given color
    pub fn ditches_of(&self, color: PlayerColor) -> &HashSet<Ditch> {
        self.game.player(color).ditches()
    }

    /// Points of the given color
    pub fn points_of(&self, color: PlayerColor) -> i32 {
        self.game.player(color).score()
    }

    /// Every move the active player may submit: flower moves first, then
    /// ditch moves, then the rest.
    pub fn possible_moves(&self) -> Vec<Move> {
        self.active_moves().iter().copied().collect()
    }

    /// The active player's flower-pair moves
    pub fn possible_flower_moves(&self) -> &HashSet<Move> {
        self.active_moves().flower_moves()
    }

    /// The active player's ditch moves
    pub fn possible_ditch_moves(&self) -> &HashSet<Move> {
        self.active_moves().ditch_moves()
    }

    /// Every flower the active player can still place
    pub fn possible_flowers(&self) -> HashSet<Flower> {
        self.active_moves().candidate_flowers()
    }

    /// Flowers the active player can still pair with the given one
    pub fn combinable_with(&self, flower: &Flower) -> HashSet<Flower> {
        self.active_moves().combinable_with(flower)
    }

    /// The active player's moves referencing the given flower
    pub fn moves_containing(&self, flower: &Flower) -> HashSet<Move> {
        self.active_moves().moves_with(flower)
    }

    /// Whether the active player may submit the given move
    pub fn contains_move(&self, mv: &Move) -> bool {
        self.active_moves().contains(mv)
    }

    /// Whether any of the active player's moves references the given flower
    pub fn contains_any_move_with(&self, flower: &Flower) -> bool {
        self.active_moves().contains_any_with(flower)
    }

    /// The color that claimed the given flower, if any
    pub fn color_of(&self, flower: &Flower) -> Option<PlayerColor> {
        self.game.color_of_flower(flower)
    }

    /// The color that claimed the given ditch, if any
    pub fn color_of_ditch(&self, ditch: &Ditch) -> Option<PlayerColor> {
        self.game.color_of_ditch(ditch)
    }

    /// The garden containing the given flower, or empty if it is unclaimed
    pub fn garden_of(&self, flower: &Flower) -> HashSet<Flower> {
        self.game.garden_of(flower)
    }

    /// Cells sharing a full edge with the given flower
    pub fn edge_neighbors_of(&self, flower: &Flower) -> Vec<Flower> {
        self.game.board().edge_neighbors(flower)
    }

    /// Cells sharing at least a corner with the given flower
    pub fn corner_neighbors_of(&self, flower: &Flower) -> Vec<Flower> {
        self.game.board().corner_neighbors(flower)
    }

    fn active_moves(&self) -> &crate::move_index::MoveIndex {
        self.game.player(self.game.active_color()).legal_moves()
    }
}
