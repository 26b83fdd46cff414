//! Moves players can submit, and the game status they drive.

use crate::lattice::{Ditch, Flower};
use crate::player::PlayerColor;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A move one player can submit on their turn.
///
/// `PlaceFlowers` is an unordered pair: the two argument orders compare and
/// hash equal, and [`Move::pair`] builds the canonical form directly.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
pub enum Move {
    /// Claim two distinct flowers in one turn
    PlaceFlowers(Flower, Flower),
    /// Claim one ditch
    PlaceDitch(Ditch),
    /// Stop the game and settle it on points
    End,
    /// Concede; the opponent wins
    Surrender,
}

impl Move {
    /// The flower-pair move for `a` and `b`, in canonical order
    pub fn pair(a: Flower, b: Flower) -> Self {
        if b < a {
            Move::PlaceFlowers(b, a)
        } else {
            Move::PlaceFlowers(a, b)
        }
    }

    /// Whether this move claims the given flower
    pub fn references(&self, flower: &Flower) -> bool {
        matches!(self, Move::PlaceFlowers(a, b) if a == flower || b == flower)
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Move::PlaceFlowers(a, b), Move::PlaceFlowers(c, d)) => {
                (a, b) == (c, d) || (a, b) == (d, c)
            }
            (Move::PlaceDitch(d1), Move::PlaceDitch(d2)) => d1 == d2,
            (Move::End, Move::End) | (Move::Surrender, Move::Surrender) => true,
            _ => false,
        }
    }
}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Move::PlaceFlowers(a, b) => {
                state.write_u8(0);
                let (lo, hi) = if b < a { (b, a) } else { (a, b) };
                lo.hash(state);
                hi.hash(state);
            }
            Move::PlaceDitch(d) => {
                state.write_u8(1);
                d.hash(state);
            }
            Move::End => state.write_u8(2),
            Move::Surrender => state.write_u8(3),
        }
    }
}

/// Outcome state of a game.
///
/// `Ok` is the only state that accepts further moves. Everything else is
/// terminal, including `Illegal`, which records that a disallowed move was
/// submitted. Legality failures are ordinary data, never an error path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Game in progress
    Ok,
    /// A disallowed move was submitted; the game is void
    Illegal,
    /// Red won
    RedWin,
    /// Blue won
    BlueWin,
    /// Equal points at the end
    Draw,
}

impl Status {
    /// Whether the game has ended
    pub fn is_over(&self) -> bool {
        !matches!(self, Status::Ok)
    }

    /// The winning status for the given color
    pub fn win_for(color: PlayerColor) -> Status {
        match color {
            PlayerColor::Red => Status::RedWin,
            PlayerColor::Blue => Status::BlueWin,
        }
    }

    /// The winner, if this status names one
    pub fn winner(&self) -> Option<PlayerColor> {
        match self {
            Status::RedWin => Some(PlayerColor::Red),
            Status::BlueWin => Some(PlayerColor::Blue),
            _ => None,
        }
    }
}
