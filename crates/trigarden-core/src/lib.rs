//! Trigarden - rules engine for a two-player garden game on a triangular board.
//!
//! This crate provides the core game logic for Trigarden, including:
//! - Triangular lattice coordinates for cells, corners, and edges
//! - Board geometry with exact integer neighbor arithmetic
//! - Per-player legal-move tracking with incremental updates
//! - The turn state machine with full rule enforcement
//!
//! # Architecture
//!
//! The engine is deterministic and synchronous: a [`GameState`] is built once
//! per game, every turn applies exactly one [`Move`], and all legality
//! bookkeeping happens inside that call. Consumers (UIs, AIs, replays,
//! relays) read the game through a [`Viewer`] and never mutate it directly.
//! Speculative search clones the whole state; clones share nothing.
//!
//! # Modules
//!
//! - [`lattice`]: coordinate types for flowers, positions, and ditches
//! - [`board`]: the sized board and its geometry queries
//! - [`moves`]: the move and status types
//! - [`move_index`]: indexed legal-move collections
//! - [`player`]: player colors and records
//! - [`game`]: the game state machine
//! - [`viewer`]: the read-only query surface

pub mod board;
pub mod game;
pub mod lattice;
pub mod move_index;
pub mod moves;
pub mod player;
pub mod viewer;

// Re-export commonly used types
pub use board::Board;
pub use game::{GameSnapshot, GameState, PlayerSnapshot, GARDEN_CAP};
pub use lattice::{Ditch, Flower, Orientation, Position};
pub use move_index::MoveIndex;
pub use moves::{Move, Status};
pub use player::{Player, PlayerColor};
pub use viewer::Viewer;
