// SPDX-License-Identifier: MIT OR Apache-2.0

//! Baag-Chal Core - Game Rules and Board Logic
//!
//! This crate provides the rules engine for Baag-Chal ("Tigers and Goats"):
//! - the 5x5 board and its irregular line connectivity
//! - single-step and capturing-jump validation
//! - turn alternation, goat placement and terminal-state detection
//! - a `Session` that owns all mutable game state

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod board;
pub mod config;
pub mod graph;
pub mod rules;
pub mod session;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of rows and columns on the board
pub const BOARD_SIZE: u8 = 5;

/// Number of intersections on the board
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Side in a Baag-Chal game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// Goats place first and try to trap the tigers
    Goat,
    /// Tigers try to capture goats by jumping over them
    Tiger,
}

impl Player {
    /// Returns the other side
    pub fn opposite(&self) -> Self {
        match self {
            Player::Goat => Player::Tiger,
            Player::Tiger => Player::Goat,
        }
    }

    /// The piece kind this side moves
    pub fn piece(&self) -> Piece {
        match self {
            Player::Goat => Piece::Goat,
            Player::Tiger => Piece::Tiger,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Goat => write!(f, "Goat"),
            Player::Tiger => write!(f, "Tiger"),
        }
    }
}

/// Occupancy of a single intersection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Empty,
    Goat,
    Tiger,
}

impl Piece {
    /// The side owning this piece, if any
    pub fn owner(&self) -> Option<Player> {
        match self {
            Piece::Empty => None,
            Piece::Goat => Some(Player::Goat),
            Piece::Tiger => Some(Player::Tiger),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Piece::Empty)
    }

    /// Single character used by the text form of the board
    pub fn symbol(&self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Goat => 'G',
            Piece::Tiger => 'T',
        }
    }
}

/// Board intersection, zero-based
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Row, top to bottom
    pub row: u8,
    /// Column, left to right
    pub col: u8,
}

impl Position {
    /// Create a new position. Range is not checked here; see [`Position::is_valid`].
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check if the position lies on the 5x5 board
    pub fn is_valid(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Fails with `InvalidPosition` when off the board
    pub fn validate(self) -> Result<Self, GameError> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(GameError::InvalidPosition(self))
        }
    }

    /// Row-major index into a 25-cell array. Only meaningful for valid positions.
    pub fn index(&self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx >= CELL_COUNT {
            return None;
        }
        let size = BOARD_SIZE as usize;
        Some(Self::new((idx / size) as u8, (idx % size) as u8))
    }

    /// All 25 positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..CELL_COUNT).filter_map(Position::from_index)
    }

    /// The four corners where tigers start
    pub const CORNERS: [Position; 4] = [
        Position::new(0, 0),
        Position::new(0, 4),
        Position::new(4, 0),
        Position::new(4, 4),
    ];
}

impl From<(u8, u8)> for Position {
    fn from((row, col): (u8, u8)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A state change applied by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// A goat was put on an empty intersection
    Placed {
        at: Position,
    },
    /// A piece moved one step along a line
    Stepped {
        piece: Piece,
        from: Position,
        to: Position,
    },
    /// A tiger jumped over a goat and removed it
    Captured {
        from: Position,
        over: Position,
        to: Position,
    },
}

impl Action {
    /// The side that performed the action
    pub fn player(&self) -> Player {
        match self {
            Action::Placed { .. } => Player::Goat,
            Action::Stepped { piece, .. } => piece.owner().unwrap_or(Player::Goat),
            Action::Captured { .. } => Player::Tiger,
        }
    }
}

/// Errors that can occur during game play
///
/// All of these are expected rejections: the command that produced one left
/// the session unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GameError {
    /// The position is outside the 5x5 board
    #[error("Invalid position {0}")]
    InvalidPosition(Position),

    /// The move is neither a connected step nor a valid capture
    #[error("Illegal move from {from} to {to}")]
    IllegalMove { from: Position, to: Position },

    /// The command belongs to the other side
    #[error("Not your turn: {expected} to play")]
    NotYourTurn { expected: Player },

    /// The game has ended; only a reset is accepted
    #[error("Game is already over")]
    GameAlreadyOver,

    /// All goats have already been placed
    #[error("All {cap} goats have already been placed")]
    PlacementCapExceeded { cap: u8 },

    /// The position is already occupied
    #[error("Position {0} already occupied")]
    OccupiedPosition(Position),

    /// There is no piece to select or move
    #[error("No piece at {0}")]
    NoPieceAt(Position),

    /// Goats cannot move while some are still in hand
    #[error("Goats cannot move until all {remaining} remaining goats are placed")]
    PlacementPhase { remaining: u8 },

    /// No pending selection to complete
    #[error("No piece selected")]
    NoSelection,
}

pub use board::Board;
pub use config::{ConfigError, RulesConfig};
pub use graph::{ConnectivityGraph, NeighborSet};
pub use rules::{is_legal_move, MoveKind};
pub use session::{GameOutcome, OutcomeListener, Phase, Report, Session, SessionSnapshot, WinReason};
