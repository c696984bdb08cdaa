// SPDX-License-Identifier: MIT OR Apache-2.0

//! Game session: the single owner of all mutable game state
//!
//! Every command takes `&mut self`, runs to completion and either applies
//! its whole effect or returns a [`GameError`] with the session unchanged.
//! Hosts that receive input on several threads must serialize calls, for
//! example by wrapping the session in a mutex.

use crate::{
    board::Board,
    config::{ConfigError, RulesConfig},
    graph::ConnectivityGraph,
    rules::{midpoint, MoveKind, MoveValidator},
    Action, GameError, Piece, Player, Position,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Coarse game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Goats are still being placed; only tigers move
    Placement,
    /// All goats placed; both sides move
    Movement,
    /// Terminal until reset
    Over,
}

/// Why the game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// Tigers captured the configured number of goats
    GoatsCaptured { count: u8 },
    /// It was the tigers' turn and no tiger could move
    TigersTrapped,
}

/// Final result of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameOutcome {
    pub winner: Player,
    pub reason: WinReason,
}

impl std::fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.reason {
            WinReason::GoatsCaptured { count } => {
                write!(f, "{} wins! Tiger has captured {} goats.", self.winner, count)
            }
            WinReason::TigersTrapped => {
                write!(f, "{} wins! Tiger doesn't have any moves.", self.winner)
            }
        }
    }
}

/// Receives the end-of-game notification, once per finished game
pub trait OutcomeListener {
    fn on_game_over(&mut self, outcome: &GameOutcome);
}

impl<F> OutcomeListener for F
where
    F: FnMut(&GameOutcome),
{
    fn on_game_over(&mut self, outcome: &GameOutcome) {
        self(outcome)
    }
}

/// Result of a successful command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// What changed on the board
    pub action: Action,
    /// Side to move after the command
    pub next_player: Player,
    /// Set when this command ended the game
    pub outcome: Option<GameOutcome>,
}

/// Read-only copy of everything a presentation layer may display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub board: Board,
    pub active_player: Player,
    pub placed_goats: u8,
    pub captured_goats: u8,
    pub goats_in_hand: u8,
    pub phase: Phase,
    pub game_over: bool,
    pub outcome: Option<GameOutcome>,
    pub selected: Option<Position>,
}

/// A Baag-Chal game in progress
pub struct Session {
    config: RulesConfig,
    graph: &'static ConnectivityGraph,
    board: Board,
    active: Player,
    placed_goats: u8,
    captured_goats: u8,
    outcome: Option<GameOutcome>,
    selected: Option<Position>,
    history: Vec<Action>,
    listener: Option<Box<dyn OutcomeListener>>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("board", &self.board)
            .field("active", &self.active)
            .field("placed_goats", &self.placed_goats)
            .field("captured_goats", &self.captured_goats)
            .field("outcome", &self.outcome)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create a session with the standard rules (20 goats, 5 captures)
    pub fn new() -> Self {
        Self::build(RulesConfig::default())
    }

    /// Create a session with custom rule parameters
    pub fn with_config(config: RulesConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RulesConfig) -> Self {
        let mut session = Self {
            config,
            graph: ConnectivityGraph::traditional(),
            board: Board::empty(),
            active: Player::Goat,
            placed_goats: 0,
            captured_goats: 0,
            outcome: None,
            selected: None,
            history: Vec::new(),
            listener: None,
        };
        session.reset();
        session
    }

    /// Install the end-of-game hook, replacing any previous one
    pub fn set_listener(&mut self, listener: impl OutcomeListener + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn with_listener(mut self, listener: impl OutcomeListener + 'static) -> Self {
        self.set_listener(listener);
        self
    }

    /// Return to the canonical starting position. Config and listener are kept.
    pub fn reset(&mut self) {
        self.board = Board::starting();
        self.active = Player::Goat;
        self.placed_goats = 0;
        self.captured_goats = 0;
        self.outcome = None;
        self.selected = None;
        self.history.clear();
        info!("New game: Goat to place first");
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn placed_goats(&self) -> u8 {
        self.placed_goats
    }

    pub fn captured_goats(&self) -> u8 {
        self.captured_goats
    }

    /// Goats not yet placed
    pub fn goats_in_hand(&self) -> u8 {
        self.config.max_goats.saturating_sub(self.placed_goats)
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Piece chosen for a move in progress
    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    /// Applied actions since the last reset, oldest first
    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::Over
        } else if self.placed_goats < self.config.max_goats {
            Phase::Placement
        } else {
            Phase::Movement
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            board: self.board,
            active_player: self.active,
            placed_goats: self.placed_goats,
            captured_goats: self.captured_goats,
            goats_in_hand: self.goats_in_hand(),
            phase: self.phase(),
            game_over: self.is_game_over(),
            outcome: self.outcome,
            selected: self.selected,
        }
    }

    /// Legal targets for the piece at `from`, regardless of whose turn it is
    pub fn legal_destinations(&self, from: Position) -> Vec<(Position, MoveKind)> {
        self.validator().destinations(from)
    }

    /// True if at least one tiger has a legal step or jump
    pub fn check_tiger_mobility(&self) -> bool {
        let validator = self.validator();
        self.board
            .positions_of(Piece::Tiger)
            .any(|tiger| validator.has_any_move(tiger))
    }

    /// Put a goat from hand on an empty point
    pub fn place_goat(&mut self, pos: Position) -> Result<Report, GameError> {
        self.ensure_running()?;
        let pos = pos.validate()?;

        if self.placed_goats >= self.config.max_goats {
            debug!("Rejected placement at {}: all goats placed", pos);
            return Err(GameError::PlacementCapExceeded {
                cap: self.config.max_goats,
            });
        }
        self.ensure_turn(Player::Goat)?;
        if !self.board.is_empty_at(pos) {
            debug!("Rejected placement at {}: occupied", pos);
            return Err(GameError::OccupiedPosition(pos));
        }

        self.board.set(pos, Piece::Goat);
        self.placed_goats += 1;
        self.selected = None;
        info!("Goat placed at {}. Total placed: {}", pos, self.placed_goats);

        Ok(self.finish_turn(Action::Placed { at: pos }))
    }

    /// Select a piece of the side to move
    pub fn select_piece(&mut self, pos: Position) -> Result<Position, GameError> {
        match self.active {
            Player::Goat => self.select_goat(pos),
            Player::Tiger => self.select_tiger(pos),
        }
    }

    pub fn select_tiger(&mut self, pos: Position) -> Result<Position, GameError> {
        self.select(pos, Player::Tiger)
    }

    /// Goats can only be selected once all goats are placed
    pub fn select_goat(&mut self, pos: Position) -> Result<Position, GameError> {
        self.select(pos, Player::Goat)
    }

    fn select(&mut self, pos: Position, side: Player) -> Result<Position, GameError> {
        self.ensure_running()?;
        let pos = pos.validate()?;
        self.ensure_turn(side)?;
        self.ensure_owned(pos)?;
        self.ensure_goats_may_move(side)?;

        self.selected = Some(pos);
        debug!("{} selected at {}", side, pos);
        Ok(pos)
    }

    /// Complete the pending selection by moving it to `to`
    pub fn complete_selected(&mut self, to: Position) -> Result<Report, GameError> {
        self.ensure_running()?;
        let from = self.selected.ok_or(GameError::NoSelection)?;
        self.complete_move(from, to)
    }

    /// Move the active side's piece from `from` to `to`, capturing if it jumps
    pub fn complete_move(&mut self, from: Position, to: Position) -> Result<Report, GameError> {
        self.ensure_running()?;
        let from = from.validate()?;
        let to = to.validate()?;
        let piece = self.ensure_owned(from)?;
        self.ensure_goats_may_move(self.active)?;

        let kind = self.validator().classify(from, to);
        self.selected = None;
        let action = match kind {
            MoveKind::Illegal => {
                debug!("Invalid move from {} to {}", from, to);
                return Err(GameError::IllegalMove { from, to });
            }
            MoveKind::Step => {
                self.board.take(from);
                self.board.set(to, piece);
                info!("{:?} moved from {} to {}", piece, from, to);
                Action::Stepped { piece, from, to }
            }
            MoveKind::Jump => {
                let over = midpoint(from, to);
                self.board.take(over);
                self.board.take(from);
                self.board.set(to, Piece::Tiger);
                self.captured_goats += 1;
                info!(
                    "Goat captured at {}! Total captured: {}",
                    over, self.captured_goats
                );
                Action::Captured { from, over, to }
            }
        };

        Ok(self.finish_turn(action))
    }

    fn validator(&self) -> MoveValidator<'_> {
        MoveValidator::with_graph(&self.board, self.graph)
    }

    fn ensure_running(&self) -> Result<(), GameError> {
        if self.outcome.is_some() {
            debug!("Rejected command: game is over");
            return Err(GameError::GameAlreadyOver);
        }
        Ok(())
    }

    fn ensure_turn(&self, side: Player) -> Result<(), GameError> {
        if self.active != side {
            debug!("Rejected {} command during {}'s turn", side, self.active);
            return Err(GameError::NotYourTurn {
                expected: self.active,
            });
        }
        Ok(())
    }

    /// The piece at `pos` must belong to the side to move
    fn ensure_owned(&self, pos: Position) -> Result<Piece, GameError> {
        let piece = self.board.get(pos).ok_or(GameError::InvalidPosition(pos))?;
        match piece.owner() {
            None => Err(GameError::NoPieceAt(pos)),
            Some(owner) if owner != self.active => Err(GameError::NotYourTurn {
                expected: self.active,
            }),
            Some(_) => Ok(piece),
        }
    }

    fn ensure_goats_may_move(&self, side: Player) -> Result<(), GameError> {
        if side == Player::Goat && self.placed_goats < self.config.max_goats {
            return Err(GameError::PlacementPhase {
                remaining: self.goats_in_hand(),
            });
        }
        Ok(())
    }

    /// Record the action, pass the turn and evaluate terminal conditions
    fn finish_turn(&mut self, action: Action) -> Report {
        self.history.push(action);

        if matches!(action, Action::Captured { .. })
            && self.captured_goats >= self.config.captures_to_win
        {
            self.end_game(GameOutcome {
                winner: Player::Tiger,
                reason: WinReason::GoatsCaptured {
                    count: self.captured_goats,
                },
            });
        }

        self.active = self.active.opposite();
        info!("Turn switched to {}", self.active);

        if self.outcome.is_none() && self.active == Player::Tiger && !self.check_tiger_mobility() {
            self.end_game(GameOutcome {
                winner: Player::Goat,
                reason: WinReason::TigersTrapped,
            });
        }

        Report {
            action,
            next_player: self.active,
            outcome: self.outcome,
        }
    }

    fn end_game(&mut self, outcome: GameOutcome) {
        info!("Game over: {}", outcome);
        self.outcome = Some(outcome);
        self.selected = None;
        if let Some(listener) = self.listener.as_mut() {
            listener.on_game_over(&outcome);
        }
    }
}
