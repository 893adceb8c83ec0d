//! Driver-facing game facade: validated moves, promotion handling, game
//! status, and AI move requests. Drivers (GUI, CLI, tests) go through
//! `Game` rather than touching `Position` directly.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::Position;
use crate::movegen::{self, legal_moves_into};
use crate::types::{file_of, rank_of, Color, Move, Piece, PieceKind};
use crate::Engine;

/// Why a driver request was refused. Every rule violation is reported to
/// the caller; the engine never aborts during normal play.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Wrong side, invalid shape, or the move would expose the mover's king.
    #[error("illegal move from square {from} to square {to}")]
    InvalidMove { from: u8, to: u8 },
    /// A two-file king move whose castling preconditions failed.
    #[error("castling is not available for {color:?}")]
    IllegalCastle { color: Color },
    /// A promotion must be completed before anything else happens.
    #[error("a pawn promotion is pending and must be completed first")]
    PromotionUnresolved,
    #[error("no promotion is pending at that square")]
    NoPromotionPending,
    #[error("a pawn cannot promote to a {0:?}")]
    InvalidPromotionKind(PieceKind),
    /// The game has ended; only `reset` is accepted.
    #[error("the game is over; reset to continue")]
    GameOver,
    #[error("no legal moves are available")]
    NoLegalMoves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ongoing,
    /// The given color's king is attacked but it has replies.
    Check(Color),
    Checkmate {
        winner: Color,
    },
    Stalemate,
}

/// What a successful `make_move` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Played,
    /// A pawn reached the last rank; call `complete_promotion` next.
    PromotionPending,
}

#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    pending_promotion: Option<u8>,
    game_over: bool,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Wrap a driver-built position. Terminal positions are detected here
    /// so a constructed mate refuses moves immediately.
    pub fn from_position(position: Position) -> Self {
        let mut game = Self {
            position,
            pending_promotion: None,
            game_over: false,
        };
        game.refresh_terminal();
        game
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn pending_promotion(&self) -> Option<u8> {
        self.pending_promotion
    }

    /// Destinations of every legal move from `from`, for driver
    /// highlighting. Empty when the game is over or a promotion is pending.
    pub fn legal_moves_from(&self, from: u8) -> HashSet<u8> {
        if self.game_over || self.pending_promotion.is_some() {
            return HashSet::new();
        }
        let mut tmp = self.position.clone();
        let mut moves = Vec::with_capacity(64);
        legal_moves_into(&mut tmp, &mut moves);
        moves
            .iter()
            .filter(|mv| mv.from == from)
            .map(|mv| mv.to)
            .collect()
    }

    /// Validate and play a move. On any refusal the position is unchanged.
    pub fn make_move(&mut self, from: u8, to: u8) -> Result<MoveOutcome, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if self.pending_promotion.is_some() {
            return Err(GameError::PromotionUnresolved);
        }

        let piece = self
            .position
            .piece_at(from)
            .ok_or(GameError::InvalidMove { from, to })?;
        if piece.color != self.position.side_to_move {
            return Err(GameError::InvalidMove { from, to });
        }

        let castle_attempt = piece.kind == PieceKind::King
            && rank_of(from) == rank_of(to)
            && (file_of(from) - file_of(to)).abs() == 2;

        if !movegen::is_legal(&mut self.position, from, to) {
            return Err(if castle_attempt {
                GameError::IllegalCastle { color: piece.color }
            } else {
                GameError::InvalidMove { from, to }
            });
        }

        self.position.make_move(Move::new(from, to));

        // The pawn stays a pawn on the last rank until the driver picks a
        // piece; the opponent cannot move in the meantime.
        if piece.kind == PieceKind::Pawn && rank_of(to) == piece.color.promotion_rank() {
            self.pending_promotion = Some(to);
            return Ok(MoveOutcome::PromotionPending);
        }

        self.refresh_terminal();
        Ok(MoveOutcome::Played)
    }

    /// Swap the pending pawn for the chosen piece. Kings and pawns are not
    /// legal promotion targets.
    pub fn complete_promotion(&mut self, square: u8, kind: PieceKind) -> Result<(), GameError> {
        match self.pending_promotion {
            Some(pending) if pending == square => {}
            _ => return Err(GameError::NoPromotionPending),
        }
        if kind == PieceKind::Pawn || kind == PieceKind::King {
            return Err(GameError::InvalidPromotionKind(kind));
        }
        let pawn = self
            .position
            .piece_at(square)
            .ok_or(GameError::NoPromotionPending)?;
        self.position.place(square, Piece::new(pawn.color, kind));
        self.pending_promotion = None;
        self.refresh_terminal();
        Ok(())
    }

    /// Current status from the side to move's perspective.
    pub fn status(&self) -> GameStatus {
        let to_move = self.position.side_to_move;
        if movegen::is_checkmate(&self.position, to_move) {
            return GameStatus::Checkmate {
                winner: to_move.other(),
            };
        }
        if movegen::is_stalemate(&self.position, to_move) {
            return GameStatus::Stalemate;
        }
        if self.position.in_check(to_move) {
            GameStatus::Check(to_move)
        } else {
            GameStatus::Ongoing
        }
    }

    /// Ask an engine for a move in the current position. The move is
    /// returned, not played; the driver applies it via `make_move`.
    pub fn request_ai_move(
        &self,
        engine: &mut dyn Engine,
        depth: u8,
    ) -> Result<Move, GameError> {
        if self.game_over {
            return Err(GameError::GameOver);
        }
        if self.pending_promotion.is_some() {
            return Err(GameError::PromotionUnresolved);
        }
        engine
            .search(&self.position, depth)
            .best_move
            .ok_or(GameError::NoLegalMoves)
    }

    /// Back to the starting position, clearing all transient state.
    pub fn reset(&mut self) {
        self.position = Position::startpos();
        self.pending_promotion = None;
        self.game_over = false;
    }

    fn refresh_terminal(&mut self) {
        self.game_over = matches!(
            self.status(),
            GameStatus::Checkmate { .. } | GameStatus::Stalemate
        );
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
