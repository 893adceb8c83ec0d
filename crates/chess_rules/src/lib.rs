//! Chess rules core: board representation, move legality, game-end
//! classification, and the driver-facing game facade.
//!
//! Engines implement the [`Engine`] trait against [`Position`] and plug
//! into [`Game::request_ai_move`].

pub mod board;
pub mod game;
pub mod movegen;
pub mod types;

pub use board::{CastleSide, CastlingRights, Position, Undo};
pub use game::{Game, GameError, GameStatus, MoveOutcome};
pub use movegen::{
    capture_moves_into, is_capture, is_checkmate, is_legal, is_pseudo_legal, is_stalemate,
    legal_moves, legal_moves_into, MAX_MOVES,
};
pub use types::{
    coord_to_sq, file_of, rank_of, sq, sq_to_coord, Color, Move, Piece, PieceKind,
};

/// Result of an engine search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u8,
    /// Positions visited during the search.
    pub nodes: u64,
}

/// A move-selecting engine. Implementations must not mutate the position
/// they are handed; they clone and search.
pub trait Engine: Send {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult;

    fn name(&self) -> &str;

    /// Called when a new game starts; engines reset internal statistics.
    fn new_game(&mut self) {}
}
