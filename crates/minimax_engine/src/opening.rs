//! Opening-phase move preferences consulted before full search: castle
//! when possible, then pattern strategies, then knight development.

use chess_rules::{
    file_of, is_legal, legal_moves, rank_of, CastleSide, Color, Move, Piece, PieceKind, Position,
};

use crate::eval::center_distance;

/// A pluggable opening pattern. `suggest` returns a move when the position
/// matches the pattern it knows.
pub trait OpeningStrategy: Send {
    fn name(&self) -> &str;

    fn suggest(&self, pos: &mut Position) -> Option<Move>;
}

/// Black's King's Indian setup: with the kingside fianchetto shell in
/// place, play the thematic pawn breaks in order of priority.
pub struct KingsIndianDefense;

impl OpeningStrategy for KingsIndianDefense {
    fn name(&self) -> &str {
        "King's Indian Defense"
    }

    fn suggest(&self, pos: &mut Position) -> Option<Move> {
        if pos.side_to_move != Color::Black {
            return None;
        }
        let black = |kind| Some(Piece::new(Color::Black, kind));
        let shell = pos.piece_at(62) == black(PieceKind::King)
            && pos.piece_at(61) == black(PieceKind::Bishop)
            && pos.piece_at(53) == black(PieceKind::Pawn);
        if !shell {
            return None;
        }

        // b7-b5, d7-d5, f7-f5.
        const BREAKS: [(u8, u8); 3] = [(49, 33), (51, 35), (53, 37)];
        for (from, to) in BREAKS {
            if pos.piece_at(from) == black(PieceKind::Pawn) && is_legal(pos, from, to) {
                return Some(Move::new(from, to));
            }
        }
        None
    }
}

/// Ordered opening preferences. The default layer installs the King's
/// Indian strategy; drivers can supply their own set.
pub struct OpeningLayer {
    strategies: Vec<Box<dyn OpeningStrategy>>,
}

impl Default for OpeningLayer {
    fn default() -> Self {
        Self::new(vec![Box::new(KingsIndianDefense)])
    }
}

impl OpeningLayer {
    pub fn new(strategies: Vec<Box<dyn OpeningStrategy>>) -> Self {
        Self { strategies }
    }

    /// First preference that applies: castling, then each strategy in
    /// order, then centralizing knight development.
    pub fn suggest(&self, pos: &mut Position) -> Option<Move> {
        if let Some(mv) = castle_move(pos) {
            return Some(mv);
        }
        for strategy in &self.strategies {
            if let Some(mv) = strategy.suggest(pos) {
                tracing::debug!(strategy = strategy.name(), "opening strategy matched");
                return Some(mv);
            }
        }
        develop_knight(pos)
    }
}

/// Castle as soon as it is legal, kingside preferred.
fn castle_move(pos: &Position) -> Option<Move> {
    let color = pos.side_to_move;
    let home = match color {
        Color::White => 4u8,
        Color::Black => 60,
    };
    if pos.can_castle(color, CastleSide::King) {
        return Some(Move::new(home, home + 2));
    }
    if pos.can_castle(color, CastleSide::Queen) {
        return Some(Move::new(home, home - 2));
    }
    None
}

/// The knight move landing nearest the center; first encountered wins ties.
fn develop_knight(pos: &Position) -> Option<Move> {
    let color = pos.side_to_move;
    let mut best = None;
    let mut best_score = i32::MIN;
    for mv in legal_moves(pos) {
        match pos.piece_at(mv.from) {
            Some(piece) if piece.kind == PieceKind::Knight && piece.color == color => {}
            _ => continue,
        }
        let score = 8 - center_distance(file_of(mv.to)) - center_distance(rank_of(mv.to));
        if score > best_score {
            best_score = score;
            best = Some(mv);
        }
    }
    best
}

#[cfg(test)]
#[path = "opening_tests.rs"]
mod opening_tests;
