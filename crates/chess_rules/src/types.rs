//! Core chess types shared by the rules crate and engines.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    /// Rank direction this color's pawns advance in.
    pub fn pawn_dir(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn home_rank(self) -> i8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn promotion_rank(self) -> i8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

/// A move between two squares. `promo` is set when a pawn reaches the last
/// rank; `score` is a transient ordering annotation used during search and
/// is excluded from equality and hashing.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    pub from: u8,
    pub to: u8,
    pub promo: Option<PieceKind>,
    pub score: i32,
}

impl Move {
    pub fn new(from: u8, to: u8) -> Self {
        Self {
            from,
            to,
            promo: None,
            score: 0,
        }
    }

    pub fn promoting(from: u8, to: u8, kind: PieceKind) -> Self {
        Self {
            from,
            to,
            promo: Some(kind),
            score: 0,
        }
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to && self.promo == other.promo
    }
}

impl Eq for Move {}

impl std::hash::Hash for Move {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.promo.hash(state);
    }
}

/// Square index for a file/rank pair, or `None` when off the board.
/// Rank 0 is White's back rank, so `sq(4, 0)` is e1.
pub fn sq(file: i8, rank: i8) -> Option<u8> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank * 8 + file) as u8)
    } else {
        None
    }
}

pub fn file_of(square: u8) -> i8 {
    (square % 8) as i8
}

pub fn rank_of(square: u8) -> i8 {
    (square / 8) as i8
}

/// Algebraic coordinate ("e4") for a square index.
pub fn sq_to_coord(square: u8) -> String {
    let file = (b'a' + square % 8) as char;
    let rank = (b'1' + square / 8) as char;
    format!("{file}{rank}")
}

/// Parse an algebraic coordinate like "e4" into a square index.
pub fn coord_to_sq(coord: &str) -> Option<u8> {
    let bytes = coord.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    let file = bytes[0].checked_sub(b'a')? as i8;
    let rank = bytes[1].checked_sub(b'1')? as i8;
    sq(file, rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_math_round_trips() {
        assert_eq!(sq(4, 0), Some(4));
        assert_eq!(sq(4, 3), Some(28));
        assert_eq!(sq(8, 0), None);
        assert_eq!(sq(0, -1), None);
        for square in 0..64u8 {
            assert_eq!(sq(file_of(square), rank_of(square)), Some(square));
        }
    }

    #[test]
    fn coords_round_trip() {
        assert_eq!(sq_to_coord(0), "a1");
        assert_eq!(sq_to_coord(28), "e4");
        assert_eq!(sq_to_coord(63), "h8");
        assert_eq!(coord_to_sq("e4"), Some(28));
        assert_eq!(coord_to_sq("h8"), Some(63));
        assert_eq!(coord_to_sq("i1"), None);
        assert_eq!(coord_to_sq("e9"), None);
        assert_eq!(coord_to_sq("e"), None);
    }

    #[test]
    fn move_identity_ignores_score() {
        let mut a = Move::new(12, 28);
        let b = Move::new(12, 28);
        a.score = 500;
        assert_eq!(a, b);
        assert_ne!(Move::new(12, 28), Move::promoting(12, 28, PieceKind::Queen));
    }
}
