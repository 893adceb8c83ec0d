//! Phase-aware static evaluation.
//!
//! Scores are centipawns from White's perspective: material for both
//! sides, positional terms for the side to move, and one phase-dependent
//! differential term.

use chess_rules::{file_of, legal_moves_into, rank_of, sq, Color, Piece, PieceKind, Position};

/// d4, e4, d5, e5.
const CENTER: [u8; 4] = [27, 28, 35, 36];

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn => 100,
        PieceKind::Knight => 300,
        PieceKind::Bishop => 300,
        PieceKind::Rook => 500,
        PieceKind::Queen => 900,
        PieceKind::King => 20000,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Opening,
    Midgame,
    Endgame,
}

/// Opening while most pieces are still on the board; midgame while queens
/// or plenty of minor pieces remain; endgame otherwise.
pub fn game_phase(pos: &Position) -> GamePhase {
    let mut pieces = 0;
    let mut queens = 0;
    let mut minors = 0;
    for square in 0..64u8 {
        if let Some(piece) = pos.piece_at(square) {
            pieces += 1;
            match piece.kind {
                PieceKind::Queen => queens += 1,
                PieceKind::Knight | PieceKind::Bishop => minors += 1,
                _ => {}
            }
        }
    }
    if pieces > 24 {
        GamePhase::Opening
    } else if queens > 0 || minors > 4 {
        GamePhase::Midgame
    } else {
        GamePhase::Endgame
    }
}

pub fn evaluate(pos: &Position) -> i32 {
    let mut score = 0;
    for square in 0..64u8 {
        if let Some(piece) = pos.piece_at(square) {
            let value = piece_value(piece.kind);
            score += if piece.color == Color::White {
                value
            } else {
                -value
            };
        }
    }

    let to_move = pos.side_to_move;
    score += mobility(pos, to_move) * 2;
    score += king_safety(pos, to_move);
    score += pawn_structure(pos, to_move);
    score += kings_indian_bonus(pos, to_move);

    match game_phase(pos) {
        GamePhase::Opening => {
            score += (center_control(pos, Color::White) - center_control(pos, Color::Black)) * 10;
        }
        GamePhase::Midgame => {
            score += king_safety(pos, Color::White) - king_safety(pos, Color::Black);
        }
        GamePhase::Endgame => {
            score += king_centralization(pos, Color::White);
            score -= king_centralization(pos, Color::Black);
        }
    }

    score
}

/// Number of legal moves available to `color`.
pub fn mobility(pos: &Position, color: Color) -> i32 {
    let mut tmp = pos.clone();
    tmp.side_to_move = color;
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);
    moves.len() as i32
}

/// Pawn shield around the king: +20 per friendly pawn in the surrounding
/// 3x3 block, -30 per pawn short of three.
pub fn king_safety(pos: &Position, color: Color) -> i32 {
    let king = match pos.king_square(color) {
        Some(s) => s,
        None => return 0,
    };
    let kf = file_of(king);
    let kr = rank_of(king);

    let mut shield = 0;
    for df in -1i8..=1 {
        for dr in -1i8..=1 {
            if let Some(s) = sq(kf + df, kr + color.pawn_dir() * dr) {
                if pos.piece_at(s) == Some(Piece::new(color, PieceKind::Pawn)) {
                    shield += 1;
                }
            }
        }
    }

    let mut safety = shield * 20;
    if shield < 3 {
        safety -= (3 - shield) * 30;
    }
    safety
}

/// Isolated pawns cost 20; passed pawns earn 15 per rank advanced.
pub fn pawn_structure(pos: &Position, color: Color) -> i32 {
    let own = Piece::new(color, PieceKind::Pawn);
    let enemy = Piece::new(color.other(), PieceKind::Pawn);
    let mut score = 0;

    for square in 0..64u8 {
        if pos.piece_at(square) != Some(own) {
            continue;
        }
        let file = file_of(square);
        let rank = rank_of(square);

        // Isolated: no friendly pawn anywhere on an adjacent file.
        let mut isolated = true;
        for df in [-1i8, 1] {
            for r in 0..8i8 {
                if let Some(s) = sq(file + df, r) {
                    if pos.piece_at(s) == Some(own) {
                        isolated = false;
                    }
                }
            }
        }
        if isolated {
            score -= 20;
        }

        // Passed: no enemy pawn ahead on this file or its neighbours.
        let mut passed = true;
        for df in -1i8..=1 {
            let mut r = rank + color.pawn_dir();
            while (0..8).contains(&r) {
                if let Some(s) = sq(file + df, r) {
                    if pos.piece_at(s) == Some(enemy) {
                        passed = false;
                    }
                }
                r += color.pawn_dir();
            }
        }
        if passed {
            let advanced = match color {
                Color::White => rank,
                Color::Black => 7 - rank,
            } as i32;
            score += advanced * 15;
        }
    }

    score
}

/// How many of the four center squares `color` attacks.
pub fn center_control(pos: &Position, color: Color) -> i32 {
    CENTER
        .iter()
        .filter(|&&square| pos.is_square_attacked(square, color))
        .count() as i32
}

/// Distance from the board center; both central files/ranks count as zero.
pub(crate) fn center_distance(v: i8) -> i32 {
    if v < 4 {
        (3 - v) as i32
    } else {
        (v - 4) as i32
    }
}

fn king_centralization(pos: &Position, color: Color) -> i32 {
    match pos.king_square(color) {
        Some(king) => (7 - center_distance(file_of(king)) - center_distance(rank_of(king))) * 5,
        None => 0,
    }
}

/// Bonus for Black's King's Indian setup: the kingside fianchetto shell,
/// center pressure, and (with both) an advanced kingside pawn storm.
pub fn kings_indian_bonus(pos: &Position, color: Color) -> i32 {
    if color != Color::Black {
        return 0;
    }
    let black = |kind| Some(Piece::new(Color::Black, kind));
    let mut score = 0;

    let fianchetto = pos.piece_at(62) == black(PieceKind::King)
        && pos.piece_at(61) == black(PieceKind::Bishop)
        && pos.piece_at(53) == black(PieceKind::Pawn)
        && pos.piece_at(54) == black(PieceKind::Pawn);
    if fianchetto {
        score += 50;
    }

    let center = center_control(pos, Color::Black) >= 2;
    if center {
        score += 30;
    }

    if fianchetto && center {
        // Pawn storm on the f and g files, deeper pawns worth more.
        for file in 5..=6i8 {
            for rank in 2..=3i8 {
                if let Some(s) = sq(file, rank) {
                    if pos.piece_at(s) == black(PieceKind::Pawn) {
                        score += (6 - rank) as i32 * 10;
                    }
                }
            }
        }
    }

    score
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod eval_tests;
