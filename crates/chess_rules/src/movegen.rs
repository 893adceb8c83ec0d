//! Legal move generation and point legality queries.
//!
//! Generation is pseudo-legal per piece shape, then filtered by playing
//! each move and rejecting those that leave the mover's king attacked.

use crate::board::{CastleSide, Position, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS};
use crate::types::{file_of, rank_of, sq, Color, Move, PieceKind};

/// Defensive cap on the move list; real positions stay far below it.
pub const MAX_MOVES: usize = 256;

/// All legal moves for the side to move.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);
    moves
}

/// Allocation-reusing variant for search loops. The position is mutated
/// during filtering but restored before returning.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    pseudo_moves(pos, out);

    let mover = pos.side_to_move;
    out.retain(|&mv| {
        let undo = pos.make_move(mv);
        let legal = !pos.in_check(mover);
        pos.unmake_move(mv, undo);
        legal
    });
    out.truncate(MAX_MOVES);
}

/// Legal captures only, including en passant. Used by quiescence search.
pub fn capture_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    legal_moves_into(pos, out);
    out.retain(|&mv| is_capture(pos, mv));
}

/// Does this move take a piece? Recognizes en passant by the pawn's
/// diagonal step onto the bypassed square.
pub fn is_capture(pos: &Position, mv: Move) -> bool {
    let piece = match pos.piece_at(mv.from) {
        Some(p) => p,
        None => return false,
    };
    match pos.piece_at(mv.to) {
        Some(target) => target.color != piece.color,
        None => {
            piece.kind == PieceKind::Pawn
                && pos.en_passant == Some(mv.to)
                && file_of(mv.from) != file_of(mv.to)
        }
    }
}

fn pseudo_moves(pos: &Position, out: &mut Vec<Move>) {
    let color = pos.side_to_move;
    for from in 0..64u8 {
        let piece = match pos.piece_at(from) {
            Some(p) if p.color == color => p,
            _ => continue,
        };
        match piece.kind {
            PieceKind::Pawn => gen_pawn(pos, from, color, out),
            PieceKind::Knight => gen_steps(pos, from, color, &KNIGHT_DELTAS, out),
            PieceKind::Bishop => gen_slider(pos, from, color, &DIAGONALS, out),
            PieceKind::Rook => gen_slider(pos, from, color, &ORTHOGONALS, out),
            PieceKind::Queen => {
                gen_slider(pos, from, color, &DIAGONALS, out);
                gen_slider(pos, from, color, &ORTHOGONALS, out);
            }
            PieceKind::King => {
                gen_steps(pos, from, color, &KING_DELTAS, out);
                gen_castle(pos, from, color, out);
            }
        }
    }
}

fn gen_pawn(pos: &Position, from: u8, color: Color, out: &mut Vec<Move>) {
    let file = file_of(from);
    let rank = rank_of(from);
    let dir = color.pawn_dir();
    let start_rank = match color {
        Color::White => 1,
        Color::Black => 6,
    };

    if let Some(one) = sq(file, rank + dir) {
        if pos.piece_at(one).is_none() {
            push_pawn_move(from, one, color, out);
            if rank == start_rank {
                if let Some(two) = sq(file, rank + 2 * dir) {
                    if pos.piece_at(two).is_none() {
                        out.push(Move::new(from, two));
                    }
                }
            }
        }
    }

    for df in [-1i8, 1] {
        if let Some(to) = sq(file + df, rank + dir) {
            match pos.piece_at(to) {
                Some(target) if target.color != color => push_pawn_move(from, to, color, out),
                None if pos.en_passant == Some(to) => out.push(Move::new(from, to)),
                _ => {}
            }
        }
    }
}

/// Generated promotions always carry a queen; underpromotion is resolved
/// by the game facade after the fact.
fn push_pawn_move(from: u8, to: u8, color: Color, out: &mut Vec<Move>) {
    if rank_of(to) == color.promotion_rank() {
        out.push(Move::promoting(from, to, PieceKind::Queen));
    } else {
        out.push(Move::new(from, to));
    }
}

fn gen_steps(pos: &Position, from: u8, color: Color, deltas: &[(i8, i8)], out: &mut Vec<Move>) {
    let file = file_of(from);
    let rank = rank_of(from);
    for &(df, dr) in deltas {
        if let Some(to) = sq(file + df, rank + dr) {
            match pos.piece_at(to) {
                Some(target) if target.color == color => {}
                _ => out.push(Move::new(from, to)),
            }
        }
    }
}

fn gen_slider(pos: &Position, from: u8, color: Color, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    for &(df, dr) in dirs {
        let mut f = file_of(from) + df;
        let mut r = rank_of(from) + dr;
        while let Some(to) = sq(f, r) {
            match pos.piece_at(to) {
                None => out.push(Move::new(from, to)),
                Some(target) => {
                    if target.color != color {
                        out.push(Move::new(from, to));
                    }
                    break;
                }
            }
            f += df;
            r += dr;
        }
    }
}

fn gen_castle(pos: &Position, from: u8, color: Color, out: &mut Vec<Move>) {
    let home = match color {
        Color::White => 4u8,
        Color::Black => 60,
    };
    if from != home {
        return;
    }
    if pos.can_castle(color, CastleSide::King) {
        out.push(Move::new(from, from + 2));
    }
    if pos.can_castle(color, CastleSide::Queen) {
        out.push(Move::new(from, from - 2));
    }
}

/// Are all squares strictly between `from` and `to` empty? Callers ensure
/// the two squares share a rank, file, or diagonal.
fn path_clear(pos: &Position, from: u8, to: u8) -> bool {
    let df = (file_of(to) - file_of(from)).signum();
    let dr = (rank_of(to) - rank_of(from)).signum();
    let mut f = file_of(from) + df;
    let mut r = rank_of(from) + dr;
    while let Some(s) = sq(f, r) {
        if s == to {
            break;
        }
        if pos.piece_at(s).is_some() {
            return false;
        }
        f += df;
        r += dr;
    }
    true
}

/// Movement-shape test only: ignores who owns the destination and whether
/// the mover's king ends up attacked. Castling is the one exception and
/// runs the full `can_castle` check.
pub fn is_pseudo_legal(pos: &Position, from: u8, to: u8) -> bool {
    let piece = match pos.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    if from == to {
        return false;
    }
    let df = file_of(to) - file_of(from);
    let dr = rank_of(to) - rank_of(from);

    match piece.kind {
        PieceKind::Pawn => {
            let dir = piece.color.pawn_dir();
            if df == 0 && pos.piece_at(to).is_none() {
                if dr == dir {
                    return true;
                }
                let start_rank = match piece.color {
                    Color::White => 1,
                    Color::Black => 6,
                };
                if rank_of(from) == start_rank && dr == 2 * dir {
                    if let Some(mid) = sq(file_of(from), rank_of(from) + dir) {
                        return pos.piece_at(mid).is_none();
                    }
                }
                return false;
            }
            if df.abs() == 1 && dr == dir {
                if pos.piece_at(to).is_some() {
                    return true;
                }
                return pos.en_passant == Some(to);
            }
            false
        }
        PieceKind::Knight => {
            (df.abs() == 1 && dr.abs() == 2) || (df.abs() == 2 && dr.abs() == 1)
        }
        PieceKind::Bishop => df.abs() == dr.abs() && path_clear(pos, from, to),
        PieceKind::Rook => (df == 0 || dr == 0) && path_clear(pos, from, to),
        PieceKind::Queen => {
            (df.abs() == dr.abs() || df == 0 || dr == 0) && path_clear(pos, from, to)
        }
        PieceKind::King => {
            if df.abs() <= 1 && dr.abs() <= 1 {
                return true;
            }
            if dr == 0 && df.abs() == 2 {
                let side = if df > 0 {
                    CastleSide::King
                } else {
                    CastleSide::Queen
                };
                return pos.can_castle(piece.color, side);
            }
            false
        }
    }
}

/// Full legality for a single from/to pair: the piece belongs to the side
/// to move, the shape is valid, the destination is not a friendly piece,
/// and the mover's king is not attacked once the move is played.
pub fn is_legal(pos: &mut Position, from: u8, to: u8) -> bool {
    let piece = match pos.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    if piece.color != pos.side_to_move {
        return false;
    }
    if let Some(target) = pos.piece_at(to) {
        if target.color == piece.color {
            return false;
        }
    }
    if !is_pseudo_legal(pos, from, to) {
        return false;
    }
    // can_castle already verified king safety along the whole path.
    if piece.kind == PieceKind::King && (file_of(from) - file_of(to)).abs() == 2 {
        return true;
    }

    let mv = if piece.kind == PieceKind::Pawn && rank_of(to) == piece.color.promotion_rank() {
        Move::promoting(from, to, PieceKind::Queen)
    } else {
        Move::new(from, to)
    };
    let undo = pos.make_move(mv);
    let legal = !pos.in_check(piece.color);
    pos.unmake_move(mv, undo);
    legal
}

/// In check with no legal reply.
pub fn is_checkmate(pos: &Position, color: Color) -> bool {
    pos.in_check(color) && !has_legal_move(pos, color)
}

/// Not in check, but no legal reply either.
pub fn is_stalemate(pos: &Position, color: Color) -> bool {
    !pos.in_check(color) && !has_legal_move(pos, color)
}

fn has_legal_move(pos: &Position, color: Color) -> bool {
    let mut tmp = pos.clone();
    tmp.side_to_move = color;
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);
    !moves.is_empty()
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
