//! Minimax with alpha-beta pruning and a capture-only quiescence
//! extension. Maximizing nodes are White-to-move nodes.

use chess_rules::{capture_moves_into, is_capture, legal_moves_into, Color, Move, PieceKind, Position};

use crate::eval::{evaluate, piece_value};

/// Mate scores dominate any material swing.
pub const MATE_SCORE: i32 = 100_000;
/// Root and initial window bound, strictly above any reachable score.
pub(crate) const INFINITY: i32 = 1_000_000;

const CAPTURE_ORDER_BONUS: i32 = 1_000;

/// Root search: try every legal move in generation order with a full-width
/// window. Strict comparisons mean the first best move encountered wins.
pub fn find_best_move(pos: &Position, depth: u8, nodes: &mut u64) -> Option<(Move, i32)> {
    let mut tmp = pos.clone();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);
    if moves.is_empty() {
        return None;
    }

    let white = tmp.side_to_move == Color::White;
    let mut best = moves[0];
    let mut best_value = if white { -INFINITY } else { INFINITY };

    for mv in moves {
        let undo = tmp.make_move(mv);
        *nodes += 1;
        let value = minimax(&mut tmp, depth.saturating_sub(1), -INFINITY, INFINITY, !white, nodes);
        tmp.unmake_move(mv, undo);

        if (white && value > best_value) || (!white && value < best_value) {
            best_value = value;
            best = mv;
        }
    }

    Some((best, best_value))
}

pub fn minimax(
    pos: &mut Position,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    maximizing: bool,
    nodes: &mut u64,
) -> i32 {
    if depth == 0 {
        let to_move = if maximizing { Color::White } else { Color::Black };
        return quiescence(pos, alpha, beta, to_move, nodes);
    }

    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);

    if moves.is_empty() {
        if pos.in_check(pos.side_to_move) {
            return if maximizing { -MATE_SCORE } else { MATE_SCORE };
        }
        return 0;
    }

    order_moves(pos, &mut moves);

    if maximizing {
        let mut best = -INFINITY;
        for mv in moves {
            let undo = pos.make_move(mv);
            *nodes += 1;
            let value = minimax(pos, depth - 1, alpha, beta, false, nodes);
            pos.unmake_move(mv, undo);

            if value > best {
                best = value;
            }
            if value > alpha {
                alpha = value;
            }
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = INFINITY;
        for mv in moves {
            let undo = pos.make_move(mv);
            *nodes += 1;
            let value = minimax(pos, depth - 1, alpha, beta, true, nodes);
            pos.unmake_move(mv, undo);

            if value < best {
                best = value;
            }
            if value < beta {
                beta = value;
            }
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

/// Resolve capture sequences at the horizon so the evaluation is never
/// taken mid-exchange. Stand-pat bounds are per-side: White raises alpha,
/// Black lowers beta.
pub fn quiescence(
    pos: &mut Position,
    mut alpha: i32,
    mut beta: i32,
    to_move: Color,
    nodes: &mut u64,
) -> i32 {
    let stand_pat = evaluate(pos);
    match to_move {
        Color::White => {
            if stand_pat >= beta {
                return beta;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        }
        Color::Black => {
            if stand_pat <= alpha {
                return alpha;
            }
            if stand_pat < beta {
                beta = stand_pat;
            }
        }
    }

    let mut captures = Vec::with_capacity(16);
    capture_moves_into(pos, &mut captures);
    order_captures(pos, &mut captures);

    for mv in captures {
        let undo = pos.make_move(mv);
        *nodes += 1;
        let value = -quiescence(pos, -beta, -alpha, to_move.other(), nodes);
        pos.unmake_move(mv, undo);

        match to_move {
            Color::White => {
                if value >= beta {
                    return beta;
                }
                if value > alpha {
                    alpha = value;
                }
            }
            Color::Black => {
                if value <= alpha {
                    return alpha;
                }
                if value < beta {
                    beta = value;
                }
            }
        }
    }

    match to_move {
        Color::White => alpha,
        Color::Black => beta,
    }
}

/// Captures ahead of quiet moves. Ordering affects pruning, never the result.
fn order_moves(pos: &Position, moves: &mut [Move]) {
    for mv in moves.iter_mut() {
        mv.score = if is_capture(pos, *mv) {
            CAPTURE_ORDER_BONUS
        } else {
            0
        };
    }
    moves.sort_by_key(|mv| std::cmp::Reverse(mv.score));
}

/// MVV-LVA: most valuable victim first, least valuable attacker breaking
/// ties. The en-passant victim is a pawn even though the target is empty.
fn order_captures(pos: &Position, moves: &mut [Move]) {
    for mv in moves.iter_mut() {
        let attacker = pos
            .piece_at(mv.from)
            .map(|piece| piece_value(piece.kind))
            .unwrap_or(0);
        let victim = match pos.piece_at(mv.to) {
            Some(piece) => piece_value(piece.kind),
            None => piece_value(PieceKind::Pawn),
        };
        mv.score = victim * 10 - attacker;
    }
    moves.sort_by_key(|mv| std::cmp::Reverse(mv.score));
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
