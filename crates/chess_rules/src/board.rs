//! Board state: piece placement, castling rights, en passant, and the
//! make/unmake pair every legality check and search is built on.

use crate::types::{file_of, rank_of, sq, Color, Move, Piece, PieceKind};

pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_DELTAS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

pub(crate) const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
pub(crate) const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Which wing a castling move happens on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastleSide {
    King,
    Queen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CastlingRights {
    pub wk: bool,
    pub wq: bool,
    pub bk: bool,
    pub bq: bool,
}

impl CastlingRights {
    pub fn all() -> Self {
        Self {
            wk: true,
            wq: true,
            bk: true,
            bq: true,
        }
    }

    pub fn none() -> Self {
        Self {
            wk: false,
            wq: false,
            bk: false,
            bq: false,
        }
    }
}

/// Everything needed to revert a move exactly, including state that cannot
/// be recomputed: prior castling rights, the en-passant square, and the
/// king cache.
#[derive(Clone, Copy, Debug)]
pub struct Undo {
    moved: Piece,
    captured: Option<Piece>,
    captured_sq: Option<u8>,
    rook_move: Option<(u8, u8)>,
    castling: CastlingRights,
    en_passant: Option<u8>,
    kings: [Option<u8>; 2],
}

/// A full game position. Square 0 is a1, square 63 is h8.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    board: [Option<Piece>; 64],
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square bypassed by the last double pawn push, capturable for one reply.
    pub en_passant: Option<u8>,
    kings: [Option<u8>; 2],
}

impl Position {
    /// The standard starting position.
    pub fn startpos() -> Self {
        let mut pos = Self::empty();
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, &kind) in back.iter().enumerate() {
            let file = file as u8;
            pos.place(file, Piece::new(Color::White, kind));
            pos.place(8 + file, Piece::new(Color::White, PieceKind::Pawn));
            pos.place(48 + file, Piece::new(Color::Black, PieceKind::Pawn));
            pos.place(56 + file, Piece::new(Color::Black, kind));
        }
        pos.castling = CastlingRights::all();
        pos
    }

    /// An empty board with White to move and no castling rights. Useful for
    /// building test and puzzle positions with `place`.
    pub fn empty() -> Self {
        Self {
            board: [None; 64],
            side_to_move: Color::White,
            castling: CastlingRights::none(),
            en_passant: None,
            kings: [None; 2],
        }
    }

    pub fn piece_at(&self, square: u8) -> Option<Piece> {
        self.board[square as usize]
    }

    pub fn king_square(&self, color: Color) -> Option<u8> {
        self.kings[color.idx()]
    }

    /// Put a piece on a square, maintaining the king cache.
    pub fn place(&mut self, square: u8, piece: Piece) {
        if let Some(old) = self.board[square as usize] {
            if old.kind == PieceKind::King {
                self.kings[old.color.idx()] = None;
            }
        }
        self.board[square as usize] = Some(piece);
        if piece.kind == PieceKind::King {
            self.kings[piece.color.idx()] = Some(square);
        }
    }

    /// Remove whatever sits on a square, maintaining the king cache.
    pub fn clear_square(&mut self, square: u8) {
        if let Some(old) = self.board[square as usize].take() {
            if old.kind == PieceKind::King {
                self.kings[old.color.idx()] = None;
            }
        }
    }

    fn set(&mut self, square: u8, piece: Option<Piece>) {
        self.board[square as usize] = piece;
    }

    /// Is `target` attacked by any piece of color `by`? Rays are cast
    /// outward from the target, so its current occupant never blocks an
    /// attacker. This is exactly the probe king-safety needs: a king
    /// stepping onto the square would have vacated it.
    pub fn is_square_attacked(&self, target: u8, by: Color) -> bool {
        let tf = file_of(target);
        let tr = rank_of(target);

        // Pawns: probe the two squares a `by` pawn would attack this one from.
        let pawn_rank = tr - by.pawn_dir();
        for df in [-1i8, 1] {
            if let Some(s) = sq(tf + df, pawn_rank) {
                if self.piece_at(s) == Some(Piece::new(by, PieceKind::Pawn)) {
                    return true;
                }
            }
        }

        for (df, dr) in KNIGHT_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr) {
                if self.piece_at(s) == Some(Piece::new(by, PieceKind::Knight)) {
                    return true;
                }
            }
        }

        for (df, dr) in KING_DELTAS {
            if let Some(s) = sq(tf + df, tr + dr) {
                if self.piece_at(s) == Some(Piece::new(by, PieceKind::King)) {
                    return true;
                }
            }
        }

        for (df, dr) in DIAGONALS {
            if self.ray_hits(tf, tr, df, dr, by, PieceKind::Bishop) {
                return true;
            }
        }
        for (df, dr) in ORTHOGONALS {
            if self.ray_hits(tf, tr, df, dr, by, PieceKind::Rook) {
                return true;
            }
        }

        false
    }

    /// Walk a ray until the first piece; `slider` or a queen of color `by`
    /// attacks along it.
    fn ray_hits(&self, tf: i8, tr: i8, df: i8, dr: i8, by: Color, slider: PieceKind) -> bool {
        let mut f = tf + df;
        let mut r = tr + dr;
        while let Some(s) = sq(f, r) {
            if let Some(piece) = self.piece_at(s) {
                return piece.color == by
                    && (piece.kind == slider || piece.kind == PieceKind::Queen);
            }
            f += df;
            r += dr;
        }
        false
    }

    pub fn in_check(&self, color: Color) -> bool {
        match self.kings[color.idx()] {
            Some(king) => self.is_square_attacked(king, color.other()),
            None => false,
        }
    }

    /// Full castling precondition check: right still held, king and rook at
    /// home, path empty, king not in check, transit and destination squares
    /// not attacked.
    pub fn can_castle(&self, color: Color, side: CastleSide) -> bool {
        let allowed = match (color, side) {
            (Color::White, CastleSide::King) => self.castling.wk,
            (Color::White, CastleSide::Queen) => self.castling.wq,
            (Color::Black, CastleSide::King) => self.castling.bk,
            (Color::Black, CastleSide::Queen) => self.castling.bq,
        };
        if !allowed {
            return false;
        }

        let base = match color {
            Color::White => 0u8,
            Color::Black => 56,
        };
        let rook_home = match side {
            CastleSide::King => base + 7,
            CastleSide::Queen => base,
        };
        if self.piece_at(base + 4) != Some(Piece::new(color, PieceKind::King)) {
            return false;
        }
        if self.piece_at(rook_home) != Some(Piece::new(color, PieceKind::Rook)) {
            return false;
        }

        let between: &[u8] = match side {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[1, 2, 3],
        };
        for &file in between {
            if self.piece_at(base + file).is_some() {
                return false;
            }
        }

        if self.in_check(color) {
            return false;
        }

        let enemy = color.other();
        let transit: &[u8] = match side {
            CastleSide::King => &[5, 6],
            CastleSide::Queen => &[3, 2],
        };
        for &file in transit {
            if self.is_square_attacked(base + file, enemy) {
                return false;
            }
        }

        true
    }

    /// Play a move and return the record needed to revert it. The caller
    /// must have a piece on `mv.from`; legality is the caller's concern.
    ///
    /// En passant and castling are recognized from the move geometry: a
    /// pawn changing file onto the en-passant square, or a king moving two
    /// files.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let from = mv.from;
        let to = mv.to;
        let moved = self
            .piece_at(from)
            .expect("make_move called with empty from-square");

        let prior_castling = self.castling;
        let prior_en_passant = self.en_passant;
        let prior_kings = self.kings;

        // Resolve the capture. For en passant the victim sits behind the
        // destination rather than on it.
        let mut captured = self.piece_at(to);
        let mut captured_sq = if captured.is_some() { Some(to) } else { None };
        if moved.kind == PieceKind::Pawn
            && captured.is_none()
            && self.en_passant == Some(to)
            && file_of(from) != file_of(to)
        {
            if let Some(victim_sq) = sq(file_of(to), rank_of(to) - moved.color.pawn_dir()) {
                captured = self.piece_at(victim_sq);
                captured_sq = Some(victim_sq);
                self.set(victim_sq, None);
            }
        }

        self.en_passant = None;
        self.set(from, None);
        self.set(to, Some(moved));

        // Promotion replaces the pawn when a kind was chosen up front.
        if moved.kind == PieceKind::Pawn && rank_of(to) == moved.color.promotion_rank() {
            if let Some(kind) = mv.promo {
                self.set(to, Some(Piece::new(moved.color, kind)));
            }
        }

        // Castling relocates the rook alongside the king.
        let mut rook_move = None;
        if moved.kind == PieceKind::King {
            let (rook_from, rook_to): (u8, u8) = match (moved.color, from, to) {
                (Color::White, 4, 6) => (7, 5),
                (Color::White, 4, 2) => (0, 3),
                (Color::Black, 60, 62) => (63, 61),
                (Color::Black, 60, 58) => (56, 59),
                _ => (64, 64),
            };
            if rook_from < 64 {
                let rook = self.piece_at(rook_from);
                self.set(rook_from, None);
                self.set(rook_to, rook);
                rook_move = Some((rook_from, rook_to));
            }
            self.kings[moved.color.idx()] = Some(to);
        }

        // Castling rights only ever degrade.
        if moved.kind == PieceKind::King {
            match moved.color {
                Color::White => {
                    self.castling.wk = false;
                    self.castling.wq = false;
                }
                Color::Black => {
                    self.castling.bk = false;
                    self.castling.bq = false;
                }
            }
        }
        if moved.kind == PieceKind::Rook {
            match (moved.color, from) {
                (Color::White, 0) => self.castling.wq = false,
                (Color::White, 7) => self.castling.wk = false,
                (Color::Black, 56) => self.castling.bq = false,
                (Color::Black, 63) => self.castling.bk = false,
                _ => {}
            }
        }
        if let (Some(piece), Some(square)) = (captured, captured_sq) {
            if piece.kind == PieceKind::Rook {
                match (piece.color, square) {
                    (Color::White, 0) => self.castling.wq = false,
                    (Color::White, 7) => self.castling.wk = false,
                    (Color::Black, 56) => self.castling.bq = false,
                    (Color::Black, 63) => self.castling.bk = false,
                    _ => {}
                }
            }
        }

        // A double push opens the bypassed square for one reply.
        if moved.kind == PieceKind::Pawn && (rank_of(from) - rank_of(to)).abs() == 2 {
            self.en_passant = sq(file_of(from), (rank_of(from) + rank_of(to)) / 2);
        }

        self.side_to_move = self.side_to_move.other();

        Undo {
            moved,
            captured,
            captured_sq,
            rook_move,
            castling: prior_castling,
            en_passant: prior_en_passant,
            kings: prior_kings,
        }
    }

    /// Revert the most recent `make_move`. Restoring `undo.moved` onto the
    /// from-square also reverts promotions.
    pub fn unmake_move(&mut self, mv: Move, undo: Undo) {
        self.side_to_move = self.side_to_move.other();
        self.castling = undo.castling;
        self.en_passant = undo.en_passant;
        self.kings = undo.kings;

        if let Some((rook_from, rook_to)) = undo.rook_move {
            let rook = self.piece_at(rook_to);
            self.set(rook_to, None);
            self.set(rook_from, rook);
        }

        self.set(mv.to, None);
        self.set(mv.from, Some(undo.moved));

        if let Some(square) = undo.captured_sq {
            self.set(square, undo.captured);
        }
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
