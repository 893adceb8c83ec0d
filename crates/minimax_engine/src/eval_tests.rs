use super::*;
use chess_rules::coord_to_sq;

fn at(coord: &str) -> u8 {
    coord_to_sq(coord).unwrap()
}

fn put(pos: &mut Position, coord: &str, color: Color, kind: PieceKind) {
    pos.place(at(coord), Piece::new(color, kind));
}

fn kings_only() -> Position {
    let mut pos = Position::empty();
    put(&mut pos, "e1", Color::White, PieceKind::King);
    put(&mut pos, "e8", Color::Black, PieceKind::King);
    pos
}

#[test]
fn material_values() {
    assert_eq!(piece_value(PieceKind::Pawn), 100);
    assert_eq!(piece_value(PieceKind::Knight), 300);
    assert_eq!(piece_value(PieceKind::Bishop), 300);
    assert_eq!(piece_value(PieceKind::Rook), 500);
    assert_eq!(piece_value(PieceKind::Queen), 900);
    assert_eq!(piece_value(PieceKind::King), 20000);
}

#[test]
fn phase_detection() {
    assert_eq!(game_phase(&Position::startpos()), GamePhase::Opening);

    // Few pieces but a queen alive: midgame.
    let mut with_queen = kings_only();
    put(&mut with_queen, "d1", Color::White, PieceKind::Queen);
    assert_eq!(game_phase(&with_queen), GamePhase::Midgame);

    // More than four minors, no queens: still midgame.
    let mut minors = kings_only();
    for coord in ["b1", "c1", "f1", "g1", "b8"] {
        put(&mut minors, coord, Color::White, PieceKind::Knight);
    }
    assert_eq!(game_phase(&minors), GamePhase::Midgame);

    // Kings and pawns only: endgame.
    let mut pawns = kings_only();
    put(&mut pawns, "a2", Color::White, PieceKind::Pawn);
    put(&mut pawns, "h7", Color::Black, PieceKind::Pawn);
    assert_eq!(game_phase(&pawns), GamePhase::Endgame);
}

#[test]
fn startpos_evaluation_baseline() {
    // Material cancels; no center square is attacked by either side; pawn
    // structure has no isolated or passed pawns. What remains for White
    // to move is mobility (20 * 2) and a full pawn shield (3 * 20).
    assert_eq!(evaluate(&Position::startpos()), 100);
}

#[test]
fn material_advantage_dominates() {
    let mut pos = kings_only();
    put(&mut pos, "d4", Color::White, PieceKind::Rook);
    let up_a_rook = evaluate(&pos);
    assert!(up_a_rook > 400, "got {up_a_rook}");

    pos.place(at("d5"), Piece::new(Color::Black, PieceKind::Queen));
    assert!(evaluate(&pos) < up_a_rook - 300);
}

#[test]
fn mobility_counts_legal_moves() {
    let pos = Position::startpos();
    assert_eq!(mobility(&pos, Color::White), 20);
    assert_eq!(mobility(&pos, Color::Black), 20);
}

#[test]
fn king_safety_rewards_pawn_shield() {
    let mut pos = Position::empty();
    put(&mut pos, "g1", Color::White, PieceKind::King);
    put(&mut pos, "f2", Color::White, PieceKind::Pawn);
    put(&mut pos, "g2", Color::White, PieceKind::Pawn);
    put(&mut pos, "h2", Color::White, PieceKind::Pawn);
    assert_eq!(king_safety(&pos, Color::White), 60);

    pos.clear_square(at("g2"));
    assert_eq!(king_safety(&pos, Color::White), 10);

    pos.clear_square(at("f2"));
    pos.clear_square(at("h2"));
    assert_eq!(king_safety(&pos, Color::White), -90);
}

#[test]
fn isolated_pawn_is_penalized() {
    let mut pos = kings_only();
    put(&mut pos, "a2", Color::White, PieceKind::Pawn);
    put(&mut pos, "b7", Color::Black, PieceKind::Pawn);
    // Isolated (-20) and not passed: the b7 pawn guards the path.
    assert_eq!(pawn_structure(&pos, Color::White), -20);
}

#[test]
fn passed_pawn_scales_with_advancement() {
    let mut pos = kings_only();
    put(&mut pos, "e5", Color::White, PieceKind::Pawn);
    put(&mut pos, "a7", Color::Black, PieceKind::Pawn);
    // Isolated (-20) but passed with four ranks advanced (+60).
    assert_eq!(pawn_structure(&pos, Color::White), 40);

    // The same pawn one rank further is worth 15 more.
    let mut further = kings_only();
    put(&mut further, "e6", Color::White, PieceKind::Pawn);
    put(&mut further, "a7", Color::Black, PieceKind::Pawn);
    assert_eq!(pawn_structure(&further, Color::White), 55);
}

#[test]
fn center_distance_is_zero_on_both_central_lines() {
    assert_eq!(center_distance(0), 3);
    assert_eq!(center_distance(3), 0);
    assert_eq!(center_distance(4), 0);
    assert_eq!(center_distance(7), 3);
}

#[test]
fn center_control_counts_attacked_squares() {
    let mut pos = Position::empty();
    put(&mut pos, "c6", Color::Black, PieceKind::Knight);
    // Nc6 hits d4 and e5.
    assert_eq!(center_control(&pos, Color::Black), 2);
    assert_eq!(center_control(&pos, Color::White), 0);
}

#[test]
fn kings_indian_bonus_stacks() {
    let mut pos = Position::empty();
    put(&mut pos, "e1", Color::White, PieceKind::King);
    put(&mut pos, "g8", Color::Black, PieceKind::King);
    put(&mut pos, "f8", Color::Black, PieceKind::Bishop);
    put(&mut pos, "f7", Color::Black, PieceKind::Pawn);
    put(&mut pos, "g7", Color::Black, PieceKind::Pawn);

    // Shell alone.
    assert_eq!(kings_indian_bonus(&pos, Color::Black), 50);
    assert_eq!(kings_indian_bonus(&pos, Color::White), 0);

    // Shell plus center pressure.
    put(&mut pos, "c6", Color::Black, PieceKind::Knight);
    assert_eq!(kings_indian_bonus(&pos, Color::Black), 80);

    // Both unlock the pawn-storm term: a pawn on f4 adds (6 - 3) * 10.
    put(&mut pos, "f4", Color::Black, PieceKind::Pawn);
    assert_eq!(kings_indian_bonus(&pos, Color::Black), 110);
}
