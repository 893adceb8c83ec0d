use super::*;
use crate::movegen::legal_moves;
use crate::types::coord_to_sq;
use crate::SearchResult;

fn at(coord: &str) -> u8 {
    coord_to_sq(coord).unwrap()
}

fn put(pos: &mut Position, coord: &str, color: Color, kind: PieceKind) {
    pos.place(at(coord), Piece::new(color, kind));
}

/// Trivial engine for facade tests: plays the first legal move.
struct FirstMoveEngine;

impl Engine for FirstMoveEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        let moves = legal_moves(pos);
        SearchResult {
            best_move: moves.first().copied(),
            score: 0,
            depth,
            nodes: moves.len() as u64,
        }
    }

    fn name(&self) -> &str {
        "first-move"
    }
}

fn fools_mate() -> Game {
    let mut game = Game::new();
    for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
        game.make_move(at(from), at(to)).unwrap();
    }
    game
}

#[test]
fn rejects_illegal_moves_without_state_change() {
    let mut game = Game::new();
    let before = game.position().clone();

    assert_eq!(
        game.make_move(at("e7"), at("e5")),
        Err(GameError::InvalidMove {
            from: at("e7"),
            to: at("e5")
        }),
        "not black's turn"
    );
    assert_eq!(
        game.make_move(at("e2"), at("e6")),
        Err(GameError::InvalidMove {
            from: at("e2"),
            to: at("e6")
        }),
        "bad shape"
    );
    assert_eq!(
        game.make_move(at("e4"), at("e5")),
        Err(GameError::InvalidMove {
            from: at("e4"),
            to: at("e5")
        }),
        "empty square"
    );
    assert_eq!(game.position(), &before);
    assert_eq!(game.status(), GameStatus::Ongoing);
}

#[test]
fn failed_castle_is_reported_specifically() {
    let mut game = Game::new();
    assert_eq!(
        game.make_move(at("e1"), at("g1")),
        Err(GameError::IllegalCastle {
            color: Color::White
        })
    );
}

#[test]
fn legal_moves_from_for_highlighting() {
    let game = Game::new();
    let pawn_targets = game.legal_moves_from(at("e2"));
    assert_eq!(pawn_targets.len(), 2);
    assert!(pawn_targets.contains(&at("e3")));
    assert!(pawn_targets.contains(&at("e4")));

    assert!(game.legal_moves_from(at("d8")).is_empty(), "wrong side");
    assert!(game.legal_moves_from(at("e4")).is_empty(), "empty square");
    assert!(game.legal_moves_from(at("d1")).is_empty(), "boxed-in queen");
}

#[test]
fn promotion_flow() {
    let mut pos = Position::empty();
    put(&mut pos, "g1", Color::White, PieceKind::King);
    put(&mut pos, "h7", Color::Black, PieceKind::King);
    put(&mut pos, "a7", Color::White, PieceKind::Pawn);
    let mut game = Game::from_position(pos);

    assert_eq!(
        game.make_move(at("a7"), at("a8")),
        Ok(MoveOutcome::PromotionPending)
    );
    assert_eq!(game.pending_promotion(), Some(at("a8")));

    // Nothing else may happen until the promotion is resolved.
    assert_eq!(
        game.make_move(at("h7"), at("h6")),
        Err(GameError::PromotionUnresolved)
    );
    assert!(game.legal_moves_from(at("h7")).is_empty());

    assert_eq!(
        game.complete_promotion(at("a8"), PieceKind::King),
        Err(GameError::InvalidPromotionKind(PieceKind::King))
    );
    assert_eq!(
        game.complete_promotion(at("a8"), PieceKind::Pawn),
        Err(GameError::InvalidPromotionKind(PieceKind::Pawn))
    );
    assert_eq!(
        game.complete_promotion(at("b8"), PieceKind::Queen),
        Err(GameError::NoPromotionPending)
    );

    assert_eq!(game.complete_promotion(at("a8"), PieceKind::Queen), Ok(()));
    assert_eq!(
        game.position().piece_at(at("a8")),
        Some(Piece::new(Color::White, PieceKind::Queen))
    );
    assert_eq!(game.pending_promotion(), None);

    // Black moves again.
    assert_eq!(game.make_move(at("h7"), at("h6")), Ok(MoveOutcome::Played));
}

#[test]
fn underpromotion_installs_chosen_piece() {
    let mut pos = Position::empty();
    put(&mut pos, "g1", Color::White, PieceKind::King);
    put(&mut pos, "h7", Color::Black, PieceKind::King);
    put(&mut pos, "a7", Color::White, PieceKind::Pawn);
    let mut game = Game::from_position(pos);

    game.make_move(at("a7"), at("a8")).unwrap();
    game.complete_promotion(at("a8"), PieceKind::Knight).unwrap();
    assert_eq!(
        game.position().piece_at(at("a8")),
        Some(Piece::new(Color::White, PieceKind::Knight))
    );
}

#[test]
fn checkmate_refuses_moves_until_reset() {
    let mut game = fools_mate();
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: Color::Black
        }
    );
    assert_eq!(game.make_move(at("e2"), at("e4")), Err(GameError::GameOver));
    assert!(game.legal_moves_from(at("e2")).is_empty());

    game.reset();
    assert_eq!(game.status(), GameStatus::Ongoing);
    assert_eq!(game.make_move(at("e2"), at("e4")), Ok(MoveOutcome::Played));
}

#[test]
fn check_status_names_the_checked_side() {
    let mut pos = Position::empty();
    put(&mut pos, "e1", Color::White, PieceKind::King);
    put(&mut pos, "a8", Color::Black, PieceKind::King);
    put(&mut pos, "e8", Color::Black, PieceKind::Queen);
    let game = Game::from_position(pos);
    assert_eq!(game.status(), GameStatus::Check(Color::White));
}

#[test]
fn stalemate_is_terminal() {
    let mut pos = Position::empty();
    put(&mut pos, "h8", Color::Black, PieceKind::King);
    put(&mut pos, "f7", Color::White, PieceKind::King);
    put(&mut pos, "g6", Color::White, PieceKind::Queen);
    pos.side_to_move = Color::Black;
    let mut game = Game::from_position(pos);

    assert_eq!(game.status(), GameStatus::Stalemate);
    assert_eq!(game.make_move(at("h8"), at("h7")), Err(GameError::GameOver));
}

#[test]
fn ai_request_returns_move_without_playing_it() {
    let game = Game::new();
    let mut engine = FirstMoveEngine;
    let mv = game.request_ai_move(&mut engine, 1).unwrap();
    assert!(legal_moves(game.position()).contains(&mv));
    assert_eq!(game.position(), &Position::startpos(), "not applied");
}

#[test]
fn ai_request_refused_when_game_over() {
    let game = fools_mate();
    let mut engine = FirstMoveEngine;
    assert_eq!(
        game.request_ai_move(&mut engine, 1),
        Err(GameError::GameOver)
    );
}
