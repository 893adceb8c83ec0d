//! Minimax chess engine.
//!
//! Alpha-beta search over `chess_rules` positions with quiescence at the
//! horizon, phase-aware evaluation, and an opening heuristic layer that
//! short-circuits search while development is the priority.

mod eval;
mod opening;
mod search;

use chess_rules::{Engine, Position, SearchResult};

pub use eval::{
    center_control, evaluate, game_phase, king_safety, kings_indian_bonus, mobility,
    pawn_structure, piece_value, GamePhase,
};
pub use opening::{KingsIndianDefense, OpeningLayer, OpeningStrategy};
pub use search::{find_best_move, minimax, quiescence, MATE_SCORE};

/// Alpha-beta minimax engine with quiescence search and an opening layer.
#[derive(Default)]
pub struct MinimaxEngine {
    opening: OpeningLayer,
    nodes: u64,
}

impl MinimaxEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom set of opening strategies.
    pub fn with_openings(opening: OpeningLayer) -> Self {
        Self { opening, nodes: 0 }
    }
}

impl Engine for MinimaxEngine {
    fn search(&mut self, pos: &Position, depth: u8) -> SearchResult {
        self.nodes = 0;

        if game_phase(pos) == GamePhase::Opening {
            let mut tmp = pos.clone();
            if let Some(mv) = self.opening.suggest(&mut tmp) {
                tracing::debug!(from = mv.from, to = mv.to, "opening layer chose the move");
                return SearchResult {
                    best_move: Some(mv),
                    score: 0,
                    depth: 0,
                    nodes: self.nodes,
                };
            }
        }

        let result = search::find_best_move(pos, depth, &mut self.nodes);
        if let Some((mv, score)) = result {
            tracing::debug!(
                from = mv.from,
                to = mv.to,
                score,
                nodes = self.nodes,
                "search complete"
            );
        }

        SearchResult {
            best_move: result.map(|(mv, _)| mv),
            score: result.map(|(_, score)| score).unwrap_or(0),
            depth,
            nodes: self.nodes,
        }
    }

    fn name(&self) -> &str {
        "Minimax v1.0"
    }

    fn new_game(&mut self) {
        self.nodes = 0;
    }
}
