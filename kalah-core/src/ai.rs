//! CPU-based Alpha-Beta AI

use crate::eval::{evaluate, evaluate_terminal, Heuristics};
use crate::history::SpecialEvent;
use crate::provider::{Difficulty, MoveProvider};
use crate::rules::play_snapshot;
use crate::state::Snapshot;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::cmp::Reverse;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Default seed so unseeded games are still reproducible
const DEFAULT_SEED: u64 = 42;

/// Noise scale for evaluation variety
const NOISE_SCALE: f32 = 0.1;

// ============================================================================
// ALPHA-BETA AI
// ============================================================================

/// Alpha-Beta AI player
pub struct AlphaBetaAI {
    pub depth: u32,
    pub heuristics: Heuristics,
    pub noise_scale: f32,
    rng: ChaCha8Rng,
}

impl AlphaBetaAI {
    pub fn new(depth: u32, heuristics: Heuristics) -> Self {
        Self::with_seed(depth, heuristics, DEFAULT_SEED)
    }

    pub fn with_seed(depth: u32, heuristics: Heuristics, seed: u64) -> Self {
        Self {
            depth,
            heuristics,
            noise_scale: NOISE_SCALE,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Provider configured for a difficulty tier
    pub fn for_difficulty(difficulty: Difficulty, seed: u64) -> Self {
        let mut ai = Self::with_seed(0, Heuristics::default(), seed);
        ai.apply_profile(difficulty);
        ai
    }

    /// Get best move for current position
    pub fn best_move(&mut self, snapshot: &Snapshot) -> Option<usize> {
        get_best_move(
            snapshot,
            self.depth as i32,
            &self.heuristics,
            &mut self.rng,
            self.noise_scale,
        )
    }

    fn apply_profile(&mut self, difficulty: Difficulty) {
        let profile = difficulty.profile();
        self.depth = profile.depth;
        self.noise_scale = profile.noise_scale;
    }
}

impl MoveProvider for AlphaBetaAI {
    fn choose_move(&mut self, snapshot: &Snapshot, difficulty: Difficulty) -> Option<usize> {
        self.apply_profile(difficulty);
        self.best_move(snapshot)
    }

    fn name(&self) -> &str {
        "alpha-beta"
    }
}

// ============================================================================
// MOVE ORDERING
// ============================================================================

/// Score a move for ordering (higher = search first)
fn move_score(snapshot: &Snapshot, pit: usize) -> u32 {
    match play_snapshot(snapshot, pit).and_then(|mv| mv.special_event) {
        Some(SpecialEvent::ExtraTurn) => 1000,
        Some(SpecialEvent::Capture { stones_captured }) => 10 + stones_captured as u32,
        None => 0,
    }
}

/// Legal pits, best-looking first. Each pit is simulated once; ties keep pit order.
fn ordered_moves(snapshot: &Snapshot) -> Vec<usize> {
    let mut moves = snapshot.legal_pits();
    moves.sort_by_cached_key(|&pit| Reverse(move_score(snapshot, pit)));
    moves
}

// ============================================================================
// NEGAMAX WITH ALPHA-BETA
// ============================================================================

/// Score of `snapshot` for its player to move
fn negamax(
    snapshot: &Snapshot,
    depth: i32,
    mut alpha: f32,
    beta: f32,
    heuristics: &Heuristics,
    rng: &mut ChaCha8Rng,
    noise_scale: f32,
) -> f32 {
    let moves = ordered_moves(snapshot);

    // Depth limit
    if depth <= 0 || moves.is_empty() {
        let base = evaluate(snapshot, heuristics);
        let noise = (rng.gen::<f32>() - 0.5) * noise_scale;
        return base + noise;
    }

    let mut best = f32::NEG_INFINITY;

    for pit in moves {
        let score = score_child(snapshot, pit, depth, alpha, beta, heuristics, rng, noise_scale);

        best = best.max(score);
        alpha = alpha.max(score);

        if alpha >= beta {
            break;
        }
    }

    best
}

/// Score of playing `pit`, from the mover's point of view
#[allow(clippy::too_many_arguments)]
fn score_child(
    snapshot: &Snapshot,
    pit: usize,
    depth: i32,
    alpha: f32,
    beta: f32,
    heuristics: &Heuristics,
    rng: &mut ChaCha8Rng,
    noise_scale: f32,
) -> f32 {
    let mover = snapshot.current_player;
    let Some(child) = play_snapshot(snapshot, pit) else {
        return f32::NEG_INFINITY;
    };

    if let Some(winner) = child.finished {
        return evaluate_terminal(winner, mover, depth);
    }

    if child.snapshot.current_player == mover {
        // Extra turn: same side keeps moving, no depth consumed, no sign flip
        negamax(&child.snapshot, depth, alpha, beta, heuristics, rng, noise_scale)
    } else {
        -negamax(&child.snapshot, depth - 1, -beta, -alpha, heuristics, rng, noise_scale)
    }
}

fn get_best_move(
    snapshot: &Snapshot,
    depth: i32,
    heuristics: &Heuristics,
    rng: &mut ChaCha8Rng,
    noise_scale: f32,
) -> Option<usize> {
    let moves = ordered_moves(snapshot);
    if moves.len() <= 1 {
        return moves.first().copied();
    }

    let mut best_move = moves[0];
    let mut best_score = f32::NEG_INFINITY;

    for pit in moves {
        let score = score_child(
            snapshot,
            pit,
            depth.max(1),
            f32::NEG_INFINITY,
            f32::INFINITY,
            heuristics,
            rng,
            noise_scale,
        );

        if score > best_score {
            best_score = score;
            best_move = pit;
        }
    }

    Some(best_move)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{initial_pits, Player};

    fn opening() -> Snapshot {
        Snapshot {
            pits: initial_pits(6),
            current_player: Player::Player1,
        }
    }

    #[test]
    fn test_ai_returns_legal_move() {
        let mut ai = AlphaBetaAI::new(3, Heuristics::default());
        let pit = ai.best_move(&opening()).unwrap();
        assert!(opening().legal_pits().contains(&pit));
    }

    #[test]
    fn test_ai_prefers_big_capture() {
        // Player 2 to move. Pit 11 (1 stone) lands in empty pit 12, opposite pit 0 holds 15.
        let pits = [15, 1, 1, 1, 1, 1, 10, 1, 1, 1, 1, 1, 0, 37];
        let snapshot = Snapshot {
            pits,
            current_player: Player::Player2,
        };

        let mut ai = AlphaBetaAI::new(2, Heuristics::default());
        ai.noise_scale = 0.0;
        assert_eq!(ai.best_move(&snapshot), Some(11));
    }

    #[test]
    fn test_single_legal_move_is_returned() {
        let pits = [0, 0, 0, 0, 0, 1, 40, 1, 1, 0, 0, 0, 0, 29];
        let snapshot = Snapshot {
            pits,
            current_player: Player::Player1,
        };

        let mut ai = AlphaBetaAI::new(3, Heuristics::default());
        assert_eq!(ai.best_move(&snapshot), Some(5));
    }

    #[test]
    fn test_every_tier_answers_legally() {
        let pits = [2, 0, 7, 1, 3, 9, 12, 4, 0, 6, 5, 2, 8, 13];
        let snapshot = Snapshot {
            pits,
            current_player: Player::Player2,
        };

        for difficulty in [Difficulty::Easy, Difficulty::Medium] {
            let mut ai = AlphaBetaAI::for_difficulty(difficulty, 3);
            let pit = ai.choose_move(&snapshot, difficulty).unwrap();
            assert!(snapshot.legal_pits().contains(&pit), "{difficulty}: {pit}");
        }
    }

    #[test]
    fn test_no_move_when_side_empty() {
        let mut pits = [0u8; 14];
        pits[6] = 36;
        pits[13] = 36;
        let snapshot = Snapshot {
            pits,
            current_player: Player::Player2,
        };
        let mut ai = AlphaBetaAI::new(2, Heuristics::default());
        assert_eq!(ai.best_move(&snapshot), None);
    }

    #[test]
    fn test_move_ordering() {
        let moves = ordered_moves(&opening());
        // Pit 0 lands in the store and is searched first
        assert_eq!(moves[0], 0);
        assert_eq!(moves.len(), 6);
    }

    #[test]
    fn test_move_ordering_ranks_captures() {
        // Pit 9 ends in the store, pit 11 captures 15 from pit 0, pit 7 captures 3 from
        // pit 4, pit 10 is a plain move
        let pits = [15, 0, 0, 0, 3, 1, 10, 1, 0, 4, 1, 1, 0, 36];
        let snapshot = Snapshot {
            pits,
            current_player: Player::Player2,
        };

        assert_eq!(ordered_moves(&snapshot), vec![9, 11, 7, 10]);
    }

    #[test]
    fn test_seeded_ai_is_deterministic() {
        let mut a = AlphaBetaAI::for_difficulty(Difficulty::Easy, 9);
        let mut b = AlphaBetaAI::for_difficulty(Difficulty::Easy, 9);
        let snapshot = opening();
        for _ in 0..5 {
            assert_eq!(
                a.choose_move(&snapshot, Difficulty::Easy),
                b.choose_move(&snapshot, Difficulty::Easy)
            );
        }
    }

    #[test]
    fn test_provider_uses_difficulty_profile() {
        let mut ai = AlphaBetaAI::new(1, Heuristics::default());
        ai.choose_move(&opening(), Difficulty::Medium);
        assert_eq!(ai.depth, Difficulty::Medium.profile().depth);
    }
}
