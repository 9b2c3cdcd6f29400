//! Game session: the caller side of the engine
//!
//! Owns the live `BoardState`, serializes human and AI moves, and checks
//! every answer from the move provider before it reaches the engine.

use crate::ai::AlphaBetaAI;
use crate::board::Player;
use crate::config::GameConfig;
use crate::error::{MoveRejection, SessionError};
use crate::provider::{Difficulty, MoveProvider};
use crate::rules::{detect_end_game, validate_and_apply, MoveOutcome};
use crate::state::{BoardState, GameMode, Snapshot};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A move made on behalf of the provider
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiMove {
    /// What the provider answered
    pub requested: Option<usize>,
    /// Pit actually played
    pub pit: usize,
    /// True when the answer was unusable and a random legal pit was played
    pub substituted: bool,
    pub outcome: MoveOutcome,
}

pub struct GameSession {
    state: BoardState,
    config: GameConfig,
    provider: Box<dyn MoveProvider>,
    rng: ChaCha8Rng,
}

impl GameSession {
    /// Session backed by the alpha-beta provider
    pub fn new(config: GameConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let provider = Box::new(AlphaBetaAI::for_difficulty(config.difficulty, seed));
        Self::with_provider(config, provider)
    }

    pub fn with_provider(config: GameConfig, provider: Box<dyn MoveProvider>) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        tracing::info!(
            "New game: {:?}, {} stones per pit, provider={} ({})",
            config.mode,
            config.stones_per_pit,
            provider.name(),
            config.difficulty
        );

        Self {
            state: config.new_state(),
            config,
            provider,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Continue from an existing state (mode is taken from the state)
    pub fn resume(state: BoardState, mut config: GameConfig, provider: Box<dyn MoveProvider>) -> Self {
        config.mode = state.mode();
        config.stones_per_pit = state.stones_per_pit();
        let mut session = Self::with_provider(config, provider);
        session.state = state;
        session
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The AI always holds the Player 2 seat in `PlayerVsAi` games
    pub fn is_ai_turn(&self) -> bool {
        self.config.mode == GameMode::PlayerVsAi
            && self.state.current_player() == Player::Player2
            && !self.state.is_game_over()
    }

    /// Human move
    pub fn play(&mut self, pit: usize) -> Result<MoveOutcome, SessionError> {
        if self.is_ai_turn() {
            return Err(SessionError::AwaitingAi);
        }
        self.apply(pit).map_err(SessionError::from)
    }

    /// Ask the provider for a move and play it
    pub fn play_ai(&mut self) -> Result<AiMove, SessionError> {
        if self.state.is_game_over() {
            return Err(MoveRejection::GameAlreadyOver.into());
        }
        if !self.is_ai_turn() {
            return Err(SessionError::NotAiTurn);
        }

        let snapshot = self.state.snapshot();
        let requested = self.provider.choose_move(&snapshot, self.config.difficulty);

        let Some((pit, substituted)) = sanitize_choice(&snapshot, requested, &mut self.rng) else {
            self.conclude_without_moves();
            return Err(MoveRejection::CollaboratorNoLegalMove.into());
        };

        let outcome = self.apply(pit)?;
        Ok(AiMove {
            requested,
            pit,
            substituted,
            outcome,
        })
    }

    /// Clear the capture highlight once the presentation layer has shown it
    pub fn acknowledge_capture(&mut self) {
        self.state.clear_capture();
    }

    /// Snapshot after move `index`; game must be over
    pub fn review(&self, index: usize) -> Result<Snapshot, SessionError> {
        Ok(self.state.review(index)?)
    }

    /// Throw the current board away and start over with the same settings
    pub fn restart(&mut self) {
        tracing::info!("Restarting game");
        self.state = self.config.new_state();
    }

    fn apply(&mut self, pit: usize) -> Result<MoveOutcome, MoveRejection> {
        let (next, outcome) = validate_and_apply(&self.state, pit)?;
        tracing::debug!(
            "{:?} played pit {} ({} stones) -> {:?}",
            outcome.mover,
            pit,
            outcome.stones_moved,
            outcome.special_event
        );

        self.state = next;
        if let Some(winner) = self.state.winner() {
            tracing::info!(
                "Game over: {:?} ({} - {})",
                winner,
                self.state.store(Player::Player1),
                self.state.store(Player::Player2)
            );
        }
        Ok(outcome)
    }

    fn conclude_without_moves(&mut self) {
        tracing::warn!("Move provider found no legal move; ending the game");
        detect_end_game(&mut self.state);
    }
}

/// Turn a provider answer into a playable pit.
///
/// Returns the pit and whether it had to be substituted, or `None` when the
/// mover really has no legal move.
pub fn sanitize_choice(
    snapshot: &Snapshot,
    requested: Option<usize>,
    rng: &mut ChaCha8Rng,
) -> Option<(usize, bool)> {
    let legal = snapshot.legal_pits();

    match requested {
        Some(pit) if legal.contains(&pit) => Some((pit, false)),
        _ => {
            let fallback = legal.choose(rng).copied()?;
            tracing::warn!(
                "Provider answered {:?}, not a legal pit; playing {} instead",
                requested,
                fallback
            );
            Some((fallback, true))
        }
    }
}

/// Let two providers play a game to the end. `providers[0]` plays Player 1.
pub fn play_out(
    initial: BoardState,
    providers: &mut [Box<dyn MoveProvider>; 2],
    difficulties: [Difficulty; 2],
    rng: &mut ChaCha8Rng,
) -> BoardState {
    let mut state = initial;

    while !state.is_game_over() {
        let seat = state.current_player() as usize;
        let snapshot = state.snapshot();
        let requested = providers[seat].choose_move(&snapshot, difficulties[seat]);

        let Some((pit, _)) = sanitize_choice(&snapshot, requested, rng) else {
            detect_end_game(&mut state);
            break;
        };

        match validate_and_apply(&state, pit) {
            Ok((next, _)) => state = next,
            Err(rejection) => {
                // sanitize_choice only returns legal pits
                tracing::error!("Sanitized move {} rejected: {}", pit, rejection);
                break;
            }
        }
    }

    state
}
