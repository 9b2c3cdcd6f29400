//! Integration tests for the Kalah engine
//!
//! Tests the full stack: rules engine, move providers, game session and replay

use kalah_core::{
    board::initial_pits, play_out, replay, validate_and_apply, verify, AlphaBetaAI, BoardState,
    Difficulty, GameConfig, GameMode, GameSession, HistoryCursor, MoveProvider, MoveRejection,
    Player, RandomProvider, SpecialEvent, Winner,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn position(pits: [u8; 14], player: Player) -> BoardState {
    BoardState::from_position(pits, player, GameMode::PlayerVsPlayer, 6)
}

/// AI at `difficulty` against a random mover; returns true when the AI won
fn ai_beats_random(difficulty: Difficulty, ai_seat: Player, seed: u64) -> bool {
    let ai: Box<dyn MoveProvider> = Box::new(AlphaBetaAI::for_difficulty(difficulty, seed));
    let random: Box<dyn MoveProvider> = Box::new(RandomProvider::with_seed(seed + 100));
    let mut providers = match ai_seat {
        Player::Player1 => [ai, random],
        Player::Player2 => [random, ai],
    };
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let state = play_out(
        BoardState::default(),
        &mut providers,
        [difficulty; 2],
        &mut rng,
    );

    let ai_wins = match ai_seat {
        Player::Player1 => Winner::Player1,
        Player::Player2 => Winner::Player2,
    };
    state.winner() == Some(ai_wins)
}

// ============================================================================
// RULE SCENARIOS
// ============================================================================

#[test]
fn test_opening_extra_turn() {
    let state = BoardState::default();

    // Six stones from pit 0 run 1..=6 and finish in the store
    let (next, outcome) = validate_and_apply(&state, 0).unwrap();
    assert_eq!(outcome.special_event, Some(SpecialEvent::ExtraTurn));
    assert_eq!(next.current_player(), Player::Player1);
    assert_eq!(next.store(Player::Player1), 1);
    assert!(next.last_capture().is_none());

    // From pit 2 they run past the store and the turn passes
    let (next, outcome) = validate_and_apply(&state, 2).unwrap();
    assert_eq!(outcome.last_pit, 8);
    assert_eq!(outcome.special_event, None);
    assert_eq!(next.current_player(), Player::Player2);
}

#[test]
fn test_capture_into_store() {
    let state = position([6, 6, 6, 6, 1, 0, 5, 7, 6, 6, 6, 6, 6, 5], Player::Player1);

    let (next, outcome) = validate_and_apply(&state, 4).unwrap();
    assert_eq!(
        outcome.special_event,
        Some(SpecialEvent::Capture { stones_captured: 8 })
    );
    assert_eq!(next.stones(5), 0);
    assert_eq!(next.stones(7), 0);
    assert_eq!(next.store(Player::Player1), 13);
    assert_eq!(next.current_player(), Player::Player2);
    assert_eq!(next.total_stones(), 72);
}

#[test]
fn test_end_game_sweep() {
    let state = position([0, 0, 0, 0, 0, 1, 30, 3, 2, 1, 0, 4, 1, 30], Player::Player1);

    let (next, outcome) = validate_and_apply(&state, 5).unwrap();
    let sweep = outcome.sweep.expect("side emptied, game should end");
    assert_eq!(sweep.player2_swept, 11);
    assert!(next.is_game_over());
    assert_eq!(next.winner(), Some(Winner::Player2));
    assert_eq!(next.store(Player::Player1), 31);
    assert_eq!(next.store(Player::Player2), 41);
    assert!((0..14).filter(|&p| p != 6 && p != 13).all(|p| next.stones(p) == 0));

    assert_eq!(
        validate_and_apply(&next, 7).unwrap_err(),
        MoveRejection::GameAlreadyOver
    );
}

#[test]
fn test_rejection_leaves_state_unchanged() {
    let state = BoardState::default();
    let before = state.clone();

    assert_eq!(
        validate_and_apply(&state, 8).unwrap_err(),
        MoveRejection::NotOwnedByMover {
            pit: 8,
            mover: Player::Player1
        }
    );
    assert_eq!(state, before);
}

// ============================================================================
// FULL GAMES
// ============================================================================

#[test]
fn test_ai_vs_random_full_games() {
    let mut wins = 0;
    for seed in 0..3 {
        if ai_beats_random(Difficulty::Medium, Player::Player1, seed) {
            wins += 1;
        }
        if ai_beats_random(Difficulty::Medium, Player::Player2, seed) {
            wins += 1;
        }
    }
    assert!(wins >= 4, "Medium AI won only {} of 6 games against random", wins);
}

#[test]
fn test_session_game_to_review() {
    let mut config = GameConfig::player_vs_ai(Difficulty::Easy);
    config.seed = Some(21);
    let mut session = GameSession::new(config);

    // Human always sows the first legal pit
    let mut turns = 0;
    while !session.state().is_game_over() {
        if session.is_ai_turn() {
            session.play_ai().unwrap();
        } else {
            let pit = session.state().legal_moves()[0];
            session.play(pit).unwrap();
        }
        turns += 1;
        assert!(turns < 500, "game did not finish");
    }

    let state = session.state();
    assert_eq!(state.total_stones(), 72);
    assert!(verify(state).is_ok());

    let mut cursor = HistoryCursor::new(state).unwrap();
    assert!(cursor.at_end());
    let mut steps = 0;
    while cursor.backward().is_some() {
        steps += 1;
    }
    assert_eq!(steps, state.history().len() - 1);
    assert_eq!(cursor.snapshot(), state.history()[0].snapshot);
}

#[test]
fn test_replay_matches_live_game() {
    let mut providers: [Box<dyn MoveProvider>; 2] = [
        Box::new(RandomProvider::with_seed(3)),
        Box::new(AlphaBetaAI::for_difficulty(Difficulty::Easy, 4)),
    ];
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let played = play_out(
        BoardState::with_stones(GameMode::PlayerVsPlayer, 4),
        &mut providers,
        [Difficulty::Easy; 2],
        &mut rng,
    );

    let pits: Vec<usize> = played.history().iter().map(|r| r.pit).collect();
    let replayed = replay(BoardState::with_stones(GameMode::PlayerVsPlayer, 4), &pits).unwrap();

    assert_eq!(replayed, played);
    assert_eq!(replayed.pits()[..6], [0; 6]);
}

#[test]
fn test_config_drives_state() {
    let config = GameConfig {
        stones_per_pit: 3,
        ..GameConfig::player_vs_player()
    };
    let state = config.new_state();
    assert_eq!(*state.pits(), initial_pits(3));
    assert_eq!(state.total_stones(), 36);
}
