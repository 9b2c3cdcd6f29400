//! Property tests for the rules engine

use kalah_core::board::side_stones;
use kalah_core::{
    validate_and_apply, verify, BoardState, GameMode, MoveRejection, Player, Winner, NUM_PITS,
};
use proptest::prelude::*;

/// Play choices (taken modulo the legal move count) until the game ends or
/// the choices run out.
fn play_choices(stones_per_pit: u8, choices: &[usize]) -> Vec<BoardState> {
    let mut states = vec![BoardState::with_stones(GameMode::PlayerVsPlayer, stones_per_pit)];

    for &choice in choices {
        let current = states.last().unwrap();
        let legal = current.legal_moves();
        if legal.is_empty() {
            break;
        }
        let pit = legal[choice % legal.len()];
        let (next, _) = validate_and_apply(current, pit).unwrap();
        states.push(next);
    }

    states
}

proptest! {
    #[test]
    fn stones_are_conserved(spp in 1u8..=8, choices in prop::collection::vec(0usize..6, 0..120)) {
        for state in play_choices(spp, &choices) {
            prop_assert_eq!(state.total_stones(), 12 * spp as u16);
        }
    }

    #[test]
    fn stores_never_shrink(choices in prop::collection::vec(0usize..6, 0..120)) {
        let states = play_choices(6, &choices);
        for pair in states.windows(2) {
            for player in [Player::Player1, Player::Player2] {
                prop_assert!(pair[1].store(player) >= pair[0].store(player));
            }
        }
    }

    #[test]
    fn rejected_moves_change_nothing(
        choices in prop::collection::vec(0usize..6, 0..60),
        pit in 0usize..NUM_PITS + 2,
    ) {
        let states = play_choices(6, &choices);
        let state = states.last().unwrap();
        let before = state.clone();

        if let Err(rejection) = validate_and_apply(state, pit) {
            prop_assert_eq!(state, &before);
            if state.is_game_over() {
                prop_assert_eq!(rejection, MoveRejection::GameAlreadyOver);
            }
        } else {
            prop_assert!(state.current_player().owns_pit(pit));
        }
    }

    #[test]
    fn finished_games_are_swept(choices in prop::collection::vec(0usize..6, 200..300)) {
        let states = play_choices(4, &choices);
        let last = states.last().unwrap();
        prop_assume!(last.is_game_over());

        prop_assert_eq!(side_stones(last.pits(), Player::Player1), 0);
        prop_assert_eq!(side_stones(last.pits(), Player::Player2), 0);

        let p1 = last.store(Player::Player1);
        let p2 = last.store(Player::Player2);
        let expected = match p1.cmp(&p2) {
            std::cmp::Ordering::Greater => Winner::Player1,
            std::cmp::Ordering::Less => Winner::Player2,
            std::cmp::Ordering::Equal => Winner::Draw,
        };
        prop_assert_eq!(last.winner(), Some(expected));
        prop_assert!(last.legal_moves().is_empty());
    }

    #[test]
    fn history_replays_cleanly(choices in prop::collection::vec(0usize..6, 0..200)) {
        let states = play_choices(6, &choices);
        let last = states.last().unwrap();
        prop_assert_eq!(last.history().len(), states.len() - 1);
        prop_assert!(verify(last).is_ok());

        if last.is_game_over() {
            for (index, record) in last.history().iter().enumerate() {
                prop_assert_eq!(last.review(index), Ok(record.snapshot));
            }
        }
    }
}
