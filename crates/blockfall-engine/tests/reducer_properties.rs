use std::collections::HashSet;

use blockfall_engine::{
    Action, CatalogIndex, GameState, Movement, PieceSequence, RotationDirection,
    config::{INITIAL_POWER_UPS, LINES_PER_LEVEL},
    hash, reduce, replay, scale,
};
use proptest::prelude::*;

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => Just(Action::Tick),
        3 => (1_u8..=7).prop_map(|i| Action::Spawn(CatalogIndex::new(i))),
        3 => Just(Action::Move(Movement::left())),
        3 => Just(Action::Move(Movement::right())),
        2 => Just(Action::Move(Movement::down())),
        2 => Just(Action::HardDrop),
        2 => Just(Action::Rotate(RotationDirection::Clockwise)),
        1 => Just(Action::Rotate(RotationDirection::CounterClockwise)),
        1 => Just(Action::PowerUp),
        1 => Just(Action::Restart),
    ]
}

fn assert_settled_cells_unique(state: &GameState) {
    let mut seen = HashSet::new();
    for block in &state.settled_blocks {
        assert!(
            seen.insert(block.position),
            "two settled blocks at {}",
            block.position
        );
    }
}

fn assert_power_up_accounting(prev: &GameState, action: Action, next: &GameState) {
    match action {
        Action::Restart => assert_eq!(next.power_ups, INITIAL_POWER_UPS),
        _ if prev.game_over => assert_eq!(next, prev),
        Action::PowerUp if prev.power_ups > 0 => {
            assert_eq!(next.power_ups, prev.power_ups - 1);
        }
        _ => {
            let gained = u32::from(next.level > prev.level);
            assert_eq!(next.power_ups, prev.power_ups + gained, "{action:?}");
        }
    }
}

proptest! {
    #[test]
    fn random_play_keeps_state_consistent(
        actions in prop::collection::vec(action(), 1..600),
    ) {
        let mut state = GameState::initial();
        for &action in &actions {
            let next = reduce(state.clone(), action);
            assert_settled_cells_unique(&next);
            prop_assert_eq!(next.level, next.cleared_lines / LINES_PER_LEVEL);
            prop_assert!(next.level <= state.level + 1 || action.is_restart());
            assert_power_up_accounting(&state, action, &next);
            state = next;
        }
    }

    #[test]
    fn replay_matches_step_by_step_reduction(
        actions in prop::collection::vec(action(), 0..200),
    ) {
        let replayed: Vec<_> = replay(actions.iter().copied()).collect();
        let mut state = GameState::initial();
        for (action, expected) in actions.iter().zip(&replayed) {
            state = reduce(state, *action);
            prop_assert_eq!(&state, expected);
        }
    }

    #[test]
    fn scale_always_yields_valid_index(seed in any::<u32>()) {
        let index = scale(hash(seed));
        prop_assert!((1..=7).contains(&index.get()));
    }

    #[test]
    fn equal_seeds_give_equal_sequences(seed in any::<u32>(), len in 1_usize..300) {
        let a: Vec<_> = PieceSequence::new(seed).take(len).collect();
        let b: Vec<_> = PieceSequence::new(seed).take(len).collect();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn hard_drop_lands_on_the_stack() {
    let mut state = GameState::initial();
    let mut pieces = PieceSequence::new(20_240_601);
    for round in 0..12 {
        if state.game_over {
            break;
        }
        let distance = state.drop_distance(&state.active_piece);
        let before = state.score;
        state = reduce(state, Action::HardDrop);
        assert_eq!(state.score, before + distance.unsigned_abs() + 1, "round {round}");
        assert!(state.is_grounded(), "round {round}");

        state = reduce(state, Action::Tick);
        state = reduce(state, Action::Spawn(pieces.next().unwrap()));
        // Let the countdown expire so the next piece starts fresh.
        while state.tick_rate > 0 && !state.game_over {
            state = reduce(state, Action::Tick);
        }
    }
}
