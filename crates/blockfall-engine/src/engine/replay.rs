use std::mem;

use super::{
    action::{Action, reduce},
    state::GameState,
};

/// Runs `actions` from the initial state, yielding the state after each one.
///
/// The initial state itself is not yielded.
pub fn replay<I>(actions: I) -> impl Iterator<Item = GameState>
where
    I: IntoIterator<Item = Action>,
{
    actions
        .into_iter()
        .scan(GameState::initial(), |state, action| {
            *state = reduce(mem::take(state), action);
            Some(state.clone())
        })
}

/// State reached after running `actions` from the initial state.
#[must_use]
pub fn final_state<I>(actions: I) -> GameState
where
    I: IntoIterator<Item = Action>,
{
    actions.into_iter().fold(GameState::initial(), reduce)
}
