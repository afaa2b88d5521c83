use blockfall_engine::{Action, GameState, reduce, replay};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A played game, stored as the exact action stream the engine saw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedSession {
    /// When the recording was saved (ISO 8601)
    pub recorded_at: DateTime<Utc>,
    /// Seed of the piece sequence
    pub seed: u32,
    /// Score shown when the player quit
    pub final_score: u32,
    /// Every action in dispatch order, timer actions included
    pub actions: Vec<Action>,
}

/// Actions between two stored [`Checkpoints`].
pub const CHECKPOINT_INTERVAL: usize = 256;

impl RecordedSession {
    pub fn checkpoints(&self) -> Checkpoints {
        Checkpoints::new(&self.actions)
    }

    /// State after the first `step` actions; `step` is clamped to the recording length.
    pub fn state_at(&self, checkpoints: &Checkpoints, step: usize) -> GameState {
        let step = step.min(self.actions.len());
        let (start, state) = checkpoints.nearest(step);
        self.actions[start..step]
            .iter()
            .copied()
            .fold(state.clone(), reduce)
    }
}

/// States after every [`CHECKPOINT_INTERVAL`]-th action of a recording.
///
/// Any step is reachable by replaying fewer than [`CHECKPOINT_INTERVAL`] actions from
/// the closest checkpoint before it.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkpoints {
    states: Vec<GameState>,
}

impl Checkpoints {
    fn new(actions: &[Action]) -> Self {
        let mut states = vec![GameState::initial()];
        states.extend(
            replay(actions.iter().copied())
                .skip(CHECKPOINT_INTERVAL - 1)
                .step_by(CHECKPOINT_INTERVAL),
        );
        Self { states }
    }

    /// The last checkpoint at or before `step`, with the step it was taken at.
    fn nearest(&self, step: usize) -> (usize, &GameState) {
        let slot = usize::min(step / CHECKPOINT_INTERVAL, self.states.len() - 1);
        (slot * CHECKPOINT_INTERVAL, &self.states[slot])
    }
}
