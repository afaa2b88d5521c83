use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{
    config::{
        FLOOR_KICKS, GRID_HEIGHT, MAX_PACED_LEVEL, SPAWN_POSITION, TICK_RATE_INCREASE,
        WALL_KICKS,
    },
    core::{
        CatalogIndex, PIVOT_INDEX, Piece, Pos, RotationDirection, checked_translated,
        create_piece, rotated, translated,
    },
};

use super::{
    collision::{collides_with_settled, collides_x, collides_y},
    line_clear::{clear_full_rows, remove_rows},
    state::GameState,
};

/// Axis of a translation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// A translation of the active piece along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Movement {
    pub axis: Axis,
    pub amount: i32,
}

impl Movement {
    #[must_use]
    pub const fn new(axis: Axis, amount: i32) -> Self {
        Self { axis, amount }
    }

    #[must_use]
    pub const fn left() -> Self {
        Self::new(Axis::X, -1)
    }

    #[must_use]
    pub const fn right() -> Self {
        Self::new(Axis::X, 1)
    }

    #[must_use]
    pub const fn down() -> Self {
        Self::new(Axis::Y, 1)
    }

    #[must_use]
    pub const fn offset(self) -> Pos {
        match self.axis {
            Axis::X => Pos::new(self.amount, 0),
            Axis::Y => Pos::new(0, self.amount),
        }
    }
}

/// Everything that can happen to a game.
///
/// `Tick` and `Spawn` come from a timer, the rest from the player. Apply them with
/// [`reduce`] or [`Action::apply`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::IsVariant,
)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Settles a landed piece and brings in the preview; ignored unless a spawn is
    /// pending.
    Spawn(CatalogIndex),
    /// Refreshes the landing preview and advances gravity.
    Tick,
    /// Moves the active piece one step.
    Move(Movement),
    /// Drops the active piece as far as it goes.
    HardDrop,
    /// Rotates the active piece, kicking off the floor or walls if needed.
    Rotate(RotationDirection),
    /// Starts a new game, keeping the high score.
    Restart,
    /// Spends a charge to remove the bottom row.
    PowerUp,
}

impl Action {
    /// Returns the state after this action.
    ///
    /// Once the game is over, everything except [`Action::Restart`] leaves the state
    /// untouched.
    #[must_use]
    pub fn apply(self, state: GameState) -> GameState {
        if state.game_over && !self.is_restart() {
            return state;
        }
        match self {
            Action::Spawn(index) => spawn(state, index),
            Action::Tick => tick(state),
            Action::Move(movement) => step(state, movement),
            Action::HardDrop => hard_drop(state),
            Action::Rotate(direction) => rotate(state, direction),
            Action::Restart => restart(&state),
            Action::PowerUp => power_up(state),
        }
    }
}

/// The game's transition function.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Action, GameState, reduce};
///
/// let state = reduce(GameState::initial(), Action::Tick);
/// assert_eq!(state.active_piece[0].position.y, 2);
/// assert_eq!(state.tick_rate, 5);
/// ```
#[must_use]
pub fn reduce(state: GameState, action: Action) -> GameState {
    action.apply(state)
}

fn spawn(state: GameState, index: CatalogIndex) -> GameState {
    if !state.spawn_pending {
        return state;
    }
    log::debug!("spawning {}, next is {}", state.preview_piece[0].color, index);

    let mut settled_blocks = state.settled_blocks;
    for block in state.active_piece {
        if !settled_blocks.iter().any(|s| s.position == block.position) {
            settled_blocks.push(block);
        }
    }
    GameState {
        spawn_pending: false,
        active_piece: state.preview_piece,
        preview_piece: create_piece(SPAWN_POSITION, index),
        settled_blocks,
        ..state
    }
}

fn tick(state: GameState) -> GameState {
    let distance = state.drop_distance(&state.active_piece);
    let hard_drop_preview = ArrayVec::from(translated(&state.active_piece, Pos::new(0, distance)));

    if state.tick_rate == 0 {
        let tick_rate = gravity_delay(state.level);
        GameState {
            tick_rate,
            hard_drop_preview,
            ..step(state, Movement::down())
        }
    } else {
        GameState {
            tick_rate: state.tick_rate - 1,
            hard_drop_preview,
            ..state
        }
    }
}

/// Ticks between forced steps once the countdown at `level` expires.
fn gravity_delay(level: u32) -> u32 {
    if level > MAX_PACED_LEVEL {
        0
    } else {
        TICK_RATE_INCREASE.saturating_sub(level)
    }
}

fn step(state: GameState, movement: Movement) -> GameState {
    let Some(moved) = checked_translated(&state.active_piece, movement.offset()) else {
        log::debug!("ignoring out-of-range move by {}", movement.amount);
        return state;
    };

    let topped_out = movement.axis.is_y()
        && state
            .active_piece
            .iter()
            .any(|block| block.position.y <= SPAWN_POSITION.y)
        && collides_with_settled(&moved, &state.settled_blocks);
    if topped_out {
        log::info!("game over: score {}, level {}", state.score, state.level);
        return GameState {
            game_over: true,
            ..state
        };
    }

    let next = match movement.axis {
        Axis::X if collides_x(&state, &moved) => state,
        Axis::Y if collides_y(&state, &moved) => GameState {
            spawn_pending: true,
            ..state
        },
        _ => GameState {
            active_piece: moved,
            ..state
        },
    };
    clear_full_rows(next)
}

fn hard_drop(state: GameState) -> GameState {
    let distance = state.drop_distance(&state.active_piece);
    let active_piece = translated(&state.active_piece, Pos::new(0, distance));
    clear_full_rows(GameState {
        score: state.score + distance.unsigned_abs() + 1,
        active_piece,
        ..state
    })
}

fn rotate(state: GameState, direction: RotationDirection) -> GameState {
    if !state.active_piece.iter().all(|block| block.rotatable) {
        return state;
    }

    let turned = rotated(&state.active_piece, direction);
    let hits_x = collides_x(&state, &turned);
    let hits_y = collides_y(&state, &turned);
    let pivot = turned[PIVOT_INDEX];

    let kicks: &[Pos] = match (hits_x, hits_y) {
        (false, false) => {
            return GameState {
                active_piece: turned,
                ..state
            };
        }
        (_, true) if pivot.floor_kick => &FLOOR_KICKS,
        (true, _) if pivot.wall_kick => &WALL_KICKS,
        _ => return state,
    };

    match first_free_kick(&state, &turned, kicks) {
        Some((offset, kicked)) => {
            log::debug!("rotation kicked by {offset}");
            GameState {
                active_piece: kicked,
                ..state
            }
        }
        None => state,
    }
}

fn first_free_kick(state: &GameState, turned: &Piece, kicks: &[Pos]) -> Option<(Pos, Piece)> {
    kicks
        .iter()
        .map(|&offset| (offset, translated(turned, offset)))
        .find(|(_, candidate)| !collides_x(state, candidate) && !collides_y(state, candidate))
}

fn restart(state: &GameState) -> GameState {
    let highscore = if state.game_over {
        state.score.max(state.highscore)
    } else {
        state.highscore
    };
    log::info!("restart (high score {highscore})");
    GameState {
        highscore,
        ..GameState::initial()
    }
}

fn power_up(state: GameState) -> GameState {
    if state.power_ups == 0 {
        return state;
    }
    log::info!("power-up used, {} left", state.power_ups - 1);
    GameState {
        settled_blocks: remove_rows(&[GRID_HEIGHT], &state.settled_blocks),
        power_ups: state.power_ups - 1,
        ..state
    }
}
