use crate::{
    config::{GRID_HEIGHT, GRID_WIDTH, LINE_CLEAR_SCORES, LINES_PER_LEVEL},
    core::{Block, Pos},
};

use super::state::GameState;

#[allow(clippy::cast_sign_loss)]
const ROW_CAPACITY: usize = GRID_WIDTH as usize;

/// Returns the full rows, in ascending order.
///
/// A row `r` in `1..=GRID_HEIGHT` is full when exactly `GRID_WIDTH` settled blocks
/// have `y == r`.
#[must_use]
pub fn find_full_rows(settled: &[Block]) -> Vec<i32> {
    (1..=GRID_HEIGHT)
        .filter(|&row| {
            settled
                .iter()
                .filter(|block| block.position.y == row)
                .count()
                == ROW_CAPACITY
        })
        .collect()
}

/// Drops every block on one of `rows` and shifts the rest down.
///
/// Each remaining block moves down by the number of removed rows with a greater
/// index than its own.
#[must_use]
pub fn remove_rows(rows: &[i32], settled: &[Block]) -> Vec<Block> {
    settled
        .iter()
        .filter(|block| !rows.contains(&block.position.y))
        .map(|block| {
            let shift = rows
                .iter()
                .map(|&row| i32::from(row > block.position.y))
                .sum();
            block.moved_by(Pos::new(0, shift))
        })
        .collect()
}

/// Points for clearing `rows` rows at once. Anything outside `0..=4` scores nothing.
#[must_use]
pub fn score_for_clear(rows: usize) -> u32 {
    LINE_CLEAR_SCORES.get(rows).copied().unwrap_or(0)
}

/// Clears every full row of `state` and updates score, line count and level.
///
/// The level is derived from the updated line total. A power-up charge is granted
/// whenever the level goes up.
#[must_use]
pub fn clear_full_rows(state: GameState) -> GameState {
    let rows = find_full_rows(&state.settled_blocks);
    if rows.is_empty() {
        return state;
    }

    #[expect(clippy::cast_possible_truncation)]
    let cleared_lines = state.cleared_lines + rows.len() as u32;
    let level = cleared_lines / LINES_PER_LEVEL;
    let power_ups = if level > state.level {
        log::info!("level up: {} -> {level}", state.level);
        state.power_ups + 1
    } else {
        state.power_ups
    };
    log::debug!("cleared rows {rows:?}");

    GameState {
        level,
        score: state.score + score_for_clear(rows.len()),
        cleared_lines,
        power_ups,
        settled_blocks: remove_rows(&rows, &state.settled_blocks),
        ..state
    }
}
