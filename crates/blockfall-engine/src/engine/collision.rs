use crate::{
    config::{GRID_HEIGHT, GRID_WIDTH},
    core::Block,
};

use super::state::GameState;

/// Returns `true` if any block of `piece` occupies the same cell as a settled block.
#[must_use]
pub fn collides_with_settled(piece: &[Block], settled: &[Block]) -> bool {
    piece
        .iter()
        .any(|block| settled.iter().any(|s| s.position == block.position))
}

/// Horizontal collision test.
///
/// A block is out of bounds when `x - 1` falls outside `0..GRID_WIDTH`, so playable
/// columns are `1..=GRID_WIDTH`.
#[must_use]
pub fn collides_x(state: &GameState, piece: &[Block]) -> bool {
    piece.iter().any(|block| {
        let column = block.position.x - 1;
        !(0..GRID_WIDTH).contains(&column)
    }) || collides_with_settled(piece, &state.settled_blocks)
}

/// Vertical collision test.
///
/// A block is out of bounds when `y - 1` is `<= 0` or `>= GRID_HEIGHT`. Row 1 is the
/// spawn buffer: pieces may sit there but can never be moved or rotated into it.
#[must_use]
pub fn collides_y(state: &GameState, piece: &[Block]) -> bool {
    piece.iter().any(|block| {
        let row = block.position.y - 1;
        row <= 0 || row >= GRID_HEIGHT
    }) || collides_with_settled(piece, &state.settled_blocks)
}
