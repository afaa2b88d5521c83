use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{
    config::{INITIAL_POWER_UPS, SPAWN_POSITION},
    core::{Block, CatalogIndex, PIECE_SIZE, Piece, Pos, create_piece, translated},
};

use super::collision::collides_y;

/// Complete state of one game.
///
/// Every reduction builds a new value; nothing is updated in place behind the
/// caller's back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub level: u32,
    pub score: u32,
    pub highscore: u32,
    /// Ticks left before the next forced downward step.
    pub tick_rate: u32,
    /// Total rows cleared so far.
    pub cleared_lines: u32,
    /// Remaining row-clear charges.
    pub power_ups: u32,
    /// The active piece has landed; the next `Spawn` settles it.
    pub spawn_pending: bool,
    pub active_piece: Piece,
    pub preview_piece: Piece,
    /// Landing position of the active piece as of the last tick. Empty until the
    /// first tick.
    pub hard_drop_preview: ArrayVec<Block, PIECE_SIZE>,
    pub settled_blocks: Vec<Block>,
    pub game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}

impl GameState {
    /// The state every game starts from.
    #[must_use]
    pub fn initial() -> Self {
        Self {
            level: 0,
            score: 0,
            highscore: 0,
            tick_rate: 0,
            cleared_lines: 0,
            power_ups: INITIAL_POWER_UPS,
            spawn_pending: false,
            active_piece: create_piece(SPAWN_POSITION, CatalogIndex::O),
            preview_piece: create_piece(SPAWN_POSITION, CatalogIndex::I),
            hard_drop_preview: ArrayVec::new(),
            settled_blocks: Vec::new(),
            game_over: false,
        }
    }

    /// Number of rows `piece` can fall before it would collide vertically.
    #[must_use]
    pub fn drop_distance(&self, piece: &Piece) -> i32 {
        let mut landed = *piece;
        let mut distance = 0;
        // Each candidate is one row lower, so the floor check ends this within
        // GRID_HEIGHT + 1 iterations.
        loop {
            let lower = translated(&landed, Pos::new(0, 1));
            if collides_y(self, &lower) {
                return distance;
            }
            landed = lower;
            distance += 1;
        }
    }

    /// Returns `true` if the active piece cannot move down any further.
    #[must_use]
    pub fn is_grounded(&self) -> bool {
        collides_y(self, &translated(&self.active_piece, Pos::new(0, 1)))
    }
}

/// Shorthand for [`GameState::initial`].
#[must_use]
pub fn initial_state() -> GameState {
    GameState::initial()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let state = initial_state();
        assert_eq!(state.level, 0);
        assert_eq!(state.score, 0);
        assert_eq!(state.highscore, 0);
        assert_eq!(state.tick_rate, 0);
        assert_eq!(state.cleared_lines, 0);
        assert_eq!(state.power_ups, 5);
        assert!(!state.spawn_pending);
        assert!(!state.game_over);
        assert_eq!(state.active_piece, create_piece(Pos::new(4, 1), CatalogIndex::O));
        assert_eq!(state.preview_piece, create_piece(Pos::new(4, 1), CatalogIndex::I));
        assert!(state.hard_drop_preview.is_empty());
        assert!(state.settled_blocks.is_empty());
        assert_eq!(state, GameState::default());
    }

    #[test]
    fn test_drop_distance_on_empty_board() {
        let state = GameState::initial();
        // The O piece spans rows 1 and 2; its lowest legal row is 20.
        assert_eq!(state.drop_distance(&state.active_piece), 18);
        let flat = create_piece(Pos::new(3, 20), CatalogIndex::I);
        assert_eq!(state.drop_distance(&flat), 0);
    }

    #[test]
    fn test_drop_distance_stops_on_settled_block() {
        let mut state = GameState::initial();
        state.settled_blocks.push(Block {
            position: Pos::new(5, 11),
            ..state.active_piece[0]
        });
        assert_eq!(state.drop_distance(&state.active_piece), 8);
    }

    #[test]
    fn test_is_grounded() {
        let mut state = GameState::initial();
        assert!(!state.is_grounded());
        state.active_piece = create_piece(Pos::new(4, 19), CatalogIndex::O);
        assert!(state.is_grounded());
    }

    #[test]
    fn test_serde_roundtrip_preserves_state() {
        let mut state = GameState::initial();
        state.hard_drop_preview = ArrayVec::from(create_piece(Pos::new(4, 19), CatalogIndex::O));
        state.settled_blocks.push(state.preview_piece[2]);
        let json = serde_json::to_string(&state).unwrap();
        let decoded: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, state);
    }
}
