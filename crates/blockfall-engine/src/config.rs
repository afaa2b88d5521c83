//! Fixed gameplay constants.
//!
//! Everything here is compile-time configuration: board geometry, spawn point,
//! gravity cadence, kick tables and the scoring table. Nothing is derived at runtime.

use crate::core::Pos;

/// Number of playable columns.
pub const GRID_WIDTH: i32 = 10;

/// Number of playable rows.
pub const GRID_HEIGHT: i32 = 20;

const _: () = assert!(GRID_WIDTH > 0 && GRID_HEIGHT > 0);

/// Origin used for every newly created piece.
pub const SPAWN_POSITION: Pos = Pos::new(4, 1);

/// Wall-clock period between two timer-driven actions, in milliseconds.
///
/// The engine never reads the clock; drivers use this to pace `Tick` and `Spawn`.
pub const TICK_RATE_MS: u64 = 100;

/// Ticks between forced downward steps at level 0.
pub const TICK_RATE_INCREASE: u32 = 5;

/// Highest level that still slows gravity down; above it every tick drops the piece.
pub const MAX_PACED_LEVEL: u32 = 5;

/// Cleared rows needed to gain one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Power-up charges available at the start of a game.
pub const INITIAL_POWER_UPS: u32 = 5;

/// Points for clearing 0, 1, 2, 3 or 4 rows with a single action.
pub const LINE_CLEAR_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Offsets tried, in order, when a rotation hits the floor.
pub const FLOOR_KICKS: [Pos; 2] = [Pos::new(0, -1), Pos::new(0, -2)];

/// Offsets tried, in order, when a rotation hits a wall.
pub const WALL_KICKS: [Pos; 4] = [
    Pos::new(1, 0),
    Pos::new(2, 0),
    Pos::new(-1, 0),
    Pos::new(-2, 0),
];
