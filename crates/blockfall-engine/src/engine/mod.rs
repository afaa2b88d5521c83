//! Game rules.
//!
//! - [`GameState`] - The complete state of one game
//! - [`Action`] - Everything that can happen to a game
//! - [`reduce`] - The transition function `(GameState, Action) -> GameState`
//! - Collision predicates ([`collides_x`], [`collides_y`], [`collides_with_settled`])
//! - Row clearing ([`find_full_rows`], [`remove_rows`], [`score_for_clear`])
//! - [`replay`] - Runs a recorded action list back through [`reduce`]
//!
//! # Game Flow
//!
//! 1. Start from [`GameState::initial`]
//! 2. Every timer period, apply [`Action::Tick`] then [`Action::Spawn`] with the next
//!    index from a [`PieceSequence`](crate::PieceSequence)
//! 3. Apply player actions as they arrive
//! 4. A tick or move that cannot descend marks the piece as landed; the next spawn
//!    settles it
//! 5. Full rows are cleared after every step
//! 6. The game ends when a piece in the spawn row is blocked by settled blocks
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{Action, GameState, Movement, PieceSequence, reduce};
//!
//! let mut state = GameState::initial();
//! let mut pieces = PieceSequence::new(2024);
//!
//! state = reduce(state, Action::Move(Movement::left()));
//! state = reduce(state, Action::HardDrop);
//! for _ in 0..3 {
//!     state = reduce(state, Action::Tick);
//!     state = reduce(state, Action::Spawn(pieces.next().unwrap()));
//! }
//!
//! assert_eq!(state.settled_blocks.len(), 4);
//! assert!(!state.game_over);
//! ```

pub use self::{action::*, collision::*, line_clear::*, replay::*, state::*};

mod action;
mod collision;
mod line_clear;
mod replay;
mod state;
