//! Deterministic engine for a falling-block puzzle game.
//!
//! The whole game is a pure reducer: [`reduce`] takes a [`GameState`] and an
//! [`Action`] and returns the next state. The engine has no clock and no random
//! source. Drivers pace [`Action::Tick`] and [`Action::Spawn`] themselves and pick
//! spawn indices from a [`PieceSequence`].

pub use self::{core::*, engine::*};

pub mod config;
pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("catalog index {index} is outside 1..=7")]
pub struct InvalidCatalogIndexError {
    index: u8,
}

impl InvalidCatalogIndexError {
    #[must_use]
    pub const fn index(&self) -> u8 {
        self.index
    }
}
