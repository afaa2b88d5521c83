//! Couples the pure reducer to a clock, a piece sequence and the keyboard.

use std::{mem, ops::ControlFlow, time::Instant};

use blockfall_engine::{Action, GameState, PieceSequence, reduce};
use crossterm::event::KeyEvent;

use crate::{
    input::{KeyCommand, RestartHold, map_key},
    record::SessionHistory,
};

/// Owns a running game and feeds it actions.
///
/// Every action goes through [`dispatch`](Self::dispatch), so an attached
/// [`SessionHistory`] sees exactly what the reducer saw.
#[derive(Debug)]
pub struct Driver {
    state: GameState,
    pieces: PieceSequence,
    restart_hold: RestartHold,
    history: Option<SessionHistory>,
}

impl Driver {
    pub fn new(seed: u32) -> Self {
        log::info!("new game, seed {seed}");
        Self {
            state: GameState::initial(),
            pieces: PieceSequence::new(seed),
            restart_hold: RestartHold::default(),
            history: None,
        }
    }

    /// Records every dispatched action from now on.
    pub fn with_history(mut self) -> Self {
        self.history = Some(SessionHistory::new(self.pieces.state()));
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        if let Some(history) = &mut self.history {
            history.record(action);
        }
        self.state = reduce(mem::take(&mut self.state), action);
    }

    /// One timer period: `Tick`, then `Spawn` with the next sequence index.
    ///
    /// The sequence advances every period, whether or not the spawn is accepted.
    pub fn advance_period(&mut self) {
        self.dispatch(Action::Tick);
        let index = self.pieces.advance();
        self.dispatch(Action::Spawn(index));
    }

    /// Timer callback: fires a pending hold-to-restart, then advances one period.
    pub fn on_timer(&mut self, now: Instant) {
        if self.restart_hold.poll(now) {
            self.dispatch(Action::Restart);
        }
        self.advance_period();
    }

    /// Handles a key event. Breaks when the player asks to quit.
    pub fn on_key(&mut self, event: &KeyEvent, now: Instant) -> ControlFlow<()> {
        match map_key(event) {
            Some(KeyCommand::Game(action)) => self.dispatch(action),
            Some(KeyCommand::RestartPressed) => self.restart_hold.press(now),
            Some(KeyCommand::RestartReleased) => self.restart_hold.release(),
            Some(KeyCommand::Quit) => return ControlFlow::Break(()),
            None => {}
        }
        ControlFlow::Continue(())
    }

    pub fn restart_progress(&self, now: Instant) -> Option<f64> {
        self.restart_hold.progress(now)
    }

    pub fn into_history(self) -> Option<SessionHistory> {
        self.history
    }
}
