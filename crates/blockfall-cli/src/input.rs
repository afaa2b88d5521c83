//! Keyboard mapping and the hold-to-restart gesture.

use std::time::{Duration, Instant};

use blockfall_engine::{Action, Movement, RotationDirection};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// How long `r` must be held before a restart fires.
pub const RESTART_HOLD: Duration = Duration::from_secs(2);

/// Silence after which a held key counts as released.
///
/// Most terminals never report releases; they only repeat presses while a key is
/// down. This must exceed the usual auto-repeat delay.
pub const HOLD_RELEASE_GRACE: Duration = Duration::from_millis(750);

/// What a key event asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Game(Action),
    RestartPressed,
    RestartReleased,
    Quit,
}

pub fn map_key(event: &KeyEvent) -> Option<KeyCommand> {
    let released = event.kind == KeyEventKind::Release;
    if event.code == KeyCode::Char('r') {
        return Some(if released {
            KeyCommand::RestartReleased
        } else {
            KeyCommand::RestartPressed
        });
    }
    if released {
        return None;
    }

    let action = match event.code {
        KeyCode::Left => Action::Move(Movement::left()),
        KeyCode::Right => Action::Move(Movement::right()),
        KeyCode::Down => Action::Move(Movement::down()),
        KeyCode::Up => Action::Rotate(RotationDirection::Clockwise),
        KeyCode::Char('z') => Action::Rotate(RotationDirection::CounterClockwise),
        KeyCode::Char(' ') => Action::HardDrop,
        KeyCode::Char('p') => Action::PowerUp,
        KeyCode::Char('c') if event.modifiers.contains(KeyModifiers::CONTROL) => {
            return Some(KeyCommand::Quit);
        }
        KeyCode::Char('q') | KeyCode::Esc => return Some(KeyCommand::Quit),
        _ => return None,
    };
    Some(KeyCommand::Game(action))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum HoldState {
    #[default]
    Idle,
    Holding {
        since: Instant,
        last_seen: Instant,
    },
    /// Already fired; ignored until the key is released.
    Fired {
        last_seen: Instant,
    },
}

/// Debounces the restart key.
///
/// A restart fires once the key has been held for [`RESTART_HOLD`]. Releasing the
/// key earlier cancels it, and a hold fires at most once.
#[derive(Debug, Default)]
pub struct RestartHold {
    state: HoldState,
}

impl RestartHold {
    /// Records a press or auto-repeat of the restart key.
    pub fn press(&mut self, now: Instant) {
        self.state = match self.state {
            HoldState::Idle => HoldState::Holding {
                since: now,
                last_seen: now,
            },
            HoldState::Holding { since, .. } => HoldState::Holding {
                since,
                last_seen: now,
            },
            HoldState::Fired { .. } => HoldState::Fired { last_seen: now },
        };
    }

    pub fn release(&mut self) {
        self.state = HoldState::Idle;
    }

    /// Returns `true` exactly once per hold, when it has lasted [`RESTART_HOLD`].
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            HoldState::Idle => false,
            HoldState::Holding { last_seen, .. } | HoldState::Fired { last_seen }
                if now.saturating_duration_since(last_seen) > HOLD_RELEASE_GRACE =>
            {
                self.state = HoldState::Idle;
                false
            }
            HoldState::Holding { since, last_seen }
                if now.saturating_duration_since(since) >= RESTART_HOLD =>
            {
                self.state = HoldState::Fired { last_seen };
                true
            }
            HoldState::Holding { .. } | HoldState::Fired { .. } => false,
        }
    }

    /// Fraction of [`RESTART_HOLD`] elapsed, while a hold is in progress.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        match self.state {
            HoldState::Holding { since, .. } => {
                let held = now.saturating_duration_since(since).as_secs_f64();
                Some((held / RESTART_HOLD.as_secs_f64()).min(1.0))
            }
            HoldState::Idle | HoldState::Fired { .. } => None,
        }
    }
}
