use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use super::event::TuiEvent;

/// When frames are drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RenderMode {
    /// Draw after every tick or terminal event.
    #[default]
    OnDirty,
    /// Draw after changes, at most once per interval.
    Throttled(Duration),
}

impl RenderMode {
    /// `Throttled` mode from a frame rate (FPS).
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// Scheduling decision for one loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    Tick,
    Render,
    /// Wait for terminal input, at most for the given duration.
    Input(Option<Duration>),
}

#[derive(Debug)]
pub(super) struct EventLoop {
    tick_interval: Option<Duration>,
    render_mode: RenderMode,
    next_tick: Instant,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl EventLoop {
    fn new(now: Instant) -> Self {
        Self {
            tick_interval: None,
            render_mode: RenderMode::default(),
            next_tick: now,
            last_render: now.checked_sub(Duration::from_secs(60)).unwrap_or(now),
            dirty: true,
        }
    }

    /// Pass `None` to stop ticking. The first tick fires one interval from now.
    pub(super) fn set_tick_interval(&mut self, interval: Option<Duration>) {
        self.set_tick_interval_at(interval, Instant::now());
    }

    fn set_tick_interval_at(&mut self, interval: Option<Duration>, now: Instant) {
        if let Some(interval) = interval {
            self.next_tick = now + interval;
        }
        self.tick_interval = interval;
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until a tick or render is due, or a terminal event arrives.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            match self.due(Instant::now()) {
                Due::Tick => return Ok(TuiEvent::Tick),
                Due::Render => return Ok(TuiEvent::Render),
                Due::Input(timeout) => {
                    if let Some(timeout) = timeout
                        && !event::poll(timeout)?
                    {
                        continue;
                    }
                    self.dirty = true;
                    return Ok(event::read()?.into());
                }
            }
        }
    }

    fn due(&mut self, now: Instant) -> Due {
        if let Some(interval) = self.tick_interval
            && now >= self.next_tick
        {
            // Keep a steady cadence; after a long stall, restart from now instead of
            // replaying every missed tick.
            self.next_tick += interval;
            if self.next_tick <= now {
                self.next_tick = now + interval;
            }
            self.dirty = true;
            return Due::Tick;
        }

        let render = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if render {
            self.last_render = now;
            self.dirty = false;
            return Due::Render;
        }

        Due::Input(self.timeout(now))
    }

    fn timeout(&self, now: Instant) -> Option<Duration> {
        let tick_at = self.tick_interval.map(|_| self.next_tick);
        let render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let wake_at = [tick_at, render_at].into_iter().flatten().min()?;
        Some(wake_at.saturating_duration_since(now))
    }
}
