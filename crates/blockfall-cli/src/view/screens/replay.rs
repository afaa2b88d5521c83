use std::{mem, path::PathBuf, time::Duration};

use blockfall_engine::{Action, Axis, GameState, RotationDirection, config::TICK_RATE_MS, reduce};
use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, HorizontalAlignment, Layout, Spacing},
    symbols::merge::MergeStrategy,
    text::Line,
    widgets::{Block as BlockWidget, Padding, Paragraph},
};

use crate::{
    DEFAULT_FRAME_RATE,
    schema::record::{Checkpoints, RecordedSession},
    tui::{App, RenderMode, Tui},
    view::widgets::{Banner, BoardDisplay, KeyBinding, KeyBindingDisplay, StatsDisplay},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Command {
    TogglePlay,
    Prev(usize),
    Next(usize),
    First,
    Last,
    Quit,
}

impl Command {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        match event.code {
            KeyCode::Char(' ') => Some(Self::TogglePlay),
            KeyCode::Char('k') | KeyCode::Up => Some(Self::Prev(1)),
            KeyCode::Char('j') | KeyCode::Down => Some(Self::Next(1)),
            KeyCode::Char('h') | KeyCode::Left => Some(Self::Prev(10)),
            KeyCode::Char('l') | KeyCode::Right => Some(Self::Next(10)),
            KeyCode::Char('g') | KeyCode::Home => Some(Self::First),
            KeyCode::Char('G') | KeyCode::End => Some(Self::Last),
            KeyCode::Char('q') | KeyCode::Esc => Some(Self::Quit),
            _ => None,
        }
    }

    fn bindings() -> &'static [KeyBinding<'static>] {
        &[
            (&["Space"], "Play/Pause"),
            (&["k", "↑"], "Prev"),
            (&["j", "↓"], "Next"),
            (&["h", "←"], "Prev 10"),
            (&["l", "→"], "Next 10"),
            (&["g", "Home"], "First"),
            (&["G", "End"], "Last"),
            (&["q", "Esc"], "Quit"),
        ]
    }
}

/// Slowest accepted playback speed multiplier.
pub const MIN_SPEED: f64 = 0.1;
/// Fastest accepted playback speed multiplier.
pub const MAX_SPEED: f64 = 100.0;

/// Recorded actions per game timer period: a `Tick` and a `Spawn`.
const ACTIONS_PER_PERIOD: u32 = 2;

/// Steps through the states of a recorded game.
#[derive(Debug)]
pub struct ReplayScreen {
    path: PathBuf,
    session: RecordedSession,
    checkpoints: Checkpoints,
    /// Number of actions applied to reach `state`.
    index: usize,
    state: GameState,
    play: bool,
    speed: f64,
    quitting: bool,
}

impl ReplayScreen {
    pub fn new(path: PathBuf, session: RecordedSession, speed: f64) -> Self {
        let checkpoints = session.checkpoints();
        Self {
            path,
            session,
            checkpoints,
            index: 0,
            state: GameState::initial(),
            play: false,
            speed,
            quitting: false,
        }
    }

    fn current(&self) -> &GameState {
        &self.state
    }

    fn last_index(&self) -> usize {
        self.session.actions.len()
    }

    /// Moves to step `index`, clamped to the last step.
    fn seek(&mut self, index: usize) {
        let index = index.min(self.last_index());
        if index == self.index + 1 {
            let action = self.session.actions[self.index];
            self.state = reduce(mem::take(&mut self.state), action);
        } else if index != self.index {
            self.state = self.session.state_at(&self.checkpoints, index);
        }
        self.index = index;
    }

    fn apply(&mut self, tui: &mut Tui, command: Command) {
        match command {
            Command::TogglePlay => {
                self.play = !self.play;
                self.update_tick_interval(tui);
            }
            Command::Prev(amount) => self.seek(self.index.saturating_sub(amount)),
            Command::Next(amount) => self.seek(self.index.saturating_add(amount)),
            Command::First => self.seek(0),
            Command::Last => self.seek(self.last_index()),
            Command::Quit => self.quitting = true,
        }
    }

    fn update_tick_interval(&self, tui: &mut Tui) {
        tui.set_tick_interval(self.play.then(|| tick_interval(self.speed)));
    }
}

/// Delay between two replayed actions.
///
/// At speed 1 a timer period's `Tick` and `Spawn` take one game timer period together.
/// `speed` is clamped to `MIN_SPEED..=MAX_SPEED`; a NaN plays at speed 1.
fn tick_interval(speed: f64) -> Duration {
    let period = Duration::from_millis(TICK_RATE_MS) / ACTIONS_PER_PERIOD;
    Duration::try_from_secs_f64(period.as_secs_f64() / speed.clamp(MIN_SPEED, MAX_SPEED))
        .unwrap_or(period)
}

fn describe(action: &Action) -> String {
    match action {
        Action::Spawn(index) => format!("spawn {}", index.entry().name),
        Action::Tick => "tick".to_owned(),
        Action::Move(movement) => {
            let axis = match movement.axis {
                Axis::X => "x",
                Axis::Y => "y",
            };
            format!("move {axis} {:+}", movement.amount)
        }
        Action::HardDrop => "hard drop".to_owned(),
        Action::Rotate(RotationDirection::Clockwise) => "rotate cw".to_owned(),
        Action::Rotate(RotationDirection::CounterClockwise) => "rotate ccw".to_owned(),
        Action::Restart => "restart".to_owned(),
        Action::PowerUp => "power-up".to_owned(),
    }
}

impl App for ReplayScreen {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_render_mode(RenderMode::throttled_from_rate(DEFAULT_FRAME_RATE));
        self.update_tick_interval(tui);
    }

    fn should_exit(&self) -> bool {
        self.quitting
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Some(event) = event.as_key_event()
            && let Some(command) = Command::from_key_event(&event)
        {
            self.apply(tui, command);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let top_block = BlockWidget::bordered()
            .title(format!("Replay: {}", self.path.display()))
            .title_alignment(HorizontalAlignment::Center)
            .padding(Padding::symmetric(1, 0));
        let viewport = frame
            .area()
            .centered(Constraint::Max(80), Constraint::Max(32));

        let state = self.current();
        let last_action = self
            .index
            .checked_sub(1)
            .and_then(|i| self.session.actions.get(i))
            .map_or_else(|| "-".to_owned(), describe);

        let [top_area, mid_area, bottom_area] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Length(3),
        ])
        .spacing(Spacing::Overlap(1))
        .areas(viewport);

        let header = Paragraph::new(vec![
            Line::from(format!(
                "Step: {:8}/{:8}   Seed: {}",
                self.index,
                self.last_index(),
                self.session.seed
            )),
            Line::from(format!(
                "Action: {last_action:12}   Final score: {}",
                self.session.final_score
            )),
        ])
        .block(top_block.merge_borders(MergeStrategy::Exact));

        let board = BoardDisplay::new(state).block(
            BlockWidget::bordered()
                .padding(Padding::symmetric(1, 0))
                .merge_borders(MergeStrategy::Exact),
        );
        let stats = StatsDisplay::new(state).block(
            BlockWidget::bordered()
                .padding(Padding::horizontal(1))
                .merge_borders(MergeStrategy::Exact),
        );
        let [board_area, stats_area] = mid_area.layout(
            &Layout::horizontal([
                Constraint::Length(board.width()),
                Constraint::Length(stats.width()),
            ])
            .flex(Flex::Center),
        );
        let stats_area = stats_area.centered_vertically(Constraint::Length(stats.height()));

        let help = KeyBindingDisplay::new(Command::bindings())
            .block(BlockWidget::bordered().merge_borders(MergeStrategy::Exact));

        frame.render_widget(header, top_area);
        frame.render_widget(&board, board_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(help, bottom_area);
        if state.game_over {
            frame.render_widget(Banner::game_over(state.score, state.highscore), board_area);
        }
    }

    fn update(&mut self, tui: &mut Tui) {
        if self.index < self.last_index() {
            self.seek(self.index + 1);
        } else {
            self.play = false;
            self.update_tick_interval(tui);
        }
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{CatalogIndex, Movement, final_state};
    use chrono::DateTime;

    use super::*;

    fn session(periods: usize) -> RecordedSession {
        let mut actions = vec![];
        for _ in 0..periods {
            actions.push(Action::Tick);
            actions.push(Action::Spawn(CatalogIndex::T));
        }
        actions.push(Action::Move(Movement::left()));
        actions.push(Action::HardDrop);
        RecordedSession {
            recorded_at: DateTime::from_timestamp(0, 0).unwrap(),
            seed: 0,
            final_score: final_state(actions.iter().copied()).score,
            actions,
        }
    }

    fn screen() -> ReplayScreen {
        ReplayScreen::new(PathBuf::from("test.json"), session(30), 1.0)
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut screen = screen();
        let mut tui = Tui::new();
        let last = screen.last_index();
        assert_eq!(last, 62);

        screen.apply(&mut tui, Command::Prev(1));
        assert_eq!(screen.index, 0);
        screen.apply(&mut tui, Command::Next(10));
        assert_eq!(screen.index, 10);
        screen.apply(&mut tui, Command::Next(1));
        assert_eq!(screen.index, 11);
        screen.apply(&mut tui, Command::Last);
        assert_eq!(screen.index, last);
        screen.apply(&mut tui, Command::Next(10));
        assert_eq!(screen.index, last);
        screen.apply(&mut tui, Command::Prev(10));
        assert_eq!(screen.index, last - 10);
        screen.apply(&mut tui, Command::First);
        assert_eq!(screen.index, 0);
    }

    #[test]
    fn test_seek_matches_reducer() {
        let mut screen = screen();
        let mut tui = Tui::new();
        assert_eq!(screen.current(), &GameState::initial());

        screen.apply(&mut tui, Command::Last);
        let expected = final_state(screen.session.actions.iter().copied());
        assert_eq!(screen.current(), &expected);

        screen.apply(&mut tui, Command::Prev(10));
        let expected = final_state(screen.session.actions[..52].iter().copied());
        assert_eq!(screen.current(), &expected);

        screen.apply(&mut tui, Command::First);
        screen.apply(&mut tui, Command::Next(1));
        assert_eq!(
            screen.current(),
            &reduce(GameState::initial(), screen.session.actions[0])
        );
    }

    #[test]
    fn test_playback_across_checkpoints_matches_seek() {
        let mut screen = ReplayScreen::new(PathBuf::from("long.json"), session(300), 1.0);
        let mut tui = Tui::new();
        screen.apply(&mut tui, Command::TogglePlay);
        while screen.play {
            screen.update(&mut tui);
            let expected = screen.session.state_at(&screen.checkpoints, screen.index);
            assert_eq!(screen.current(), &expected, "step {}", screen.index);
        }
        assert_eq!(screen.index, 602);
    }

    #[test]
    fn test_playback_stops_at_end() {
        let mut screen = screen();
        let mut tui = Tui::new();
        screen.apply(&mut tui, Command::TogglePlay);
        assert!(screen.play);
        for _ in 0..100 {
            screen.update(&mut tui);
        }
        assert_eq!(screen.index, screen.last_index());
        assert!(!screen.play);
    }

    #[test]
    fn test_quit() {
        let mut screen = screen();
        let mut tui = Tui::new();
        let event = Event::Key(KeyEvent::from(KeyCode::Esc));
        screen.handle_event(&mut tui, event);
        assert!(screen.should_exit());
    }

    #[test]
    fn test_tick_interval_plays_a_period_per_timer_period() {
        assert_eq!(
            tick_interval(1.0) * ACTIONS_PER_PERIOD,
            Duration::from_millis(TICK_RATE_MS)
        );
        assert_eq!(tick_interval(1.0), Duration::from_millis(50));
        assert_eq!(tick_interval(2.0), Duration::from_millis(25));
        assert_eq!(tick_interval(0.5), Duration::from_millis(100));
    }

    #[test]
    fn test_tick_interval_with_out_of_range_speed() {
        assert_eq!(tick_interval(1e-30), tick_interval(MIN_SPEED));
        assert_eq!(tick_interval(MIN_SPEED), Duration::from_millis(500));
        assert_eq!(tick_interval(f64::INFINITY), tick_interval(MAX_SPEED));
        assert_eq!(tick_interval(f64::NAN), Duration::from_millis(50));
    }

    #[test]
    fn test_describe_actions() {
        assert_eq!(describe(&Action::Spawn(CatalogIndex::I)), "spawn I");
        assert_eq!(describe(&Action::Move(Movement::left())), "move x -1");
        assert_eq!(describe(&Action::Move(Movement::down())), "move y +1");
        assert_eq!(
            describe(&Action::Rotate(RotationDirection::CounterClockwise)),
            "rotate ccw"
        );
    }
}
