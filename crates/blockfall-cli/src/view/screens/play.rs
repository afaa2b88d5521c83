use std::time::{Duration, Instant};

use blockfall_engine::config::TICK_RATE_MS;
use crossterm::event::Event;
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    widgets::{Block as BlockWidget, Gauge, Padding},
};

use crate::{
    DEFAULT_FRAME_RATE,
    driver::Driver,
    tui::{App, RenderMode, Tui},
    view::widgets::{
        Banner, BoardDisplay, KeyBinding, KeyBindingDisplay, PreviewDisplay, StatsDisplay, style,
    },
};

const BINDINGS: &[KeyBinding<'static>] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["Space"], "Hard Drop"),
    (&["↑", "z"], "Rotate"),
    (&["p"], "Power-Up"),
    (&["r (hold)"], "Restart"),
    (&["q", "Esc"], "Quit"),
];

/// Interactive game.
#[derive(Debug)]
pub struct PlayScreen {
    driver: Driver,
    quitting: bool,
}

impl PlayScreen {
    pub fn new(driver: Driver) -> Self {
        Self {
            driver,
            quitting: false,
        }
    }

    pub fn into_driver(self) -> Driver {
        self.driver
    }
}

impl App for PlayScreen {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_tick_interval(Some(Duration::from_millis(TICK_RATE_MS)));
        tui.set_render_mode(RenderMode::throttled_from_rate(DEFAULT_FRAME_RATE));
        tui.request_key_releases();
    }

    fn should_exit(&self) -> bool {
        self.quitting
    }

    fn handle_event(&mut self, _tui: &mut Tui, event: Event) {
        if let Some(key) = event.as_key_event()
            && self.driver.on_key(&key, Instant::now()).is_break()
        {
            self.quitting = true;
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let state = self.driver.state();

        let board = BoardDisplay::new(state).block(
            BlockWidget::bordered()
                .title("BLOCKFALL")
                .padding(Padding::symmetric(1, 0)),
        );
        let preview = PreviewDisplay::new(&state.preview_piece)
            .block(BlockWidget::bordered().title("NEXT"));
        let stats = StatsDisplay::new(state)
            .block(BlockWidget::bordered().padding(Padding::horizontal(1)));
        let help = KeyBindingDisplay::new(BINDINGS);

        let side_width = stats.width().max(preview.width());
        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(board.height()), Constraint::Length(2)])
                .areas(frame.area());
        let [board_area, side_area] = main_area.layout(
            &Layout::horizontal([
                Constraint::Length(board.width()),
                Constraint::Length(side_width),
            ])
            .flex(Flex::Center),
        );
        let [preview_area, stats_area, gauge_area] = side_area.layout(&Layout::vertical([
            Constraint::Length(preview.height()),
            Constraint::Length(stats.height()),
            Constraint::Length(3),
        ]));

        frame.render_widget(&board, board_area);
        frame.render_widget(&preview, preview_area);
        frame.render_widget(stats, stats_area);
        frame.render_widget(help, help_area);

        if let Some(progress) = self.driver.restart_progress(Instant::now()) {
            let gauge = Gauge::default()
                .block(BlockWidget::bordered().title("RESTART"))
                .gauge_style(style::GAME_OVER)
                .ratio(progress);
            frame.render_widget(gauge, gauge_area);
        }

        if state.game_over {
            frame.render_widget(Banner::game_over(state.score, state.highscore), board_area);
        }
    }

    fn update(&mut self, _tui: &mut Tui) {
        self.driver.on_timer(Instant::now());
    }
}
