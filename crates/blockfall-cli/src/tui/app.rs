use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::Tui;

/// An application driven by [`Tui::run`].
pub trait App {
    /// Called once before the loop starts. Configure tick interval and render mode here.
    fn init(&mut self, tui: &mut Tui);

    /// Returns whether the loop should stop.
    fn should_exit(&self) -> bool;

    /// Handles key presses, repeats, releases and resizes.
    fn handle_event(&mut self, tui: &mut Tui, event: Event);

    /// Draws the current state.
    fn draw(&self, frame: &mut Frame);

    /// Advances the application by one tick.
    fn update(&mut self, tui: &mut Tui);
}
