use crossterm::event::Event as CrosstermEvent;

/// One iteration of the event loop.
#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// The tick interval elapsed.
    Tick,
    /// A frame should be drawn.
    Render,
    /// Terminal input or resize.
    Crossterm(CrosstermEvent),
}
