//! Terminal runtime: an event loop that interleaves game ticks, renders and
//! crossterm events, and drives an [`App`].

mod app;
mod event;
mod event_loop;
mod runner;

pub use self::{app::App, event_loop::RenderMode, runner::Tui};
