mod command;
mod driver;
mod input;
mod logging;
mod record;
mod schema;
mod tui;
mod util;
mod view;

/// Redraw cap for the terminal screens.
const DEFAULT_FRAME_RATE: f64 = 60.0;

fn main() -> anyhow::Result<()> {
    command::run()
}
