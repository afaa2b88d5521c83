use std::path::PathBuf;

use rand::Rng as _;

use crate::{driver::Driver, logging, tui::Tui, view::screens::PlayScreen};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed of the piece sequence (random if omitted)
    #[clap(long)]
    pub(crate) seed: Option<u32>,
    /// Save the game recording to a file when the session ends
    #[clap(long)]
    pub(crate) save_recording: bool,
    /// Directory to save recording files
    #[clap(long, default_value = "./data/recordings/")]
    pub(crate) record_dir: PathBuf,
    /// Write log records to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            save_recording: false,
            record_dir: PathBuf::from("./data/recordings/"),
            log_file: None,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        save_recording,
        record_dir,
        log_file,
    } = arg;
    logging::init(log_file.as_deref())?;

    let seed = seed.unwrap_or_else(|| rand::rng().random());
    let mut driver = Driver::new(seed);
    if *save_recording {
        driver = driver.with_history();
    }

    let mut screen = PlayScreen::new(driver);
    Tui::new().run(&mut screen)?;

    let driver = screen.into_driver();
    let state = driver.state();
    eprintln!(
        "Final score: {} (level {}, {} lines)",
        state.score, state.level, state.cleared_lines
    );

    let score = state.score;
    if let Some(history) = driver.into_history() {
        eprintln!("Recorded {} actions", history.actions().len());
        let path = history.save(score, record_dir)?;
        eprintln!("Recording saved to {}", path.display());
    }
    Ok(())
}
