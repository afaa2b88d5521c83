use std::path::PathBuf;

use anyhow::ensure;

use crate::{
    logging,
    schema::record::RecordedSession,
    tui::Tui,
    util,
    view::screens::{MAX_SPEED, MIN_SPEED, ReplayScreen},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ReplayArg {
    /// Path to the recording file (JSON format)
    pub(crate) recording_file: PathBuf,
    /// Playback speed multiplier (0.1 to 100)
    #[clap(long, default_value_t = 1.0)]
    pub(crate) speed: f64,
    /// Write log records to this file
    #[clap(long)]
    pub(crate) log_file: Option<PathBuf>,
}

pub(crate) fn run(arg: &ReplayArg) -> anyhow::Result<()> {
    let ReplayArg {
        recording_file,
        speed,
        log_file,
    } = arg;
    check_speed(*speed)?;
    logging::init(log_file.as_deref())?;

    let session: RecordedSession = util::load_json("recording", recording_file)?;
    eprintln!(
        "Loaded {} actions recorded at {}",
        session.actions.len(),
        session.recorded_at
    );

    let replayed = blockfall_engine::final_state(session.actions.iter().copied()).score;
    if replayed != session.final_score {
        eprintln!(
            "Warning: replay ends with score {replayed}, recording says {}",
            session.final_score
        );
    }

    let mut screen = ReplayScreen::new(recording_file.clone(), session, *speed);
    Tui::new().run(&mut screen)?;
    Ok(())
}

fn check_speed(speed: f64) -> anyhow::Result<()> {
    ensure!(
        (MIN_SPEED..=MAX_SPEED).contains(&speed),
        "--speed must be between {MIN_SPEED} and {MAX_SPEED}, got {speed}"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_speed_accepts_range() {
        for speed in [MIN_SPEED, 0.5, 1.0, 16.0, MAX_SPEED] {
            assert!(check_speed(speed).is_ok(), "{speed}");
        }
    }

    #[test]
    fn test_check_speed_rejects_extremes() {
        for speed in [1e-30, 0.0, -1.0, 1e30, f64::INFINITY, f64::NAN] {
            let err = check_speed(speed).unwrap_err();
            assert!(err.to_string().starts_with("--speed must be between"), "{err}");
        }
    }
}
