use std::{fs::File, path::Path};

use anyhow::Context;
use env_logger::{Builder, Env, Target};

/// Routes `log` records to `log_file`, filtered by `RUST_LOG` (default `info`).
///
/// Without a file nothing is installed: the terminal belongs to the TUI.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to install logger")?;
    log::info!("logging to {}", path.display());
    Ok(())
}
