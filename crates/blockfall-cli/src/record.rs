use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use blockfall_engine::Action;
use chrono::{DateTime, Utc};

use crate::{schema::record::RecordedSession, util};

/// Every action dispatched during one game, in order.
///
/// Replaying [`actions`](Self::actions) from the initial state reproduces the game
/// exactly, so nothing else needs to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHistory {
    seed: u32,
    actions: Vec<Action>,
}

impl SessionHistory {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            actions: Vec::new(),
        }
    }

    pub fn record(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn into_recording(self, final_score: u32, recorded_at: DateTime<Utc>) -> RecordedSession {
        RecordedSession {
            recorded_at,
            seed: self.seed,
            final_score,
            actions: self.actions,
        }
    }

    /// Saves the history to `{record_dir}/play_{YYYYMMDD_HHMMSS}.json`.
    ///
    /// `record_dir` is created if it doesn't exist. Returns the written path.
    pub fn save(self, final_score: u32, record_dir: &Path) -> anyhow::Result<PathBuf> {
        fs::create_dir_all(record_dir)
            .with_context(|| format!("Failed to create directory {}", record_dir.display()))?;

        let timestamp = Utc::now();
        let filename = format!("play_{}.json", timestamp.format("%Y%m%d_%H%M%S"));
        let filepath = record_dir.join(filename);
        let data = self.into_recording(final_score, timestamp);

        util::write_json(&data, Some(&filepath))?;
        Ok(filepath)
    }
}
