//! Caller-owned context of the most recent run, used by "replot last".

use std::path::{Path, PathBuf};

use desorb_fit::{FitReport, analyze_run};
use desorb_reduce::SeriesDataset;
use desorb_results::RunStore;
use tracing::debug;

use crate::charts::{ChartConfig, render_charts};
use crate::error::{AppError, AppResult};
use crate::run_service::{RunOutcome, load_run};

/// Datasets of the last run recorded in a session.
#[derive(Debug, Clone, PartialEq)]
pub struct LastRun {
    pub run_id: String,
    pub packed_height_m: f64,
    pub series_i: SeriesDataset,
    pub series_ii: SeriesDataset,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    last: Option<LastRun>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore the session from the store's last-run pointer.
    ///
    /// An empty store, or a pointer to a deleted run, gives an empty session.
    pub fn from_store(store: &RunStore) -> AppResult<Self> {
        let mut session = Self::new();
        if let Some(run_id) = store.last_run()? {
            debug!(run_id = %run_id, "restoring session");
            session.record(&load_run(store, &run_id)?);
        }
        Ok(session)
    }

    pub fn record(&mut self, outcome: &RunOutcome) {
        self.last = Some(LastRun {
            run_id: outcome.run_id.clone(),
            packed_height_m: outcome.packed_height_m(),
            series_i: outcome.series_i.clone(),
            series_ii: outcome.series_ii.clone(),
        });
    }

    pub fn last(&self) -> Option<&LastRun> {
        self.last.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }

    /// Fits of the last run.
    pub fn fits(&self) -> AppResult<FitReport> {
        let last = self.last.as_ref().ok_or(AppError::NoLastRun)?;
        Ok(analyze_run(&last.series_i, &last.series_ii))
    }

    /// Redraw the charts of the last run into `out_dir`.
    pub fn replot(&self, out_dir: &Path, config: &ChartConfig) -> AppResult<Vec<PathBuf>> {
        let last = self.last.as_ref().ok_or(AppError::NoLastRun)?;
        let report = analyze_run(&last.series_i, &last.series_ii);
        render_charts(out_dir, &last.series_i, &last.series_ii, &report, config)
    }
}
