//! Query helpers for summarising loaded runs.

use desorb_core::min_max;
use desorb_reduce::{LogTermBranch, SeriesDataset};

use crate::error::{AppError, AppResult};
use crate::run_service::RunOutcome;

/// Coefficient ranges and anomaly counts of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesSummary {
    pub trial_count: usize,
    /// Rows with positive Kxa and H_OL
    pub usable_count: usize,
    pub kxa_range: Option<(f64, f64)>,
    pub h_ol_range: Option<(f64, f64)>,
    pub operating_range: Option<(f64, f64)>,
    /// Trials where x* was replaced by `0.9 * x2`
    pub guard_count: usize,
    /// Trials whose log term came from the ratio fallback
    pub fallback_count: usize,
}

/// Summary of a run's reduced data.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub run_id: String,
    pub experiment_name: String,
    pub timestamp: String,
    pub packed_height_m: f64,
    pub series_i: SeriesSummary,
    pub series_ii: SeriesSummary,
}

pub fn summarize_series(series: &SeriesDataset) -> SeriesSummary {
    let variable = series.operating_variable();
    let kxa: Vec<f64> = series.iter().map(|t| t.kxa).collect();
    let h_ol: Vec<f64> = series.iter().map(|t| t.h_ol).collect();
    let op: Vec<f64> = series.iter().map(|t| variable.value_of(t)).collect();

    SeriesSummary {
        trial_count: series.len(),
        usable_count: series.positive_rows().count(),
        kxa_range: min_max(&kxa),
        h_ol_range: min_max(&h_ol),
        operating_range: min_max(&op),
        guard_count: series.iter().filter(|t| t.guard_applied).count(),
        fallback_count: series
            .iter()
            .filter(|t| t.log_branch == LogTermBranch::RatioFallback)
            .count(),
    }
}

/// Get run summary from a loaded or fresh run.
pub fn get_run_summary(outcome: &RunOutcome) -> AppResult<RunSummary> {
    if outcome.series_i.is_empty() && outcome.series_ii.is_empty() {
        return Err(AppError::InvalidInput("No trials in run".to_string()));
    }

    Ok(RunSummary {
        run_id: outcome.run_id.clone(),
        experiment_name: outcome.manifest.experiment_name.clone(),
        timestamp: outcome.manifest.timestamp.clone(),
        packed_height_m: outcome.manifest.packed_height_m,
        series_i: summarize_series(&outcome.series_i),
        series_ii: summarize_series(&outcome.series_ii),
    })
}
