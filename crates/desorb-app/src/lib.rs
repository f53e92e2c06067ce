//! Shared application service layer for desorb.
//!
//! This crate gives the CLI a single interface over the backend crates:
//! running and caching reductions, summarising runs, text tables, CSV export
//! and SVG charts.

pub mod charts;
pub mod error;
pub mod export;
pub mod progress;
pub mod query;
pub mod run_service;
pub mod session;
pub mod tables;

// Re-export key types for convenience
pub use charts::{ChartConfig, render_charts};
pub use error::{AppError, AppResult};
pub use export::export_run;
pub use progress::{RunProgressEvent, RunStage};
pub use query::{RunSummary, SeriesSummary, get_run_summary};
pub use run_service::{
    ENGINE_VERSION, ExperimentSource, RunOptions, RunOutcome, RunRequest, ensure_run,
    ensure_run_with_progress, list_runs, load_run, resolve_run_id,
};
pub use session::{LastRun, Session};
