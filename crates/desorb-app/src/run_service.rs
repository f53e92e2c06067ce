//! Run execution and caching service.

use std::path::{Path, PathBuf};
use std::time::Instant;

use desorb_core::PhysicalConstants;
use desorb_project::{Experiment, demo_experiment, validate_experiment};
use desorb_reduce::{ReducedTrial, SeriesDataset, SeriesLabel, process_validated};
use desorb_results::{RunManifest, RunStore, TrialCounts};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};

/// Version recorded in manifests and mixed into run ids.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Store used for the demo data set when no directory is given.
pub const DEFAULT_STORE_DIR: &str = ".desorb/runs";

/// Where the trials of a run come from.
#[derive(Debug, Clone, Copy)]
pub enum ExperimentSource<'a> {
    File(&'a Path),
    Demo,
}

/// Options for running a reduction.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub use_cache: bool,
    pub engine_version: String,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            use_cache: true,
            engine_version: ENGINE_VERSION.to_string(),
        }
    }
}

/// Request to execute a run.
pub struct RunRequest<'a> {
    pub source: ExperimentSource<'a>,
    /// Overrides the store location derived from the source.
    pub store_dir: Option<&'a Path>,
    pub options: RunOptions,
}

/// Reduced data of a run, freshly computed or loaded from the store.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub run_id: String,
    pub manifest: RunManifest,
    pub series_i: SeriesDataset,
    pub series_ii: SeriesDataset,
    pub loaded_from_cache: bool,
}

impl RunOutcome {
    pub fn packed_height_m(&self) -> f64 {
        self.manifest.packed_height_m
    }

    pub fn series(&self, label: SeriesLabel) -> &SeriesDataset {
        match label {
            SeriesLabel::I => &self.series_i,
            SeriesLabel::II => &self.series_ii,
        }
    }
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: &str,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            Some(message.to_string()),
        ));
    }
}

/// Open the store a request points at.
pub fn open_store(request: &RunRequest) -> AppResult<RunStore> {
    let store = match (request.store_dir, request.source) {
        (Some(dir), _) => RunStore::new(dir.to_path_buf())?,
        (None, ExperimentSource::File(path)) => RunStore::for_experiment(path)?,
        (None, ExperimentSource::Demo) => RunStore::new(PathBuf::from(DEFAULT_STORE_DIR))?,
    };
    Ok(store)
}

/// Load and validate the experiment a source names.
pub fn load_experiment(source: ExperimentSource) -> AppResult<Experiment> {
    match source {
        ExperimentSource::File(path) => Ok(desorb_project::load(path)?),
        ExperimentSource::Demo => {
            let experiment = demo_experiment();
            validate_experiment(&experiment)?;
            Ok(experiment)
        }
    }
}

/// Execute or load a run based on request.
pub fn ensure_run(request: &RunRequest) -> AppResult<RunOutcome> {
    ensure_run_with_progress(request, None)
}

/// Execute or load a run and stream progress events.
pub fn ensure_run_with_progress(
    request: &RunRequest,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<RunOutcome> {
    let started = Instant::now();

    emit_progress(
        &mut progress_cb,
        RunStage::LoadingExperiment,
        started,
        "Loading experiment",
    );
    let experiment = load_experiment(request.source)?;

    emit_progress(
        &mut progress_cb,
        RunStage::CheckingCache,
        started,
        "Checking run cache",
    );
    let run_id = desorb_results::compute_run_id(&experiment, &request.options.engine_version);
    let store = open_store(request)?;

    if request.options.use_cache && store.has_run(&run_id) {
        emit_progress(
            &mut progress_cb,
            RunStage::LoadingCachedResult,
            started,
            "Loading cached run",
        );
        let outcome = load_run(&store, &run_id)?;
        store.set_last_run(&run_id)?;
        info!(run_id = %run_id, "loaded cached run");
        emit_progress(
            &mut progress_cb,
            RunStage::Completed,
            started,
            "Loaded cached run",
        );
        return Ok(outcome);
    }

    emit_progress(
        &mut progress_cb,
        RunStage::Reducing,
        started,
        "Reducing trials",
    );
    let h = experiment.packed_height_m;
    let series_i = process_validated(SeriesLabel::I, &experiment.series_i, h)?;
    let series_ii = process_validated(SeriesLabel::II, &experiment.series_ii, h)?;
    log_anomalies(&series_i);
    log_anomalies(&series_ii);

    let manifest = RunManifest {
        run_id: run_id.clone(),
        experiment_name: experiment.name.clone(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        engine_version: request.options.engine_version.clone(),
        packed_height_m: h,
        trial_counts: TrialCounts {
            series_i: series_i.len(),
            series_ii: series_ii.len(),
        },
        constants: PhysicalConstants::rig(),
    };

    emit_progress(
        &mut progress_cb,
        RunStage::SavingResults,
        started,
        "Saving run output",
    );
    let records: Vec<ReducedTrial> = series_i.iter().chain(series_ii.iter()).cloned().collect();
    store.save_run(&manifest, &records)?;
    store.set_last_run(&run_id)?;
    info!(
        run_id = %run_id,
        trials = records.len(),
        elapsed_s = started.elapsed().as_secs_f64(),
        "run completed"
    );

    emit_progress(&mut progress_cb, RunStage::Completed, started, "Run completed");

    Ok(RunOutcome {
        run_id,
        manifest,
        series_i,
        series_ii,
        loaded_from_cache: false,
    })
}

fn log_anomalies(series: &SeriesDataset) {
    for t in series {
        if t.guard_applied || t.log_branch != desorb_reduce::LogTermBranch::DrivingForce {
            debug!(
                trial = %t.id(),
                guard = t.guard_applied,
                branch = ?t.log_branch,
                "boundary reduction"
            );
        }
    }
}

/// Split stored records into the two series, keeping stored order.
pub fn split_records(records: Vec<ReducedTrial>) -> (SeriesDataset, SeriesDataset) {
    let (one, two): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|t| t.label == SeriesLabel::I);
    (
        SeriesDataset::from_trials(SeriesLabel::I, one),
        SeriesDataset::from_trials(SeriesLabel::II, two),
    )
}

/// List runs in a store, most recent first.
pub fn list_runs(store: &RunStore) -> AppResult<Vec<RunManifest>> {
    Ok(store.list_runs()?)
}

/// Load a stored run.
pub fn load_run(store: &RunStore, run_id: &str) -> AppResult<RunOutcome> {
    let manifest = store.load_manifest(run_id)?;
    let records = store.load_trials(run_id)?;
    let (series_i, series_ii) = split_records(records);

    if series_i.len() != manifest.trial_counts.series_i
        || series_ii.len() != manifest.trial_counts.series_ii
    {
        return Err(AppError::Results(format!(
            "run {run_id} is incomplete: manifest lists {} trials, store holds {}",
            manifest.trial_counts.total(),
            series_i.len() + series_ii.len()
        )));
    }

    Ok(RunOutcome {
        run_id: run_id.to_string(),
        manifest,
        series_i,
        series_ii,
        loaded_from_cache: true,
    })
}

/// Resolve `"last"` through the store's pointer; anything else is taken as a run id.
pub fn resolve_run_id(store: &RunStore, id_or_last: &str) -> AppResult<String> {
    if id_or_last == "last" {
        store.last_run()?.ok_or(AppError::NoLastRun)
    } else {
        Ok(id_or_last.to_string())
    }
}
