//! Run storage API.
//!
//! ```text
//! <root>/<run_id>/manifest.json
//! <root>/<run_id>/trials.jsonl
//! <root>/last_run
//! ```

use crate::hash::is_valid_run_id;
use crate::types::{RunId, RunManifest, TrialRecord};
use crate::{ResultsError, ResultsResult};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MANIFEST_FILE: &str = "manifest.json";
const TRIALS_FILE: &str = "trials.jsonl";
const LAST_RUN_FILE: &str = "last_run";

/// Ordering key of a manifest: its RFC 3339 timestamp in UTC, then the raw text.
/// An unreadable timestamp orders below every readable one.
fn parsed_timestamp(manifest: &RunManifest) -> (Option<DateTime<Utc>>, &str) {
    let parsed = DateTime::parse_from_rfc3339(&manifest.timestamp)
        .ok()
        .map(|t| t.with_timezone(&Utc));
    (parsed, manifest.timestamp.as_str())
}

#[derive(Clone, Debug)]
pub struct RunStore {
    root_dir: PathBuf,
}

impl RunStore {
    pub fn new(root_dir: PathBuf) -> ResultsResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    /// Store kept beside an experiment file, in `.desorb/runs`.
    pub fn for_experiment(experiment_path: &Path) -> ResultsResult<Self> {
        let experiment_dir = experiment_path
            .parent()
            .ok_or_else(|| ResultsError::InvalidPath {
                message: "experiment path has no parent directory".to_string(),
            })?;
        Self::new(experiment_dir.join(".desorb").join("runs"))
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn run_dir(&self, run_id: &str) -> ResultsResult<PathBuf> {
        if !is_valid_run_id(run_id) {
            return Err(ResultsError::InvalidRunId(run_id.to_string()));
        }
        Ok(self.root_dir.join(run_id))
    }

    pub fn has_run(&self, run_id: &str) -> bool {
        self.run_dir(run_id)
            .map(|dir| dir.join(MANIFEST_FILE).exists())
            .unwrap_or(false)
    }

    pub fn save_run(&self, manifest: &RunManifest, records: &[TrialRecord]) -> ResultsResult<()> {
        let run_dir = self.run_dir(&manifest.run_id)?;
        fs::create_dir_all(&run_dir)?;

        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(run_dir.join(MANIFEST_FILE), manifest_json)?;

        let mut trials_content = String::new();
        for record in records {
            let line = serde_json::to_string(record)?;
            trials_content.push_str(&line);
            trials_content.push('\n');
        }
        fs::write(run_dir.join(TRIALS_FILE), trials_content)?;

        debug!(run_id = %manifest.run_id, trials = records.len(), "run saved");
        Ok(())
    }

    pub fn load_manifest(&self, run_id: &str) -> ResultsResult<RunManifest> {
        let manifest_path = self.run_dir(run_id)?.join(MANIFEST_FILE);

        if !manifest_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(manifest_path)?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }

    /// Stored trials in the order they were saved.
    pub fn load_trials(&self, run_id: &str) -> ResultsResult<Vec<TrialRecord>> {
        let trials_path = self.run_dir(run_id)?.join(TRIALS_FILE);

        if !trials_path.exists() {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }

        let content = fs::read_to_string(trials_path)?;
        let mut records = Vec::new();
        for line in content.lines() {
            if !line.trim().is_empty() {
                let record: TrialRecord = serde_json::from_str(line)?;
                records.push(record);
            }
        }

        Ok(records)
    }

    /// All readable runs, most recent first.
    pub fn list_runs(&self) -> ResultsResult<Vec<RunManifest>> {
        let mut runs = Vec::new();

        if !self.root_dir.exists() {
            return Ok(runs);
        }

        for entry in fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            if entry.path().is_dir() {
                let run_id = entry.file_name().to_string_lossy().to_string();
                if let Ok(manifest) = self.load_manifest(&run_id) {
                    runs.push(manifest);
                }
            }
        }

        runs.sort_by(|a, b| parsed_timestamp(b).cmp(&parsed_timestamp(a)));
        Ok(runs)
    }

    /// Remove a run; clears the last-run pointer if it named this run.
    pub fn delete_run(&self, run_id: &str) -> ResultsResult<()> {
        let run_dir = self.run_dir(run_id)?;
        if run_dir.exists() {
            fs::remove_dir_all(run_dir)?;
        }
        if self.read_pointer()?.as_deref() == Some(run_id) {
            fs::remove_file(self.root_dir.join(LAST_RUN_FILE))?;
        }
        Ok(())
    }

    pub fn set_last_run(&self, run_id: &str) -> ResultsResult<()> {
        if !self.has_run(run_id) {
            return Err(ResultsError::RunNotFound {
                run_id: run_id.to_string(),
            });
        }
        fs::write(self.root_dir.join(LAST_RUN_FILE), run_id)?;
        Ok(())
    }

    /// Id of the most recently recorded run, if the pointer exists and still names a run.
    pub fn last_run(&self) -> ResultsResult<Option<RunId>> {
        Ok(self.read_pointer()?.filter(|run_id| self.has_run(run_id)))
    }

    fn read_pointer(&self) -> ResultsResult<Option<RunId>> {
        let path = self.root_dir.join(LAST_RUN_FILE);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?.trim().to_string()))
    }
}
