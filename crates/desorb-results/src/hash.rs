//! Content-based hashing for run IDs.

use desorb_project::Experiment;
use sha2::{Digest, Sha256};

/// SHA-256 over the experiment's JSON form and the engine version, hex-encoded.
///
/// The experiment name and notes take part: renaming a session is a new run.
pub fn compute_run_id(experiment: &Experiment, engine_version: &str) -> String {
    let mut hasher = Sha256::new();

    let experiment_json = serde_json::to_string(experiment).unwrap_or_default();
    hasher.update(experiment_json.as_bytes());

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Run ids are lowercase hex digests; anything else cannot name a run directory.
pub fn is_valid_run_id(run_id: &str) -> bool {
    !run_id.is_empty()
        && run_id.len() <= 64
        && run_id
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
