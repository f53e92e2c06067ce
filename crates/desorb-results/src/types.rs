//! Result data types.

use desorb_core::PhysicalConstants;
use desorb_reduce::ReducedTrial;
use serde::{Deserialize, Serialize};

pub type RunId = String;

/// Stored form of one reduced trial; one JSON line each in `trials.jsonl`.
pub type TrialRecord = ReducedTrial;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: RunId,
    pub experiment_name: String,
    /// RFC 3339
    pub timestamp: String,
    pub engine_version: String,
    pub packed_height_m: f64,
    pub trial_counts: TrialCounts,
    /// Rig constants the run was reduced with.
    pub constants: PhysicalConstants,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrialCounts {
    pub series_i: usize,
    pub series_ii: usize,
}

impl TrialCounts {
    pub fn total(&self) -> usize {
        self.series_i + self.series_ii
    }
}
