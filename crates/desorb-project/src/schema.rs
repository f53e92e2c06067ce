//! Experiment file schema.

use desorb_reduce::{RawTrial, SeriesLabel};
use serde::{Deserialize, Serialize};

/// One lab session: the packed height and the two flow sweeps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Experiment {
    pub version: u32,
    pub name: String,
    /// Packed-bed height h [m]
    pub packed_height_m: f64,
    /// Liquid-flow sweep
    #[serde(default, with = "trial_rows")]
    pub series_i: Vec<RawTrial>,
    /// Gas-flow sweep
    #[serde(default, with = "trial_rows")]
    pub series_ii: Vec<RawTrial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Experiment {
    pub fn series(&self, label: SeriesLabel) -> &[RawTrial] {
        match label {
            SeriesLabel::I => &self.series_i,
            SeriesLabel::II => &self.series_ii,
        }
    }

    pub fn trial_count(&self) -> usize {
        self.series_i.len() + self.series_ii.len()
    }
}

/// Trials are written as mappings but may also be given as bare
/// `[L_v, V_g, T, C1, C2]` rows, the layout of hand-typed lab sheets.
mod trial_rows {
    use desorb_reduce::RawTrial;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TrialEntry {
        Fields(RawTrial),
        Row([f64; 5]),
    }

    impl From<TrialEntry> for RawTrial {
        fn from(entry: TrialEntry) -> Self {
            match entry {
                TrialEntry::Fields(t) => t,
                TrialEntry::Row([l, g, t, c1, c2]) => RawTrial::new(l, g, t, c1, c2),
            }
        }
    }

    pub fn serialize<S: Serializer>(trials: &[RawTrial], s: S) -> Result<S::Ok, S::Error> {
        trials.serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<RawTrial>, D::Error> {
        let entries = Vec::<TrialEntry>::deserialize(d)?;
        Ok(entries.into_iter().map(RawTrial::from).collect())
    }
}
