//! Series processor: an ordered list of raw trials to a [`SeriesDataset`].

use desorb_core::ensure_positive;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convert::superficial_velocity;
use crate::error::{ReduceError, ReduceResult};
use crate::reducer::reduce;
use crate::trial::{OperatingVariable, RawTrial, ReducedTrial, SeriesLabel};
use crate::validate::validate_trial;

/// Reduced trials of one series, in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDataset {
    label: SeriesLabel,
    trials: Vec<ReducedTrial>,
}

impl SeriesDataset {
    /// Rebuild a dataset from stored records. Records are kept in the given order.
    pub fn from_trials(label: SeriesLabel, trials: Vec<ReducedTrial>) -> Self {
        Self { label, trials }
    }

    pub fn label(&self) -> SeriesLabel {
        self.label
    }

    pub fn trials(&self) -> &[ReducedTrial] {
        &self.trials
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ReducedTrial> {
        self.trials.iter()
    }

    pub fn operating_variable(&self) -> OperatingVariable {
        self.label.operating_variable()
    }

    /// Rows with both Kxa and H_OL strictly positive.
    pub fn positive_rows(&self) -> impl Iterator<Item = &ReducedTrial> {
        self.trials.iter().filter(|t| t.has_positive_coefficients())
    }
}

impl<'a> IntoIterator for &'a SeriesDataset {
    type Item = &'a ReducedTrial;
    type IntoIter = std::slice::Iter<'a, ReducedTrial>;

    fn into_iter(self) -> Self::IntoIter {
        self.trials.iter()
    }
}

/// Reduce every trial of a series in input order.
///
/// No reordering, filtering or deduplication: output index `i` is input index `i`,
/// labelled `"{label}-{i + 1}"`. Trials are not validated here; see
/// [`process_validated`].
pub fn process(label: SeriesLabel, trials: &[RawTrial], packed_height_m: f64) -> SeriesDataset {
    let trials = trials
        .iter()
        .enumerate()
        .map(|(i, raw)| reduce_one(label, i + 1, raw, packed_height_m))
        .collect();
    SeriesDataset { label, trials }
}

/// Gate every trial through the validator, then [`process`].
///
/// Fails on the first rejected trial, reporting its ordinal.
pub fn process_validated(
    label: SeriesLabel,
    trials: &[RawTrial],
    packed_height_m: f64,
) -> ReduceResult<SeriesDataset> {
    ensure_positive(packed_height_m, "packed height")
        .map_err(|_| ReduceError::InvalidHeight(packed_height_m))?;
    if trials.is_empty() {
        return Err(ReduceError::EmptySeries(label));
    }
    for (i, raw) in trials.iter().enumerate() {
        validate_trial(raw).map_err(|source| ReduceError::Rejected {
            label,
            ordinal: i + 1,
            source,
        })?;
    }
    Ok(process(label, trials, packed_height_m))
}

fn reduce_one(label: SeriesLabel, ordinal: usize, raw: &RawTrial, h: f64) -> ReducedTrial {
    let r = reduce(
        raw.liquid_flow_l_h,
        raw.temperature_c,
        raw.c_in_mg_l,
        raw.c_out_mg_l,
        h,
    );
    debug!(trial = %format!("{label}-{ordinal}"), kxa = r.kxa, h_ol = r.h_ol, "reduced");

    ReducedTrial {
        label,
        ordinal,
        raw: *raw,
        irrigation_density: r.irrigation_density,
        superficial_velocity: superficial_velocity(raw.gas_flow_m3_h),
        molar_liquid_flow: r.molar_liquid_flow,
        x_in: r.x_in,
        x_out: r.x_out,
        x_star: r.x_star,
        ln_term: r.ln_term,
        kxa: r.kxa,
        h_ol: r.h_ol,
        guard_applied: r.guard_applied,
        log_branch: r.log_branch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::Condition;

    fn sweep() -> Vec<RawTrial> {
        vec![
            RawTrial::new(75.0, 20.0, 25.0, 28.0, 11.0),
            RawTrial::new(15.0, 20.0, 25.0, 20.5, 9.0),
            RawTrial::new(15.0, 20.0, 25.0, 20.5, 9.0),
        ]
    }

    #[test]
    fn keeps_input_order_and_duplicates() {
        let ds = process(SeriesLabel::I, &sweep(), 0.8);
        assert_eq!(ds.len(), 3);
        let ids: Vec<String> = ds.iter().map(ReducedTrial::id).collect();
        assert_eq!(ids, ["I-1", "I-2", "I-3"]);
        assert_eq!(ds.trials()[0].raw.liquid_flow_l_h, 75.0);
        assert_eq!(ds.trials()[1].kxa, ds.trials()[2].kxa);
    }

    #[test]
    fn computes_superficial_velocity_from_gas_flow() {
        let ds = process(SeriesLabel::II, &sweep(), 0.8);
        let f = std::f64::consts::PI * (0.102 * 0.102) / 4.0;
        for t in &ds {
            assert_eq!(t.superficial_velocity, (20.0 / 3600.0) / f);
        }
    }

    #[test]
    fn single_trial_series() {
        let ds = process_validated(SeriesLabel::II, &sweep()[..1], 0.8).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.trials()[0].id(), "II-1");
    }

    #[test]
    fn rejects_bad_trial_with_ordinal() {
        let mut trials = sweep();
        trials.push(RawTrial::new(30.0, 20.0, 25.0, 22.0, 8.0));
        let err = process_validated(SeriesLabel::I, &trials, 0.8).unwrap_err();
        match err {
            ReduceError::Rejected {
                label,
                ordinal,
                source,
            } => {
                assert_eq!(label, SeriesLabel::I);
                assert_eq!(ordinal, 4);
                assert_eq!(source.failed, vec![Condition::OutletAboveSaturation]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_bad_height_and_empty_series() {
        assert_eq!(
            process_validated(SeriesLabel::I, &sweep(), 0.0).unwrap_err(),
            ReduceError::InvalidHeight(0.0)
        );
        assert_eq!(
            process_validated(SeriesLabel::II, &[], 0.8).unwrap_err(),
            ReduceError::EmptySeries(SeriesLabel::II)
        );
    }

    #[test]
    fn positive_rows_filter() {
        let mut trials = sweep();
        // Equal concentrations below equilibrium give Kxa = 0.
        trials.push(RawTrial::new(30.0, 20.0, 0.0, 5.0, 5.0));
        let ds = process(SeriesLabel::I, &trials, 0.8);
        assert_eq!(ds.len(), 4);
        assert_eq!(ds.positive_rows().count(), 3);
    }
}
