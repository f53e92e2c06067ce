//! Reduction errors.

use thiserror::Error;

use crate::trial::SeriesLabel;
use crate::validate::ValidationFailure;

pub type ReduceResult<T> = Result<T, ReduceError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReduceError {
    /// A trial failed the admissibility gate.
    #[error("trial {label}-{ordinal} rejected: {source}")]
    Rejected {
        label: SeriesLabel,
        ordinal: usize,
        #[source]
        source: ValidationFailure,
    },

    #[error("packed height must be finite and > 0, got {0}")]
    InvalidHeight(f64),

    #[error("series {0} has no trials")]
    EmptySeries(SeriesLabel),
}
