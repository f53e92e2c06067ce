//! desorb-reduce: from raw column measurements to transfer coefficients.
//!
//! Provides:
//! - Unit conversions (concentration -> mole fraction, volumetric -> molar flow)
//! - Admissibility validation of a raw trial
//! - The trial reducer (Kxa, H_OL and the intermediate quantities)
//! - The series processor producing an ordered [`SeriesDataset`]
//!
//! # Example
//!
//! ```
//! use desorb_reduce::{RawTrial, SeriesLabel, process_validated};
//!
//! let trials = [RawTrial::new(30.0, 20.0, 25.0, 22.0, 9.5)];
//! let series = process_validated(SeriesLabel::I, &trials, 0.8).unwrap();
//! assert_eq!(series.trials()[0].id(), "I-1");
//! assert!(series.trials()[0].kxa > 0.0);
//! ```

pub mod convert;
pub mod error;
pub mod reducer;
pub mod series;
pub mod trial;
pub mod validate;

pub use error::{ReduceError, ReduceResult};
pub use reducer::{LogTermBranch, TrialReduction, reduce, reduce_trial};
pub use series::{SeriesDataset, process, process_validated};
pub use trial::{OperatingVariable, RawTrial, ReducedTrial, SeriesLabel};
pub use validate::{
    Condition, INLET_RANGE_MG_L, Validation, ValidatedTrial, ValidationFailure, validate,
    validate_trial,
};
