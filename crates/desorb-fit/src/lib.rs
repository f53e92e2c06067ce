//! desorb-fit: empirical correlations of transfer coefficients.
//!
//! Provides:
//! - [`fit_power_law`]: `y = a * x^b` by least squares on log10 values
//! - [`correlation`]: Pearson r
//! - [`analyze_run`]: the four fits of a run (series I against U_L, series II
//!   against u, each for Kxa and H_OL) over rows with positive coefficients

pub mod power_law;
pub mod report;
pub mod stats;

pub use power_law::{CURVE_POINTS, PowerLaw, fit_power_law};
pub use report::{
    Coefficient, FitOutcome, FitPair, FitReport, FitResult, analyze_pair, analyze_run,
};
pub use stats::{correlation, mean};
