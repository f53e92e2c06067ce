//! Admissibility gate for raw trials.
//!
//! A trial may be reduced only when
//! - the outlet concentration is not below saturation at the trial temperature
//!   (`C2 - C_sat >= 0`), and
//! - the inlet concentration lies in the calibrated range of the probe
//!   (`18 <= C1 <= 28` mg/L).
//!
//! NaN inputs fail whichever comparison they take part in.

use std::fmt::{self, Write as _};
use std::ops::RangeInclusive;

use desorb_props::saturation_concentration;

use crate::trial::RawTrial;

/// Operable inlet concentration range [mg/L].
pub const INLET_RANGE_MG_L: RangeInclusive<f64> = 18.0..=28.0;

/// An admissibility condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// `C2 >= C_sat(T)`
    OutletAboveSaturation,
    /// `18 <= C1 <= 28`
    InletInRange,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutletAboveSaturation => write!(f, "C2 >= C_sat"),
            Self::InletInRange => write!(f, "18 <= C1 <= 28 mg/L"),
        }
    }
}

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub temperature_c: f64,
    pub c_in_mg_l: f64,
    pub c_out_mg_l: f64,
    /// Saturation concentration at the trial temperature [mg/L]
    pub c_sat_mg_l: f64,
    /// Conditions that did not hold, in check order.
    pub failed: Vec<Condition>,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        self.failed.is_empty()
    }

    /// `C2 - C_sat`; negative when the outlet condition fails.
    pub fn outlet_margin(&self) -> f64 {
        self.c_out_mg_l - self.c_sat_mg_l
    }

    pub fn failed(&self, condition: Condition) -> bool {
        self.failed.contains(&condition)
    }

    /// Human-readable diagnosis; empty when the trial passes.
    pub fn message(&self) -> String {
        if self.is_ok() {
            return String::new();
        }
        let mut msg =
            String::from("Require C2 >= C_sat (at the set temperature) and C1 within 18-28 mg/L\n");
        if self.failed(Condition::OutletAboveSaturation) {
            let _ = writeln!(
                msg,
                "current: C2({:.2}) - C_sat({:.2}) = {:.2} < 0",
                self.c_out_mg_l,
                self.c_sat_mg_l,
                self.outlet_margin()
            );
        }
        if self.failed(Condition::InletInRange) {
            let _ = write!(
                msg,
                "current: C1 = {:.2} mg/L, outside 18-28 mg/L",
                self.c_in_mg_l
            );
        }
        msg.trim_end().to_string()
    }

    pub fn into_result(self) -> Result<(), ValidationFailure> {
        if self.is_ok() {
            Ok(())
        } else {
            Err(ValidationFailure::from(self))
        }
    }
}

/// A failed admissibility check, as an error value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub failed: Vec<Condition>,
    pub c_sat_mg_l: f64,
    /// `C2 - C_sat`
    pub outlet_margin: f64,
    pub c_in_mg_l: f64,
    pub message: String,
}

impl From<Validation> for ValidationFailure {
    fn from(v: Validation) -> Self {
        Self {
            message: v.message(),
            c_sat_mg_l: v.c_sat_mg_l,
            outlet_margin: v.outlet_margin(),
            c_in_mg_l: v.c_in_mg_l,
            failed: v.failed,
        }
    }
}

/// A raw trial that passed [`validate`]. Only obtainable through [`validate_trial`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedTrial(RawTrial);

impl ValidatedTrial {
    pub fn raw(&self) -> &RawTrial {
        &self.0
    }
}

/// Check the admissibility conditions at temperature `t_c`.
pub fn validate(t_c: f64, c_in_mg_l: f64, c_out_mg_l: f64) -> Validation {
    let c_sat = saturation_concentration(t_c);

    let outlet_ok = (c_out_mg_l - c_sat) >= 0.0;
    let mut failed = Vec::new();
    if !outlet_ok {
        failed.push(Condition::OutletAboveSaturation);
    }
    if !INLET_RANGE_MG_L.contains(&c_in_mg_l) {
        failed.push(Condition::InletInRange);
    }

    Validation {
        temperature_c: t_c,
        c_in_mg_l,
        c_out_mg_l,
        c_sat_mg_l: c_sat,
        failed,
    }
}

pub fn validate_trial(trial: &RawTrial) -> Result<ValidatedTrial, ValidationFailure> {
    validate(trial.temperature_c, trial.c_in_mg_l, trial.c_out_mg_l).into_result()?;
    Ok(ValidatedTrial(*trial))
}
