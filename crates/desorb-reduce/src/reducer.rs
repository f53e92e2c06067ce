//! Trial reducer: raw measurements to Kxa and H_OL.
//!
//! The reduction for one trial, with L the molar liquid flow, F the column
//! cross-section and h the packed height:
//!
//! ```text
//! x1, x2  = mole fractions of C1, C2
//! x*      = equilibrium mole fraction at T
//! ln_term = ln((x1 - x*) / (x2 - x*))
//! Kxa     = L / (F * h) * ln_term
//! H_OL    = h / ln_term
//! ```
//!
//! Two patches keep the reduction total on boundary data:
//! 1. Driving-force guard: when `x2 <= x*` the equilibrium value is replaced by
//!    `0.9 * x2`. This is a numerical patch, not thermodynamics; stored runs
//!    depend on it and it must stay.
//! 2. Ratio fallback: if a driving force is still not positive,
//!    `ln_term = ln(max(x1 / max(x2, 1e-10), 1.1))`, which is always > 0.

use desorb_core::constants::RIG;
use desorb_props::equilibrium_mole_fraction;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::convert::{concentration_to_mole_fraction, irrigation_density, molar_liquid_flow};
use crate::validate::ValidatedTrial;

/// Floor on x2 in the ratio fallback.
const X_OUT_FLOOR: f64 = 1e-10;
/// Floor on the ratio in the fallback; keeps `ln_term > 0`.
const RATIO_FLOOR: f64 = 1.1;
/// Factor applied to x2 by the driving-force guard.
const GUARD_FACTOR: f64 = 0.9;

/// Which formula produced `ln_term`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogTermBranch {
    /// Log-mean driving-force ratio.
    #[default]
    DrivingForce,
    /// Concentration-ratio fallback.
    RatioFallback,
}

/// Everything the reducer derives for one trial.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialReduction {
    /// L [kmol/h]
    pub molar_liquid_flow: f64,
    pub x_in: f64,
    pub x_out: f64,
    /// x* after the guard
    pub x_star: f64,
    pub ln_term: f64,
    /// Kxa [kmol/(m^3·h)]
    pub kxa: f64,
    /// H_OL [m]
    pub h_ol: f64,
    /// U_L
    pub irrigation_density: f64,
    /// `true` when x* was replaced by `0.9 * x2`
    pub guard_applied: bool,
    pub log_branch: LogTermBranch,
}

/// Reduce one trial.
///
/// Total for any finite input with `packed_height_m > 0`; callers are expected
/// to have passed the trial through [`crate::validate`] first.
pub fn reduce(
    liquid_flow_l_h: f64,
    temperature_c: f64,
    c_in_mg_l: f64,
    c_out_mg_l: f64,
    packed_height_m: f64,
) -> TrialReduction {
    let h = packed_height_m;
    let l = molar_liquid_flow(liquid_flow_l_h);
    let x1 = concentration_to_mole_fraction(c_in_mg_l);
    let x2 = concentration_to_mole_fraction(c_out_mg_l);

    let mut x_star = equilibrium_mole_fraction(temperature_c);
    let guard_applied = x2 <= x_star;
    if guard_applied {
        debug!(x_out = x2, x_star, "outlet at or below equilibrium, x* set to 0.9*x2");
        x_star = x2 * GUARD_FACTOR;
    }

    let (ln_term, log_branch) = if (x1 - x_star) > 0.0 && (x2 - x_star) > 0.0 {
        (
            ((x1 - x_star) / (x2 - x_star)).ln(),
            LogTermBranch::DrivingForce,
        )
    } else {
        let ratio = (x1 / x2.max(X_OUT_FLOOR)).max(RATIO_FLOOR);
        debug!(x_in = x1, x_out = x2, x_star, ratio, "driving force not positive, ratio fallback");
        (ratio.ln(), LogTermBranch::RatioFallback)
    };

    let f = RIG.area_m2;
    let kxa = (l / (f * h)) * ln_term;
    let h_ol = if ln_term > 0.0 { h / ln_term } else { h };

    TrialReduction {
        molar_liquid_flow: l,
        x_in: x1,
        x_out: x2,
        x_star,
        ln_term,
        kxa,
        h_ol,
        irrigation_density: irrigation_density(liquid_flow_l_h),
        guard_applied,
        log_branch,
    }
}

/// Reduce a trial that has been through the admissibility gate.
pub fn reduce_trial(trial: &ValidatedTrial, packed_height_m: f64) -> TrialReduction {
    let raw = trial.raw();
    reduce(
        raw.liquid_flow_l_h,
        raw.temperature_c,
        raw.c_in_mg_l,
        raw.c_out_mg_l,
        packed_height_m,
    )
}
