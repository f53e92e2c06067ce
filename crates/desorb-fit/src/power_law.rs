//! Power-law fits `y = a * x^b` by least squares in log10 space.

use desorb_core::{logspace, min_max};
use serde::{Deserialize, Serialize};

use crate::stats::{mean, variance_about};

/// Points sampled along a fitted curve.
pub const CURVE_POINTS: usize = 100;
/// Smallest lower bound of a sampled curve.
const CURVE_FLOOR: f64 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PowerLaw {
    /// Prefactor a
    pub a: f64,
    /// Exponent b
    pub b: f64,
}

impl PowerLaw {
    pub fn eval(&self, x: f64) -> f64 {
        self.a * x.powf(self.b)
    }

    /// `"Kxa = 1.23·U_L^0.45"`; negative exponents render as `^(-0.45)`.
    pub fn equation(&self, lhs: &str, var: &str, prefactor_decimals: usize) -> String {
        let a = format!("{:.*}", prefactor_decimals, self.a);
        if self.b >= 0.0 {
            format!("{lhs} = {a}·{var}^{:.2}", self.b)
        } else {
            format!("{lhs} = {a}·{var}^(-{:.2})", self.b.abs())
        }
    }

    /// Sample the law over the span of `xs`, log-spaced from
    /// `max(min * 0.9, 1e-3)` to `max * 1.1`.
    pub fn curve(&self, xs: &[f64]) -> Vec<(f64, f64)> {
        let Some((lo, hi)) = min_max(xs) else {
            return Vec::new();
        };
        logspace((lo * 0.9).max(CURVE_FLOOR), hi * 1.1, CURVE_POINTS)
            .into_iter()
            .map(|x| (x, self.eval(x)))
            .collect()
    }
}

/// Ordinary least squares of `log10(y)` on `log10(x)`.
///
/// `None` when there are fewer than two points, the lengths differ, any value
/// is non-positive or non-finite, or `x` has no spread in log space.
pub fn fit_power_law(x: &[f64], y: &[f64]) -> Option<PowerLaw> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let usable = |v: &f64| v.is_finite() && *v > 0.0;
    if !x.iter().all(usable) || !y.iter().all(usable) {
        return None;
    }

    let lx: Vec<f64> = x.iter().map(|v| v.log10()).collect();
    let ly: Vec<f64> = y.iter().map(|v| v.log10()).collect();
    let mx = mean(&lx);
    let my = mean(&ly);

    let sxx = variance_about(&lx, mx);
    if sxx <= 0.0 {
        return None;
    }
    let sxy: f64 = lx.iter().zip(&ly).map(|(a, b)| (a - mx) * (b - my)).sum();

    let b = sxy / sxx;
    let c = my - b * mx;
    Some(PowerLaw {
        a: 10f64.powf(c),
        b,
    })
}
