//! The four fits of a run: each series' operating variable against Kxa and H_OL.

use std::fmt;

use desorb_reduce::{OperatingVariable, ReducedTrial, SeriesDataset, SeriesLabel};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::power_law::{PowerLaw, fit_power_law};
use crate::stats::correlation;

/// Transfer coefficient on the y axis of a fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Coefficient {
    Kxa,
    HOl,
}

impl Coefficient {
    pub const ALL: [Coefficient; 2] = [Coefficient::Kxa, Coefficient::HOl];

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Kxa => "Kxa",
            Self::HOl => "H_OL",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Kxa => "kmol/(m3·h)",
            Self::HOl => "m",
        }
    }

    /// Decimals shown for the prefactor in equation text.
    pub fn prefactor_decimals(self) -> usize {
        match self {
            Self::Kxa => 2,
            Self::HOl => 3,
        }
    }

    pub fn value_of(self, trial: &ReducedTrial) -> f64 {
        match self {
            Self::Kxa => trial.kxa,
            Self::HOl => trial.h_ol,
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One (series, operating variable, coefficient) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitPair {
    pub series: SeriesLabel,
    pub coefficient: Coefficient,
}

impl FitPair {
    pub fn variable(&self) -> OperatingVariable {
        self.series.operating_variable()
    }

    /// `"Series I: Kxa vs U_L"`
    pub fn title(&self) -> String {
        format!(
            "Series {}: {} vs {}",
            self.series,
            self.coefficient,
            self.variable().symbol()
        )
    }
}

/// Fit and correlation for a pair with enough usable rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FitResult {
    pub pair: FitPair,
    /// Rows that entered the fit
    pub points: usize,
    /// `None` when the operating variable has no spread in log space.
    pub law: Option<PowerLaw>,
    /// Pearson r of the raw values; `None` when either series is constant.
    pub r: Option<f64>,
    /// Operating-variable values of the rows used.
    pub x: Vec<f64>,
    /// Coefficient values of the rows used.
    pub y: Vec<f64>,
}

impl FitResult {
    /// Equation text in the coefficient's format, if a law was fitted.
    pub fn equation(&self) -> Option<String> {
        self.law.map(|law| {
            law.equation(
                self.pair.coefficient.symbol(),
                self.pair.variable().symbol(),
                self.pair.coefficient.prefactor_decimals(),
            )
        })
    }

    /// Sampled fitted curve spanning the rows used.
    pub fn curve(&self) -> Vec<(f64, f64)> {
        self.law.map(|law| law.curve(&self.x)).unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FitOutcome {
    Fitted(FitResult),
    /// Fewer than two rows with positive Kxa and H_OL.
    Insufficient { pair: FitPair, points: usize },
}

impl FitOutcome {
    pub fn pair(&self) -> FitPair {
        match self {
            Self::Fitted(fit) => fit.pair,
            Self::Insufficient { pair, .. } => *pair,
        }
    }

    pub fn fitted(&self) -> Option<&FitResult> {
        match self {
            Self::Fitted(fit) => Some(fit),
            Self::Insufficient { .. } => None,
        }
    }

    pub fn law(&self) -> Option<PowerLaw> {
        self.fitted().and_then(|f| f.law)
    }

    pub fn r(&self) -> Option<f64> {
        self.fitted().and_then(|f| f.r)
    }
}

/// Fit one coefficient of one series.
pub fn analyze_pair(series: &SeriesDataset, coefficient: Coefficient) -> FitOutcome {
    let pair = FitPair {
        series: series.label(),
        coefficient,
    };
    let variable = series.operating_variable();
    let (x, y): (Vec<f64>, Vec<f64>) = series
        .positive_rows()
        .map(|t| (variable.value_of(t), coefficient.value_of(t)))
        .unzip();

    if x.len() < 2 {
        warn!(
            series = %pair.series,
            coefficient = %coefficient,
            points = x.len(),
            "not enough positive rows to fit"
        );
        return FitOutcome::Insufficient {
            pair,
            points: x.len(),
        };
    }

    let law = fit_power_law(&x, &y);
    let r = correlation(&x, &y);
    debug!(pair = %pair.title(), ?law, ?r, "fitted");
    FitOutcome::Fitted(FitResult {
        pair,
        points: x.len(),
        law,
        r,
        x,
        y,
    })
}

/// All four fits of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct FitReport {
    pub series_i_kxa: FitOutcome,
    pub series_i_h_ol: FitOutcome,
    pub series_ii_kxa: FitOutcome,
    pub series_ii_h_ol: FitOutcome,
}

impl FitReport {
    pub fn get(&self, series: SeriesLabel, coefficient: Coefficient) -> &FitOutcome {
        match (series, coefficient) {
            (SeriesLabel::I, Coefficient::Kxa) => &self.series_i_kxa,
            (SeriesLabel::I, Coefficient::HOl) => &self.series_i_h_ol,
            (SeriesLabel::II, Coefficient::Kxa) => &self.series_ii_kxa,
            (SeriesLabel::II, Coefficient::HOl) => &self.series_ii_h_ol,
        }
    }

    /// Outcomes in report order: I/Kxa, I/H_OL, II/Kxa, II/H_OL.
    pub fn iter(&self) -> impl Iterator<Item = &FitOutcome> {
        [
            &self.series_i_kxa,
            &self.series_i_h_ol,
            &self.series_ii_kxa,
            &self.series_ii_h_ol,
        ]
        .into_iter()
    }
}

/// Fit both coefficients of both series.
pub fn analyze_run(series_i: &SeriesDataset, series_ii: &SeriesDataset) -> FitReport {
    FitReport {
        series_i_kxa: analyze_pair(series_i, Coefficient::Kxa),
        series_i_h_ol: analyze_pair(series_i, Coefficient::HOl),
        series_ii_kxa: analyze_pair(series_ii, Coefficient::Kxa),
        series_ii_h_ol: analyze_pair(series_ii, Coefficient::HOl),
    }
}
