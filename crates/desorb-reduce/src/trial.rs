//! Trial records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::reducer::LogTermBranch;

/// Which sweep a trial belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesLabel {
    /// Liquid-flow sweep
    I,
    /// Gas-flow sweep
    II,
}

impl SeriesLabel {
    pub const ALL: [SeriesLabel; 2] = [SeriesLabel::I, SeriesLabel::II];

    /// The operating variable swept in this series.
    pub fn operating_variable(self) -> OperatingVariable {
        match self {
            Self::I => OperatingVariable::IrrigationDensity,
            Self::II => OperatingVariable::SuperficialVelocity,
        }
    }
}

impl fmt::Display for SeriesLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I => write!(f, "I"),
            Self::II => write!(f, "II"),
        }
    }
}

/// Independent variable a series is characterised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatingVariable {
    /// U_L
    IrrigationDensity,
    /// u [m/s]
    SuperficialVelocity,
}

impl OperatingVariable {
    pub fn symbol(self) -> &'static str {
        match self {
            Self::IrrigationDensity => "U_L",
            Self::SuperficialVelocity => "u",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::IrrigationDensity => "m3/(m2·h)",
            Self::SuperficialVelocity => "m/s",
        }
    }

    pub fn value_of(self, trial: &ReducedTrial) -> f64 {
        match self {
            Self::IrrigationDensity => trial.irrigation_density,
            Self::SuperficialVelocity => trial.superficial_velocity,
        }
    }
}

/// Five measurements taken for one operating point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawTrial {
    /// Liquid volumetric flow L_v [L/h]
    pub liquid_flow_l_h: f64,
    /// Gas volumetric flow V_g [m^3/h]
    pub gas_flow_m3_h: f64,
    /// Water temperature [°C]
    pub temperature_c: f64,
    /// Inlet O2 concentration C1 [mg/L]
    pub c_in_mg_l: f64,
    /// Outlet O2 concentration C2 [mg/L]
    pub c_out_mg_l: f64,
}

impl RawTrial {
    pub const fn new(
        liquid_flow_l_h: f64,
        gas_flow_m3_h: f64,
        temperature_c: f64,
        c_in_mg_l: f64,
        c_out_mg_l: f64,
    ) -> Self {
        Self {
            liquid_flow_l_h,
            gas_flow_m3_h,
            temperature_c,
            c_in_mg_l,
            c_out_mg_l,
        }
    }
}

/// One reduced trial: the raw inputs plus every derived quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReducedTrial {
    pub label: SeriesLabel,
    /// 1-based position in the input order
    pub ordinal: usize,
    #[serde(flatten)]
    pub raw: RawTrial,
    /// U_L
    pub irrigation_density: f64,
    /// u [m/s]
    pub superficial_velocity: f64,
    /// L [kmol/h]
    pub molar_liquid_flow: f64,
    /// x1
    pub x_in: f64,
    /// x2
    pub x_out: f64,
    /// x* actually used (after the driving-force guard)
    pub x_star: f64,
    pub ln_term: f64,
    /// Kxa [kmol/(m^3·h)]
    pub kxa: f64,
    /// H_OL [m]
    pub h_ol: f64,
    #[serde(default)]
    pub guard_applied: bool,
    #[serde(default)]
    pub log_branch: LogTermBranch,
}

impl ReducedTrial {
    /// `"I-3"` style identifier.
    pub fn id(&self) -> String {
        format!("{}-{}", self.label, self.ordinal)
    }

    /// Both coefficients strictly positive; only such rows enter fits.
    pub fn has_positive_coefficients(&self) -> bool {
        self.kxa > 0.0 && self.h_ol > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_display_roman() {
        assert_eq!(SeriesLabel::I.to_string(), "I");
        assert_eq!(SeriesLabel::II.to_string(), "II");
    }

    #[test]
    fn series_map_to_their_sweep_variable() {
        assert_eq!(
            SeriesLabel::I.operating_variable(),
            OperatingVariable::IrrigationDensity
        );
        assert_eq!(SeriesLabel::II.operating_variable().symbol(), "u");
    }
}
