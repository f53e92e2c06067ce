//! Fixed physical constants of the packed column rig.
//!
//! The plain `f64` fields drive every calculation; the typed diameter exists for
//! summaries and must never feed back into the arithmetic.

use crate::units::{self, Length};

/// Column inner diameter [m]
pub const COLUMN_DIAMETER_M: f64 = 0.102;
/// Molar mass of water [g/mol]
pub const MOLAR_MASS_WATER: f64 = 18.015;
/// Molar mass of oxygen [g/mol]
pub const MOLAR_MASS_O2: f64 = 32.00;
/// Water density [g/L]
pub const WATER_DENSITY_G_L: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicalConstants {
    /// Column inner diameter D [m]
    pub diameter_m: f64,
    /// Cross-sectional area F = pi * D^2 / 4 [m^2]
    pub area_m2: f64,
    /// M_w [g/mol]
    pub molar_mass_water: f64,
    /// M_O2 [g/mol]
    pub molar_mass_o2: f64,
    /// rho_w [g/L]
    pub water_density_g_l: f64,
}

impl PhysicalConstants {
    pub fn rig() -> Self {
        Self::with_diameter(COLUMN_DIAMETER_M)
    }

    fn with_diameter(diameter_m: f64) -> Self {
        Self {
            diameter_m,
            area_m2: std::f64::consts::PI * (diameter_m * diameter_m) / 4.0,
            molar_mass_water: MOLAR_MASS_WATER,
            molar_mass_o2: MOLAR_MASS_O2,
            water_density_g_l: WATER_DENSITY_G_L,
        }
    }

    pub fn diameter(&self) -> Length {
        units::m(self.diameter_m)
    }
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        Self::rig()
    }
}

/// Process-wide constants of the rig.
pub static RIG: std::sync::LazyLock<PhysicalConstants> =
    std::sync::LazyLock::new(PhysicalConstants::rig);

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::length::meter;

    #[test]
    fn area_from_diameter() {
        let c = PhysicalConstants::rig();
        let expected = std::f64::consts::PI * 0.102 * 0.102 / 4.0;
        assert!((c.area_m2 - expected).abs() < 1e-15);
        assert!((c.area_m2 - 0.008_171_28).abs() < 1e-7);
    }

    #[test]
    fn typed_diameter_matches_raw_field() {
        let c = *RIG;
        assert_eq!(c.diameter().get::<meter>(), c.diameter_m);
    }
}
