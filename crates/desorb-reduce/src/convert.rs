//! Unit conversions on the rig's fixed constants.
//!
//! The operation order in each formula is fixed; downstream tables and stored
//! runs compare against results produced in exactly this order.

use desorb_core::constants::RIG;

/// Dissolved O2 concentration [mg/L] to liquid-phase mole fraction.
///
/// Total over the reals; negative input yields a negative fraction.
pub fn concentration_to_mole_fraction(c_mg_l: f64) -> f64 {
    (c_mg_l / (RIG.molar_mass_o2 * 1000.0)) / (1000.0 / RIG.molar_mass_water)
}

/// Liquid volumetric flow [L/h] to molar flow [kmol/h].
pub fn molar_liquid_flow(liquid_flow_l_h: f64) -> f64 {
    (liquid_flow_l_h * RIG.water_density_g_l) / (RIG.molar_mass_water * 1000.0)
}

/// Gas volumetric flow [m^3/h] to superficial velocity [m/s].
pub fn superficial_velocity(gas_flow_m3_h: f64) -> f64 {
    (gas_flow_m3_h / 3600.0) / RIG.area_m2
}

/// Irrigation density U_L.
///
/// Divides L/h by m^2 * 1000 as the rig's worksheets always have; the scaling
/// is kept as-is.
pub fn irrigation_density(liquid_flow_l_h: f64) -> f64 {
    liquid_flow_l_h / (RIG.area_m2 * 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mole_fraction_of_saturated_water() {
        // 8.26 mg/L at 25 °C is ~4.65e-6, the tabulated equilibrium value.
        let x = concentration_to_mole_fraction(8.26);
        assert_relative_eq!(x, 8.26 / 32_000.0 / (1000.0 / 18.015), max_relative = 1e-15);
        assert!((x - 4.65e-6).abs() < 1e-8);
    }

    #[test]
    fn mole_fraction_is_linear_and_total() {
        assert_eq!(concentration_to_mole_fraction(0.0), 0.0);
        assert!(concentration_to_mole_fraction(-1.0) < 0.0);
        assert_relative_eq!(
            concentration_to_mole_fraction(20.0),
            2.0 * concentration_to_mole_fraction(10.0),
            max_relative = 1e-15
        );
    }

    #[test]
    fn molar_flow_of_thirty_litres() {
        assert_relative_eq!(
            molar_liquid_flow(30.0),
            30.0 * 1000.0 / 18_015.0,
            max_relative = 1e-15
        );
    }

    #[test]
    fn velocity_and_irrigation_use_column_area() {
        let f = std::f64::consts::PI * (0.102 * 0.102) / 4.0;
        assert_eq!(superficial_velocity(20.0), (20.0 / 3600.0) / f);
        assert_eq!(irrigation_density(30.0), 30.0 / (f * 1000.0));
    }
}
