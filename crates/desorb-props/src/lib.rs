//! desorb-props: temperature-indexed oxygen property tables.
//!
//! Provides:
//! - Equilibrium liquid-phase O2 mole fraction x*(T)
//! - Saturation O2 concentration C_sat(T) in mg/L
//! - Linear interpolation between integer Celsius entries, clamped at 0 and 30 °C
//!
//! # Example
//!
//! ```
//! use desorb_props::{equilibrium_mole_fraction, saturation_concentration};
//!
//! assert_eq!(saturation_concentration(25.0), 8.26);
//! assert_eq!(equilibrium_mole_fraction(25.0), 4.65e-6);
//! ```

pub mod data;
pub mod error;
pub mod table;

pub use error::{PropsError, PropsResult};
pub use table::{Lookup, LookupPath, PropertyTable, TEMP_MAX_C, TEMP_MIN_C};

use std::sync::LazyLock;

/// Equilibrium mole fraction table.
pub static EQUILIBRIUM: LazyLock<PropertyTable> = LazyLock::new(|| {
    PropertyTable::from_entries("equilibrium mole fraction", "-", &data::EQUILIBRIUM_X)
        .expect("built-in equilibrium table covers 0..=30 °C")
});

/// Saturation concentration table [mg/L].
pub static SATURATION: LazyLock<PropertyTable> = LazyLock::new(|| {
    PropertyTable::from_entries("saturation concentration", "mg/L", &data::SATURATION_C)
        .expect("built-in saturation table covers 0..=30 °C")
});

/// Equilibrium O2 mole fraction x* at `t_c` °C.
pub fn equilibrium_mole_fraction(t_c: f64) -> f64 {
    EQUILIBRIUM.lookup(t_c)
}

/// Saturation O2 concentration at `t_c` °C [mg/L].
pub fn saturation_concentration(t_c: f64) -> f64 {
    SATURATION.lookup(t_c)
}

/// Build both tables from the raw data and report the first defect.
///
/// Front ends call this once at startup so a broken table fails before any
/// trial is reduced.
pub fn check_tables() -> PropsResult<()> {
    PropertyTable::from_entries("equilibrium mole fraction", "-", &data::EQUILIBRIUM_X)?;
    PropertyTable::from_entries("saturation concentration", "mg/L", &data::SATURATION_C)?;
    Ok(())
}
