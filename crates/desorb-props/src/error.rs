//! Property table errors.

use thiserror::Error;

/// Result type for table construction.
pub type PropsResult<T> = Result<T, PropsError>;

/// Defects found while building a [`crate::PropertyTable`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropsError {
    /// An integer temperature inside the domain has no entry.
    #[error("{table}: no entry for {temperature_c} °C")]
    MissingEntry {
        table: &'static str,
        temperature_c: i32,
    },

    /// Two entries for the same temperature.
    #[error("{table}: duplicate entry for {temperature_c} °C")]
    DuplicateEntry {
        table: &'static str,
        temperature_c: i32,
    },

    /// Entry outside 0..=30 °C.
    #[error("{table}: entry at {temperature_c} °C is outside the table domain")]
    OutOfDomain {
        table: &'static str,
        temperature_c: i32,
    },

    /// Non-finite or non-positive reference value.
    #[error("{table}: non-physical value {value} at {temperature_c} °C")]
    NonPhysical {
        table: &'static str,
        temperature_c: i32,
        value: f64,
    },
}
