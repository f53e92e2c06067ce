//! Closed integer-temperature tables with linear interpolation.

use crate::error::{PropsError, PropsResult};

/// Lowest tabulated temperature [°C]
pub const TEMP_MIN_C: i32 = 0;
/// Highest tabulated temperature [°C]
pub const TEMP_MAX_C: i32 = 30;

const LEN: usize = (TEMP_MAX_C - TEMP_MIN_C + 1) as usize;

/// Temperature used when a query cannot be placed anywhere in the domain (NaN).
const FALLBACK_C: usize = 25;

/// How a lookup was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPath {
    /// Integer temperature, stored value returned.
    Exact,
    /// Between two integer entries.
    Interpolated,
    /// Below 0 °C, clamped to the 0 °C entry.
    ClampedLow,
    /// Above 30 °C, clamped to the 30 °C entry.
    ClampedHigh,
    /// Unresolvable temperature; 25 °C entry returned.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lookup {
    pub value: f64,
    pub path: LookupPath,
}

/// A reference property tabulated at every integer Celsius temperature in 0..=30.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    name: &'static str,
    unit: &'static str,
    values: [f64; LEN],
}

impl PropertyTable {
    /// Build a table from `(°C, value)` pairs in any order.
    ///
    /// Every integer temperature in the domain must appear exactly once with a
    /// finite, strictly positive value.
    pub fn from_entries(
        name: &'static str,
        unit: &'static str,
        entries: &[(i32, f64)],
    ) -> PropsResult<Self> {
        let mut slots: [Option<f64>; LEN] = [None; LEN];

        for &(temperature_c, value) in entries {
            if !(TEMP_MIN_C..=TEMP_MAX_C).contains(&temperature_c) {
                return Err(PropsError::OutOfDomain {
                    table: name,
                    temperature_c,
                });
            }
            if !value.is_finite() || value <= 0.0 {
                return Err(PropsError::NonPhysical {
                    table: name,
                    temperature_c,
                    value,
                });
            }
            let slot = &mut slots[(temperature_c - TEMP_MIN_C) as usize];
            if slot.is_some() {
                return Err(PropsError::DuplicateEntry {
                    table: name,
                    temperature_c,
                });
            }
            *slot = Some(value);
        }

        let mut values = [0.0; LEN];
        for (i, slot) in slots.iter().enumerate() {
            values[i] = slot.ok_or(PropsError::MissingEntry {
                table: name,
                temperature_c: TEMP_MIN_C + i as i32,
            })?;
        }

        Ok(Self { name, unit, values })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    /// Stored value at an integer temperature, `None` outside the domain.
    pub fn entry(&self, temperature_c: i32) -> Option<f64> {
        if (TEMP_MIN_C..=TEMP_MAX_C).contains(&temperature_c) {
            Some(self.values[(temperature_c - TEMP_MIN_C) as usize])
        } else {
            None
        }
    }

    /// Value at `t_c` °C.
    pub fn lookup(&self, t_c: f64) -> f64 {
        self.resolve(t_c).value
    }

    /// Value at `t_c` °C together with the branch that produced it.
    pub fn resolve(&self, t_c: f64) -> Lookup {
        let lo_c = TEMP_MIN_C as f64;
        let hi_c = TEMP_MAX_C as f64;

        if t_c < lo_c {
            return Lookup {
                value: self.values[0],
                path: LookupPath::ClampedLow,
            };
        }
        if t_c > hi_c {
            return Lookup {
                value: self.values[LEN - 1],
                path: LookupPath::ClampedHigh,
            };
        }
        if !t_c.is_finite() {
            return Lookup {
                value: self.values[FALLBACK_C],
                path: LookupPath::Fallback,
            };
        }

        let floor = t_c.floor();
        let idx = (floor - lo_c) as usize;
        let frac = t_c - floor;
        if frac == 0.0 {
            return Lookup {
                value: self.values[idx],
                path: LookupPath::Exact,
            };
        }

        // t_c < 30 here, so idx + 1 is in range.
        let v_lo = self.values[idx];
        let v_hi = self.values[idx + 1];
        Lookup {
            value: v_lo + (v_hi - v_lo) * frac,
            path: LookupPath::Interpolated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Vec<(i32, f64)> {
        (TEMP_MIN_C..=TEMP_MAX_C)
            .map(|t| (t, 100.0 - 2.0 * t as f64))
            .collect()
    }

    #[test]
    fn exact_entries() {
        let table = PropertyTable::from_entries("ramp", "-", &ramp()).unwrap();
        for t in TEMP_MIN_C..=TEMP_MAX_C {
            let hit = table.resolve(t as f64);
            assert_eq!(hit.path, LookupPath::Exact);
            assert_eq!(hit.value, 100.0 - 2.0 * t as f64);
        }
    }

    #[test]
    fn midpoint_interpolation() {
        let table = PropertyTable::from_entries("ramp", "-", &ramp()).unwrap();
        let hit = table.resolve(0.5);
        assert_eq!(hit.path, LookupPath::Interpolated);
        assert_eq!(hit.value, (100.0 + 98.0) / 2.0);
    }

    #[test]
    fn clamps_outside_domain() {
        let table = PropertyTable::from_entries("ramp", "-", &ramp()).unwrap();
        assert_eq!(table.resolve(-5.0).path, LookupPath::ClampedLow);
        assert_eq!(table.lookup(-5.0), table.lookup(0.0));
        assert_eq!(table.resolve(35.0).path, LookupPath::ClampedHigh);
        assert_eq!(table.lookup(35.0), table.lookup(30.0));
        assert_eq!(table.lookup(30.5), table.lookup(30.0));
        assert_eq!(table.lookup(f64::NEG_INFINITY), table.lookup(0.0));
        assert_eq!(table.lookup(f64::INFINITY), table.lookup(30.0));
    }

    #[test]
    fn nan_takes_the_fallback() {
        let table = PropertyTable::from_entries("ramp", "-", &ramp()).unwrap();
        let hit = table.resolve(f64::NAN);
        assert_eq!(hit.path, LookupPath::Fallback);
        assert_eq!(hit.value, table.entry(25).unwrap());
    }

    #[test]
    fn missing_entry_is_rejected() {
        let mut entries = ramp();
        entries.retain(|(t, _)| *t != 17);
        let err = PropertyTable::from_entries("holey", "-", &entries).unwrap_err();
        assert_eq!(
            err,
            PropsError::MissingEntry {
                table: "holey",
                temperature_c: 17
            }
        );
    }

    #[test]
    fn duplicate_and_out_of_domain_are_rejected() {
        let mut entries = ramp();
        entries.push((3, 1.0));
        assert!(matches!(
            PropertyTable::from_entries("dup", "-", &entries),
            Err(PropsError::DuplicateEntry { temperature_c: 3, .. })
        ));

        let mut entries = ramp();
        entries.push((31, 1.0));
        assert!(matches!(
            PropertyTable::from_entries("wide", "-", &entries),
            Err(PropsError::OutOfDomain { temperature_c: 31, .. })
        ));
    }

    #[test]
    fn non_physical_value_is_rejected() {
        let mut entries = ramp();
        entries[4].1 = f64::NAN;
        assert!(matches!(
            PropertyTable::from_entries("nan", "-", &entries),
            Err(PropsError::NonPhysical { temperature_c: 4, .. })
        ));
    }
}
