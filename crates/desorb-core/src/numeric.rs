use crate::CoreError;

/// Floating point type used throughout the workspace
pub type Real = f64;

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Finite and `> 0`.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, CoreError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(CoreError::NotPositive { what, value: v })
    }
}

/// `n` points spaced evenly in log10 between `start` and `end` (both inclusive).
///
/// Returns an empty vector when either bound is non-positive or `n == 0`.
pub fn logspace(start: Real, end: Real, n: usize) -> Vec<Real> {
    if n == 0 || start <= 0.0 || end <= 0.0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let lo = start.log10();
    let hi = end.log10();
    let step = (hi - lo) / (n - 1) as Real;
    (0..n)
        .map(|i| {
            if i == n - 1 {
                end
            } else {
                10f64.powf(lo + step * i as Real)
            }
        })
        .collect()
}

/// Minimum and maximum of a slice, ignoring NaN. `None` for an empty (or all-NaN) slice.
pub fn min_max(values: &[Real]) -> Option<(Real, Real)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        assert!(format!("{err}").contains("Non-finite"));
    }

    #[test]
    fn ensure_positive_rejects_zero() {
        let err = ensure_positive(0.0, "packed height").unwrap_err();
        assert!(matches!(err, CoreError::NotPositive { .. }));
        assert_eq!(ensure_positive(0.8, "packed height").unwrap(), 0.8);
    }

    #[test]
    fn logspace_hits_both_ends() {
        let pts = logspace(0.01, 10.0, 4);
        assert_eq!(pts.len(), 4);
        for (p, want) in pts.iter().zip([0.01, 0.1, 1.0]) {
            assert!((p - want).abs() <= 1e-12 * want, "{p} != {want}");
        }
        assert_eq!(pts[3], 10.0);
        assert!(logspace(0.0, 1.0, 10).is_empty());
    }

    #[test]
    fn min_max_skips_nan() {
        assert_eq!(min_max(&[3.0, f64::NAN, -1.0, 2.0]), Some((-1.0, 3.0)));
        assert_eq!(min_max(&[]), None);
    }
}
