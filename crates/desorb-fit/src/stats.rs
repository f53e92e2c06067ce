//! Sample statistics.

/// Arithmetic mean; NaN for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sum of squared deviations from `center`.
pub(crate) fn variance_about(values: &[f64], center: f64) -> f64 {
    values.iter().map(|v| (v - center) * (v - center)).sum()
}

/// Pearson correlation coefficient of two equally long series.
///
/// `None` with fewer than two points, mismatched lengths, non-finite values or
/// zero variance in either series. The result is clamped to `[-1, 1]`.
pub fn correlation(u: &[f64], v: &[f64]) -> Option<f64> {
    if u.len() != v.len() || u.len() < 2 {
        return None;
    }
    if !u.iter().chain(v).all(|x| x.is_finite()) {
        return None;
    }
    let mu = mean(u);
    let mv = mean(v);
    let suu = variance_about(u, mu);
    let svv = variance_about(v, mv);
    if suu <= 0.0 || svv <= 0.0 {
        return None;
    }
    let suv: f64 = u.iter().zip(v).map(|(a, b)| (a - mu) * (b - mv)).sum();
    let r = suv / (suu.sqrt() * svv.sqrt());
    if r.is_finite() {
        Some(r.clamp(-1.0, 1.0))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn perfect_linear_relations() {
        let u = [1.0, 2.0, 3.0, 4.0];
        let up = [3.0, 5.0, 7.0, 9.0];
        let down = [4.0, 3.0, 2.0, 1.0];
        assert_relative_eq!(correlation(&u, &up).unwrap(), 1.0, max_relative = 1e-12);
        assert_relative_eq!(correlation(&u, &down).unwrap(), -1.0, max_relative = 1e-12);
    }

    #[test]
    fn known_value() {
        // r for (1,2),(2,1),(3,4): cov 1.0, sd_u 1.0, sd_v ~1.5275
        let r = correlation(&[1.0, 2.0, 3.0], &[2.0, 1.0, 4.0]).unwrap();
        let want = 2.0 / (2.0f64.sqrt() * (14.0f64 / 3.0).sqrt());
        assert_relative_eq!(r, want, max_relative = 1e-12);
    }

    #[test]
    fn undefined_cases() {
        assert!(correlation(&[1.0], &[1.0]).is_none());
        assert!(correlation(&[1.0, 2.0], &[1.0]).is_none());
        assert!(correlation(&[1.0, 1.0], &[1.0, 2.0]).is_none());
        assert!(correlation(&[1.0, 2.0], &[5.0, 5.0]).is_none());
        assert!(correlation(&[1.0, f64::INFINITY], &[1.0, 2.0]).is_none());
    }
}
