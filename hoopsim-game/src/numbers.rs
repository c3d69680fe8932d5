//! Numeric conversion helpers centralizing safe numeric casts and the
//! parse-or-default rule applied to every upstream stat read.

use num_traits::cast::cast;

/// Return the value when finite, otherwise 0.0.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Collapse an optional stat read to a finite value, defaulting to 0.0.
#[must_use]
pub fn stat_or_zero(value: Option<f64>) -> f64 {
    value.map_or(0.0, finite_or_zero)
}

/// Round a f64 and clamp it to the u32 range, returning 0 for NaN or negative values.
#[must_use]
pub fn round_f64_to_u32(value: f64) -> u32 {
    if value.is_nan() {
        return 0;
    }
    let max = cast::<u32, f64>(u32::MAX).unwrap_or(f64::MAX);
    let clamped = value.clamp(0.0, max).round();
    cast::<f64, u32>(clamped).unwrap_or(0)
}

/// Convert a count to f64 while allowing precision loss in a single location.
#[must_use]
pub fn usize_to_f64(value: usize) -> f64 {
    cast::<usize, f64>(value).unwrap_or(0.0)
}

/// Arithmetic mean, 0.0 for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / usize_to_f64(values.len())
}

/// Population standard deviation, 0.0 for fewer than two values.
#[must_use]
pub fn population_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values
        .iter()
        .map(|value| (value - avg).powi(2))
        .sum::<f64>()
        / usize_to_f64(values.len());
    variance.sqrt()
}

/// Linear interpolation between `from` and `to` at `step / span`, with the
/// span floored at 1 so zero-length segments never divide by zero.
#[must_use]
pub fn lerp_steps(from: f64, to: f64, step: f64, span: f64) -> f64 {
    let span = span.max(1.0);
    (to - from).mul_add(step / span, from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_finite_reads_default_to_zero() {
        assert!(finite_or_zero(f64::NAN).abs() < f64::EPSILON);
        assert!(finite_or_zero(f64::INFINITY).abs() < f64::EPSILON);
        assert!((stat_or_zero(Some(12.5)) - 12.5).abs() < f64::EPSILON);
        assert!(stat_or_zero(None).abs() < f64::EPSILON);
    }

    #[test]
    fn rounders_cover_ranges() {
        assert_eq!(round_f64_to_u32(1.6), 2);
        assert_eq!(round_f64_to_u32(-4.0), 0);
        assert_eq!(round_f64_to_u32(f64::NAN), 0);
        assert_eq!(round_f64_to_u32(f64::from(u32::MAX) * 2.0), u32::MAX);
    }

    #[test]
    fn std_of_constant_series_is_zero() {
        let values = [20.0; 5];
        assert!(population_std(&values).abs() < 1e-12);
        assert!(population_std(&[7.0]).abs() < f64::EPSILON);
    }

    #[test]
    fn population_std_matches_hand_computation() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((mean(&values) - 5.0).abs() < 1e-12);
        assert!((population_std(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn lerp_guards_zero_span() {
        assert!((lerp_steps(1.0, 2.0, 0.0, 0.0) - 1.0).abs() < f64::EPSILON);
        assert!((lerp_steps(1.0, 2.0, 1.0, 2.0) - 1.5).abs() < f64::EPSILON);
    }
}
