//! Descriptive statistics over plain value slices.
//!
//! Quantiles use linear interpolation between order statistics: for `n` sorted values and
//! quantile `q`, the position is `h = (n - 1) * q` and the result is
//! `x[floor(h)] + (h - floor(h)) * (x[floor(h) + 1] - x[floor(h)])`. The median is the 0.5
//! quantile. Standard deviations are sample standard deviations (`n - 1` denominator).

/// Rounds half away from zero to `decimals` places, normalising `-0.0` to `0.0`.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / factor;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Interpolated quantile of an ascending slice; `None` when the slice is empty.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let (lower, upper, fraction) = interpolation_point(sorted.len(), q)?;
    let low = sorted[lower];
    Some(low + fraction * (sorted[upper] - low))
}

/// Interpolated quantile of ascending integer ticks, rounded to the nearest tick.
pub fn tick_quantile(sorted: &[i64], q: f64) -> Option<i64> {
    let (lower, upper, fraction) = interpolation_point(sorted.len(), q)?;
    let low = sorted[lower];
    let span = (i128::from(sorted[upper]) - i128::from(low)) as f64;
    Some(low + (fraction * span).round() as i64)
}

fn interpolation_point(len: usize, q: f64) -> Option<(usize, usize, f64)> {
    if len == 0 {
        return None;
    }
    let h = (len - 1) as f64 * q.clamp(0.0, 1.0);
    let lower = h.floor() as usize;
    let upper = (lower + 1).min(len - 1);
    Some((lower, upper, h - lower as f64))
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation; needs at least two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

/// Mean of integer ticks rounded half up to the nearest tick, computed without overflow.
pub fn tick_mean(ticks: &[i64]) -> Option<i64> {
    if ticks.is_empty() {
        return None;
    }
    let n = ticks.len() as i128;
    let sum: i128 = ticks.iter().map(|&t| i128::from(t)).sum();
    let mut mean = sum.div_euclid(n);
    if 2 * sum.rem_euclid(n) >= n {
        mean += 1;
    }
    Some(mean as i64)
}

/// Sample standard deviation of integer ticks, in ticks.
pub fn tick_std_dev(ticks: &[i64]) -> Option<f64> {
    if ticks.len() < 2 {
        return None;
    }
    // Deviations are taken from the exact mean: whole ticks in i128, the remainder in f64.
    let n = ticks.len() as i128;
    let sum: i128 = ticks.iter().map(|&t| i128::from(t)).sum();
    let whole = sum.div_euclid(n);
    let fraction = sum.rem_euclid(n) as f64 / n as f64;
    let sum_sq: f64 = ticks
        .iter()
        .map(|&t| ((i128::from(t) - whole) as f64 - fraction).powi(2))
        .sum();
    Some((sum_sq / (ticks.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(33.333_333, 2), 33.33);
        assert_eq!(round_to(2.675_000_1, 2), 2.68);
        assert_eq!(round_to(-1.005_1, 2), -1.01);
        assert_eq!(round_to(-0.001, 2), 0.0);
        assert!(round_to(-0.001, 2).is_sign_positive());
        assert_eq!(round_to(f64::INFINITY, 2), f64::INFINITY);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values = [25.0, 25.0, 30.0, 40.0];
        assert_eq!(quantile(&values, 0.0), Some(25.0));
        assert_eq!(quantile(&values, 0.25), Some(25.0));
        assert_eq!(quantile(&values, 0.5), Some(27.5));
        assert_eq!(quantile(&values, 0.75), Some(32.5));
        assert_eq!(quantile(&values, 1.0), Some(40.0));
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[7.0], 0.75), Some(7.0));
    }

    #[test]
    fn test_quantile_matches_hundred_points() {
        let values: Vec<f64> = (0..=100).map(f64::from).collect();
        assert_eq!(quantile(&values, 0.25), Some(25.0));
        assert_eq!(quantile(&values, 0.75), Some(75.0));
    }

    #[test]
    fn test_sample_std_dev() {
        let values = [25.0, 30.0, 25.0, 40.0];
        let std = sample_std_dev(&values).unwrap();
        assert!((std - 7.071_067_811_865_476).abs() < 1e-12);
        assert_eq!(sample_std_dev(&[1.0]), None);
        assert_eq!(sample_std_dev(&[]), None);
    }

    #[test]
    fn test_tick_helpers() {
        assert_eq!(tick_mean(&[1, 2]), Some(2));
        assert_eq!(tick_mean(&[-1, -2]), Some(-1));
        assert_eq!(tick_mean(&[i64::MAX, i64::MAX]), Some(i64::MAX));
        assert_eq!(tick_mean(&[]), None);

        assert_eq!(tick_quantile(&[0, 10], 0.25), Some(3));
        assert_eq!(tick_quantile(&[0, 10, 20], 0.5), Some(10));

        let std = tick_std_dev(&[0, 10]).unwrap();
        assert!((std - 7.071_067_811_865_476).abs() < 1e-9);
        assert_eq!(tick_std_dev(&[5]), None);
    }

    #[test]
    fn test_tick_std_dev_uses_unrounded_mean() {
        // mean is 1/3 of a tick; rounding it to 0 would give sqrt(1/2)
        let std = tick_std_dev(&[0, 0, 1]).unwrap();
        assert!((std - (1.0f64 / 3.0).sqrt()).abs() < 1e-12);

        let offset = 1_700_000_000_i64;
        let shifted = tick_std_dev(&[offset, offset, offset + 1]).unwrap();
        assert!((shifted - std).abs() < 1e-12);

        let negative = tick_std_dev(&[-1, 0, 0]).unwrap();
        assert!((negative - std).abs() < 1e-12);
    }
}
