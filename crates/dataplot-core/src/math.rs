//! Numeric helpers for datasets and plots
//!
//! `nanmean` and `nanstd` skip NaN only, so an infinite entry makes them
//! infinite or NaN. Quantiles, moments and histograms work on the finite
//! values.

use crate::{Error, Result};
use num_traits::ToPrimitive;

/// Convert a scalar operand to `f64`
///
/// Fails with [`Error::UnsupportedOperand`] when the value has no `f64`
/// representation.
pub fn scalar<T: ToPrimitive + std::fmt::Debug>(value: T) -> Result<f64> {
    value
        .to_f64()
        .ok_or_else(|| Error::UnsupportedOperand(format!("{value:?} is not representable as f64")))
}

/// Keep only the finite values of a slice
pub fn finite(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| x.is_finite()).collect()
}

/// Sort data and return a new vector, NaN last
pub fn sorted(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    if sorted.iter().any(|x| x.is_nan()) {
        // total_cmp puts negative NaN first
        let (nan, mut rest): (Vec<f64>, Vec<f64>) = sorted.into_iter().partition(|x| x.is_nan());
        rest.extend(nan);
        return rest;
    }
    sorted
}

fn not_nan(data: &[f64]) -> Vec<f64> {
    data.iter().copied().filter(|x| !x.is_nan()).collect()
}

/// Mean of the non-NaN values, NaN when there are none
pub fn nanmean(data: &[f64]) -> f64 {
    let values = not_nan(data);
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Standard deviation of the non-NaN values with `ddof` delta degrees of freedom
///
/// Returns NaN when fewer than `ddof + 1` such values exist.
pub fn nanstd(data: &[f64], ddof: usize) -> f64 {
    let values = not_nan(data);
    if values.len() <= ddof {
        return f64::NAN;
    }
    let m = values.iter().sum::<f64>() / values.len() as f64;
    let ss: f64 = values.iter().map(|&x| (x - m) * (x - m)).sum();
    (ss / (values.len() - ddof) as f64).sqrt()
}

/// Bias-corrected sample skewness of the finite values
///
/// Matches the adjusted Fisher-Pearson coefficient. NaN for fewer than three
/// values or zero variance.
pub fn skewness(data: &[f64]) -> f64 {
    let values = finite(data);
    let n = values.len() as f64;
    if values.len() < 3 {
        return f64::NAN;
    }
    let m = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / n;
    let m3 = values.iter().map(|&x| (x - m).powi(3)).sum::<f64>() / n;
    if m2 == 0.0 {
        return f64::NAN;
    }
    let g1 = m3 / m2.powf(1.5);
    g1 * (n * (n - 1.0)).sqrt() / (n - 2.0)
}

/// Bias-corrected sample excess kurtosis of the finite values
///
/// NaN for fewer than four values or zero variance.
pub fn kurtosis(data: &[f64]) -> f64 {
    let values = finite(data);
    let n = values.len() as f64;
    if values.len() < 4 {
        return f64::NAN;
    }
    let m = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / n;
    let m4 = values.iter().map(|&x| (x - m).powi(4)).sum::<f64>() / n;
    if m2 == 0.0 {
        return f64::NAN;
    }
    let g2 = m4 / (m2 * m2) - 3.0;
    ((n + 1.0) * g2 + 6.0) * (n - 1.0) / ((n - 2.0) * (n - 3.0))
}

/// Quantile of the finite values at probability `p`, linear interpolation
///
/// NaN when there are no finite values.
pub fn nanquantile(data: &[f64], p: f64) -> Result<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(Error::invalid_probability(p));
    }
    let values = sorted(&finite(data));
    Ok(quantile_sorted(&values, p))
}

/// Quantiles of the finite values at each probability in `ps`
pub fn nanquantiles(data: &[f64], ps: &[f64]) -> Result<Vec<f64>> {
    if let Some(&p) = ps.iter().find(|p| !(0.0..=1.0).contains(*p)) {
        return Err(Error::invalid_probability(p));
    }
    let values = sorted(&finite(data));
    Ok(ps.iter().map(|&p| quantile_sorted(&values, p)).collect())
}

fn quantile_sorted(values: &[f64], p: f64) -> f64 {
    match values.len() {
        0 => f64::NAN,
        1 => values[0],
        n => {
            let h = p * (n - 1) as f64;
            let lo = h.floor() as usize;
            let hi = (lo + 1).min(n - 1);
            values[lo] + (h - lo as f64) * (values[hi] - values[lo])
        }
    }
}

/// `num` evenly spaced values over `[start, stop]`, both ends included
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Trailing rolling mean with window `n`
///
/// The first `n - 1` outputs are NaN, as is any window containing NaN.
pub fn rolling_mean(data: &[f64], n: usize) -> Result<Vec<f64>> {
    if n == 0 {
        return Err(Error::InvalidParameter(
            "rolling window must be at least 1".to_string(),
        ));
    }
    Ok((0..data.len())
        .map(|i| {
            if i + 1 < n {
                return f64::NAN;
            }
            let window = &data[i + 1 - n..=i];
            window.iter().sum::<f64>() / n as f64
        })
        .collect())
}

/// Running sum; NaN entries propagate to every later position
pub fn cumsum(data: &[f64]) -> Vec<f64> {
    data.iter()
        .scan(0.0, |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Least-squares fit `y = slope * x + intercept`
///
/// Pairs where either coordinate is non-finite are ignored.
pub fn linear_regression(x: &[f64], y: &[f64]) -> Result<(f64, f64)> {
    if x.len() != y.len() {
        return Err(Error::length_mismatch(x.len(), y.len()));
    }
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return Err(Error::InvalidInput(
            "linear regression needs at least two finite points".to_string(),
        ));
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = pairs.iter().map(|p| (p.0 - mx).powi(2)).sum();
    let sxy: f64 = pairs.iter().map(|p| (p.0 - mx) * (p.1 - my)).sum();
    if sxx == 0.0 {
        return Err(Error::InvalidInput(
            "linear regression needs distinct x values".to_string(),
        ));
    }
    let slope = sxy / sxx;
    Ok((slope, my - slope * mx))
}

/// Equal-width bin edges spanning the finite values
///
/// A constant sample gets a unit-wide range centred on its value. No finite
/// values gives `[0, 1]`.
pub fn histogram_edges(data: &[f64], bins: usize) -> Result<Vec<f64>> {
    if bins == 0 {
        return Err(Error::InvalidParameter(
            "number of bins must be at least 1".to_string(),
        ));
    }
    let values = finite(data);
    let (mut lo, mut hi) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    if values.is_empty() {
        lo = 0.0;
        hi = 1.0;
    } else if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    Ok(linspace(lo, hi, bins + 1))
}

/// Count finite values into the bins given by `edges`
///
/// Bins are half-open except the last, which includes its right edge. Values
/// outside the edges are dropped.
pub fn histogram_counts(data: &[f64], edges: &[f64]) -> Result<Vec<f64>> {
    if edges.len() < 2 {
        return Err(Error::InvalidParameter(
            "bin edges need at least two values".to_string(),
        ));
    }
    if edges.windows(2).any(|w| !(w[0] < w[1])) {
        return Err(Error::InvalidParameter(
            "bin edges must increase monotonically".to_string(),
        ));
    }
    let nbins = edges.len() - 1;
    let last = edges[nbins];
    let mut counts = vec![0.0; nbins];
    for x in data.iter().copied().filter(|x| x.is_finite()) {
        if x < edges[0] || x > last {
            continue;
        }
        let idx = if x == last {
            nbins - 1
        } else {
            edges.partition_point(|&e| e <= x) - 1
        };
        counts[idx] += 1.0;
    }
    Ok(counts)
}

/// Scale counts so the histogram integrates to one
pub fn density(counts: &[f64], edges: &[f64]) -> Vec<f64> {
    let total: f64 = counts.iter().sum();
    if total == 0.0 {
        return vec![0.0; counts.len()];
    }
    counts
        .iter()
        .zip(edges.windows(2))
        .map(|(c, w)| c / (total * (w[1] - w[0])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_nan_aware_moments() {
        let data = [1.0, 2.0, f64::NAN, 3.0, 4.0];
        assert_relative_eq!(nanmean(&data), 2.5);
        assert_relative_eq!(nanstd(&data, 0), 1.25f64.sqrt());
        assert_relative_eq!(nanstd(&data, 1), (5.0f64 / 3.0).sqrt());
        assert!(nanmean(&[f64::NAN]).is_nan());
        assert!(nanstd(&[1.0], 1).is_nan());
    }

    #[test]
    fn test_infinities_are_not_skipped() {
        let data = [1.0, f64::NAN, f64::INFINITY];
        assert_eq!(nanmean(&data), f64::INFINITY);
        assert!(nanstd(&data, 0).is_nan());
        assert_eq!(nanmean(&[f64::NEG_INFINITY, 2.0]), f64::NEG_INFINITY);
    }

    #[test]
    fn test_skewness_and_kurtosis() {
        // Symmetric data has no skew
        assert_relative_eq!(skewness(&[1.0, 2.0, 3.0, 4.0, 5.0]), 0.0, epsilon = 1e-12);
        // Reference values from the adjusted estimators
        assert_relative_eq!(skewness(&[1.0, 2.0, 3.0, 10.0]), 1.76363, epsilon = 1e-4);
        assert_relative_eq!(kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]), -1.2, epsilon = 1e-12);
        assert!(skewness(&[1.0, 1.0, 1.0]).is_nan());
        assert!(kurtosis(&[1.0, 2.0]).is_nan());
    }

    #[test]
    fn test_quantiles_interpolate_linearly() {
        let data = [4.0, 1.0, 3.0, 2.0, f64::NAN];
        assert_relative_eq!(nanquantile(&data, 0.0).unwrap(), 1.0);
        assert_relative_eq!(nanquantile(&data, 0.5).unwrap(), 2.5);
        assert_relative_eq!(nanquantile(&data, 1.0).unwrap(), 4.0);
        assert_relative_eq!(nanquantile(&data, 0.25).unwrap(), 1.75);
        assert!(nanquantile(&data, 1.5).is_err());
        assert!(nanquantile(&[], 0.5).unwrap().is_nan());

        let qs = nanquantiles(&data, &[0.0, 1.0]).unwrap();
        assert_eq!(qs, vec![1.0, 4.0]);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_rolling_mean() {
        let out = rolling_mean(&[1.0, 2.0, 3.0, f64::NAN, 5.0, 6.0, 7.0], 2).unwrap();
        assert!(out[0].is_nan());
        assert_relative_eq!(out[1], 1.5);
        assert_relative_eq!(out[2], 2.5);
        assert!(out[3].is_nan());
        assert!(out[4].is_nan());
        assert_relative_eq!(out[5], 5.5);
        assert_relative_eq!(out[6], 6.5);
        assert!(rolling_mean(&[1.0], 0).is_err());
        assert!(rolling_mean(&[1.0, 2.0], 3)
            .unwrap()
            .iter()
            .all(|x| x.is_nan()));
    }

    #[test]
    fn test_cumsum() {
        assert_eq!(cumsum(&[1.0, 2.0, 3.0]), vec![1.0, 3.0, 6.0]);
        let with_nan = cumsum(&[1.0, f64::NAN, 3.0]);
        assert!(with_nan[1].is_nan() && with_nan[2].is_nan());
    }

    #[test]
    fn test_linear_regression() {
        let x = [0.0, 1.0, 2.0, 3.0, f64::NAN];
        let y = [1.0, 3.0, 5.0, 7.0, 100.0];
        let (slope, intercept) = linear_regression(&x, &y).unwrap();
        assert_relative_eq!(slope, 2.0);
        assert_relative_eq!(intercept, 1.0);
        assert!(linear_regression(&[1.0], &[1.0, 2.0]).is_err());
        assert!(linear_regression(&[1.0, 1.0], &[1.0, 2.0]).is_err());
    }

    #[test]
    fn test_histogram_binning() {
        let data = [0.0, 0.5, 1.0, 1.5, 2.0, f64::NAN];
        let edges = histogram_edges(&data, 4).unwrap();
        assert_eq!(edges, vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        let counts = histogram_counts(&data, &edges).unwrap();
        // Last bin is closed on the right
        assert_eq!(counts, vec![1.0, 1.0, 1.0, 2.0]);
        let dens = density(&counts, &edges);
        let area: f64 = dens.iter().map(|d| d * 0.5).sum();
        assert_relative_eq!(area, 1.0);

        assert_eq!(histogram_edges(&[3.0, 3.0], 2).unwrap(), vec![2.5, 3.0, 3.5]);
        assert!(histogram_edges(&data, 0).is_err());
        assert!(histogram_counts(&data, &[1.0, 0.0]).is_err());
    }

    #[test]
    fn test_scalar_conversion() {
        assert_eq!(scalar(3u8).unwrap(), 3.0);
        assert_eq!(scalar(-2i64).unwrap(), -2.0);
        assert_eq!(scalar(0.5f32).unwrap(), 0.5);
    }

    #[test]
    fn test_sorted_puts_nan_last() {
        let out = sorted(&[3.0, f64::NAN, 1.0, 2.0]);
        assert_eq!(&out[..3], &[1.0, 2.0, 3.0]);
        assert!(out[3].is_nan());
    }
}
