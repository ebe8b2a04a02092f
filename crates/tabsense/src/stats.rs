//! Descriptive statistics shared by quality scoring and insight generation.
//!
//! Conventions follow the usual dataframe defaults: quantiles interpolate
//! linearly between order statistics and standard deviation uses `n - 1`.

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Sample standard deviation, `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Sort a copy of `values` ascending.
pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Quantile `q` in `[0, 1]` of already-sorted values, linearly interpolated.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

pub fn median(values: &[f64]) -> Option<f64> {
    quantile_sorted(&sorted(values), 0.5)
}

/// Pearson correlation over paired observations.
///
/// `None` with fewer than two pairs or when either side is constant.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Tukey fence `[Q1 - k·IQR, Q3 + k·IQR]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrFence {
    pub lower: f64,
    pub upper: f64,
}

impl IqrFence {
    /// Smallest sample for which quartiles are meaningful.
    pub const MIN_SAMPLE: usize = 4;

    /// Fence for `values`, `None` when there are fewer than four of them.
    pub fn from_values(values: &[f64], multiplier: f64) -> Option<Self> {
        if values.len() < Self::MIN_SAMPLE {
            return None;
        }
        let sorted = sorted(values);
        let q1 = quantile_sorted(&sorted, 0.25)?;
        let q3 = quantile_sorted(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some(Self {
            lower: q1 - multiplier * iqr,
            upper: q3 + multiplier * iqr,
        })
    }

    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower || value > self.upper
    }

    pub fn count_outliers(&self, values: &[f64]) -> usize {
        values.iter().filter(|&&v| self.is_outlier(v)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean_median_std() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&values), Some(3.0));
        assert_eq!(median(&values), Some(3.0));
        assert!(approx(sample_std(&values).unwrap(), 2.5f64.sqrt()));
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(sample_std(&[7.0]), None);
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        assert!(approx(quantile_sorted(&sorted, 0.25).unwrap(), 1.75));
        assert!(approx(quantile_sorted(&sorted, 0.75).unwrap(), 3.25));
        assert_eq!(quantile_sorted(&[], 0.5), None);
    }

    #[test]
    fn test_pearson() {
        let pairs: Vec<(f64, f64)> = (1..=5).map(|i| (i as f64, 2.0 * i as f64)).collect();
        assert!(approx(pearson(&pairs).unwrap(), 1.0));

        let inverse: Vec<(f64, f64)> = (1..=5).map(|i| (i as f64, -(i as f64))).collect();
        assert!(approx(pearson(&inverse).unwrap(), -1.0));

        let constant = [(1.0, 3.0), (2.0, 3.0), (3.0, 3.0)];
        assert_eq!(pearson(&constant), None);
        assert_eq!(pearson(&[(1.0, 1.0)]), None);
    }

    #[test]
    fn test_iqr_fence() {
        assert!(IqrFence::from_values(&[1.0, 2.0, 3.0], 1.5).is_none());

        let values = [10.0, 11.0, 12.0, 13.0, 100.0];
        let fence = IqrFence::from_values(&values, 1.5).unwrap();
        // Q1 = 11, Q3 = 13, IQR = 2
        assert!(approx(fence.lower, 8.0));
        assert!(approx(fence.upper, 16.0));
        assert_eq!(fence.count_outliers(&values), 1);
    }
}
