//! Ordinary least-squares trend of a metric against time.

use log::debug;

use crate::error::InsufficientDataError;

use super::distribution::{student_t_quantile, student_t_two_sided_p};

/// Fewest points that leave a residual degree of freedom.
pub const MIN_POINTS: usize = 3;

/// Linear fit `value = intercept + slope * x`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendResult {
    pub metric: String,
    /// Change in the metric per unit of `x` (per year).
    pub slope: f64,
    /// Fitted value at `x = 0`.
    pub intercept: f64,
    /// Two-sided p-value for the null hypothesis `slope = 0`.
    pub p_value: f64,
    pub r_squared: f64,
    /// Standard error of the slope.
    pub std_err: f64,
    pub n: usize,
    mean_x: f64,
    ss_xx: f64,
    residual_std: f64,
}

impl TrendResult {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Confidence interval `(lower, upper)` for the mean response at `x`.
    pub fn confidence_band(&self, x: f64, level: f64) -> (f64, f64) {
        let fitted = self.predict(x);
        if self.ss_xx <= 0.0 {
            return (fitted, fitted);
        }

        let df = (self.n - 2) as f64;
        let t = student_t_quantile(0.5 + level / 2.0, df);
        let dx = x - self.mean_x;
        let half_width =
            t * self.residual_std * (1.0 / self.n as f64 + dx * dx / self.ss_xx).sqrt();

        (fitted - half_width, fitted + half_width)
    }
}

/// Fits a least-squares line through `points` of `(x, value)`.
///
/// The p-value comes from the t-statistic on the slope with `n - 2` degrees of
/// freedom. A perfect fit with a non-zero slope has a p-value of zero, a flat
/// series (or one with all `x` equal) a p-value of one.
pub fn fit(metric: &str, points: &[(f64, f64)]) -> Result<TrendResult, InsufficientDataError> {
    InsufficientDataError::check(MIN_POINTS, points.len())?;

    let n = points.len() as f64;
    let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

    let mut ss_xx = 0.0;
    let mut ss_xy = 0.0;
    let mut ss_yy = 0.0;
    for &(x, y) in points {
        let dx = x - mean_x;
        let dy = y - mean_y;
        ss_xx += dx * dx;
        ss_xy += dx * dy;
        ss_yy += dy * dy;
    }

    if ss_xx <= 0.0 {
        return Ok(TrendResult {
            metric: metric.to_string(),
            slope: 0.0,
            intercept: mean_y,
            p_value: 1.0,
            r_squared: 0.0,
            std_err: f64::NAN,
            n: points.len(),
            mean_x,
            ss_xx,
            residual_std: 0.0,
        });
    }

    let slope = ss_xy / ss_xx;
    let intercept = mean_y - slope * mean_x;

    let ss_res: f64 = points
        .iter()
        .map(|&(x, y)| {
            let residual = y - (intercept + slope * x);
            residual * residual
        })
        .sum();

    let df = n - 2.0;
    let residual_std = (ss_res / df).sqrt();
    let std_err = residual_std / ss_xx.sqrt();

    // relative tolerance so that exactly linear input rounds to a perfect fit
    let perfect_fit = ss_res <= f64::EPSILON * ss_yy.max(f64::MIN_POSITIVE) * n;

    let p_value = if ss_yy == 0.0 || slope == 0.0 {
        1.0
    } else if perfect_fit {
        0.0
    } else {
        student_t_two_sided_p(slope / std_err, df)
    };

    let r_squared = if ss_yy == 0.0 {
        0.0
    } else {
        1.0 - ss_res / ss_yy
    };

    debug!(
        "{}: slope={:.5} intercept={:.3} p={:.4} n={}",
        metric,
        slope,
        intercept,
        p_value,
        points.len()
    );

    Ok(TrendResult {
        metric: metric.to_string(),
        slope,
        intercept,
        p_value,
        r_squared,
        std_err,
        n: points.len(),
        mean_x,
        ss_xx,
        residual_std,
    })
}

// -- Tests -------------------------------------------------------------------
