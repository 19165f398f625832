//! Mann-Kendall test for a monotonic trend in a time-ordered series.
//!
//! The statistic `S` counts concordant minus discordant pairs. Its variance is
//! corrected for tied groups and the p-value comes from the continuity-corrected
//! normal approximation for every series length.

use std::{cmp::Ordering, collections::HashMap, fmt};

use log::debug;

use crate::error::InsufficientDataError;

use super::distribution::normal_two_sided_p;

pub const MIN_POINTS: usize = 3;

/// Significance level used for [`Trend`] classification.
pub const ALPHA: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Decreasing,
    NoTrend,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::NoTrend => "no trend",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonotonicTestResult {
    pub metric: String,
    /// Two-sided significance level.
    pub p_value: f64,
    pub s: i64,
    pub variance: f64,
    pub z: f64,
    /// Kendall's tau, `S / (n(n-1)/2)`.
    pub tau: f64,
    /// Median of all pairwise slopes, per step of the series.
    pub sen_slope: f64,
    pub trend: Trend,
}

pub fn trend_test(metric: &str, values: &[f64]) -> Result<MonotonicTestResult, InsufficientDataError> {
    InsufficientDataError::check(MIN_POINTS, values.len())?;

    let n = values.len();
    let s = s_statistic(values);
    let variance = tie_corrected_variance(values);

    let z = if variance <= 0.0 {
        0.0
    } else {
        match s.cmp(&0) {
            Ordering::Greater => (s - 1) as f64 / variance.sqrt(),
            Ordering::Less => (s + 1) as f64 / variance.sqrt(),
            Ordering::Equal => 0.0,
        }
    };

    let p_value = normal_two_sided_p(z);
    let trend = match (p_value < ALPHA, z > 0.0) {
        (true, true) => Trend::Increasing,
        (true, false) => Trend::Decreasing,
        (false, _) => Trend::NoTrend,
    };

    let pairs = (n * (n - 1) / 2) as f64;

    debug!("{}: S={} var={:.2} z={:.3} p={:.4}", metric, s, variance, z, p_value);

    Ok(MonotonicTestResult {
        metric: metric.to_string(),
        p_value,
        s,
        variance,
        z,
        tau: s as f64 / pairs,
        sen_slope: sen_slope(values),
        trend,
    })
}

fn s_statistic(values: &[f64]) -> i64 {
    let mut s = 0;
    for (i, a) in values.iter().enumerate() {
        for b in &values[i + 1..] {
            match b.partial_cmp(a) {
                Some(Ordering::Greater) => s += 1,
                Some(Ordering::Less) => s -= 1,
                _ => {}
            }
        }
    }
    s
}

fn tie_corrected_variance(values: &[f64]) -> f64 {
    let n = values.len() as f64;

    let mut groups: HashMap<u64, usize> = HashMap::new();
    for v in values {
        // -0.0 and 0.0 tie
        let key = if *v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
        *groups.entry(key).or_insert(0) += 1;
    }

    let ties: f64 = groups
        .values()
        .filter(|&&t| t > 1)
        .map(|&t| {
            let t = t as f64;
            t * (t - 1.0) * (2.0 * t + 5.0)
        })
        .sum();

    (n * (n - 1.0) * (2.0 * n + 5.0) - ties) / 18.0
}

fn sen_slope(values: &[f64]) -> f64 {
    let mut slopes = Vec::with_capacity(values.len() * (values.len() - 1) / 2);
    for (i, a) in values.iter().enumerate() {
        for (k, b) in values[i + 1..].iter().enumerate() {
            slopes.push((b - a) / (k + 1) as f64);
        }
    }

    slopes.sort_by(|a, b| a.total_cmp(b));
    let mid = slopes.len() / 2;
    if slopes.len() % 2 == 1 {
        slopes[mid]
    } else {
        (slopes[mid - 1] + slopes[mid]) / 2.0
    }
}

// -- Tests -------------------------------------------------------------------
