//! Trend statistics for the yearly and monthly aggregates.

pub mod distribution;
pub mod mann_kendall;
pub mod metric;
pub mod ols;

use log::warn;

use crate::{aggregate::Aggregates, error::InsufficientDataError};

pub use mann_kendall::{MonotonicTestResult, Trend};
pub use metric::Metric;
pub use ols::TrendResult;

/// Both trend tests for one metric, plus the points they were run on.
#[derive(Debug, Clone)]
pub struct MetricSummary {
    pub metric: Metric,
    pub points: Vec<(f64, f64)>,
    pub trend: Result<TrendResult, InsufficientDataError>,
    pub monotonic: Result<MonotonicTestResult, InsufficientDataError>,
}

impl MetricSummary {
    /// Whether either test finds a trend at `alpha`.
    pub fn is_significant(&self, alpha: f64) -> bool {
        let ols = self.trend.as_ref().map_or(false, |t| t.p_value < alpha);
        let mk = self.monotonic.as_ref().map_or(false, |m| m.p_value < alpha);
        ols || mk
    }
}

/// Runs the regression and the rank test for every metric. A metric with too
/// few points carries its error instead of stopping the others.
pub fn analyse(data: &Aggregates, metrics: &[Metric]) -> Vec<MetricSummary> {
    metrics
        .iter()
        .map(|&metric| {
            let points = metric.series(data);
            let values: Vec<f64> = points.iter().map(|p| p.1).collect();

            let trend = ols::fit(metric.key(), &points);
            let monotonic = mann_kendall::trend_test(metric.key(), &values);

            if let Err(e) = &trend {
                warn!("{}: {}", metric, e);
            }

            MetricSummary {
                metric,
                points,
                trend,
                monotonic,
            }
        })
        .collect()
}

// -- Tests -------------------------------------------------------------------
