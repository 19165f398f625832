//! Chart-ready data prepared from already computed aggregates and trends.

use std::collections::BTreeSet;

use crate::{
    aggregate::{MonthlyBucket, YearlyBucket},
    stats::MetricSummary,
};

/// Confidence level of the band drawn around a fitted trend.
pub const BAND_LEVEL: f64 = 0.95;

const LINE_STEPS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct TrendChart {
    pub title: String,
    pub unit: &'static str,
    pub points: Vec<(f64, f64)>,
    /// Fitted line, empty if the fit failed.
    pub fitted: Vec<(f64, f64)>,
    /// `(x, lower, upper)` along the fitted line.
    pub band: Vec<(f64, f64, f64)>,
}

impl TrendChart {
    pub fn from_summary(summary: &MetricSummary) -> Self {
        let (fitted, band) = match (&summary.trend, x_extent(&summary.points)) {
            (Ok(trend), Some((lo, hi))) => {
                let xs: Vec<f64> = (0..=LINE_STEPS)
                    .map(|i| lo + (hi - lo) * i as f64 / LINE_STEPS as f64)
                    .collect();
                let fitted = xs.iter().map(|&x| (x, trend.predict(x))).collect();
                let band = xs
                    .iter()
                    .map(|&x| {
                        let (lower, upper) = trend.confidence_band(x, BAND_LEVEL);
                        (x, lower, upper)
                    })
                    .collect();
                (fitted, band)
            }
            _ => (vec![], vec![]),
        };

        TrendChart {
            title: summary.metric.name().to_string(),
            unit: summary.metric.unit(),
            points: summary.points.clone(),
            fitted,
            band,
        }
    }

    /// Axis ranges `(x, y)` covering points, line and band, with some padding.
    pub fn ranges(&self) -> Option<((f64, f64), (f64, f64))> {
        let (x_lo, x_hi) = x_extent(&self.points)?;

        let ys = self
            .points
            .iter()
            .map(|p| p.1)
            .chain(self.band.iter().flat_map(|b| [b.1, b.2]));
        let (y_lo, y_hi) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });

        Some((pad(x_lo, x_hi, 0.02), pad(y_lo, y_hi, 0.1)))
    }
}

/// Monthly values of one measurement for every full year.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonalPanel {
    pub title: &'static str,
    pub unit: &'static str,
    /// `(year, [(month, value)])` in year order.
    pub years: Vec<(i32, Vec<(f64, f64)>)>,
}

impl SeasonalPanel {
    pub fn y_range(&self) -> Option<(f64, f64)> {
        let values = self.years.iter().flat_map(|(_, m)| m.iter().map(|p| p.1));
        let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

        if lo.is_finite() {
            Some(pad(lo, hi, 0.05))
        } else {
            None
        }
    }
}

/// Panels for monthly mean max temp, mean min temp and total precipitation,
/// restricted to the years that have a yearly bucket.
pub fn seasonal_panels(monthly: &[MonthlyBucket], yearly: &[YearlyBucket]) -> Vec<SeasonalPanel> {
    let full_years: BTreeSet<i32> = yearly.iter().map(|y| y.year).collect();

    let panel = |title, unit, f: fn(&MonthlyBucket) -> f64| {
        let years = full_years
            .iter()
            .map(|&year| {
                let months = monthly
                    .iter()
                    .filter(|m| m.year == year)
                    .map(|m| (m.month as f64, f(m)))
                    .collect();
                (year, months)
            })
            .collect();

        SeasonalPanel { title, unit, years }
    };

    vec![
        panel("Mean max temperature", "°F", |m| m.max_temp_mean),
        panel("Mean min temperature", "°F", |m| m.min_temp_mean),
        panel("Total precipitation", "in", |m| m.precip_sum),
    ]
}

/// The first and last full years, used when no years are requested.
pub fn default_highlights(yearly: &[YearlyBucket]) -> Vec<i32> {
    let mut years: Vec<i32> = yearly.first().into_iter().chain(yearly.last()).map(|y| y.year).collect();
    years.dedup();
    years
}

fn x_extent(points: &[(f64, f64)]) -> Option<(f64, f64)> {
    let first = points.first()?.0;
    Some(points.iter().fold((first, first), |(lo, hi), p| (lo.min(p.0), hi.max(p.0))))
}

fn pad(lo: f64, hi: f64, fraction: f64) -> (f64, f64) {
    let span = hi - lo;
    let margin = if span > 0.0 { span * fraction } else { 1.0 };
    (lo - margin, hi + margin)
}

// -- Tests -------------------------------------------------------------------
