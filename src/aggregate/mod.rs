//! Groups daily records into monthly and yearly buckets.

pub mod coverage;
pub mod monthly;
pub mod yearly;

use crate::{
    extremes::{count_extremes, Thresholds, YearlyExtremes},
    reading::DailyRecord,
};

pub use coverage::CoveragePolicy;
pub use monthly::{monthly, MonthlyBucket};
pub use yearly::{yearly, YearlyBucket};

/// Every aggregate derived from one load of daily records.
#[derive(Debug, Clone)]
pub struct Aggregates {
    pub monthly: Vec<MonthlyBucket>,
    pub yearly: Vec<YearlyBucket>,
    pub extremes: Vec<YearlyExtremes>,
}

impl Aggregates {
    pub fn build(records: &[DailyRecord], thresholds: &Thresholds, policy: &CoveragePolicy) -> Self {
        Aggregates {
            monthly: monthly(records),
            yearly: yearly(records, policy),
            extremes: count_extremes(records, thresholds, policy),
        }
    }
}

/// Running count, sum, minimum and maximum of one measurement.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Summary {
    count: usize,
    sum: f64,
    min: f64,
    max: f64,
}

impl Default for Summary {
    fn default() -> Self {
        Summary {
            count: 0,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl Summary {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_summarise_values() {
        let mut s = Summary::default();
        for v in [3.0, 1.0, 2.0] {
            s.push(v);
        }

        assert_eq!(s.mean(), 2.0);
        assert_eq!(s.sum(), 6.0);
        assert_eq!(s.min(), 1.0);
        assert_eq!(s.max(), 3.0);
    }
}
