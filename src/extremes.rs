//! Yearly counts of days crossing heat, frost and rainfall thresholds.

use std::collections::{BTreeMap, BTreeSet};

use crate::{aggregate::CoveragePolicy, reading::DailyRecord};

/// Thresholds in °F and inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    /// Hot day: max temp at or above.
    pub hot: f64,
    /// Freezing night: min temp at or below.
    pub freezing: f64,
    /// Wet day: precipitation at or above.
    pub wet: f64,
    /// Dry day: precipitation strictly below.
    pub dry: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Thresholds {
            hot: 90.0,
            freezing: 32.0,
            wet: 1.0,
            dry: 0.1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct YearlyExtremes {
    pub year: i32,
    pub hot_days: u32,
    pub freezing_nights: u32,
    pub wet_days: u32,
    pub dry_days: u32,
}

/// Counts threshold crossings day by day and sums them for each full year.
pub fn count_extremes(
    records: &[DailyRecord],
    thresholds: &Thresholds,
    policy: &CoveragePolicy,
) -> Vec<YearlyExtremes> {
    let full_years: BTreeSet<i32> = policy.full_years(records).into_iter().collect();
    let mut counts: BTreeMap<i32, YearlyExtremes> = BTreeMap::new();

    for r in records.iter().filter(|r| full_years.contains(&r.year)) {
        let c = counts.entry(r.year).or_insert_with(|| YearlyExtremes {
            year: r.year,
            ..Default::default()
        });

        c.hot_days += u32::from(r.max_temp >= thresholds.hot);
        c.freezing_nights += u32::from(r.min_temp <= thresholds.freezing);
        c.wet_days += u32::from(r.precipitation >= thresholds.wet);
        c.dry_days += u32::from(r.precipitation < thresholds.dry);
    }

    counts.into_values().collect()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use chrono::Datelike;

    use super::*;
    use crate::aggregate::fixtures::daily_span;

    #[test]
    fn should_count_no_hot_days_below_threshold() {
        let records = daily_span(2000, 2002, |_| (89.9, 50.0, 0.5));
        let extremes = count_extremes(&records, &Thresholds::default(), &CoveragePolicy::default());

        assert_eq!(extremes.len(), 1);
        assert_eq!(extremes[0].year, 2001);
        assert_eq!(extremes[0].hot_days, 0);
    }

    #[test]
    fn should_include_threshold_boundaries() {
        let t = Thresholds::default();
        let records = daily_span(2000, 2002, |_| (t.hot, t.freezing, t.wet));
        let extremes = count_extremes(&records, &t, &CoveragePolicy::default());

        assert_eq!(extremes[0].hot_days, 365);
        assert_eq!(extremes[0].freezing_nights, 365);
        assert_eq!(extremes[0].wet_days, 365);
        assert_eq!(extremes[0].dry_days, 0);
    }

    #[test]
    fn should_exclude_dry_threshold() {
        let t = Thresholds::default();
        let records = daily_span(2000, 2002, |d| {
            let prcp = if d.month() == 1 { t.dry } else { 0.0 };
            (70.0, 50.0, prcp)
        });
        let extremes = count_extremes(&records, &t, &CoveragePolicy::default());

        assert_eq!(extremes[0].dry_days, 365 - 31);
    }

    #[test]
    fn should_respect_custom_thresholds() {
        let t = Thresholds {
            hot: 100.0,
            ..Default::default()
        };
        let records = daily_span(2000, 2002, |d| {
            let max = if d.ordinal() <= 10 { 100.5 } else { 95.0 };
            (max, 60.0, 0.0)
        });
        let extremes = count_extremes(&records, &t, &CoveragePolicy::default());

        assert_eq!(extremes[0].hot_days, 10);
        assert_eq!(extremes[0].freezing_nights, 0);
    }

    #[test]
    fn should_cover_same_years_as_yearly_buckets() {
        let records = daily_span(1990, 1999, |_| (70.0, 50.0, 0.0));
        let policy = CoveragePolicy::default();
        let extremes = count_extremes(&records, &Thresholds::default(), &policy);
        let buckets = crate::aggregate::yearly(&records, &policy);

        let a: Vec<i32> = extremes.iter().map(|e| e.year).collect();
        let b: Vec<i32> = buckets.iter().map(|y| y.year).collect();
        assert_eq!(a, b);
    }
}
