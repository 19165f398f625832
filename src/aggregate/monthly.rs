use std::collections::BTreeMap;

use log::info;

use crate::reading::DailyRecord;

use super::Summary;

/// Statistics for every day recorded in one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyBucket {
    pub year: i32,
    pub month: u32,
    pub days: usize,
    pub max_temp_mean: f64,
    pub max_temp_max: f64,
    pub max_temp_min: f64,
    pub min_temp_mean: f64,
    pub min_temp_min: f64,
    pub precip_mean: f64,
    pub precip_sum: f64,
}

impl MonthlyBucket {
    /// Position on a continuous year axis, January at the whole year.
    pub fn fractional_year(&self) -> f64 {
        self.year as f64 + (self.month as f64 - 1.0) / 12.0
    }
}

#[derive(Default)]
struct MonthAccumulator {
    max_temp: Summary,
    min_temp: Summary,
    precipitation: Summary,
}

/// One bucket for each (year, month) present in `records`, in calendar order.
pub fn monthly(records: &[DailyRecord]) -> Vec<MonthlyBucket> {
    let mut groups: BTreeMap<(i32, u32), MonthAccumulator> = BTreeMap::new();

    for r in records {
        let acc = groups.entry((r.year, r.month)).or_default();
        acc.max_temp.push(r.max_temp);
        acc.min_temp.push(r.min_temp);
        acc.precipitation.push(r.precipitation);
    }

    let buckets: Vec<MonthlyBucket> = groups
        .into_iter()
        .map(|((year, month), acc)| MonthlyBucket {
            year,
            month,
            days: acc.max_temp.count(),
            max_temp_mean: acc.max_temp.mean(),
            max_temp_max: acc.max_temp.max(),
            max_temp_min: acc.max_temp.min(),
            min_temp_mean: acc.min_temp.mean(),
            min_temp_min: acc.min_temp.min(),
            precip_mean: acc.precipitation.mean(),
            precip_sum: acc.precipitation.sum(),
        })
        .collect();

    info!("Aggregated {} monthly buckets", buckets.len());

    buckets
}

// -- Tests -------------------------------------------------------------------
