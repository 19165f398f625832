use std::collections::{BTreeMap, BTreeSet};

use log::info;

use crate::reading::DailyRecord;

use super::{CoveragePolicy, Summary};

/// Statistics for every day recorded in one full calendar year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyBucket {
    pub year: i32,
    pub days: usize,
    pub max_temp_mean: f64,
    pub max_temp_max: f64,
    pub min_temp_mean: f64,
    pub min_temp_min: f64,
    pub precip_mean: f64,
    pub precip_total: f64,
    /// Total precipitation divided by the number of months with records.
    pub monthly_precip_mean: f64,
}

#[derive(Default)]
struct YearAccumulator {
    max_temp: Summary,
    min_temp: Summary,
    precipitation: Summary,
    months: BTreeSet<u32>,
}

/// One bucket for each year that passes `policy`, in year order.
pub fn yearly(records: &[DailyRecord], policy: &CoveragePolicy) -> Vec<YearlyBucket> {
    let full_years: BTreeSet<i32> = policy.full_years(records).into_iter().collect();
    let mut groups: BTreeMap<i32, YearAccumulator> = BTreeMap::new();

    for r in records.iter().filter(|r| full_years.contains(&r.year)) {
        let acc = groups.entry(r.year).or_default();
        acc.max_temp.push(r.max_temp);
        acc.min_temp.push(r.min_temp);
        acc.precipitation.push(r.precipitation);
        acc.months.insert(r.month);
    }

    let buckets: Vec<YearlyBucket> = groups
        .into_iter()
        .map(|(year, acc)| YearlyBucket {
            year,
            days: acc.max_temp.count(),
            max_temp_mean: acc.max_temp.mean(),
            max_temp_max: acc.max_temp.max(),
            min_temp_mean: acc.min_temp.mean(),
            min_temp_min: acc.min_temp.min(),
            precip_mean: acc.precipitation.mean(),
            precip_total: acc.precipitation.sum(),
            monthly_precip_mean: acc.precipitation.sum() / acc.months.len() as f64,
        })
        .collect();

    match (buckets.first(), buckets.last()) {
        (Some(first), Some(last)) => info!(
            "Aggregated {} yearly buckets ({}-{})",
            buckets.len(),
            first.year,
            last.year
        ),
        _ => info!("No full years to aggregate"),
    }

    buckets
}

// -- Tests -------------------------------------------------------------------
