//! Decides which calendar years have enough coverage to be compared.

use std::collections::BTreeMap;

use log::debug;

use crate::reading::DailyRecord;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoveragePolicy {
    /// Exclude the first and last calendar year present in the records.
    pub drop_boundary_years: bool,
    /// Exclude any year with fewer daily records than this.
    pub min_days: Option<usize>,
}

impl Default for CoveragePolicy {
    fn default() -> Self {
        CoveragePolicy {
            drop_boundary_years: true,
            min_days: None,
        }
    }
}

impl CoveragePolicy {
    /// Returns the years that pass the policy, in ascending order.
    pub fn full_years(&self, records: &[DailyRecord]) -> Vec<i32> {
        let counts = days_per_year(records);

        let (Some(&first), Some(&last)) = (counts.keys().next(), counts.keys().next_back()) else {
            return vec![];
        };

        let total = counts.len();
        let years: Vec<i32> = counts
            .into_iter()
            .filter(|&(year, _)| !(self.drop_boundary_years && (year == first || year == last)))
            .filter(|&(_, days)| self.min_days.map_or(true, |min| days >= min))
            .map(|(year, _)| year)
            .collect();

        debug!("Excluded {} of {} calendar years", total - years.len(), total);

        years
    }
}

fn days_per_year(records: &[DailyRecord]) -> BTreeMap<i32, usize> {
    let mut counts = BTreeMap::new();
    for r in records {
        *counts.entry(r.year).or_insert(0) += 1;
    }
    counts
}

// -- Tests -------------------------------------------------------------------
