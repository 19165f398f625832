//! The metrics reported in the averages and extremes tables.

use std::{collections::BTreeSet, fmt};

use crate::{
    aggregate::{Aggregates, YearlyBucket},
    extremes::YearlyExtremes,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    MaxTemp,
    MinTemp,
    AnnualPrecip,
    MonthlyPrecip,
    HotDays,
    FreezingNights,
    WetDays,
    DryDays,
}

impl Metric {
    pub const AVERAGES: [Metric; 4] = [
        Metric::MaxTemp,
        Metric::MinTemp,
        Metric::AnnualPrecip,
        Metric::MonthlyPrecip,
    ];

    pub const EXTREMES: [Metric; 4] = [
        Metric::HotDays,
        Metric::FreezingNights,
        Metric::WetDays,
        Metric::DryDays,
    ];

    /// Human readable name used in tables and chart titles.
    pub fn name(&self) -> &'static str {
        match self {
            Metric::MaxTemp => "Max temperature",
            Metric::MinTemp => "Min temperature",
            Metric::AnnualPrecip => "Annual precipitation",
            Metric::MonthlyPrecip => "Monthly precipitation",
            Metric::HotDays => "Hot days",
            Metric::FreezingNights => "Freezing nights",
            Metric::WetDays => "Wet days",
            Metric::DryDays => "Dry days",
        }
    }

    /// Identifier used in file names and logs.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::MaxTemp => "max_temp",
            Metric::MinTemp => "min_temp",
            Metric::AnnualPrecip => "annual_precip",
            Metric::MonthlyPrecip => "monthly_precip",
            Metric::HotDays => "hot_days",
            Metric::FreezingNights => "freezing_nights",
            Metric::WetDays => "wet_days",
            Metric::DryDays => "dry_days",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Metric::MaxTemp | Metric::MinTemp => "°F",
            Metric::AnnualPrecip | Metric::MonthlyPrecip => "in",
            _ => "days",
        }
    }

    /// `(x, value)` pairs in time order. `x` is the calendar year, or the
    /// fractional year for monthly precipitation totals.
    pub fn series(&self, data: &Aggregates) -> Vec<(f64, f64)> {
        let yearly = |f: fn(&YearlyBucket) -> f64| -> Vec<(f64, f64)> {
            data.yearly.iter().map(|y| (y.year as f64, f(y))).collect()
        };
        let extremes = |f: fn(&YearlyExtremes) -> u32| -> Vec<(f64, f64)> {
            data.extremes
                .iter()
                .map(|e| (e.year as f64, f(e) as f64))
                .collect()
        };

        match self {
            Metric::MaxTemp => yearly(|y| y.max_temp_mean),
            Metric::MinTemp => yearly(|y| y.min_temp_mean),
            Metric::AnnualPrecip => yearly(|y| y.precip_total),
            Metric::MonthlyPrecip => {
                let full_years: BTreeSet<i32> = data.yearly.iter().map(|y| y.year).collect();
                data.monthly
                    .iter()
                    .filter(|m| full_years.contains(&m.year))
                    .map(|m| (m.fractional_year(), m.precip_sum))
                    .collect()
            }
            Metric::HotDays => extremes(|e| e.hot_days),
            Metric::FreezingNights => extremes(|e| e.freezing_nights),
            Metric::WetDays => extremes(|e| e.wet_days),
            Metric::DryDays => extremes(|e| e.dry_days),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// -- Tests -------------------------------------------------------------------
