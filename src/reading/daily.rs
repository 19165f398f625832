use chrono::{Datelike, NaiveDate};

/// One day of complete observations: temperatures in °F, precipitation in inches.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub year: i32,
    pub month: u32,
    pub max_temp: f64,
    pub min_temp: f64,
    pub precipitation: f64,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, max_temp: f64, min_temp: f64, precipitation: f64) -> Self {
        DailyRecord {
            date,
            year: date.year(),
            month: date.month(),
            max_temp,
            min_temp,
            precipitation,
        }
    }

    /// Builds a record only if all three measurements are present.
    pub fn from_parts(
        date: NaiveDate,
        max_temp: Option<f64>,
        min_temp: Option<f64>,
        precipitation: Option<f64>,
    ) -> Option<Self> {
        match (max_temp, min_temp, precipitation) {
            (Some(max), Some(min), Some(prcp)) => Some(DailyRecord::new(date, max, min, prcp)),
            _ => None,
        }
    }
}

// -- Tests ----------------------------------------------------------------------------
