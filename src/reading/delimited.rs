//! Loads daily observations from a CSV file with a header row.
//!
//! Expected columns are `DATE`, `TMAX`, `TMIN` and `PRCP` (case-insensitive), as
//! found in NOAA Climate Data Online daily summaries. Station, name and
//! weather-type columns are ignored.

use std::{fs::File, io::Read, path::Path};

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use log::debug;

use crate::error::DataLoadError;

use super::{DailyRecord, Element};

const DATE_COLUMN: &str = "DATE";

/// Column positions of the required fields within a header row.
#[derive(Debug, PartialEq)]
struct Columns {
    date: usize,
    max_temp: usize,
    min_temp: usize,
    precipitation: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self, DataLoadError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
        };

        Ok(Columns {
            date: find(DATE_COLUMN)?,
            max_temp: find(Element::Tmax.column_name())?,
            min_temp: find(Element::Tmin.column_name())?,
            precipitation: find(Element::Prcp.column_name())?,
        })
    }
}

/// Reads every complete row in the file. Returns the records and the number of
/// rows dropped for missing measurements.
pub fn load_csv(path: &Path) -> Result<(Vec<DailyRecord>, usize), DataLoadError> {
    let file = File::open(path)?;
    read_records(file)
}

pub(crate) fn read_records<R: Read>(reader: R) -> Result<(Vec<DailyRecord>, usize), DataLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(reader.headers()?)?;

    let mut records = Vec::new();
    let mut dropped = 0;

    for (idx, row) in reader.records().enumerate() {
        let row = row?;
        match parse_row(&row, &columns, idx + 1)? {
            Some(record) => records.push(record),
            None => {
                debug!("Dropping incomplete row {}", idx + 1);
                dropped += 1;
            }
        }
    }

    Ok((records, dropped))
}

// Returns None for rows with any measurement or the date missing
fn parse_row(
    row: &StringRecord,
    columns: &Columns,
    row_number: usize,
) -> Result<Option<DailyRecord>, DataLoadError> {
    let max_temp = parse_value(row.get(columns.max_temp));
    let min_temp = parse_value(row.get(columns.min_temp));
    let precipitation = parse_value(row.get(columns.precipitation));

    if max_temp.is_none() || min_temp.is_none() || precipitation.is_none() {
        return Ok(None);
    }

    let date = match row.get(columns.date).map(str::trim) {
        Some(s) if !s.is_empty() => parse_date(s).ok_or_else(|| DataLoadError::InvalidDate {
            row: row_number,
            value: s.to_string(),
        })?,
        _ => return Ok(None),
    };

    Ok(DailyRecord::from_parts(date, max_temp, min_temp, precipitation))
}

fn parse_value(s: Option<&str>) -> Option<f64> {
    s.map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const SAMPLE: &str = "\
\"STATION\",\"NAME\",\"DATE\",\"PRCP\",\"TMAX\",\"TMIN\",\"WT01\"
\"USW00094846\",\"CHICAGO OHARE\",\"1948-01-01\",\"0.05\",\"31\",\"20\",\"1\"
\"USW00094846\",\"CHICAGO OHARE\",\"1948-01-02\",\"\",\"28\",\"17\",\"\"
\"USW00094846\",\"CHICAGO OHARE\",\"1948-01-03\",\"0.00\",\"25\",\"9\",\"\"
\"USW00094846\",\"CHICAGO OHARE\",\"1948-01-04\",\"0.31\",\"\",\"12\",\"1\"
";

    #[test]
    fn should_read_complete_rows() {
        let (records, dropped) = read_records(SAMPLE.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(dropped, 2);

        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(1948, 1, 1).unwrap());
        assert_eq!(records[0].precipitation, 0.05);
        assert_eq!(records[0].max_temp, 31.0);
        assert_eq!(records[0].min_temp, 20.0);
        assert_eq!(records[1].date, NaiveDate::from_ymd_opt(1948, 1, 3).unwrap());
    }

    #[test]
    fn should_match_headers_case_insensitively() {
        let data = "date,tmax,tmin,prcp\n2000-06-01,80,60,0.2\n";
        let (records, dropped) = read_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(dropped, 0);
    }

    #[test]
    fn should_fail_on_missing_column() {
        let data = "DATE,TMAX,PRCP\n2000-06-01,80,0.2\n";
        let err = read_records(data.as_bytes()).unwrap_err();

        assert!(matches!(err, DataLoadError::MissingColumn(ref c) if c == "TMIN"));
    }

    #[test]
    fn should_fail_on_malformed_date() {
        let data = "DATE,TMAX,TMIN,PRCP\n2000-06-01,80,60,0.2\n06/02/2000,81,61,0.0\n";
        let err = read_records(data.as_bytes()).unwrap_err();

        assert!(matches!(err, DataLoadError::InvalidDate { row: 2, .. }));
    }

    #[test]
    fn should_treat_unparseable_values_as_missing() {
        let data = "DATE,TMAX,TMIN,PRCP\n2000-06-01,T,60,0.2\n2000-06-02,81,61,0.0\n";
        let (records, dropped) = read_records(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(dropped, 1);
    }

    #[test]
    fn should_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let (records, _) = load_csv(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }
}
