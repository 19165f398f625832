//! Loads one station's daily observations from the long-format parquet file
//! written by the USHCN downloader (`id, date, element, dataset, value, lat, lon`).
//!
//! Temperatures are stored in °C and precipitation in mm, so values are
//! converted to °F and inches on the way in.

use std::{collections::BTreeMap, fs::File, path::Path};

use arrow::{
    array::{Array, Date32Array, Float32Array, StringArray},
    record_batch::RecordBatch,
};
use chrono::NaiveDate;
use log::{info, warn};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::DataLoadError;

use super::{DailyRecord, Element};

#[derive(Debug, Default)]
struct PartialDay {
    max_temp: Option<f64>,
    min_temp: Option<f64>,
    precipitation: Option<f64>,
}

/// Reads the file and pivots the `TMAX`, `TMIN` and `PRCP` rows into one
/// record per date. Returns the records and the number of incomplete dates dropped.
pub fn load_parquet(
    path: &Path,
    station: Option<&str>,
) -> Result<(Vec<DailyRecord>, usize), DataLoadError> {
    let file = File::open(path)?;
    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

    let mut days: BTreeMap<NaiveDate, PartialDay> = BTreeMap::new();
    let mut selected: Option<String> = station.map(str::to_string);
    let mut skipped_stations = 0;

    for batch in reader {
        let batch = batch?;
        skipped_stations += pivot_batch(&batch, &mut selected, &mut days)?;
    }

    if station.is_none() && skipped_stations > 0 {
        warn!(
            "File holds several stations; using `{}` ({} rows from other stations ignored)",
            selected.as_deref().unwrap_or_default(),
            skipped_stations
        );
    }
    info!(
        "Read {} dates for station `{}`",
        days.len(),
        selected.as_deref().unwrap_or_default()
    );

    let total = days.len();
    let records: Vec<DailyRecord> = days
        .into_iter()
        .filter_map(|(date, day)| {
            DailyRecord::from_parts(date, day.max_temp, day.min_temp, day.precipitation)
        })
        .collect();
    let dropped = total - records.len();

    Ok((records, dropped))
}

// Adds the rows of one batch to `days`, returning how many rows belonged to other stations
fn pivot_batch(
    batch: &RecordBatch,
    selected: &mut Option<String>,
    days: &mut BTreeMap<NaiveDate, PartialDay>,
) -> Result<usize, DataLoadError> {
    let ids = column::<StringArray>(batch, "id")?;
    let dates = column::<Date32Array>(batch, "date")?;
    let elements = column::<StringArray>(batch, "element")?;
    let values = column::<Float32Array>(batch, "value")?;

    let mut skipped = 0;

    for i in 0..batch.num_rows() {
        if ids.is_null(i) || dates.is_null(i) || elements.is_null(i) || values.is_null(i) {
            continue;
        }

        let id = ids.value(i);
        if selected.is_none() {
            *selected = Some(id.to_string());
        }
        if selected.as_deref() != Some(id) {
            skipped += 1;
            continue;
        }

        let Some(date) = dates.value_as_date(i) else {
            continue;
        };
        let value = values.value(i) as f64;
        let day = days.entry(date).or_default();

        match Element::from_str(elements.value(i)) {
            Element::Tmax => day.max_temp = day.max_temp.or(Some(celsius_to_fahrenheit(value))),
            Element::Tmin => day.min_temp = day.min_temp.or(Some(celsius_to_fahrenheit(value))),
            Element::Prcp => day.precipitation = day.precipitation.or(Some(mm_to_inches(value))),
            Element::Unknown => {}
        }
    }

    Ok(skipped)
}

fn column<'a, T: Array + 'static>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<&'a T, DataLoadError> {
    batch
        .column_by_name(name)
        .and_then(|c| c.as_any().downcast_ref::<T>())
        .ok_or_else(|| DataLoadError::MissingColumn(name.to_string()))
}

fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

fn mm_to_inches(mm: f64) -> f64 {
    mm / 25.4
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use arrow::datatypes::{DataType, Field, Schema};
    use chrono::Datelike;
    use parquet::arrow::ArrowWriter;
    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn should_convert_units() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert!((mm_to_inches(25.4) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn should_pivot_long_format() {
        let file = NamedTempFile::new().unwrap();
        write_fixture(file.path());

        let (records, dropped) = load_parquet(file.path(), Some("USH00110338")).unwrap();

        // 2 Jan has no precipitation row
        assert_eq!(records.len(), 1);
        assert_eq!(dropped, 1);

        let r = &records[0];
        assert_eq!(r.date.day(), 1);
        assert!((r.max_temp - 50.0).abs() < 1e-4);
        assert!((r.min_temp - 32.0).abs() < 1e-4);
        assert!((r.precipitation - 1.0).abs() < 1e-4);
    }

    #[test]
    fn should_default_to_first_station() {
        let file = NamedTempFile::new().unwrap();
        write_fixture(file.path());

        let (records, _) = load_parquet(file.path(), None).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn should_select_other_station() {
        let file = NamedTempFile::new().unwrap();
        write_fixture(file.path());

        let (records, dropped) = load_parquet(file.path(), Some("USH00999999")).unwrap();
        assert_eq!(records.len(), 0);
        assert_eq!(dropped, 1);
    }

    fn write_fixture(path: &Path) {
        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("date", DataType::Date32, false),
            Field::new("element", DataType::Utf8, false),
            Field::new("dataset", DataType::Utf8, false),
            Field::new("value", DataType::Float32, false),
        ]));

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let day1 = (NaiveDate::from_ymd_opt(2000, 1, 1).unwrap() - epoch).num_days() as i32;
        let day2 = day1 + 1;

        let ids = vec![
            "USH00110338",
            "USH00110338",
            "USH00110338",
            "USH00110338",
            "USH00110338",
            "USH00999999",
        ];
        let dates = vec![day1, day1, day1, day2, day2, day1];
        let elements = vec!["TMAX", "TMIN", "PRCP", "TMAX", "TMIN", "TMAX"];
        let datasets = vec!["RAW"; 6];
        let values = vec![10.0f32, 0.0, 25.4, 11.0, 1.0, 30.0];

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(ids)),
                Arc::new(Date32Array::from(dates)),
                Arc::new(StringArray::from(elements)),
                Arc::new(StringArray::from(datasets)),
                Arc::new(Float32Array::from(values)),
            ],
        )
        .unwrap();

        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
    }
}
