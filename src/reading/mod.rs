//! Loading daily observations from disk.

pub mod daily;
pub mod delimited;
pub mod source_format;
pub mod ushcn;

use std::path::Path;

use log::{info, warn};

use crate::error::DataLoadError;

pub use daily::DailyRecord;
pub use source_format::{Element, SourceFormat};

/// Loads the daily records in `path`, ordered by date with incomplete rows removed.
///
/// `station` selects one station from a multi-station parquet file and is
/// ignored for CSV input.
pub fn load(path: &Path, station: Option<&str>) -> Result<Vec<DailyRecord>, DataLoadError> {
    let (records, dropped) = match SourceFormat::from_path(path) {
        SourceFormat::Csv => delimited::load_csv(path)?,
        SourceFormat::Parquet => ushcn::load_parquet(path, station)?,
        SourceFormat::Unknown => return Err(DataLoadError::UnsupportedFormat(path.to_path_buf())),
    };

    info!(
        "Loaded {} complete daily records ({} incomplete dropped)",
        records.len(),
        dropped
    );

    into_ordered(records)
}

// Sorts by date and keeps the first record for any repeated date
fn into_ordered(mut records: Vec<DailyRecord>) -> Result<Vec<DailyRecord>, DataLoadError> {
    if records.is_empty() {
        return Err(DataLoadError::Empty);
    }

    records.sort_by_key(|r| r.date);

    let before = records.len();
    records.dedup_by_key(|r| r.date);
    if records.len() < before {
        warn!("Ignored {} duplicate dates", before - records.len());
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use std::{fs::File, sync::Arc};

    use arrow::{
        array::{Date32Array, Float32Array, StringArray},
        datatypes::{DataType, Field, Schema},
        record_batch::RecordBatch,
    };
    use chrono::NaiveDate;
    use parquet::arrow::ArrowWriter;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn should_order_and_deduplicate() {
        let d = |day| NaiveDate::from_ymd_opt(2001, 3, day).unwrap();
        let records = vec![
            DailyRecord::new(d(3), 50.0, 30.0, 0.0),
            DailyRecord::new(d(1), 48.0, 28.0, 0.1),
            DailyRecord::new(d(3), 99.0, 99.0, 9.9),
            DailyRecord::new(d(2), 49.0, 29.0, 0.0),
        ];

        let ordered = into_ordered(records).unwrap();

        assert_eq!(ordered.len(), 3);
        assert!(ordered.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(ordered[2].max_temp, 50.0);
    }

    #[test]
    fn should_fail_when_nothing_loaded() {
        assert!(matches!(into_ordered(vec![]), Err(DataLoadError::Empty)));
    }

    #[test]
    fn should_load_parquet_by_extension() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ushcn-daily.parquet");

        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        let day = |d| (NaiveDate::from_ymd_opt(2001, 3, d).unwrap() - epoch).num_days() as i32;

        // rows arrive out of date order, with a second station mixed in
        let rows = vec![
            ("USH00110338", day(3), "TMAX", 20.0f32),
            ("USH00110338", day(3), "TMIN", 10.0),
            ("USH00110338", day(3), "PRCP", 0.0),
            ("USH00999999", day(2), "TMAX", 40.0),
            ("USH00110338", day(1), "TMAX", 0.0),
            ("USH00110338", day(1), "TMIN", -5.0),
            ("USH00110338", day(1), "PRCP", 12.7),
            ("USH00110338", day(2), "TMAX", 5.0),
            ("USH00110338", day(2), "TMIN", 0.0),
            ("USH00110338", day(2), "PRCP", 2.54),
        ];

        let schema = Arc::new(Schema::new(vec![
            Field::new("id", DataType::Utf8, false),
            Field::new("date", DataType::Date32, false),
            Field::new("element", DataType::Utf8, false),
            Field::new("dataset", DataType::Utf8, false),
            Field::new("value", DataType::Float32, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(rows.iter().map(|r| r.0).collect::<Vec<_>>())),
                Arc::new(Date32Array::from(rows.iter().map(|r| r.1).collect::<Vec<_>>())),
                Arc::new(StringArray::from(rows.iter().map(|r| r.2).collect::<Vec<_>>())),
                Arc::new(StringArray::from(vec!["RAW"; rows.len()])),
                Arc::new(Float32Array::from(rows.iter().map(|r| r.3).collect::<Vec<_>>())),
            ],
        )
        .unwrap();

        let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let records = load(&path, Some("USH00110338")).unwrap();

        assert_eq!(records.len(), 3);
        assert!(records.windows(2).all(|w| w[0].date < w[1].date));
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2001, 3, 1).unwrap());
        assert!((records[0].max_temp - 32.0).abs() < 1e-4);
        assert!((records[0].min_temp - 23.0).abs() < 1e-4);
        assert!((records[0].precipitation - 0.5).abs() < 1e-4);
        assert!((records[2].max_temp - 68.0).abs() < 1e-4);
    }

    #[test]
    fn should_reject_unknown_format() {
        let err = load(Path::new("observations.xlsx"), None).unwrap_err();
        assert!(matches!(err, DataLoadError::UnsupportedFormat(_)));
    }
}
