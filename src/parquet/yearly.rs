//! Save the yearly buckets and extreme-day counts to a parquet file.

use std::{collections::HashMap, fs::File, path::Path, sync::Arc};

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, Int32Array, UInt32Array, UInt64Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};

use crate::{aggregate::YearlyBucket, extremes::YearlyExtremes};

pub fn save_yearly(
    buckets: &[YearlyBucket],
    extremes: &[YearlyExtremes],
    file_path: &Path,
) -> Result<()> {
    let file = File::create(file_path)?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int32, false),
        Field::new("days", DataType::UInt64, false),
        Field::new("max_temp_mean", DataType::Float64, false),
        Field::new("max_temp_max", DataType::Float64, false),
        Field::new("min_temp_mean", DataType::Float64, false),
        Field::new("min_temp_min", DataType::Float64, false),
        Field::new("precip_mean", DataType::Float64, false),
        Field::new("precip_total", DataType::Float64, false),
        Field::new("monthly_precip_mean", DataType::Float64, false),
        Field::new("hot_days", DataType::UInt32, true),
        Field::new("freezing_nights", DataType::UInt32, true),
        Field::new("wet_days", DataType::UInt32, true),
        Field::new("dry_days", DataType::UInt32, true),
    ]));

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let lookup: HashMap<i32, &YearlyExtremes> = extremes.iter().map(|e| (e.year, e)).collect();

    let float = |f: fn(&YearlyBucket) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(buckets.iter().map(f)))
    };
    let count = |f: fn(&YearlyExtremes) -> u32| -> ArrayRef {
        Arc::new(UInt32Array::from(
            buckets
                .iter()
                .map(|b| lookup.get(&b.year).map(|e| f(e)))
                .collect::<Vec<Option<u32>>>(),
        ))
    };

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from_iter_values(buckets.iter().map(|b| b.year))),
            Arc::new(UInt64Array::from_iter_values(buckets.iter().map(|b| b.days as u64))),
            float(|b| b.max_temp_mean),
            float(|b| b.max_temp_max),
            float(|b| b.min_temp_mean),
            float(|b| b.min_temp_min),
            float(|b| b.precip_mean),
            float(|b| b.precip_total),
            float(|b| b.monthly_precip_mean),
            count(|e| e.hot_days),
            count(|e| e.freezing_nights),
            count(|e| e.wet_days),
            count(|e| e.dry_days),
        ],
    )?;

    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use arrow::array::AsArray;
    use arrow::datatypes::{Int32Type, UInt32Type};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::NamedTempFile;

    use super::*;
    use crate::{
        aggregate::{fixtures::daily_span, Aggregates, CoveragePolicy},
        extremes::Thresholds,
    };

    #[test]
    fn should_join_extremes_by_year() {
        let records = daily_span(2000, 2004, |_| (91.0, 30.0, 0.0));
        let data = Aggregates::build(&records, &Thresholds::default(), &CoveragePolicy::default());

        let temp_file = NamedTempFile::new().unwrap();
        save_yearly(&data.yearly, &data.extremes, temp_file.path()).unwrap();

        let file = File::open(temp_file.path()).unwrap();
        let reader = ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap();

        let batches: Vec<RecordBatch> = reader.map(|b| b.unwrap()).collect();
        let batch = &batches[0];

        assert_eq!(batch.num_rows(), 3);
        assert_eq!(batch.schema().fields().len(), 13);

        let years = batch.column(0).as_primitive::<Int32Type>();
        assert_eq!(years.value(0), 2001);
        assert_eq!(years.value(2), 2003);

        let hot = batch.column(9).as_primitive::<UInt32Type>();
        assert_eq!(hot.value(0), 365);
        assert_eq!(hot.value(1), 365);

        let dry = batch.column(12).as_primitive::<UInt32Type>();
        assert_eq!(dry.value(0), 365);
    }
}
