//! Save the monthly buckets to a parquet file.

use std::{fs::File, path::Path, sync::Arc};

use anyhow::Result;
use arrow::{
    array::{ArrayRef, Float64Array, Int32Array, UInt32Array, UInt64Array},
    datatypes::{DataType, Field, Schema},
    record_batch::RecordBatch,
};
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};

use crate::aggregate::MonthlyBucket;

pub fn save_monthly(buckets: &[MonthlyBucket], file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;

    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int32, false),
        Field::new("month", DataType::UInt32, false),
        Field::new("days", DataType::UInt64, false),
        Field::new("max_temp_mean", DataType::Float64, false),
        Field::new("max_temp_max", DataType::Float64, false),
        Field::new("max_temp_min", DataType::Float64, false),
        Field::new("min_temp_mean", DataType::Float64, false),
        Field::new("min_temp_min", DataType::Float64, false),
        Field::new("precip_mean", DataType::Float64, false),
        Field::new("precip_sum", DataType::Float64, false),
    ]));

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, schema.clone(), Some(props))?;

    let column = |f: fn(&MonthlyBucket) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from_iter_values(buckets.iter().map(f)))
    };

    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int32Array::from_iter_values(buckets.iter().map(|b| b.year))),
            Arc::new(UInt32Array::from_iter_values(buckets.iter().map(|b| b.month))),
            Arc::new(UInt64Array::from_iter_values(buckets.iter().map(|b| b.days as u64))),
            column(|b| b.max_temp_mean),
            column(|b| b.max_temp_max),
            column(|b| b.max_temp_min),
            column(|b| b.min_temp_mean),
            column(|b| b.min_temp_min),
            column(|b| b.precip_mean),
            column(|b| b.precip_sum),
        ],
    )?;

    writer.write(&batch)?;
    writer.close()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------
