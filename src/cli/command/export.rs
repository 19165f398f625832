use std::{fs, path::PathBuf};

use anyhow::{Context, Result};

use crate::{cli::create_spinner, parquet};

use super::{prepare, ReportOptions};

pub const MONTHLY_FILE: &str = "monthly.parquet";
pub const YEARLY_FILE: &str = "yearly.parquet";

/// Saves the monthly and yearly aggregates side by side. Returns the directory.
pub fn export(options: &ReportOptions) -> Result<PathBuf> {
    let prepared = prepare(options)?;

    let output_dir = options.output_dir()?;
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Unable to create {}", output_dir.display()))?;

    let spinner = create_spinner("Saving parquet files...".to_string());
    parquet::save_monthly(&prepared.data.monthly, &output_dir.join(MONTHLY_FILE))?;
    parquet::save_yearly(
        &prepared.data.yearly,
        &prepared.data.extremes,
        &output_dir.join(YEARLY_FILE),
    )?;
    spinner.finish_with_message("Parquet files saved");

    Ok(output_dir)
}

// -- Tests -------------------------------------------------------------------
