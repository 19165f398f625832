use std::path::PathBuf;

use anyhow::Result;
use log::info;

use crate::{
    cli::create_spinner,
    report,
    stats::{analyse, Metric},
};

use super::{prepare, ReportOptions};

/// Runs the full pipeline and writes the report directory. Returns the path of
/// `report.md`.
pub fn report(options: &ReportOptions) -> Result<PathBuf> {
    let prepared = prepare(options)?;

    let averages = analyse(&prepared.data, &Metric::AVERAGES);
    let extremes = analyse(&prepared.data, &Metric::EXTREMES);

    let output_dir = options.output_dir()?;
    let spinner = create_spinner(format!("Rendering report to {}", output_dir.display()));
    let report_path = report::render(
        &output_dir,
        &prepared.context(options),
        &prepared.data,
        &averages,
        &extremes,
        &options.highlights,
    )?;
    spinner.finish_with_message("Report rendered");

    info!("Report written to {}", report_path.display());

    Ok(report_path)
}

// -- Tests -------------------------------------------------------------------
