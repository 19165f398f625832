use anyhow::Result;

use crate::{
    report::markdown_table,
    stats::{analyse, Metric},
};

use super::{prepare, ReportOptions};

/// Runs the statistics and returns both summary tables as text.
pub fn summary(options: &ReportOptions) -> Result<String> {
    let prepared = prepare(options)?;

    let averages = analyse(&prepared.data, &Metric::AVERAGES);
    let extremes = analyse(&prepared.data, &Metric::EXTREMES);

    Ok(format!(
        "Climate averages\n\n{}\n\nClimate extremes\n\n{}",
        markdown_table(&averages),
        markdown_table(&extremes)
    ))
}

// -- Tests -------------------------------------------------------------------
