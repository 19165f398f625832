//! Writes the charts, tables and narrative report for computed results.

pub mod charts;
pub mod markdown;
pub mod series;
pub mod tables;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::{info, warn};

use crate::{aggregate::Aggregates, stats::MetricSummary};

pub use markdown::{ChartLink, ReportContext};
pub use tables::markdown_table;

pub const REPORT_FILE: &str = "report.md";
pub const SEASONAL_FILE: &str = "seasonal.svg";

/// Renders every chart and `report.md` into `dir`, returning the report path.
pub fn render(
    dir: &Path,
    ctx: &ReportContext,
    data: &Aggregates,
    averages: &[MetricSummary],
    extremes: &[MetricSummary],
    highlights: &[i32],
) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create report directory {}", dir.display()))?;

    let mut links = Vec::new();

    for summary in averages.iter().chain(extremes) {
        if summary.points.is_empty() {
            warn!("{}: nothing to plot", summary.metric);
            continue;
        }

        let file_name = format!("trend_{}.svg", summary.metric.key());
        charts::draw_trend(&dir.join(&file_name), &series::TrendChart::from_summary(summary))?;
        links.push(ChartLink {
            title: summary.metric.name().to_string(),
            file_name,
        });
    }

    let panels = series::seasonal_panels(&data.monthly, &data.yearly);
    let highlights = if highlights.is_empty() {
        series::default_highlights(&data.yearly)
    } else {
        highlights.to_vec()
    };
    charts::draw_seasonal(&dir.join(SEASONAL_FILE), &panels, &highlights)?;
    links.push(ChartLink {
        title: "Seasonal cycle".to_string(),
        file_name: SEASONAL_FILE.to_string(),
    });

    info!("Wrote {} charts to {}", links.len(), dir.display());

    let report_path = dir.join(REPORT_FILE);
    let text = markdown::render_markdown(ctx, data, averages, extremes, &links);
    fs::write(&report_path, text)
        .with_context(|| format!("Unable to write {}", report_path.display()))?;

    Ok(report_path)
}
