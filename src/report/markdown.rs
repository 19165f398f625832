//! The narrative report combining tables and chart links.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::{
    aggregate::Aggregates,
    extremes::Thresholds,
    stats::{mann_kendall::ALPHA, MetricSummary},
};

use super::tables::markdown_table;

/// Facts about the input shown in the report header.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub source: String,
    pub records: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub thresholds: Thresholds,
}

/// A chart written next to the report, relative to the report directory.
#[derive(Debug, Clone)]
pub struct ChartLink {
    pub title: String,
    pub file_name: String,
}

pub fn render_markdown(
    ctx: &ReportContext,
    data: &Aggregates,
    averages: &[MetricSummary],
    extremes: &[MetricSummary],
    charts: &[ChartLink],
) -> String {
    let mut out = String::new();

    // writing to a String cannot fail
    let _ = writeln!(out, "# Climate trends: {}\n", ctx.source);
    let _ = writeln!(out, "{}\n", narrative(ctx, data, averages, extremes));

    let _ = writeln!(out, "## Climate averages\n");
    let _ = writeln!(out, "{}\n", markdown_table(averages));

    let _ = writeln!(out, "## Climate extremes\n");
    let _ = writeln!(
        out,
        "Hot days have a max temperature of at least {:.0} °F, freezing nights a min \
         temperature of at most {:.0} °F, wet days at least {:.2} in of precipitation and \
         dry days less than {:.2} in.\n",
        ctx.thresholds.hot, ctx.thresholds.freezing, ctx.thresholds.wet, ctx.thresholds.dry
    );
    let _ = writeln!(out, "{}\n", markdown_table(extremes));

    if !charts.is_empty() {
        let _ = writeln!(out, "## Charts\n");
        for chart in charts {
            let _ = writeln!(out, "![{}]({})\n", chart.title, chart.file_name);
        }
    }

    out
}

fn narrative(
    ctx: &ReportContext,
    data: &Aggregates,
    averages: &[MetricSummary],
    extremes: &[MetricSummary],
) -> String {
    let mut text = format!(
        "The record holds {} complete days of observations from {} to {}.",
        ctx.records, ctx.first_date, ctx.last_date
    );

    match (data.yearly.first(), data.yearly.last()) {
        (Some(first), Some(last)) => {
            let _ = write!(
                text,
                " Yearly statistics cover the {} full years from {} to {}.",
                data.yearly.len(),
                first.year,
                last.year
            );
        }
        _ => text.push_str(" There are no full years to compare."),
    }

    let total = averages.len() + extremes.len();
    let significant = averages
        .iter()
        .chain(extremes)
        .filter(|s| s.is_significant(ALPHA))
        .count();
    let _ = write!(
        text,
        " {} of {} metrics show a significant trend at the {:.0}% level in at least one test.",
        significant,
        total,
        ALPHA * 100.0
    );

    text
}

// -- Tests -------------------------------------------------------------------
