//! Summary tables of the trend statistics, rendered as Markdown.

use tabled::{settings::Style, Table, Tabled};

use crate::stats::MetricSummary;

const INSUFFICIENT: &str = "insufficient data";

/// One row of the averages or extremes table.
#[derive(Debug, Clone, PartialEq, Tabled)]
pub struct SummaryRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "OLS slope")]
    pub slope: String,
    #[tabled(rename = "OLS p-value")]
    pub p_value: String,
    #[tabled(rename = "Mann-Kendall p-value")]
    pub monotonic_p_value: String,
    #[tabled(rename = "Sen's slope")]
    pub sen_slope: String,
    #[tabled(rename = "Trend")]
    pub trend: String,
}

impl SummaryRow {
    pub fn from_summary(summary: &MetricSummary) -> Self {
        let unit = summary.metric.unit();

        let (slope, p_value) = match &summary.trend {
            Ok(t) => (format!("{:+.4} {}/yr", t.slope, unit), format_p(t.p_value)),
            Err(_) => (INSUFFICIENT.to_string(), INSUFFICIENT.to_string()),
        };

        let (monotonic_p_value, sen_slope, trend) = match &summary.monotonic {
            Ok(m) => (
                format_p(m.p_value),
                format!("{:+.4} {}/step", m.sen_slope, unit),
                m.trend.to_string(),
            ),
            Err(_) => (
                INSUFFICIENT.to_string(),
                INSUFFICIENT.to_string(),
                INSUFFICIENT.to_string(),
            ),
        };

        SummaryRow {
            metric: summary.metric.name().to_string(),
            slope,
            p_value,
            monotonic_p_value,
            sen_slope,
            trend,
        }
    }
}

pub fn markdown_table(summaries: &[MetricSummary]) -> String {
    let rows: Vec<SummaryRow> = summaries.iter().map(SummaryRow::from_summary).collect();
    Table::new(rows).with(Style::markdown()).to_string()
}

fn format_p(p: f64) -> String {
    if p < 1e-4 {
        "<0.0001".to_string()
    } else {
        format!("{:.4}", p)
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use crate::{error::InsufficientDataError, stats::{mann_kendall, ols, Metric}};

    fn summary(points: Vec<(f64, f64)>) -> MetricSummary {
        let values: Vec<f64> = points.iter().map(|p| p.1).collect();
        MetricSummary {
            metric: Metric::HotDays,
            trend: ols::fit("hot_days", &points),
            monotonic: mann_kendall::trend_test("hot_days", &values),
            points,
        }
    }

    #[test]
    fn should_format_significant_row() {
        let points = (0..10).map(|i| (2000.0 + i as f64, 10.0 + 2.0 * i as f64)).collect();
        let row = SummaryRow::from_summary(&summary(points));

        assert_eq!(row.metric, "Hot days");
        assert_eq!(row.slope, "+2.0000 days/yr");
        assert_eq!(row.p_value, "<0.0001");
        assert_eq!(row.sen_slope, "+2.0000 days/step");
        assert_eq!(row.trend, "increasing");
    }

    #[test]
    fn should_mark_insufficient_data() {
        let row = SummaryRow::from_summary(&summary(vec![(2000.0, 1.0), (2001.0, 2.0)]));

        assert_eq!(row.slope, INSUFFICIENT);
        assert_eq!(row.monotonic_p_value, INSUFFICIENT);
    }

    #[test]
    fn should_render_markdown() {
        let short = MetricSummary {
            metric: Metric::WetDays,
            points: vec![],
            trend: Err(InsufficientDataError { required: 3, found: 0 }),
            monotonic: Err(InsufficientDataError { required: 3, found: 0 }),
        };
        let table = markdown_table(&[short]);

        assert!(table.contains("| Metric"));
        assert!(table.contains("Mann-Kendall p-value"));
        assert!(table.contains("Wet days"));
        assert!(table.lines().nth(1).unwrap().starts_with("|--"));
    }

    #[test]
    fn should_format_p_values() {
        assert_eq!(format_p(0.04321), "0.0432");
        assert_eq!(format_p(0.00001), "<0.0001");
    }
}
