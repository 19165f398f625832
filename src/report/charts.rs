//! Draws the report charts as SVG files.

use std::path::Path;

use anyhow::{anyhow, Result};
use plotters::prelude::*;

use super::series::{SeasonalPanel, TrendChart, BAND_LEVEL};

const TREND_SIZE: (u32, u32) = (960, 540);
const SEASONAL_SIZE: (u32, u32) = (1440, 480);
const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Scatter of the metric with its fitted line and confidence band.
pub fn draw_trend(path: &Path, chart: &TrendChart) -> Result<()> {
    let ((x_lo, x_hi), (y_lo, y_hi)) = chart
        .ranges()
        .ok_or_else(|| anyhow!("no points to plot for {}", chart.title))?;

    let root = SVGBackend::new(path, TREND_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 24))
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    ctx.configure_mesh()
        .x_desc("Year")
        .y_desc(chart.unit)
        .x_label_formatter(&|x| format!("{:.0}", x))
        .light_line_style(BLACK.mix(0.08))
        .draw()?;

    if !chart.band.is_empty() {
        let outline: Vec<(f64, f64)> = chart
            .band
            .iter()
            .map(|&(x, _, upper)| (x, upper))
            .chain(chart.band.iter().rev().map(|&(x, lower, _)| (x, lower)))
            .collect();

        ctx.draw_series(std::iter::once(Polygon::new(outline, BLUE.mix(0.15).filled())))?
            .label(format!("{:.0}% confidence band", BAND_LEVEL * 100.0))
            .legend(|(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], BLUE.mix(0.15).filled()));
    }

    ctx.draw_series(
        chart
            .points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 3, BLACK.mix(0.7).filled())),
    )?
    .label("Observed")
    .legend(|(x, y)| Circle::new((x + 10, y), 3, BLACK.mix(0.7).filled()));

    if !chart.fitted.is_empty() {
        ctx.draw_series(LineSeries::new(chart.fitted.iter().copied(), RED.stroke_width(2)))?
            .label("Linear trend")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED.stroke_width(2)));
    }

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()?;

    root.present()?;

    Ok(())
}

/// One small multiple per panel: every year in grey, `highlights` in colour.
pub fn draw_seasonal(path: &Path, panels: &[SeasonalPanel], highlights: &[i32]) -> Result<()> {
    let root = SVGBackend::new(path, SEASONAL_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let areas = root.split_evenly((1, panels.len().max(1)));

    for (panel, area) in panels.iter().zip(areas.iter()) {
        let Some((y_lo, y_hi)) = panel.y_range() else {
            continue;
        };

        let mut ctx = ChartBuilder::on(area)
            .caption(panel.title, ("sans-serif", 20))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0.5f64..12.5f64, y_lo..y_hi)?;

        ctx.configure_mesh()
            .x_labels(12)
            .x_label_formatter(&|m| month_label(*m))
            .y_desc(panel.unit)
            .light_line_style(BLACK.mix(0.05))
            .draw()?;

        for (_, months) in panel.years.iter().filter(|(y, _)| !highlights.contains(y)) {
            ctx.draw_series(LineSeries::new(months.iter().copied(), BLACK.mix(0.12)))?;
        }

        for (i, (year, months)) in panel
            .years
            .iter()
            .filter(|(y, _)| highlights.contains(y))
            .enumerate()
        {
            let color = Palette99::pick(i).mix(1.0);
            ctx.draw_series(LineSeries::new(months.iter().copied(), color.stroke_width(2)))?
                .label(year.to_string())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }

        if !highlights.is_empty() {
            ctx.configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .draw()?;
        }
    }

    root.present()?;

    Ok(())
}

fn month_label(m: f64) -> String {
    let idx = m.round() as i64 - 1;
    if (0..12).contains(&idx) && (m - m.round()).abs() < 1e-9 {
        MONTHS[idx as usize].to_string()
    } else {
        String::new()
    }
}

// -- Tests -------------------------------------------------------------------
