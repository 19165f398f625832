//! Command line interface.

pub mod command;

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser, Subcommand};
use indicatif::ProgressBar;

use crate::{aggregate::CoveragePolicy, extremes::Thresholds};

use command::ReportOptions;

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write charts and a Markdown trend report
    Report {
        #[command(flatten)]
        input: InputArgs,
        /// Report directory [default: ~/climate-trends-report-YYYY-MM-DD]
        #[arg(long)]
        output: Option<PathBuf>,
        /// Year to highlight in the seasonal chart, may be repeated
        #[arg(long = "highlight", value_name = "YEAR")]
        highlights: Vec<i32>,
    },
    /// Print the trend tables without writing any files
    Summary {
        #[command(flatten)]
        input: InputArgs,
    },
    /// Save the monthly and yearly aggregates as parquet files
    Export {
        #[command(flatten)]
        input: InputArgs,
        /// Output directory [default: ~/climate-trends-report-YYYY-MM-DD]
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

/// Arguments shared by every command.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Daily observations as CSV or USHCN parquet
    pub path: PathBuf,
    /// Station id to select from a multi-station parquet file
    #[arg(long)]
    pub station: Option<String>,
    /// Hot day threshold for max temperature (°F)
    #[arg(long, default_value_t = 90.0)]
    pub hot: f64,
    /// Freezing night threshold for min temperature (°F)
    #[arg(long, default_value_t = 32.0)]
    pub freezing: f64,
    /// Wet day threshold for precipitation (in)
    #[arg(long, default_value_t = 1.0)]
    pub wet: f64,
    /// Dry day threshold for precipitation (in)
    #[arg(long, default_value_t = 0.1)]
    pub dry: f64,
    /// Keep the first and last calendar years in yearly statistics
    #[arg(long)]
    pub keep_boundary_years: bool,
    /// Exclude years with fewer daily records than this
    #[arg(long, value_name = "N")]
    pub min_days: Option<usize>,
}

impl InputArgs {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            hot: self.hot,
            freezing: self.freezing,
            wet: self.wet,
            dry: self.dry,
        }
    }

    pub fn policy(&self) -> CoveragePolicy {
        CoveragePolicy {
            drop_boundary_years: !self.keep_boundary_years,
            min_days: self.min_days,
        }
    }

    pub fn into_options(self, output: Option<PathBuf>, highlights: Vec<i32>) -> ReportOptions {
        ReportOptions {
            thresholds: self.thresholds(),
            policy: self.policy(),
            input: self.path,
            station: self.station,
            output,
            highlights,
        }
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_default_everything_but_path() {
        let cli = Cli::try_parse_from(["climate-trends", "report", "data.csv"]).unwrap();

        let Commands::Report {
            input,
            output,
            highlights,
        } = cli.command
        else {
            panic!("expected report command");
        };

        assert_eq!(input.path, PathBuf::from("data.csv"));
        assert_eq!(input.thresholds(), Thresholds::default());
        assert_eq!(input.policy(), CoveragePolicy::default());
        assert!(output.is_none());
        assert!(highlights.is_empty());
    }

    #[test]
    fn should_parse_thresholds_and_coverage() {
        let cli = Cli::try_parse_from([
            "climate-trends",
            "summary",
            "data.parquet",
            "--station",
            "USH00011084",
            "--hot",
            "95",
            "--dry",
            "0.05",
            "--keep-boundary-years",
            "--min-days",
            "330",
        ])
        .unwrap();

        let Commands::Summary { input } = cli.command else {
            panic!("expected summary command");
        };

        let thresholds = input.thresholds();
        assert_eq!(thresholds.hot, 95.0);
        assert_eq!(thresholds.freezing, 32.0);
        assert_eq!(thresholds.dry, 0.05);

        let policy = input.policy();
        assert!(!policy.drop_boundary_years);
        assert_eq!(policy.min_days, Some(330));

        let options = input.into_options(None, vec![]);
        assert_eq!(options.station.as_deref(), Some("USH00011084"));
    }

    #[test]
    fn should_collect_repeated_highlights() {
        let cli = Cli::try_parse_from([
            "climate-trends",
            "report",
            "data.csv",
            "--highlight",
            "1950",
            "--highlight",
            "2020",
            "--output",
            "/tmp/out",
        ])
        .unwrap();

        let Commands::Report {
            input,
            output,
            highlights,
        } = cli.command
        else {
            panic!("expected report command");
        };

        let options = input.into_options(output, highlights);
        assert_eq!(options.highlights, vec![1950, 2020]);
        assert_eq!(options.output, Some(PathBuf::from("/tmp/out")));
    }
}
