pub mod export;
pub mod report;
pub mod summary;

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local};

use crate::{
    aggregate::{Aggregates, CoveragePolicy},
    cli::create_spinner,
    extremes::Thresholds,
    reading::{self, DailyRecord},
    report::ReportContext,
};

pub use export::export;
pub use report::report;
pub use summary::summary;

/// Everything a command needs, free of any argument parsing types.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub input: PathBuf,
    pub station: Option<String>,
    pub thresholds: Thresholds,
    pub policy: CoveragePolicy,
    pub output: Option<PathBuf>,
    pub highlights: Vec<i32>,
}

impl ReportOptions {
    /// Options for `input` with every other setting at its default.
    pub fn new(input: &Path) -> Self {
        ReportOptions {
            input: input.to_path_buf(),
            station: None,
            thresholds: Thresholds::default(),
            policy: CoveragePolicy::default(),
            output: None,
            highlights: vec![],
        }
    }

    /// The requested output directory, or the dated default in the home directory.
    pub fn output_dir(&self) -> Result<PathBuf> {
        match &self.output {
            Some(dir) => Ok(dir.clone()),
            None => make_report_dir_name(),
        }
    }
}

pub fn make_report_dir_name() -> Result<PathBuf> {
    let today = Local::now();
    let dir_name = format!(
        "climate-trends-report-{}-{:02}-{:02}",
        today.year(),
        today.month(),
        today.day()
    );

    let home = dirs::home_dir().ok_or_else(|| anyhow!("Unable to find the home directory"))?;

    Ok(home.join(dir_name))
}

/// Loaded records with their aggregates.
pub(crate) struct Prepared {
    pub records: Vec<DailyRecord>,
    pub data: Aggregates,
}

impl Prepared {
    pub fn context(&self, options: &ReportOptions) -> ReportContext {
        let source = options
            .input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| options.input.display().to_string());

        // load never returns an empty record list
        let first_date = self.records.first().map(|r| r.date).unwrap_or_default();
        let last_date = self.records.last().map(|r| r.date).unwrap_or_default();

        ReportContext {
            source,
            records: self.records.len(),
            first_date,
            last_date,
            thresholds: options.thresholds,
        }
    }
}

/// Loads the input file and builds every aggregate, with a spinner for each step.
pub(crate) fn prepare(options: &ReportOptions) -> Result<Prepared> {
    let spinner = create_spinner(format!("Loading {}", options.input.display()));
    let records = reading::load(&options.input, options.station.as_deref())
        .with_context(|| format!("Unable to load {}", options.input.display()))?;
    spinner.finish_with_message(format!("Loaded {} daily records", records.len()));

    let spinner = create_spinner("Aggregating...".to_string());
    let data = Aggregates::build(&records, &options.thresholds, &options.policy);
    spinner.finish_with_message(format!(
        "Aggregated {} months and {} full years",
        data.monthly.len(),
        data.yearly.len()
    ));

    Ok(Prepared { records, data })
}


// -- Tests -------------------------------------------------------------------
