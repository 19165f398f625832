//! Input format and measurement element detection.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
/// The kind of file holding the daily observations.
pub enum SourceFormat {
    /// Delimited text with a header row, one row per day.
    Csv,
    /// Long-format parquet as written by the USHCN downloader, one row per
    /// station, date and element.
    Parquet,
    Unknown,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => SourceFormat::Csv,
            "parquet" => SourceFormat::Parquet,
            _ => SourceFormat::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Represents the type of measurement. See the [NOAA documentation](https://www1.ncdc.noaa.gov/pub/data/cdo/documentation/GHCND_documentation.pdf)
/// for more information.
pub enum Element {
    Tmax,
    Tmin,
    Prcp,
    Unknown,
}

impl Element {
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "prcp" => Element::Prcp,
            "tmax" => Element::Tmax,
            "tmin" => Element::Tmin,
            _ => Element::Unknown,
        }
    }

    /// Column header used for this element in delimited files.
    pub fn column_name(&self) -> &'static str {
        match self {
            Element::Tmax => "TMAX",
            Element::Tmin => "TMIN",
            Element::Prcp => "PRCP",
            Element::Unknown => "UNKNOWN",
        }
    }
}
