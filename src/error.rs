//! Error types for loading observations and running trend statistics.

use std::path::PathBuf;

use thiserror::Error;

/// Raised when the input file cannot be turned into daily records.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("unable to read input file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed parquet file: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("malformed arrow data: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("required column `{0}` is missing")]
    MissingColumn(String),

    #[error("row {row}: `{value}` is not an ISO-8601 date")]
    InvalidDate { row: usize, value: String },

    #[error("unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("no complete daily records found")]
    Empty,
}

/// Raised when a regression or rank test is given too few points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("insufficient data: need at least {required} points, found {found}")]
pub struct InsufficientDataError {
    pub required: usize,
    pub found: usize,
}

impl InsufficientDataError {
    /// Returns an error if `found` is below `required`.
    pub fn check(required: usize, found: usize) -> Result<(), Self> {
        if found < required {
            return Err(InsufficientDataError { required, found });
        }

        Ok(())
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_reject_too_few_points() {
        let err = InsufficientDataError::check(3, 2).unwrap_err();

        assert_eq!(err.required, 3);
        assert_eq!(err.found, 2);
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 3 points, found 2"
        );
    }

    #[test]
    fn should_accept_enough_points() {
        assert!(InsufficientDataError::check(3, 3).is_ok());
    }

    #[test]
    fn should_name_missing_column() {
        let err = DataLoadError::MissingColumn("TMAX".to_string());
        assert_eq!(err.to_string(), "required column `TMAX` is missing");
    }
}
