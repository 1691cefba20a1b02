//! Error types for the card cleaning pipeline.
//!
//! - [`CsvError`] - Loading and parsing the input file
//! - [`CleanError`] - Failures inside the cleaning stages
//! - [`OutputError`] - Writing the cleaned file
//! - [`PipelineError`] - Top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Loading Errors
// =============================================================================

/// Errors while reading and parsing the input CSV.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Input file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid CSV format.
    #[error("Invalid CSV at line {line}: {message}")]
    Parse { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        CsvError::Parse {
            line,
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Cleaning Errors
// =============================================================================

/// Errors raised by the cleaning stages.
#[derive(Debug, Error, PartialEq)]
pub enum CleanError {
    /// A column the stage depends on is absent from the table.
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

// =============================================================================
// Output Errors
// =============================================================================

/// Errors while writing the cleaned CSV.
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    /// CSV serialization error.
    #[error("Failed to serialize CSV: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::clean_file`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Input loading error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Cleaning stage error.
    #[error("Clean error: {0}")]
    Clean(#[from] CleanError),

    /// Output error.
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV loading.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for cleaning stages.
pub type CleanResult<T> = Result<T, CleanError>;

/// Result type for output writing.
pub type OutputResult<T> = Result<T, OutputError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
