//! # cardclean - business-card CSV cleaning
//!
//! Turns a CSV export of scanned business cards into a deduplicated,
//! normalized and relabeled CSV named `Clean <name>.csv`.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Pipeline   │────▶│ Clean CSV   │
//! │  (ISO/UTF8) │     │  (auto-enc) │     │  (stages)   │     │ (13 labels) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cardclean::{clean_file, CleanOptions};
//! use std::path::Path;
//!
//! let summary = clean_file(Path::new("cards.csv"), &CleanOptions::default()).unwrap();
//! println!("Cleaned {} cards", summary.report.rows_written);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`logs`] - Console progress logging
//! - [`config`] - Run options and environment overrides
//! - [`models`] - Raw table and finalized card
//! - [`parser`] - CSV loading with auto-detection
//! - [`transform`] - Cell rules and the cleaning pipeline
//! - [`output`] - Output naming and CSV writing

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Loading
pub mod parser;

// Transformation
pub mod transform;

// Writing
pub mod output;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CleanError, CsvError, OutputError, PipelineError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CleanCard, RawTable, FINAL_COLUMNS};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::CleanOptions;

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{detect_delimiter, detect_encoding, parse_bytes_auto, parse_file, parse_str, ParseResult};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{clean_file, clean_table, CleanOutcome, CleanReport, CleanSummary};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use output::{input_path, output_path, write_cards, write_cards_file};
