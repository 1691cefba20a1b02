//! Run configuration.
//!
//! Defaults can be set through the environment (or a `.env` file loaded by
//! the binary); command-line flags override them.

use std::path::PathBuf;

/// Directory the cleaned file is written to.
pub const ENV_OUTPUT_DIR: &str = "CARDCLEAN_OUTPUT_DIR";

/// Omit the leading row-index column when set to a truthy value.
pub const ENV_NO_INDEX: &str = "CARDCLEAN_NO_INDEX";

/// Silence progress logs when set to a truthy value.
pub const ENV_QUIET: &str = "CARDCLEAN_QUIET";

/// Options for a cleaning run
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOptions {
    /// Write `Clean <name>.csv` here instead of next to the input
    pub output_dir: Option<PathBuf>,

    /// Emit the leading unnamed row-ordinal column
    pub write_index: bool,

    /// Input delimiter (auto-detect if not specified)
    pub delimiter: Option<char>,

    /// Suppress progress logs
    pub quiet: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            output_dir: None,
            write_index: true,
            delimiter: None,
            quiet: false,
        }
    }
}

impl CleanOptions {
    /// Build options from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build options from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            output_dir: lookup(ENV_OUTPUT_DIR)
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            write_index: !lookup(ENV_NO_INDEX).map(|v| is_truthy(&v)).unwrap_or(false),
            delimiter: defaults.delimiter,
            quiet: lookup(ENV_QUIET).map(|v| is_truthy(&v)).unwrap_or(defaults.quiet),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
