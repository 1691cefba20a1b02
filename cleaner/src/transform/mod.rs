//! Transformation module.
//!
//! - Rules: pure per-cell operations (phone format, tokens, case)
//! - Pipeline: the ordered cleaning stages and file entry point

pub mod pipeline;
pub mod rules;

pub use pipeline::*;
pub use rules::{format_phone, normalize_header, split_name, CellRule};
