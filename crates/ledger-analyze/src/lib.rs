#![deny(unsafe_code)]

//! Import analysis core: header normalization, the static pattern and
//! alias catalogs, per-sheet scoring, and workbook-level aggregation.

pub mod analyzer;
pub mod catalog;
pub mod normalize;
pub mod score;

pub use analyzer::{SAMPLE_ROWS, aggregate, analyze, analyze_workbook};
pub use catalog::{COLUMN_ALIASES, FieldAliases, PATTERNS, PatternDefinition, aliases_for};
pub use normalize::normalize_column;
pub use score::{PatternMatch, score_columns};
