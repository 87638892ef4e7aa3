//! Per-sheet and per-file analysis results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cell::MappedRecord;
use crate::pattern::{DetectedPattern, OverallPattern};

/// Analysis of a single worksheet: structure, detected pattern, and the
/// resolved canonical-field to source-column mapping.
///
/// Built once per analysis pass and treated as immutable afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetAnalysis {
    /// Worksheet name as it appears in the workbook.
    pub name: String,
    /// Number of data rows (headers excluded).
    pub row_count: usize,
    /// Number of header columns.
    pub column_count: usize,
    /// Raw headers in sheet order, original casing preserved for display.
    pub columns: Vec<String>,
    /// First rows as header-keyed maps, capped at the sample limit.
    pub sample_rows: Vec<MappedRecord>,
    /// Best-scoring catalog pattern, or unknown below the threshold.
    pub detected_pattern: DetectedPattern,
    /// Heuristic score in [0, 1]; not a probability.
    pub confidence: f64,
    /// Canonical field name to original source column.
    pub mapping: BTreeMap<String, String>,
}

/// Workbook-level analysis: the per-sheet results plus the aggregate
/// pattern, confidence, and any human-readable warnings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportAnalysis {
    pub file_name: String,
    pub file_size: usize,
    /// Analyzable sheets in workbook order. Empty sheets are excluded
    /// and surface as warnings instead.
    pub sheets: Vec<SheetAnalysis>,
    pub overall_pattern: OverallPattern,
    /// Mean of the sheet confidences; only meaningful when at least one
    /// sheet detected a non-unknown pattern.
    pub confidence: f64,
    pub warnings: Vec<String>,
}
