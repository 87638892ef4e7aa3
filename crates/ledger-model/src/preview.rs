//! Preview results: mapped rows, validation outcomes, estimated changes.

use serde::{Deserialize, Serialize};

use crate::analysis::ImportAnalysis;
use crate::cell::MappedRecord;
use crate::pattern::DetectedPattern;

/// Validation failures for one row, 1-based for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowErrors {
    pub row: usize,
    pub errors: Vec<String>,
}

/// Mapped-and-validated result for one sheet.
///
/// Counts reflect every row considered; the sample and error lists are
/// capped for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappedSheetResult {
    pub sheet_name: String,
    /// Entity type the sheet maps to, mirroring the detected pattern.
    pub target_table: DetectedPattern,
    /// Rows considered, after the preview cap.
    pub record_count: usize,
    pub valid_records: usize,
    pub invalid_records: usize,
    /// First mapped rows regardless of validity, capped.
    pub sample_mapped_records: Vec<MappedRecord>,
    /// First failing rows with itemized messages, capped; the invalid
    /// count above still reflects the true total.
    pub validation_errors: Vec<RowErrors>,
}

/// Estimated entity creations per type, summed over all sheets.
///
/// Payments never import standalone through this path, so the counter
/// stays zero during preview aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimatedChanges {
    pub new_companies: usize,
    pub new_suppliers: usize,
    pub new_hotels: usize,
    pub new_sales: usize,
    pub new_purchases: usize,
    pub new_payments: usize,
}

/// Top-level reviewable preview returned to the caller. Nothing here is
/// persisted; commit re-derives entities from the same raw data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPreview {
    pub analysis: ImportAnalysis,
    pub mapped_data: Vec<MappedSheetResult>,
    pub estimated_changes: EstimatedChanges,
}
