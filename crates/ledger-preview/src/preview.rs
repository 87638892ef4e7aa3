//! Preview aggregation: combine per-sheet mapped results and estimate
//! the entity creations a confirmed import would produce.

use tracing::{debug, warn};

use ledger_ingest::Workbook;
use ledger_model::{
    DetectedPattern, EstimatedChanges, ImportAnalysis, ImportPreview, PatternKind, Result,
};

use crate::mapper::map_and_validate;

/// Build the reviewable preview for an analyzed workbook. Touches no
/// persistent storage; the caller renders the result and asks the user
/// to confirm before anything is committed.
pub fn build_preview(analysis: &ImportAnalysis, workbook: &Workbook) -> ImportPreview {
    let mut mapped_data = Vec::new();
    let mut estimated_changes = EstimatedChanges::default();

    for sheet_analysis in &analysis.sheets {
        let Some(sheet) = workbook.sheet(&sheet_analysis.name) else {
            warn!(sheet = %sheet_analysis.name, "analyzed sheet missing from workbook");
            continue;
        };

        let result = map_and_validate(sheet_analysis, sheet);
        debug!(
            sheet = %result.sheet_name,
            valid = result.valid_records,
            invalid = result.invalid_records,
            "mapped sheet"
        );

        add_estimate(
            &mut estimated_changes,
            sheet_analysis.detected_pattern,
            result.valid_records,
        );
        mapped_data.push(result);
    }

    ImportPreview {
        analysis: analysis.clone(),
        mapped_data,
        estimated_changes,
    }
}

/// Analyze and preview in one pass over freshly uploaded bytes.
pub fn preview_workbook(bytes: &[u8], file_name: &str) -> Result<ImportPreview> {
    let workbook = Workbook::from_bytes(bytes, file_name)?;
    let analysis = ledger_analyze::analyze(&workbook);
    Ok(build_preview(&analysis, &workbook))
}

/// Payments have no standalone import target and unknown sheets have no
/// target at all, so neither moves a counter.
fn add_estimate(changes: &mut EstimatedChanges, pattern: DetectedPattern, valid: usize) {
    match pattern {
        DetectedPattern::Known(PatternKind::Sales) => changes.new_sales += valid,
        DetectedPattern::Known(PatternKind::Purchases) => changes.new_purchases += valid,
        DetectedPattern::Known(PatternKind::Companies) => changes.new_companies += valid,
        DetectedPattern::Known(PatternKind::Suppliers) => changes.new_suppliers += valid,
        DetectedPattern::Known(PatternKind::Hotels) => changes.new_hotels += valid,
        DetectedPattern::Known(PatternKind::Payments) | DetectedPattern::Unknown => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payments_and_unknown_do_not_move_counters() {
        let mut changes = EstimatedChanges::default();
        add_estimate(
            &mut changes,
            DetectedPattern::Known(PatternKind::Payments),
            7,
        );
        add_estimate(&mut changes, DetectedPattern::Unknown, 3);
        assert_eq!(changes, EstimatedChanges::default());
    }

    #[test]
    fn estimates_accumulate_across_sheets() {
        let mut changes = EstimatedChanges::default();
        add_estimate(&mut changes, DetectedPattern::Known(PatternKind::Sales), 4);
        add_estimate(&mut changes, DetectedPattern::Known(PatternKind::Sales), 6);
        assert_eq!(changes.new_sales, 10);
    }
}
