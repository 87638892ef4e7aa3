//! Workbook-level analysis: per-sheet scoring plus overall aggregation.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use ledger_ingest::Workbook;
use ledger_model::{
    DetectedPattern, ImportAnalysis, MappedRecord, OverallPattern, PatternKind, Result,
    SheetAnalysis,
};

use crate::score::score_columns;

/// Rows retained per sheet as a display sample.
pub const SAMPLE_ROWS: usize = 5;

/// Confidence below which a review warning is attached.
const LOW_CONFIDENCE: f64 = 0.5;

/// Parse upload bytes and analyze every sheet. Parse failures propagate
/// as hard errors; everything past the parse boundary is recovered into
/// warnings and per-sheet data.
pub fn analyze_workbook(bytes: &[u8], file_name: &str) -> Result<ImportAnalysis> {
    let workbook = Workbook::from_bytes(bytes, file_name)?;
    Ok(analyze(&workbook))
}

/// Analyze an already-parsed workbook.
pub fn analyze(workbook: &Workbook) -> ImportAnalysis {
    let mut sheets = Vec::new();
    let mut warnings = Vec::new();

    for sheet in &workbook.sheets {
        if sheet.rows.is_empty() {
            warn!(sheet = %sheet.name, "skipping empty sheet");
            warnings.push(format!("Sheet \"{}\" is empty", sheet.name));
            continue;
        }

        let sample_rows: Vec<MappedRecord> = sheet
            .rows
            .iter()
            .take(SAMPLE_ROWS)
            .map(|row| sheet.record(row))
            .collect();

        let detection = score_columns(&sheet.headers);
        debug!(
            sheet = %sheet.name,
            pattern = %detection.pattern,
            confidence = detection.confidence,
            "scored sheet"
        );

        sheets.push(SheetAnalysis {
            name: sheet.name.clone(),
            row_count: sheet.rows.len(),
            column_count: sheet.headers.len(),
            columns: sheet.headers.clone(),
            sample_rows,
            detected_pattern: detection.pattern,
            confidence: detection.confidence,
            mapping: detection.mapping,
        });
    }

    let (overall_pattern, confidence) = aggregate(&sheets);

    if sheets.is_empty() {
        warnings.push("No valid sheets found in the file".to_string());
    }
    if confidence < LOW_CONFIDENCE {
        warnings.push(
            "Low confidence in pattern detection. Please review the mapping carefully."
                .to_string(),
        );
    }
    if overall_pattern == OverallPattern::Unknown {
        warnings.push(
            "Could not automatically detect the data pattern. Manual mapping may be required."
                .to_string(),
        );
    }

    ImportAnalysis {
        file_name: workbook.file_name.clone(),
        file_size: workbook.file_size,
        sheets,
        overall_pattern,
        confidence,
        warnings,
    }
}

/// Fold per-sheet detections into the workbook-level pattern.
///
/// A single sheet passes its values through directly, including a
/// sub-threshold unknown confidence. With several sheets the mean runs
/// over ALL sheets, so unknown sheets pull the average down.
pub fn aggregate(sheets: &[SheetAnalysis]) -> (OverallPattern, f64) {
    match sheets {
        [] => (OverallPattern::Unknown, 0.0),
        [only] => {
            let overall = match only.detected_pattern {
                DetectedPattern::Known(kind) => OverallPattern::Single(kind),
                DetectedPattern::Unknown => OverallPattern::Unknown,
            };
            (overall, only.confidence)
        }
        many => {
            let distinct: BTreeSet<PatternKind> = many
                .iter()
                .filter_map(|sheet| sheet.detected_pattern.kind())
                .collect();
            if distinct.is_empty() {
                return (OverallPattern::Unknown, 0.0);
            }
            let mean = many.iter().map(|sheet| sheet.confidence).sum::<f64>() / many.len() as f64;
            if distinct.len() == 1 {
                let kind = *distinct.iter().next().expect("non-empty set");
                (OverallPattern::Single(kind), mean)
            } else {
                (OverallPattern::Mixed, mean)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn sheet(name: &str, pattern: DetectedPattern, confidence: f64) -> SheetAnalysis {
        SheetAnalysis {
            name: name.to_string(),
            row_count: 1,
            column_count: 0,
            columns: Vec::new(),
            sample_rows: Vec::new(),
            detected_pattern: pattern,
            confidence,
            mapping: BTreeMap::new(),
        }
    }

    #[test]
    fn no_sheets_is_unknown() {
        assert_eq!(aggregate(&[]), (OverallPattern::Unknown, 0.0));
    }

    #[test]
    fn single_sheet_passes_through() {
        let sheets = [sheet("a", DetectedPattern::Known(PatternKind::Hotels), 0.85)];
        assert_eq!(
            aggregate(&sheets),
            (OverallPattern::Single(PatternKind::Hotels), 0.85)
        );
    }

    #[test]
    fn single_unknown_sheet_keeps_sub_threshold_confidence() {
        let sheets = [sheet("a", DetectedPattern::Unknown, 0.275)];
        assert_eq!(aggregate(&sheets), (OverallPattern::Unknown, 0.275));
    }

    #[test]
    fn consistent_sheets_average_confidence() {
        let sheets = [
            sheet("a", DetectedPattern::Known(PatternKind::Sales), 0.9),
            sheet("b", DetectedPattern::Known(PatternKind::Sales), 0.7),
        ];
        let (overall, confidence) = aggregate(&sheets);
        assert_eq!(overall, OverallPattern::Single(PatternKind::Sales));
        assert!((confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn unknown_sheets_drag_the_average_down() {
        let sheets = [
            sheet("a", DetectedPattern::Known(PatternKind::Sales), 0.9),
            sheet("b", DetectedPattern::Unknown, 0.1),
        ];
        let (overall, confidence) = aggregate(&sheets);
        assert_eq!(overall, OverallPattern::Single(PatternKind::Sales));
        assert!((confidence - 0.5).abs() < 1e-9);
    }

    #[test]
    fn distinct_patterns_report_mixed() {
        let sheets = [
            sheet("a", DetectedPattern::Known(PatternKind::Sales), 0.9),
            sheet("b", DetectedPattern::Known(PatternKind::Purchases), 0.7),
        ];
        let (overall, confidence) = aggregate(&sheets);
        assert_eq!(overall, OverallPattern::Mixed);
        assert!((confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn all_unknown_sheets_are_unknown_with_zero_confidence() {
        let sheets = [
            sheet("a", DetectedPattern::Unknown, 0.2),
            sheet("b", DetectedPattern::Unknown, 0.25),
        ];
        assert_eq!(aggregate(&sheets), (OverallPattern::Unknown, 0.0));
    }
}
