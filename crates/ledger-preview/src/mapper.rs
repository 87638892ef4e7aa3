//! Row mapping and per-pattern validation.
//!
//! Uses the mapping resolved during analysis to turn raw rows into
//! canonical-field records, then applies the record-type checks. Rows
//! never abort the pass; failures are collected as data.

use ledger_ingest::Sheet;
use ledger_model::{
    CellValue, DetectedPattern, MappedRecord, MappedSheetResult, PatternKind, RowErrors,
    SheetAnalysis,
};

/// Preview considers at most this many rows per sheet. A performance
/// bound for the review screen, not a business rule; commit walks the
/// full sheet.
pub const PREVIEW_ROW_CAP: usize = 100;

/// Mapped records retained as a display sample, valid or not.
pub const SAMPLE_RECORD_CAP: usize = 5;

/// Row-error entries retained on the result; the invalid count still
/// reflects the true total.
pub const ERROR_LIST_CAP: usize = 10;

/// Map and validate one sheet's rows against its analysis mapping.
pub fn map_and_validate(analysis: &SheetAnalysis, sheet: &Sheet) -> MappedSheetResult {
    let considered = sheet.rows.len().min(PREVIEW_ROW_CAP);

    let mut valid_records = 0usize;
    let mut invalid_records = 0usize;
    let mut sample_mapped_records = Vec::new();
    let mut validation_errors = Vec::new();

    for (idx, row) in sheet.rows.iter().take(PREVIEW_ROW_CAP).enumerate() {
        let record = map_row(&analysis.mapping, &sheet.headers, row);
        let errors = validate_record(analysis.detected_pattern, &record);

        if errors.is_empty() {
            valid_records += 1;
        } else {
            invalid_records += 1;
            if validation_errors.len() < ERROR_LIST_CAP {
                validation_errors.push(RowErrors {
                    row: idx + 1,
                    errors,
                });
            }
        }

        if sample_mapped_records.len() < SAMPLE_RECORD_CAP {
            sample_mapped_records.push(record);
        }
    }

    MappedSheetResult {
        sheet_name: analysis.name.clone(),
        target_table: analysis.detected_pattern,
        record_count: considered,
        valid_records,
        invalid_records,
        sample_mapped_records,
        validation_errors,
    }
}

/// Copy mapped source cells into a canonical-field record. Cells that
/// read back missing are skipped entirely, so presence checks can rely
/// on key absence.
pub fn map_row(
    mapping: &std::collections::BTreeMap<String, String>,
    headers: &[String],
    row: &[CellValue],
) -> MappedRecord {
    let mut record = MappedRecord::new();
    for (field, source_column) in mapping {
        let Some(idx) = headers.iter().position(|header| header == source_column) else {
            continue;
        };
        match row.get(idx) {
            None | Some(CellValue::Missing) => {}
            Some(cell) => {
                record.insert(field.clone(), cell.clone());
            }
        }
    }
    record
}

/// Per-pattern structural checks. Patterns without specific rules are
/// treated as structurally valid in preview.
pub fn validate_record(pattern: DetectedPattern, record: &MappedRecord) -> Vec<String> {
    let mut errors = Vec::new();
    match pattern {
        DetectedPattern::Known(PatternKind::Sales) => {
            if !present(record, "hotelName") {
                errors.push("Hotel name is required".to_string());
            }
            if !positive(record, "quantity") {
                errors.push("Valid quantity is required".to_string());
            }
            if !positive(record, "ratePerKg") {
                errors.push("Valid rate per kg is required".to_string());
            }
            if !positive(record, "totalAmount") {
                errors.push("Valid total amount is required".to_string());
            }
            if !present(record, "date") {
                errors.push("Date is required".to_string());
            }
        }
        DetectedPattern::Known(PatternKind::Purchases) => {
            if !present(record, "supplierName") {
                errors.push("Supplier name is required".to_string());
            }
            if !positive(record, "quantity") {
                errors.push("Valid quantity is required".to_string());
            }
            if !positive(record, "ratePerKg") {
                errors.push("Valid rate per kg is required".to_string());
            }
            if !positive(record, "totalAmount") {
                errors.push("Valid total amount is required".to_string());
            }
        }
        DetectedPattern::Known(PatternKind::Companies) => {
            if !present(record, "name") {
                errors.push("Company name is required".to_string());
            }
            if !present(record, "code") {
                errors.push("Company code is required".to_string());
            }
        }
        DetectedPattern::Known(_) | DetectedPattern::Unknown => {}
    }
    errors
}

fn present(record: &MappedRecord, field: &str) -> bool {
    record.get(field).is_some_and(CellValue::is_present)
}

fn positive(record: &MappedRecord, field: &str) -> bool {
    record
        .get(field)
        .and_then(CellValue::as_number)
        .is_some_and(|value| value > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fields: &[(&str, CellValue)]) -> MappedRecord {
        fields
            .iter()
            .map(|(name, cell)| ((*name).to_string(), cell.clone()))
            .collect()
    }

    fn valid_sale() -> MappedRecord {
        record(&[
            ("hotelName", CellValue::Text("Grand Plaza Hotel".into())),
            ("quantity", CellValue::Number(5.5)),
            ("ratePerKg", CellValue::Number(4.0)),
            ("totalAmount", CellValue::Number(22.0)),
            ("date", CellValue::Text("2024-11-15".into())),
        ])
    }

    #[test]
    fn complete_sale_passes() {
        let sale = valid_sale();
        let errors = validate_record(DetectedPattern::Known(PatternKind::Sales), &sale);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
    }

    #[test]
    fn sale_missing_total_amount_fails() {
        let mut sale = valid_sale();
        sale.remove("totalAmount");
        let errors = validate_record(DetectedPattern::Known(PatternKind::Sales), &sale);
        assert_eq!(errors, ["Valid total amount is required"]);
    }

    #[test]
    fn zero_and_negative_quantities_fail() {
        for bad in [CellValue::Number(0.0), CellValue::Number(-3.0)] {
            let mut sale = valid_sale();
            sale.insert("quantity".to_string(), bad);
            let errors = validate_record(DetectedPattern::Known(PatternKind::Sales), &sale);
            assert_eq!(errors, ["Valid quantity is required"]);
        }
    }

    #[test]
    fn numeric_text_satisfies_positivity() {
        let mut sale = valid_sale();
        sale.insert("quantity".to_string(), CellValue::Text("5.5".into()));
        let errors = validate_record(DetectedPattern::Known(PatternKind::Sales), &sale);
        assert!(errors.is_empty());
    }

    #[test]
    fn non_numeric_text_fails_positivity() {
        let mut sale = valid_sale();
        sale.insert("quantity".to_string(), CellValue::Text("lots".into()));
        let errors = validate_record(DetectedPattern::Known(PatternKind::Sales), &sale);
        assert_eq!(errors, ["Valid quantity is required"]);
    }

    #[test]
    fn company_requires_name_and_code() {
        let errors = validate_record(
            DetectedPattern::Known(PatternKind::Companies),
            &record(&[("name", CellValue::Text("Acme".into()))]),
        );
        assert_eq!(errors, ["Company code is required"]);
    }

    #[test]
    fn hotels_and_unknown_have_no_structural_checks() {
        let empty = MappedRecord::new();
        assert!(validate_record(DetectedPattern::Known(PatternKind::Hotels), &empty).is_empty());
        assert!(validate_record(DetectedPattern::Unknown, &empty).is_empty());
    }
}
