pub mod analysis;
pub mod cell;
pub mod error;
pub mod pattern;
pub mod preview;

pub use analysis::{ImportAnalysis, SheetAnalysis};
pub use cell::{CellValue, MappedRecord};
pub use error::{ImportError, Result};
pub use pattern::{DetectedPattern, OverallPattern, PatternKind};
pub use preview::{EstimatedChanges, ImportPreview, MappedSheetResult, RowErrors};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_serializes() {
        let analysis = ImportAnalysis {
            file_name: "sales.xlsx".to_string(),
            file_size: 1024,
            sheets: vec![],
            overall_pattern: OverallPattern::Unknown,
            confidence: 0.0,
            warnings: vec!["No valid sheets found in the file".to_string()],
        };
        let json = serde_json::to_string(&analysis).expect("serialize analysis");
        let round: ImportAnalysis = serde_json::from_str(&json).expect("deserialize analysis");
        assert_eq!(round.file_name, "sales.xlsx");
        assert_eq!(round.overall_pattern, OverallPattern::Unknown);
    }

    #[test]
    fn pattern_names_round_trip() {
        for kind in PatternKind::ALL {
            let json = serde_json::to_string(&kind).expect("serialize kind");
            let round: PatternKind = serde_json::from_str(&json).expect("deserialize kind");
            assert_eq!(round, kind);
        }
    }
}
