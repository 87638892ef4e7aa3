//! Pattern scoring: classify a sheet's columns against the catalog.
//!
//! Scoring blends soft keyword hints with hard required-field coverage.
//! Substring containment on normalized headers tolerates variations
//! like "Hotel Name (required)" matching the alias "hotel name"; the
//! weighted blend balances keyword-only false positives against sheets
//! with correct data under unusual headers.

use std::collections::BTreeMap;

use ledger_model::DetectedPattern;

use crate::catalog::{COLUMN_ALIASES, PATTERNS, aliases_for};
use crate::normalize::normalize_column;

/// Soft contribution per keyword occurrence.
const KEYWORD_WEIGHT: f64 = 0.1;
/// Hard contribution when all required fields resolve.
const REQUIRED_WEIGHT: f64 = 0.7;
/// Winning score needed to report a concrete pattern.
const DETECTION_THRESHOLD: f64 = 0.3;

/// Outcome of scoring one sheet against the whole catalog.
#[derive(Debug, Clone)]
pub struct PatternMatch {
    pub pattern: DetectedPattern,
    /// Winning raw score clamped to [0, 1]. Deliberately kept even when
    /// the winner stays below the threshold and the pattern reports as
    /// unknown, so review UIs can show how close the best guess came.
    pub confidence: f64,
    /// Canonical field to original source column. Empty when unknown.
    pub mapping: BTreeMap<String, String>,
}

/// Score a sheet's headers against every catalog pattern and pick the
/// strictly best one. Ties break toward the earlier catalog entry.
pub fn score_columns(columns: &[String]) -> PatternMatch {
    let normalized: Vec<String> = columns.iter().map(|col| normalize_column(col)).collect();

    let mut best: Option<(f64, BTreeMap<String, String>, ledger_model::PatternKind)> = None;

    for pattern in PATTERNS {
        let mut score = 0.0;
        for keyword in pattern.keywords {
            let matches = normalized.iter().filter(|col| col.contains(keyword)).count();
            score += matches as f64 * KEYWORD_WEIGHT;
        }

        let mut mapping = BTreeMap::new();
        let mut resolved = 0usize;
        for field in pattern.required_fields {
            if let Some(column) = resolve_field(field, columns, &normalized) {
                mapping.insert((*field).to_string(), column);
                resolved += 1;
            }
        }
        score += resolved as f64 / pattern.required_fields.len() as f64 * REQUIRED_WEIGHT;

        // Optional fields enrich the mapping without moving the score.
        for entry in COLUMN_ALIASES {
            if mapping.contains_key(entry.field) {
                continue;
            }
            if let Some(column) = resolve_field(entry.field, columns, &normalized) {
                mapping.insert(entry.field.to_string(), column);
            }
        }

        let score = score.min(1.0);
        if best.as_ref().is_none_or(|(top, _, _)| score > *top) {
            best = Some((score, mapping, pattern.kind));
        }
    }

    let (confidence, mapping, kind) = best.expect("pattern catalog is non-empty");
    if confidence > DETECTION_THRESHOLD {
        PatternMatch {
            pattern: DetectedPattern::Known(kind),
            confidence,
            mapping,
        }
    } else {
        PatternMatch {
            pattern: DetectedPattern::Unknown,
            confidence,
            mapping: BTreeMap::new(),
        }
    }
}

/// Resolve one canonical field to the first sheet column containing one
/// of its alias variants, earlier variants taking priority. Returns the
/// original column text for display and row lookup.
fn resolve_field(field: &str, columns: &[String], normalized: &[String]) -> Option<String> {
    let aliases = aliases_for(field);
    let own = [field];
    let variants: &[&str] = if aliases.is_empty() { &own } else { aliases };

    for variant in variants {
        let needle = normalize_column(variant);
        if needle.is_empty() {
            continue;
        }
        if let Some(idx) = normalized.iter().position(|col| col.contains(&needle)) {
            return Some(columns[idx].clone());
        }
    }
    None
}
