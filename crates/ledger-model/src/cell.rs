//! Cell values as a closed tagged variant.
//!
//! Spreadsheet cells arrive with unknown shape; representing them as a
//! finite variant lets the validator pattern-match exhaustively instead
//! of probing types at runtime.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum CellValue {
    Number(f64),
    Text(String),
    Bool(bool),
    Missing,
}

impl CellValue {
    /// Parse a raw string cell the way CSV ingestion sees it: empty
    /// becomes `Missing`, numeric text becomes `Number`.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Missing;
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            return Self::Number(value);
        }
        Self::Text(trimmed.to_string())
    }

    /// True when the cell carries a usable value. Empty text counts as
    /// absent, matching how blank spreadsheet cells read back.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Missing => false,
            Self::Text(text) => !text.trim().is_empty(),
            Self::Number(_) | Self::Bool(_) => true,
        }
    }

    /// Numeric view of the cell. Text that parses as a float counts,
    /// since CSV and hand-edited sheets often store numbers as text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
            Self::Bool(_) | Self::Missing => None,
        }
    }

    /// Text view of the cell, rendering numbers without trailing zeros.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Number(value) => Some(format_number(*value)),
            Self::Bool(value) => Some(value.to_string()),
            Self::Missing => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", format_number(*value)),
            Self::Text(text) => f.write_str(text),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Missing => Ok(()),
        }
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// A row keyed by canonical field name after mapping, or by raw header
/// before it.
pub type MappedRecord = BTreeMap<String, CellValue>;
