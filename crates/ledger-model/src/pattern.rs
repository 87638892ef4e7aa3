//! Record-type pattern classifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A recognized record type in the static pattern catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    Sales,
    Purchases,
    Companies,
    Suppliers,
    Hotels,
    Payments,
}

impl PatternKind {
    /// All kinds in catalog order. Scoring ties break toward the earlier
    /// entry, so this order is part of the detection contract.
    pub const ALL: [PatternKind; 6] = [
        PatternKind::Sales,
        PatternKind::Purchases,
        PatternKind::Companies,
        PatternKind::Suppliers,
        PatternKind::Hotels,
        PatternKind::Payments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sales => "sales",
            Self::Purchases => "purchases",
            Self::Companies => "companies",
            Self::Suppliers => "suppliers",
            Self::Hotels => "hotels",
            Self::Payments => "payments",
        }
    }
}

impl FromStr for PatternKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        PatternKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == value)
            .ok_or_else(|| format!("unknown pattern kind: {value}"))
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-sheet detection result: a catalog pattern or no confident match.
///
/// Serializes as the plain pattern name (`"sales"`, ..., `"unknown"`) to
/// match the preview wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedPattern {
    Known(PatternKind),
    Unknown,
}

impl DetectedPattern {
    pub fn kind(&self) -> Option<PatternKind> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Unknown => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Known(kind) => kind.as_str(),
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DetectedPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DetectedPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DetectedPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "unknown" {
            return Ok(Self::Unknown);
        }
        raw.parse::<PatternKind>()
            .map(Self::Known)
            .map_err(serde::de::Error::custom)
    }
}

/// Workbook-level aggregate of the per-sheet detections.
///
/// Serializes as `"mixed"`, `"unknown"`, or the single pattern name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverallPattern {
    Single(PatternKind),
    Mixed,
    Unknown,
}

impl OverallPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single(kind) => kind.as_str(),
            Self::Mixed => "mixed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for OverallPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OverallPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for OverallPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "mixed" => Ok(Self::Mixed),
            "unknown" => Ok(Self::Unknown),
            other => other
                .parse::<PatternKind>()
                .map(Self::Single)
                .map_err(serde::de::Error::custom),
        }
    }
}
