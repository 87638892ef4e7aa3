//! Header normalization for comparison.

/// Canonicalize a raw header for substring comparison: lowercase, trim,
/// and drop everything that is not a lowercase letter, digit, or space.
///
/// Applied identically to sheet headers and alias-table variants so
/// containment checks survive casing and punctuation differences, e.g.
/// "Hotel Name (required)" still contains the alias "hotel name".
pub fn normalize_column(raw: &str) -> String {
    let kept: String = raw
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || *ch == ' ')
        .collect();
    // Trim after filtering so stripping punctuation cannot reintroduce
    // surrounding whitespace; this keeps the function idempotent.
    kept.trim().to_string()
}
