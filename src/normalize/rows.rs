use crate::config::NormalizerConfig;
use crate::model::CanonicalField;
use crate::normalize::columns::ColumnMapping;

/// Spellings different export tools use for a missing cell. Normalised to
/// the empty string so downstream consumers never see a sentinel value.
const MISSING_MARKERS: [&str; 6] = ["nan", "none", "null", "n/a", "#n/a", "s/n"];

/// Drops administrative rows and normalises missing values.
///
/// A row is junk when any mapped cell carries a junk keyword, or when the
/// cell in the column mapped to NAME is too short to describe anything.
/// The length rule is restricted to the description column so short
/// legitimate codes survive. Rows whose mapped cells are all empty after
/// normalization are dropped as blank lines.
///
/// Surviving rows keep their order and, apart from missing-value
/// normalisation, their exact cell text.
pub fn sanitize_rows(
    rows: &[Vec<String>],
    mapping: &ColumnMapping,
    config: &NormalizerConfig,
) -> Vec<Vec<String>> {
    let mut kept = Vec::new();
    for row in rows {
        let row = normalize_missing(row, mapping);
        if is_junk(&row, mapping, config) {
            continue;
        }
        if mapping
            .keys()
            .all(|&column| cell_text(&row, column).trim().is_empty())
        {
            continue;
        }
        kept.push(row);
    }
    kept
}

fn is_junk(row: &[String], mapping: &ColumnMapping, config: &NormalizerConfig) -> bool {
    for (&column, &field) in mapping {
        let text = cell_text(row, column).trim().to_lowercase();
        if !text.is_empty() && config.junk.hits(&text) {
            return true;
        }
        if field == CanonicalField::Name && text.chars().count() <= config.min_description_len {
            return true;
        }
    }
    false
}

fn normalize_missing(row: &[String], mapping: &ColumnMapping) -> Vec<String> {
    let mut normalized = row.to_vec();
    for &column in mapping.keys() {
        if let Some(cell) = normalized.get_mut(column) {
            if is_missing(cell) {
                cell.clear();
            }
        }
    }
    normalized
}

fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty()
        || MISSING_MARKERS
            .iter()
            .any(|marker| trimmed.eq_ignore_ascii_case(marker))
}

fn cell_text(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or_default()
}
