use crate::config::NormalizerConfig;
use crate::model::RawSheet;

/// Finds the row holding the real column titles.
///
/// Exported sheets usually carry a short institutional title block before
/// the actual table, so the first rows cannot be trusted to be headers.
/// Scans at most `scan_window` rows top-down; for each candidate the cell
/// texts are trimmed, lower-cased, and joined before the configured policy
/// is evaluated. Returns the first satisfying index, or `None` when the
/// window holds no recognisable header. The caller decides what to do
/// with an unresolved sheet; there is no silent fallback to row zero.
pub fn locate_header(sheet: &RawSheet, config: &NormalizerConfig) -> Option<usize> {
    sheet
        .rows
        .iter()
        .take(config.scan_window)
        .position(|row| config.policy.is_header(&row_text(row), &config.synonyms))
}

fn row_text(row: &[String]) -> String {
    let mut text = String::new();
    for cell in row {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(trimmed);
    }
    text.to_lowercase()
}
