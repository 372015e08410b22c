use std::collections::{BTreeMap, BTreeSet};

use crate::config::SynonymTable;
use crate::model::CanonicalField;

/// Raw column position → canonical field, for the columns that matched.
pub type ColumnMapping = BTreeMap<usize, CanonicalField>;

/// Maps the raw header texts at the located header row onto the canonical
/// schema.
///
/// Columns are visited left to right; each is claimed by the first
/// canonical field, in the table's priority order, whose synonym list
/// contains a substring of the trimmed, lower-cased header. A field that
/// has already claimed a column is skipped for later columns, so duplicate
/// raw headers resolve to the leftmost occurrence instead of silently
/// overwriting each other. Unmatched columns and unmatched fields are
/// simply absent from the mapping.
///
/// Pure function: identical inputs always yield the identical mapping.
pub fn map_columns(headers: &[String], synonyms: &SynonymTable) -> ColumnMapping {
    let mut mapping = ColumnMapping::new();
    let mut claimed: BTreeSet<CanonicalField> = BTreeSet::new();

    for (position, header) in headers.iter().enumerate() {
        let needle = header.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        let matched = synonyms.entries().iter().find(|(field, terms)| {
            !claimed.contains(field) && terms.iter().any(|term| needle.contains(term.as_str()))
        });
        if let Some((field, _)) = matched {
            claimed.insert(*field);
            mapping.insert(position, *field);
        }
    }

    mapping
}
