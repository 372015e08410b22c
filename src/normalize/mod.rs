//! Per-source schema inference: header location, column mapping, row
//! sanitization, and the orchestration that turns one raw sheet into
//! normalized records.

pub mod columns;
pub mod header;
pub mod rows;

use tracing::{debug, info, instrument};

use crate::config::NormalizerConfig;
use crate::model::{CanonicalField, Record, SourceDocument, SourceWarning, WarningKind};

pub use columns::{ColumnMapping, map_columns};
pub use header::locate_header;
pub use rows::sanitize_rows;

/// Records and diagnostics contributed by a single source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedSource {
    pub records: Vec<Record>,
    pub warnings: Vec<SourceWarning>,
}

impl NormalizedSource {
    /// Outcome for a source that failed before producing any record.
    pub fn from_warning(source: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            records: Vec::new(),
            warnings: vec![SourceWarning {
                source: source.into(),
                kind,
            }],
        }
    }
}

/// Runs the full inference pipeline over one source document.
///
/// Every per-source failure mode becomes a warning on the returned value; a
/// source that cannot be normalized contributes zero records and never
/// aborts the surrounding batch. When the source maps no LOCATION column,
/// every record receives the location synthesized from the source
/// identifier.
#[instrument(level = "info", skip_all, fields(source = %doc.id))]
pub fn normalize_source(doc: &SourceDocument, config: &NormalizerConfig) -> NormalizedSource {
    let Some(header_row) = locate_header(&doc.sheet, config) else {
        info!("no header row found, skipping source");
        return NormalizedSource::from_warning(&doc.id, WarningKind::HeaderNotFound);
    };
    debug!(header_row, "header row located");

    let mapping = map_columns(&doc.sheet.rows[header_row], &config.synonyms);
    if mapping.is_empty() {
        info!("no column matched the canonical schema, skipping source");
        return NormalizedSource::from_warning(&doc.id, WarningKind::EmptyMapping);
    }
    debug!(mapped_columns = mapping.len(), "columns mapped");

    let clean = sanitize_rows(&doc.sheet.rows[header_row + 1..], &mapping, config);

    let synthesized_location = (!mapping.values().any(|&field| field == CanonicalField::Location))
        .then(|| doc.location_hint());

    let records: Vec<Record> = clean
        .iter()
        .map(|row| {
            let mut record = Record::new(doc.id.clone());
            for (&column, &field) in &mapping {
                record
                    .fields
                    .insert(field, row.get(column).cloned().unwrap_or_default());
            }
            if let Some(location) = &synthesized_location {
                record
                    .fields
                    .insert(CanonicalField::Location, location.clone());
            }
            record
        })
        .collect();

    info!(record_count = records.len(), "source normalized");
    NormalizedSource {
        records,
        warnings: Vec::new(),
    }
}
