//! Read-only filtering and presentation views over a consolidated catalog.

use serde::Serialize;

use crate::model::{Catalog, Record, SourceWarning};

/// Composable selection over the catalog. `None` means no restriction, so
/// the default value matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    /// Exact match against a record's LOCATION value.
    pub location: Option<String>,
    /// Case-insensitive substring matched against every field value.
    pub search: Option<String>,
}

impl Filter {
    /// Whether a record survives both predicates. The predicates are
    /// independent, so application order cannot change the result.
    pub fn matches(&self, record: &Record) -> bool {
        self.location_matches(record) && self.search_matches(record)
    }

    fn location_matches(&self, record: &Record) -> bool {
        match &self.location {
            Some(wanted) => record.location() == wanted,
            None => true,
        }
    }

    fn search_matches(&self, record: &Record) -> bool {
        match &self.search {
            Some(term) => {
                let needle = term.to_lowercase();
                record
                    .fields
                    .values()
                    .any(|value| value.to_lowercase().contains(&needle))
            }
            None => true,
        }
    }
}

/// Records surviving the filter, in catalog order. The catalog itself is
/// never mutated; the view borrows from it.
pub fn filter_records<'a>(catalog: &'a Catalog, filter: &Filter) -> Vec<&'a Record> {
    catalog
        .records
        .iter()
        .filter(|record| filter.matches(record))
        .collect()
}

/// Column-oriented rendering of a record set, ready for a terminal table or
/// a worksheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Column title carrying each record's provenance.
pub const SOURCE_COLUMN: &str = "SOURCE";

/// Builds the table view for a filtered record set.
///
/// Only canonical fields present somewhere in the full catalog appear, in
/// their stable order, followed by the provenance column, so the column
/// set stays put while the user narrows the filter.
pub fn table_view(catalog: &Catalog, records: &[&Record]) -> TableView {
    let fields = catalog.fields_present();

    let mut columns: Vec<String> = fields.iter().map(|field| field.label().to_string()).collect();
    columns.push(SOURCE_COLUMN.to_string());

    let rows = records
        .iter()
        .map(|record| {
            let mut row: Vec<String> = fields
                .iter()
                .map(|&field| record.value(field).to_string())
                .collect();
            row.push(record.source.clone());
            row
        })
        .collect();

    TableView { columns, rows }
}

/// Table view of the batch warnings, for the export workbook.
pub fn warnings_view(warnings: &[SourceWarning]) -> TableView {
    TableView {
        columns: vec![SOURCE_COLUMN.to_string(), "WARNING".to_string()],
        rows: warnings
            .iter()
            .map(|warning| vec![warning.source.clone(), warning.kind.to_string()])
            .collect(),
    }
}
