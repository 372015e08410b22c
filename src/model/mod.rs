use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the fixed normalized schema columns every source is mapped onto.
///
/// The declaration order doubles as the stable presentation order used when
/// rendering or exporting the catalog.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum CanonicalField {
    Name,
    Location,
    Quantity,
    Status,
    Code,
    Model,
    Brand,
}

impl CanonicalField {
    /// Every canonical field, in stable presentation order.
    pub const ALL: [CanonicalField; 7] = [
        CanonicalField::Name,
        CanonicalField::Location,
        CanonicalField::Quantity,
        CanonicalField::Status,
        CanonicalField::Code,
        CanonicalField::Model,
        CanonicalField::Brand,
    ];

    /// Column title used when rendering or exporting the catalog.
    pub fn label(self) -> &'static str {
        match self {
            CanonicalField::Name => "NAME",
            CanonicalField::Location => "LOCATION",
            CanonicalField::Quantity => "QUANTITY",
            CanonicalField::Status => "STATUS",
            CanonicalField::Code => "CODE",
            CanonicalField::Model => "MODEL",
            CanonicalField::Brand => "BRAND",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rectangular matrix of cells read from one worksheet.
///
/// Cells are kept as plain text; an empty cell is the empty string. Typing
/// and formatting are collapsed at the reading boundary because the catalog
/// stores every value as text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawSheet {
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// File extensions recognised as spreadsheet sources, lower case, no dot.
pub const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xls", "xlsm", "ods"];

/// Strips a known spreadsheet extension from a source identifier.
///
/// Unknown extensions are left alone so an odd file name still yields a
/// usable (if verbose) synthesized location.
pub fn strip_spreadsheet_extension(name: &str) -> String {
    for extension in SPREADSHEET_EXTENSIONS {
        let suffix_len = extension.len() + 1;
        if name.len() <= suffix_len {
            continue;
        }
        let cut = name.len() - suffix_len;
        if !name.is_char_boundary(cut) {
            continue;
        }
        let (stem, tail) = name.split_at(cut);
        if tail.starts_with('.') && tail[1..].eq_ignore_ascii_case(extension) {
            return stem.to_string();
        }
    }
    name.to_string()
}

/// A raw sheet together with the identifier of the file it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    /// Original file name, extension included. Doubles as provenance.
    pub id: String,
    pub sheet: RawSheet,
}

impl SourceDocument {
    pub fn new(id: impl Into<String>, sheet: RawSheet) -> Self {
        Self {
            id: id.into(),
            sheet,
        }
    }

    /// Identifier with its spreadsheet extension stripped, used as the
    /// synthesized location when a source maps no LOCATION column.
    pub fn location_hint(&self) -> String {
        strip_spreadsheet_extension(&self.id)
    }
}

/// One normalized inventory entry.
///
/// Field values are plain text; fields a source did not map are simply
/// absent. Provenance names the source document the entry came from.
/// Records are immutable once produced by normalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub fields: BTreeMap<CanonicalField, String>,
    pub source: String,
}

impl Record {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            fields: BTreeMap::new(),
            source: source.into(),
        }
    }

    /// Text value for a canonical field, empty when the field is absent.
    pub fn value(&self, field: CanonicalField) -> &str {
        self.fields.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn location(&self) -> &str {
        self.value(CanonicalField::Location)
    }
}

/// Ordered collection of every record contributed by every source.
///
/// Insertion order is the source-processing order; it carries no meaning but
/// is kept deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub records: Vec<Record>,
}

impl Catalog {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct non-empty LOCATION values, sorted, for the selection list.
    pub fn distinct_locations(&self) -> Vec<String> {
        let locations: BTreeSet<&str> = self
            .records
            .iter()
            .map(Record::location)
            .filter(|location| !location.is_empty())
            .collect();
        locations.into_iter().map(str::to_string).collect()
    }

    /// Canonical fields populated by at least one record, in stable order.
    pub fn fields_present(&self) -> Vec<CanonicalField> {
        CanonicalField::ALL
            .into_iter()
            .filter(|field| {
                self.records
                    .iter()
                    .any(|record| record.fields.contains_key(field))
            })
            .collect()
    }
}

/// Non-fatal, per-source diagnostic recorded while normalizing a batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceWarning {
    pub source: String,
    pub kind: WarningKind,
}

impl fmt::Display for SourceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, self.kind)
    }
}

/// The ways a single source can fail to contribute records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "detail")]
pub enum WarningKind {
    /// The source could not be read at all (corrupt, protected, not a
    /// workbook).
    ReadError(String),
    /// No row inside the scan window satisfied the header policy.
    HeaderNotFound,
    /// A header row was found but no column matched the canonical schema.
    EmptyMapping,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::ReadError(detail) => write!(f, "could not read source: {detail}"),
            WarningKind::HeaderNotFound => {
                f.write_str("no header row recognised in the scan window")
            }
            WarningKind::EmptyMapping => {
                f.write_str("no column matched the canonical schema")
            }
        }
    }
}
