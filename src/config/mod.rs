//! Tunables for the normalization pass.
//!
//! The synonym dictionary and the junk-keyword list the original spreadsheet
//! collection was built against are compiled in as defaults; a JSON mapping
//! file can replace either without touching code. Everything here is
//! constructed once and never mutated afterwards.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, ToolError};
use crate::model::CanonicalField;

/// Ordered synonym dictionary mapping canonical fields to the lower-case
/// substrings recognised as equivalent raw header text.
///
/// Entry order is the priority order used to break ties when a raw header
/// matches the synonym lists of several fields.
#[derive(Debug, Clone, PartialEq)]
pub struct SynonymTable {
    entries: Vec<(CanonicalField, Vec<String>)>,
}

impl SynonymTable {
    /// Builds a table from (field, synonyms) entries, keeping their order.
    /// Terms are trimmed and lower-cased; empty terms are discarded.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (CanonicalField, Vec<S>)>,
        S: Into<String>,
    {
        let entries = entries
            .into_iter()
            .map(|(field, terms)| {
                let terms = terms
                    .into_iter()
                    .map(|term| term.into().trim().to_lowercase())
                    .filter(|term| !term.is_empty())
                    .collect();
                (field, terms)
            })
            .collect();
        Self { entries }
    }

    /// The dictionary the source spreadsheets were collected against.
    pub fn builtin() -> Self {
        Self::new(vec![
            (
                CanonicalField::Name,
                vec![
                    "nombre",
                    "item",
                    "descripción",
                    "descripcion",
                    "detalle",
                    "equipo",
                    "activo",
                ],
            ),
            (
                CanonicalField::Location,
                vec![
                    "ubicación",
                    "ubicacion",
                    "lugar",
                    "curso",
                    "aula",
                    "departamento",
                    "area",
                ],
            ),
            (
                CanonicalField::Quantity,
                vec!["cant", "cantidad", "stock", "total", "numero"],
            ),
            (
                CanonicalField::Status,
                vec!["estado", "condicion", "situacion", "funcionalidad"],
            ),
            (
                CanonicalField::Code,
                vec!["serie", "codigo", "código", "inventario", "etiqueta", "id"],
            ),
            (CanonicalField::Model, vec!["modelo"]),
            (CanonicalField::Brand, vec!["marca"]),
        ])
    }

    /// Entries in priority order.
    pub fn entries(&self) -> &[(CanonicalField, Vec<String>)] {
        &self.entries
    }

    /// Number of distinct canonical fields with a synonym occurring in
    /// `text`. `text` must already be lower-cased.
    pub fn categories_in(&self, text: &str) -> usize {
        self.entries
            .iter()
            .filter(|(_, terms)| terms.iter().any(|term| text.contains(term.as_str())))
            .count()
    }

    /// Whether any synonym of `field` occurs in the lower-cased `text`.
    pub fn category_matches(&self, field: CanonicalField, text: &str) -> bool {
        self.entries
            .iter()
            .any(|(candidate, terms)| {
                *candidate == field && terms.iter().any(|term| text.contains(term.as_str()))
            })
    }
}

/// Lower-case terms whose presence in a cell marks the row as
/// administrative (signature lines, totals, repeated institutional titles)
/// rather than inventory data.
#[derive(Debug, Clone, PartialEq)]
pub struct JunkKeywordList {
    terms: Vec<String>,
}

impl JunkKeywordList {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let terms = terms
            .into_iter()
            .map(|term| term.into().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();
        Self { terms }
    }

    pub fn builtin() -> Self {
        Self::new([
            "total",
            "subtotal",
            "firma",
            "responsable",
            "elaborado",
            "revisado",
            "unidad educativa",
        ])
    }

    /// Whether the lower-cased `text` contains any junk term.
    pub fn hits(&self, text: &str) -> bool {
        self.terms.iter().any(|term| text.contains(term.as_str()))
    }
}

/// Header-detection policy evaluated against the lower-cased concatenation
/// of a candidate row's cells.
///
/// The original sources disagreed on how strict detection should be; the
/// variants unify those behaviours behind one switch instead of one
/// hard-coded rule per caller.
#[derive(Debug, Clone, PartialEq)]
pub enum HeaderPolicy {
    /// The row contains at least one keyword from the given set.
    AnyKeyword(Vec<String>),
    /// At least `n` distinct canonical fields have a synonym in the row.
    MinCategories(usize),
    /// Both named categories have a synonym in the row.
    RequiredPair(CanonicalField, CanonicalField),
}

impl HeaderPolicy {
    /// Evaluates the policy against one candidate row.
    pub fn is_header(&self, row_text: &str, synonyms: &SynonymTable) -> bool {
        match self {
            HeaderPolicy::AnyKeyword(keywords) => keywords
                .iter()
                .any(|keyword| row_text.contains(keyword.as_str())),
            HeaderPolicy::MinCategories(n) => synonyms.categories_in(row_text) >= *n,
            HeaderPolicy::RequiredPair(first, second) => {
                synonyms.category_matches(*first, row_text)
                    && synonyms.category_matches(*second, row_text)
            }
        }
    }
}

/// Everything the normalization pass can be tuned with.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizerConfig {
    pub synonyms: SynonymTable,
    pub junk: JunkKeywordList,
    pub policy: HeaderPolicy,
    /// Rows scanned from the top of a sheet when looking for the header.
    /// Bounded so data rows deep in the sheet cannot false-positive.
    pub scan_window: usize,
    /// A description with at most this many characters marks its row as a
    /// blank or placeholder line.
    pub min_description_len: usize,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            synonyms: SynonymTable::builtin(),
            junk: JunkKeywordList::builtin(),
            policy: HeaderPolicy::MinCategories(2),
            scan_window: 15,
            min_description_len: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    synonyms: Vec<SynonymEntry>,
    #[serde(default)]
    junk_keywords: Vec<String>,
    #[serde(default)]
    scan_window: Option<usize>,
    #[serde(default)]
    min_categories: Option<usize>,
    #[serde(default)]
    min_description_len: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct SynonymEntry {
    field: CanonicalField,
    terms: Vec<String>,
}

impl NormalizerConfig {
    /// Applies overrides from a JSON mapping document on top of the
    /// built-in defaults. Absent sections keep their defaults; the synonym
    /// list is given as an array so its priority order survives the trip
    /// through JSON.
    pub fn from_json(value: &Value) -> Result<Self> {
        let file: ConfigFile = serde_json::from_value(value.clone())
            .map_err(|error| ToolError::InvalidConfig(error.to_string()))?;

        let mut config = NormalizerConfig::default();
        if !file.synonyms.is_empty() {
            config.synonyms = SynonymTable::new(
                file.synonyms
                    .into_iter()
                    .map(|entry| (entry.field, entry.terms)),
            );
        }
        if !file.junk_keywords.is_empty() {
            config.junk = JunkKeywordList::new(file.junk_keywords);
        }
        if let Some(window) = file.scan_window {
            if window == 0 {
                return Err(ToolError::InvalidConfig(
                    "scan_window must be at least 1".into(),
                ));
            }
            config.scan_window = window;
        }
        if let Some(n) = file.min_categories {
            if n == 0 {
                return Err(ToolError::InvalidConfig(
                    "min_categories must be at least 1".into(),
                ));
            }
            config.policy = HeaderPolicy::MinCategories(n);
        }
        if let Some(len) = file.min_description_len {
            config.min_description_len = len;
        }
        Ok(config)
    }
}
