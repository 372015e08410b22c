//! Consolidation of per-source outputs into one catalog.

use tracing::{info, instrument};

use crate::model::{Catalog, SourceWarning};
use crate::normalize::NormalizedSource;

/// Result of consolidating every source of a batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Consolidated {
    pub catalog: Catalog,
    pub warnings: Vec<SourceWarning>,
    /// Sources whose normalization raised no warning. A clean source with
    /// zero data rows still counts.
    pub sources_processed: usize,
}

/// Concatenates per-source outputs in processing order.
///
/// Nothing is deduplicated: two sources describing the same physical item
/// yield two records, because no cross-format identity is guaranteed. The
/// catalog size is exactly the sum of every source's record count, and a
/// failing source only withholds its own contribution.
#[instrument(level = "info", skip_all)]
pub fn consolidate<I>(outcomes: I) -> Consolidated
where
    I: IntoIterator<Item = NormalizedSource>,
{
    let mut consolidated = Consolidated::default();
    for outcome in outcomes {
        if outcome.warnings.is_empty() {
            consolidated.sources_processed += 1;
        }
        consolidated.catalog.records.extend(outcome.records);
        consolidated.warnings.extend(outcome.warnings);
    }
    info!(
        record_count = consolidated.catalog.len(),
        warning_count = consolidated.warnings.len(),
        sources_processed = consolidated.sources_processed,
        "catalog consolidated"
    );
    consolidated
}
