//! Batch pipeline: discover sources, read them, normalize each one, and
//! consolidate the results.

use std::path::Path;

use tracing::{info, instrument, warn};

use crate::catalog::{Consolidated, consolidate};
use crate::config::NormalizerConfig;
use crate::error::Result;
use crate::io::{discover, excel_read};
use crate::model::{SourceDocument, WarningKind};
use crate::normalize::{NormalizedSource, normalize_source};

/// Processes every spreadsheet under `dir` into one consolidated catalog.
///
/// A source that cannot be read is recorded as a `ReadError` warning and
/// the batch continues. Only filesystem errors on the directory itself
/// abort the pass.
#[instrument(level = "info", skip_all, fields(dir = %dir.display()))]
pub fn consolidate_directory(dir: &Path, config: &NormalizerConfig) -> Result<Consolidated> {
    let files = discover::spreadsheet_files(dir)?;
    info!(source_count = files.len(), "spreadsheet sources discovered");

    let mut outcomes = Vec::with_capacity(files.len());
    for path in &files {
        let source_id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let outcome = match excel_read::read_sheet(path) {
            Ok(sheet) => normalize_source(&SourceDocument::new(source_id, sheet), config),
            Err(error) => {
                warn!(source = %source_id, %error, "source unreadable, continuing");
                NormalizedSource::from_warning(source_id, WarningKind::ReadError(error.to_string()))
            }
        };
        outcomes.push(outcome);
    }

    Ok(consolidate(outcomes))
}
