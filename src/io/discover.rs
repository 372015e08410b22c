use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::model::SPREADSHEET_EXTENSIONS;

/// Lists the spreadsheet files directly under `dir`, sorted by path so
/// batches always process in the same order. Office lock files (`~$`
/// prefix) are skipped.
pub fn spreadsheet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if name.starts_with("~$") {
            continue;
        }
        let Some(extension) = path.extension().and_then(|extension| extension.to_str()) else {
            continue;
        };
        if SPREADSHEET_EXTENSIONS
            .iter()
            .any(|known| extension.eq_ignore_ascii_case(known))
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
