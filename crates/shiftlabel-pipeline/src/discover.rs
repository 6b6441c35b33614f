//! Input file discovery.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::PipelineError;

/// Marker in the name of the combined multi-asset table, which is never a
/// per-asset input.
const COMBINED_MARKER: &str = "full_data";

/// Lists the per-asset CSV files of `dir`, sorted by path.
///
/// Only regular files with a `.csv` extension (any case) are returned.
/// Files whose name contains `full_data` are skipped.
///
/// # Errors
///
/// Returns [`PipelineError::Io`] if the directory cannot be read.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, PipelineError> {
    let entries = std::fs::read_dir(dir).map_err(|e| PipelineError::io(dir, e))?;

    let mut inputs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| PipelineError::io(dir, e))?.path();
        let is_csv = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if !is_csv || !path.is_file() {
            continue;
        }
        if path
            .file_name()
            .is_some_and(|name| name.to_string_lossy().contains(COMBINED_MARKER))
        {
            debug!(path = %path.display(), "skipping combined table");
            continue;
        }
        inputs.push(path);
    }
    inputs.sort();

    debug!(dir = %dir.display(), count = inputs.len(), "discovered input files");
    Ok(inputs)
}

/// Asset identifier of an input file: its file stem.
#[must_use]
pub fn asset_id(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
