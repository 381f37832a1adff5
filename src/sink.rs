// =============================================================================
// Snapshot sink — dated JSON file output with atomic write
// =============================================================================

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::snapshot::PriceDocument;

/// Write `doc` to `<outdir>/<date>.json` and return the final path.
///
/// The output directory is created if missing. The write is atomic (tmp
/// sibling + rename) so a crash mid-write never leaves a truncated document
/// behind for downstream readers.
pub fn write_snapshot(doc: &PriceDocument, outdir: &Path, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(outdir)
        .with_context(|| format!("failed to create output dir {}", outdir.display()))?;

    let path = outdir.join(format!("{}.json", date.format("%Y-%m-%d")));

    let content = serde_json::to_string(doc)
        .context("failed to serialise snapshot document to JSON")?;

    let tmp_path = path.with_extension("json.tmp");

    std::fs::write(&tmp_path, &content)
        .with_context(|| format!("failed to write tmp snapshot to {}", tmp_path.display()))?;

    std::fs::rename(&tmp_path, &path)
        .with_context(|| format!("failed to rename tmp snapshot to {}", path.display()))?;

    info!(
        path = %path.display(),
        series = doc.series.len(),
        "snapshot written (atomic)"
    );
    Ok(path)
}
