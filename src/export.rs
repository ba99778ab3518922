use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::csv::ensure_csv_filename;

/// Write CSV text under `out_dir`, normalizing the filename to a `.csv`
/// suffix. Returns the full path written.
pub fn write_export(out_dir: &Path, filename: &str, contents: &str) -> anyhow::Result<PathBuf> {
    let out = out_dir.join(ensure_csv_filename(filename));
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create export dir {}", out_dir.display()))?;
    std::fs::write(&out, contents)
        .with_context(|| format!("write export file {}", out.display()))?;
    Ok(out)
}
