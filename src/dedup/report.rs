use crate::error::DedupResult;
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Default location of the duplicate report, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "dedup.report.txt";

/// Mode requested for report files, before the process umask is applied.
#[cfg(unix)]
const REPORT_FILE_MODE: u32 = 0o644;

/// Final counters of a deduplication run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DedupStats {
    pub total_pairs: u64,
    pub duplicate_pairs: u64,
    pub kept_pairs: u64,
    pub duplicate_percent: f64,
}

impl DedupStats {
    /// Builds the final counters. An empty run reports 0% duplicates.
    pub fn new(total_pairs: u64, duplicate_pairs: u64) -> Self {
        let duplicate_percent = if total_pairs == 0 {
            0.0
        } else {
            duplicate_pairs as f64 / total_pairs as f64 * 100.0
        };

        Self {
            total_pairs,
            duplicate_pairs,
            kept_pairs: total_pairs - duplicate_pairs,
            duplicate_percent,
        }
    }

    /// The two-line plain text report.
    pub fn render(&self) -> String {
        format!(
            "Total reads:\t{}\nDuplicates:\t{} ({:.6}%)\n",
            self.total_pairs, self.duplicate_pairs, self.duplicate_percent
        )
    }

    pub fn write_report(&self, path: &Path) -> DedupResult<()> {
        write_atomically(path, self.render().as_bytes())
    }

    pub fn write_json(&self, path: &Path) -> DedupResult<()> {
        let mut json = serde_json::to_vec_pretty(self)?;
        json.push(b'\n');
        write_atomically(path, &json)
    }
}

/// Writes `contents` to a temporary file next to `path`, then renames it into place.
pub fn write_atomically(path: &Path, contents: &[u8]) -> DedupResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut builder = tempfile::Builder::new();
    builder.prefix(".hbs-tools");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(REPORT_FILE_MODE));
    }

    let mut tmp = builder.tempfile_in(&dir)?;
    tmp.write_all(contents)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
