use crate::config::Config;
use crate::dedup::{DedupStats, Deduplicator, PairReader};
use crate::utils::input::open_input;
use crate::utils::progress_bar_builder::ProgressBarBuilder;
use anyhow::{Context, Result};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

/// Settings for one deduplication run.
#[derive(Debug, Clone)]
pub struct DedupOptions {
    pub report_path: PathBuf,
    pub stats_json: Option<PathBuf>,
    pub progress_interval: u64,
    pub quiet: bool,
}

impl DedupOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            report_path: config.report_path.clone(),
            stats_json: None,
            progress_interval: config.progress_interval,
            quiet: false,
        }
    }
}

/// Filters duplicate pairs from `input` into `out`, then writes the report.
///
/// Nothing is written to the report path unless the whole input was consumed.
pub fn dedup_stream<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    options: &DedupOptions,
) -> Result<DedupStats> {
    let progress = ProgressBarBuilder::new("Deduplicating read pairs...")
        .with_template("{spinner:.green} [{elapsed_precise}] {msg}")
        .with_tick()
        .hidden(options.quiet)
        .build()?;

    let mut reader = PairReader::new(input);
    let mut dedup = Deduplicator::new();
    let interval = options.progress_interval.max(1);

    let result = dedup.run(&mut reader, out, |d| {
        if d.total() % interval == 0 {
            progress.set_message(format!(
                "Processed {} pairs, {} duplicates",
                d.total(),
                d.duplicates()
            ));
        }
    });
    if let Err(e) = result {
        progress.abandon_with_message(format!(
            "Deduplication failed after {} input lines",
            reader.lines_read()
        ));
        return Err(e).context("Failed to deduplicate input");
    }
    out.flush().context("Failed to flush output")?;

    if reader.header_lines() > 0 {
        log::debug!("Passed through {} header lines", reader.header_lines());
    }

    let stats = dedup.finalize();
    stats.write_report(&options.report_path).with_context(|| {
        format!(
            "Failed to write report to {}",
            options.report_path.display()
        )
    })?;

    if let Some(json_path) = &options.stats_json {
        stats
            .write_json(json_path)
            .with_context(|| format!("Failed to write statistics to {}", json_path.display()))?;
    }

    progress.finish_with_message(format!(
        "Kept {} of {} pairs",
        stats.kept_pairs, stats.total_pairs
    ));
    log::info!(
        "Processed {} pairs: {} duplicates ({:.2}%), report written to {}",
        stats.total_pairs,
        stats.duplicate_pairs,
        stats.duplicate_percent,
        options.report_path.display()
    );

    Ok(stats)
}

pub fn run(
    input: Option<PathBuf>,
    report_file: Option<PathBuf>,
    stats_json: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let config = Config::load();
    let mut options = DedupOptions::from_config(&config);
    if let Some(report_path) = report_file {
        options.report_path = report_path;
    }
    options.stats_json = stats_json;
    options.quiet = quiet;

    let reader = open_input(input.as_deref())?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    dedup_stream(reader, &mut writer, &options)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn options(report_path: PathBuf) -> DedupOptions {
        DedupOptions {
            report_path,
            stats_json: None,
            progress_interval: 1,
            quiet: true,
        }
    }

    #[test]
    fn test_from_config() {
        let options = DedupOptions::from_config(&Config::default());
        assert_eq!(options.report_path, PathBuf::from("dedup.report.txt"));
        assert_eq!(options.progress_interval, 100_000);
        assert!(options.stats_json.is_none());
    }

    #[test]
    fn test_failed_run_leaves_no_report() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("dedup.report.txt");
        let input = Cursor::new(&b"r1\t0\tchr1\t1\t60\t4M\t=\t1\t0\tACGT\tIIII\n"[..]);
        let mut out: Vec<u8> = Vec::new();

        let err = dedup_stream(input, &mut out, &options(report.clone())).unwrap_err();
        assert!(format!("{err:#}").contains("line 1"));
        assert!(!report.exists());
    }
}
