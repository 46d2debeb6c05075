use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Remove duplicate read pairs from interleaved SAM lines (e.g. `samtools view` output)
    Dedup {
        /// Input SAM text, optionally compressed (default: stdin)
        input: Option<PathBuf>,

        /// Output file for the duplicate report (default: dedup.report.txt)
        #[arg(short = 'r', long = "report")]
        report_file: Option<PathBuf>,

        /// Also write the final counts as JSON to this file
        #[arg(long = "stats-json")]
        stats_json: Option<PathBuf>,

        /// Do not show a progress spinner
        #[arg(short, long)]
        quiet: bool,
    },

    /// Align HB-seq read 1 against read 2, treating bisulfite T/C and G/A as matches
    Align {
        /// Lines of `name seq1 seq2` (default: stdin)
        input: Option<PathBuf>,
    },
}
