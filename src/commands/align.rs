use crate::align::{needleman_wunsch, BisulfiteScoring};
use crate::dedup::record::fields;
use crate::error::{DedupError, DedupResult};
use crate::utils::input::open_input;
use anyhow::{Context, Result};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::PathBuf;

const ALIGN_FIELDS: usize = 3;

/// Aligns every `name seq1 seq2` line of `input`, writing `name\taligned1\taligned2`.
///
/// Columns after the third are ignored. Returns the number of lines aligned.
pub fn align_stream<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    scoring: &BisulfiteScoring,
) -> DedupResult<u64> {
    let mut aligned = 0;

    for (idx, line) in input.split(b'\n').enumerate() {
        let line = line?;
        let mut cols = fields(&line);
        let (name, seq1, seq2) = match (cols.next(), cols.next(), cols.next()) {
            (Some(name), Some(seq1), Some(seq2)) => (name, seq1, seq2),
            (a, b, _) => {
                return Err(DedupError::MissingField {
                    line: idx as u64 + 1,
                    expected: ALIGN_FIELDS,
                    found: usize::from(a.is_some()) + usize::from(b.is_some()),
                })
            }
        };

        let aln = needleman_wunsch(seq1, seq2, scoring);
        log::debug!(
            "{}: score {}",
            String::from_utf8_lossy(name),
            aln.score
        );

        out.write_all(name)?;
        out.write_all(b"\t")?;
        out.write_all(&aln.x)?;
        out.write_all(b"\t")?;
        out.write_all(&aln.y)?;
        out.write_all(b"\n")?;
        aligned += 1;
    }

    Ok(aligned)
}

pub fn run(input: Option<PathBuf>) -> Result<()> {
    let reader = open_input(input.as_deref())?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());

    let aligned = align_stream(reader, &mut writer, &BisulfiteScoring::default())
        .context("Failed to align read pairs")?;
    writer.flush().context("Failed to flush output")?;

    log::info!("Aligned {} read pairs", aligned);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_on(input: &str) -> DedupResult<String> {
        let mut out: Vec<u8> = Vec::new();
        align_stream(
            Cursor::new(input.as_bytes()),
            &mut out,
            &BisulfiteScoring::default(),
        )?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_aligns_each_line() {
        let out = run_on("p1\tA\tAA\np2 TTGA CCAA extra\n").unwrap();
        assert_eq!(out, "p1\tA-\tAA\np2\tTTGA\tCCAA\n");
    }

    #[test]
    fn test_last_line_without_newline() {
        assert_eq!(run_on("p1\tACGT\tACGT").unwrap(), "p1\tACGT\tACGT\n");
    }

    #[test]
    fn test_missing_sequence_reports_line() {
        match run_on("p1\tA\tA\np2\tACGT\n") {
            Err(DedupError::MissingField {
                line,
                expected,
                found,
            }) => {
                assert_eq!(line, 2);
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(run_on("").unwrap(), "");
    }
}
