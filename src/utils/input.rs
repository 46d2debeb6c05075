use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

const READ_BUFFER_SIZE: usize = 4 * 1024 * 1024;
/// Bytes needed to recognise any supported compression magic number.
const MAGIC_LEN: usize = 5;

/// Opens `path` for line reading, or standard input when `path` is `None` or `-`.
///
/// Compressed input is detected from its magic bytes and decoded on the fly.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    let raw: Box<dyn Read> = match path {
        Some(p) if p != Path::new("-") => Box::new(
            File::open(p).with_context(|| format!("Failed to open input {}", p.display()))?,
        ),
        _ => Box::new(io::stdin()),
    };

    let mut buffered = BufReader::with_capacity(READ_BUFFER_SIZE, raw);
    // Too short to be compressed; let the record parser report what is wrong with it.
    if buffered.fill_buf().context("Failed to read input")?.len() < MAGIC_LEN {
        return Ok(Box::new(buffered));
    }

    let (inner_reader, compression) = niffler::get_reader(Box::new(buffered))
        .context("Failed to detect input compression")?;
    log::debug!("Input compression: {:?}", compression);

    Ok(Box::new(BufReader::with_capacity(
        READ_BUFFER_SIZE,
        inner_reader,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dedup::PairReader;
    use crate::error::DedupError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_open_plain_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"line one\nline two\n").unwrap();

        let reader = open_input(Some(file.path())).unwrap();
        let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
        assert_eq!(lines, vec!["line one", "line two"]);
    }

    #[test]
    fn test_open_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let mut reader = open_input(Some(file.path())).unwrap();
        let mut buf = Vec::new();
        assert_eq!(reader.read_until(b'\n', &mut buf).unwrap(), 0);
    }

    #[test]
    fn test_short_input_reaches_the_pair_reader() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"a b\n").unwrap();

        let reader = open_input(Some(file.path())).unwrap();
        let mut pairs = PairReader::new(reader);
        match pairs.next_pair(&mut std::io::sink()) {
            Err(DedupError::UnpairedRecord { line }) => assert_eq!(line, 1),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an unpaired record"),
        }
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = match open_input(Some(Path::new("/no/such/input.sam"))) {
            Ok(_) => panic!("expected an error"),
            Err(e) => e,
        };
        assert!(format!("{err:#}").contains("/no/such/input.sam"));
    }
}
