use super::record::{RawLine, ReadPair};
use crate::error::{DedupError, DedupResult};
use std::io::{BufRead, Write};

/// Reads interleaved mate lines two at a time.
///
/// SAM header lines at the top of the stream are handed to a header sink
/// instead of being paired.
pub struct PairReader<R: BufRead> {
    reader: R,
    line_no: u64,
    in_header: bool,
    header_lines: u64,
}

impl<R: BufRead> PairReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_no: 0,
            in_header: true,
            header_lines: 0,
        }
    }

    /// Number of input lines consumed so far.
    pub fn lines_read(&self) -> u64 {
        self.line_no
    }

    pub fn header_lines(&self) -> u64 {
        self.header_lines
    }

    fn read_line(&mut self) -> DedupResult<Option<RawLine>> {
        let mut buf = Vec::new();
        if self.reader.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(RawLine::new(buf, self.line_no)))
    }

    /// Returns the next mate, copying any leading header lines to `header`.
    fn next_record<W: Write>(&mut self, header: &mut W) -> DedupResult<Option<RawLine>> {
        while self.in_header {
            match self.read_line()? {
                Some(line) if line.bytes.first() == Some(&b'@') => {
                    header.write_all(&line.bytes)?;
                    self.header_lines += 1;
                }
                Some(line) => {
                    self.in_header = false;
                    return Ok(Some(line));
                }
                None => {
                    self.in_header = false;
                    return Ok(None);
                }
            }
        }

        self.read_line()
    }

    /// Reads the next mate pair.
    ///
    /// Returns `Ok(None)` at a clean end of stream and
    /// [`DedupError::UnpairedRecord`] when only one mate is left.
    pub fn next_pair<W: Write>(&mut self, header: &mut W) -> DedupResult<Option<ReadPair>> {
        let r1 = match self.next_record(header)? {
            Some(line) => line,
            None => return Ok(None),
        };

        match self.next_record(header)? {
            Some(r2) => Ok(Some(ReadPair { r1, r2 })),
            None => Err(DedupError::UnpairedRecord { line: r1.line }),
        }
    }
}
