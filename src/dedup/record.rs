use crate::error::{DedupError, DedupResult};

/// Zero-based position of the FLAG column.
pub const FLAG_FIELD: usize = 1;
/// Zero-based position of the SEQ column.
pub const SEQ_FIELD: usize = 9;
/// Minimum number of columns a record needs for SEQ to be present.
pub const MIN_FIELDS: usize = SEQ_FIELD + 1;

/// Flag value for which mate order is kept as read.
pub const FORWARD_FLAG: &[u8] = b"0";

/// One raw SAM line, with the 1-based line number it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    pub bytes: Vec<u8>,
    pub line: u64,
}

impl RawLine {
    pub fn new(bytes: impl Into<Vec<u8>>, line: u64) -> Self {
        Self {
            bytes: bytes.into(),
            line,
        }
    }
}

/// Two consecutive records, mate 1 followed by mate 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadPair {
    pub r1: RawLine,
    pub r2: RawLine,
}

/// The columns of a record the deduplicator looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub flag: &'a [u8],
    pub sequence: &'a [u8],
}

impl<'a> Record<'a> {
    /// Splits `line` on runs of ASCII whitespace and picks out FLAG and SEQ.
    pub fn parse(line: &'a [u8], line_no: u64) -> DedupResult<Self> {
        let mut flag = None;
        let mut sequence = None;
        let mut found = 0;

        for (i, field) in fields(line).enumerate() {
            match i {
                FLAG_FIELD => flag = Some(field),
                SEQ_FIELD => sequence = Some(field),
                _ => {}
            }
            found = i + 1;
            if i == SEQ_FIELD {
                break;
            }
        }

        match (flag, sequence) {
            (Some(flag), Some(sequence)) => Ok(Record { flag, sequence }),
            _ => Err(DedupError::MissingField {
                line: line_no,
                expected: MIN_FIELDS,
                found,
            }),
        }
    }

    pub fn is_forward(&self) -> bool {
        self.flag == FORWARD_FLAG
    }
}

/// ASCII whitespace plus vertical tab and the information separators `\x1c`..`\x1f`.
pub(crate) fn is_field_separator(b: u8) -> bool {
    b.is_ascii_whitespace() || b == 0x0b || (0x1c..=0x1f).contains(&b)
}

/// Splits `line` on runs of separator bytes.
pub(crate) fn fields(line: &[u8]) -> impl Iterator<Item = &[u8]> {
    line.split(|&b| is_field_separator(b))
        .filter(|field| !field.is_empty())
}

/// Concatenates both mates' sequences, ordered by the first mate's flag.
///
/// A flag of exactly `"0"` keeps `(seq1, seq2)`; any other value swaps them,
/// so a pair emitted with its mates exchanged produces the same key.
pub fn combined_key(flag: &[u8], seq1: &[u8], seq2: &[u8]) -> Vec<u8> {
    let (first, second) = if flag == FORWARD_FLAG {
        (seq1, seq2)
    } else {
        (seq2, seq1)
    };

    let mut key = Vec::with_capacity(first.len() + second.len());
    key.extend_from_slice(first);
    key.extend_from_slice(second);
    key
}

impl ReadPair {
    /// Parses both mates and builds the pair's combined key.
    pub fn key(&self) -> DedupResult<Vec<u8>> {
        let r1 = Record::parse(&self.r1.bytes, self.r1.line)?;
        let r2 = Record::parse(&self.r2.bytes, self.r2.line)?;
        Ok(combined_key(r1.flag, r1.sequence, r2.sequence))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const R1: &[u8] = b"read1\t0\tchr1\t100\t60\t4M\t=\t200\t104\tACGT\tIIII\n";

    #[test]
    fn test_parse_extracts_flag_and_sequence() {
        let record = Record::parse(R1, 1).unwrap();
        assert_eq!(record.flag, b"0");
        assert_eq!(record.sequence, b"ACGT");
        assert!(record.is_forward());
    }

    #[test]
    fn test_parse_accepts_mixed_whitespace() {
        let line = b"read1  16 chr1\t100 60 4M = 200   104 TTAA IIII\r\n";
        let record = Record::parse(line, 7).unwrap();
        assert_eq!(record.flag, b"16");
        assert_eq!(record.sequence, b"TTAA");
        assert!(!record.is_forward());
    }

    #[test]
    fn test_parse_exactly_ten_fields() {
        let line = b"r 0 c 1 60 4M * 0 0 GGCC\n";
        let record = Record::parse(line, 1).unwrap();
        assert_eq!(record.sequence, b"GGCC");
    }

    #[test]
    fn test_parse_short_line_reports_line_and_count() {
        let err = Record::parse(b"read1\t0\tchr1\n", 42).unwrap_err();
        match err {
            DedupError::MissingField {
                line,
                expected,
                found,
            } => {
                assert_eq!(line, 42);
                assert_eq!(expected, 10);
                assert_eq!(found, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_parse_empty_line() {
        let err = Record::parse(b"\n", 3).unwrap_err();
        assert!(matches!(
            err,
            DedupError::MissingField {
                line: 3,
                found: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_vertical_tab_and_separators_split_fields() {
        let record = Record::parse(b"r\x0b0 c 1 60 4M * 0 0 AC\x0bGT\n", 1).unwrap();
        assert_eq!(record.flag, b"0");
        assert_eq!(record.sequence, b"AC");

        let record = Record::parse(b"r\x1f16\x0cc 1 60 4M * 0 0 GGCC\n", 1).unwrap();
        assert_eq!(record.flag, b"16");
        assert_eq!(record.sequence, b"GGCC");
    }

    #[test]
    fn test_flag_must_match_literally() {
        // "00" is numerically zero but is not the literal "0".
        assert_eq!(combined_key(b"00", b"AA", b"CC"), b"CCAA".to_vec());
        assert_eq!(combined_key(b"0", b"AA", b"CC"), b"AACC".to_vec());
    }

    #[test]
    fn test_key_ordering() {
        let cases: [(&[u8], &[u8]); 3] = [
            (&b"ACGT"[..], &b"TTTT"[..]),
            (&b""[..], &b"G"[..]),
            (&b"NNN"[..], &b"NNN"[..]),
        ];
        for (a, b) in cases {
            let mut forward = a.to_vec();
            forward.extend_from_slice(b);
            let mut reverse = b.to_vec();
            reverse.extend_from_slice(a);

            assert_eq!(combined_key(b"0", a, b), forward);
            assert_eq!(combined_key(b"16", a, b), reverse);
            assert_eq!(combined_key(b"83", a, b), reverse);
        }
    }

    #[test]
    fn test_key_symmetric_under_mate_swap() {
        let (a, b) = (&b"ACGTAC"[..], &b"GGTTAA"[..]);
        assert_eq!(combined_key(b"0", a, b), combined_key(b"16", b, a));
    }
}
