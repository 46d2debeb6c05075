//! Duplicate removal for interleaved paired-end SAM records.
//!
//! Pairs are keyed by both mates' sequences, ordered by the first mate's
//! FLAG so a pair written with its mates exchanged collapses onto the same
//! key. Every key seen during a run is kept in memory until the run ends.

pub mod pair_reader;
pub mod record;
pub mod report;

pub use pair_reader::PairReader;
pub use record::{combined_key, RawLine, ReadPair, Record};
pub use report::{DedupStats, DEFAULT_REPORT_PATH};

use crate::error::DedupResult;
use seahash::SeaHasher;
use std::collections::HashSet;
use std::hash::BuildHasherDefault;
use std::io::{BufRead, Write};

type KeySet = HashSet<Vec<u8>, BuildHasherDefault<SeaHasher>>;

/// Outcome of processing one pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairStatus {
    Kept,
    Duplicate,
}

/// Tracks every combined key seen so far and filters repeated pairs.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: KeySet,
    total: u64,
    dup: u64,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pairs processed so far.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Pairs discarded as duplicates so far.
    pub fn duplicates(&self) -> u64 {
        self.dup
    }

    /// Pairs written to the output so far.
    pub fn kept(&self) -> u64 {
        self.seen.len() as u64
    }

    /// Classifies one pair, writing both mates verbatim to `out` if its key is new.
    ///
    /// A pair with a mate missing its FLAG or SEQ column leaves the counters untouched.
    pub fn process_pair<W: Write>(
        &mut self,
        pair: &ReadPair,
        out: &mut W,
    ) -> DedupResult<PairStatus> {
        let key = pair.key()?;
        self.total += 1;

        if self.seen.contains(&key) {
            self.dup += 1;
            return Ok(PairStatus::Duplicate);
        }

        self.seen.insert(key);
        out.write_all(&pair.r1.bytes)?;
        out.write_all(&pair.r2.bytes)?;
        Ok(PairStatus::Kept)
    }

    /// Drains `reader`, writing header lines and kept pairs to `out`.
    ///
    /// `on_pair` is called after every processed pair with the running deduplicator.
    pub fn run<R, W, F>(
        &mut self,
        reader: &mut PairReader<R>,
        out: &mut W,
        mut on_pair: F,
    ) -> DedupResult<()>
    where
        R: BufRead,
        W: Write,
        F: FnMut(&Deduplicator),
    {
        while let Some(pair) = reader.next_pair(out)? {
            self.process_pair(&pair, out)?;
            on_pair(&*self);
        }
        Ok(())
    }

    /// Ends the run and returns the final counters.
    pub fn finalize(self) -> DedupStats {
        DedupStats::new(self.total, self.dup)
    }
}
