pub mod align;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dedup;
pub mod error;
pub mod utils;

pub use dedup::{DedupStats, Deduplicator, PairReader, PairStatus};
pub use error::{DedupError, DedupResult};
