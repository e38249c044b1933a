//! Exact-match k-mer seeding for dot plots
//!
//! Every k-mer of the first sequence is indexed by its position; the k-mers
//! of the second sequence are then looked up to produce position-pair hits.
//! A [`DiagonalBand`] scores how many hits fall near the expected diagonal.

use serde::{Deserialize, Serialize};

pub mod band;
pub mod kmer;

pub use band::DiagonalBand;
pub use kmer::{find_hits, KmerIndex};

/// Default k-mer length for dot plots
pub const DEFAULT_KMER_LEN: usize = 30;

/// A shared k-mer occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hit {
    /// Start of the k-mer in seq2 (plot x axis)
    pub seq2_pos: usize,
    /// Start of the k-mer in seq1 (plot y axis)
    pub seq1_pos: usize,
}

impl Hit {
    pub fn new(seq2_pos: usize, seq1_pos: usize) -> Self {
        Self { seq2_pos, seq1_pos }
    }
}

/// Result type for seeding operations
pub type SeedResult<T> = Result<T, SeedError>;

/// Errors that can occur during seeding
#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),
}
