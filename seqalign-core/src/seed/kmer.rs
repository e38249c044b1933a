//! Hash-based k-mer index
//!
//! Keys are the raw k-mer bytes, so hits are exact substring matches on the
//! forward strand.

use std::collections::HashMap;

use super::{Hit, SeedError, SeedResult};

/// Positions of every k-mer in one sequence
pub struct KmerIndex<'a> {
    k: usize,
    table: HashMap<&'a [u8], Vec<usize>>,
}

impl<'a> KmerIndex<'a> {
    /// Index all `len - k + 1` k-mers of `sequence`
    pub fn build(sequence: &'a [u8], k: usize) -> SeedResult<Self> {
        if k == 0 {
            return Err(SeedError::InvalidParams("k-mer length must be at least 1".to_string()));
        }

        let mut table: HashMap<&'a [u8], Vec<usize>> = HashMap::new();
        for (pos, kmer) in sequence.windows(k).enumerate() {
            table.entry(kmer).or_default().push(pos);
        }

        log::debug!(
            "Indexed {} distinct {}-mers from {} bp",
            table.len(),
            k,
            sequence.len()
        );
        Ok(Self { k, table })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of distinct k-mers
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Ascending positions of `kmer`, empty if absent
    pub fn positions(&self, kmer: &[u8]) -> &[usize] {
        self.table.get(kmer).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up every k-mer of `query`.
    ///
    /// Hits come out ordered by query position, then indexed position.
    pub fn find_hits(&self, query: &[u8]) -> Vec<Hit> {
        let mut hits = Vec::new();
        for (qpos, kmer) in query.windows(self.k).enumerate() {
            hits.extend(self.positions(kmer).iter().map(|&tpos| Hit::new(qpos, tpos)));
        }

        log::debug!("Found {} hits for {} bp query", hits.len(), query.len());
        hits
    }
}

/// Index `seq1` and report every seq2 k-mer that recurs in it
pub fn find_hits(seq1: &[u8], seq2: &[u8], k: usize) -> SeedResult<Vec<Hit>> {
    Ok(KmerIndex::build(seq1, k)?.find_hits(seq2))
}
