//! Sequence file I/O
//!
//! FASTA ingestion for the aligner and the seed indexer.

pub mod fasta;

pub use fasta::{load_sequence, FastaError, FastaParser, Sequence};
