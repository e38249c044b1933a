//! seqalign core library
//!
//! Needleman-Wunsch global alignment over the A/G/C/T alphabet, FASTA
//! loading and exact-match k-mer seeding for dot plots.

pub mod alphabet;
pub mod scoring;
pub mod matrix;
pub mod align;
pub mod traceback;
pub mod io;
pub mod seed;

// Re-export commonly used types and functions
pub use alphabet::{Alphabet, GAP};
pub use scoring::{ScoringScheme, ScoringPreset};
pub use matrix::DpMatrix;
pub use align::{AlignError, AlignResult, DpTables, NeedlemanWunsch, Pointer, SequenceSide};
pub use traceback::{reconstruct, Alignment, AlignmentStats, EditOp};
pub use io::fasta::{load_sequence, FastaError, Sequence};
pub use seed::{DiagonalBand, Hit, KmerIndex, SeedError};

/// Version information for the seqalign core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
