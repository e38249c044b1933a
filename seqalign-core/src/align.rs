//! Needleman-Wunsch cost-minimising global alignment
//!
//! The engine fills a score matrix `F` and a pointer matrix `TB` in lock-step.
//! Each interior cell takes the cheapest of three moves; ties are broken
//! diagonal first, then vertical gap, then horizontal gap, so exactly one
//! optimal path is recorded. The engine does not log and never retries.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::alphabet::Alphabet;
use crate::matrix::DpMatrix;
use crate::scoring::ScoringScheme;
use crate::traceback::{reconstruct, Alignment};

/// Which recurrence branch produced a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pointer {
    /// Origin cell (0, 0) only
    None,
    /// Substitution or match step
    Diagonal,
    /// Consumes a seq1 symbol, gap in seq2
    VerticalGap,
    /// Consumes a seq2 symbol, gap in seq1
    HorizontalGap,
}

/// Identifies one of the two input sequences in error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SequenceSide {
    First,
    Second,
}

impl fmt::Display for SequenceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceSide::First => write!(f, "seq1"),
            SequenceSide::Second => write!(f, "seq2"),
        }
    }
}

/// Errors that can occur during alignment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AlignError {
    #[error("Invalid symbol {} at position {position} of {sequence}", describe_byte(.symbol))]
    InvalidSymbol {
        sequence: SequenceSide,
        /// The offending byte, not necessarily a whole character
        symbol: u8,
        /// Byte offset into the sequence
        position: usize,
    },

    #[error("Internal consistency error at cell ({row}, {col}): {detail}")]
    InternalConsistency {
        row: usize,
        col: usize,
        detail: String,
    },

    #[error("Invalid scoring: {0}")]
    InvalidScoring(String),
}

/// Quote ASCII bytes as characters, anything else as `\xNN`
fn describe_byte(byte: &u8) -> String {
    if byte.is_ascii() {
        format!("{:?}", *byte as char)
    } else {
        format!("'\\x{:02X}'", byte)
    }
}

/// Result type for alignment operations
pub type AlignResult<T> = Result<T, AlignError>;

/// Filled score and pointer matrices for one alignment call
#[derive(Debug, Clone)]
pub struct DpTables {
    /// Optimal total cost, `F[m][n]`
    pub score: i64,
    /// Score matrix `F`
    pub scores: DpMatrix<i64>,
    /// Pointer matrix `TB`
    pub pointers: DpMatrix<Pointer>,
}

/// Global aligner bound to one scoring scheme
#[derive(Debug, Clone, Default)]
pub struct NeedlemanWunsch {
    scheme: ScoringScheme,
}

impl NeedlemanWunsch {
    pub fn new(scheme: ScoringScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> &ScoringScheme {
        &self.scheme
    }

    /// Fill the full score and pointer matrices.
    ///
    /// Both sequences are validated before anything is allocated; the first
    /// unrecognised symbol (seq1 before seq2) fails the whole call.
    pub fn fill(&self, seq1: &[u8], seq2: &[u8]) -> AlignResult<DpTables> {
        let (a, b) = encode_pair(seq1, seq2)?;
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let gap = self.scheme.gap_cost() as i64;

        let mut scores = DpMatrix::new(rows, cols, 0i64);
        let mut pointers = DpMatrix::new(rows, cols, Pointer::None);

        for i in 1..rows {
            scores.set(i, 0, i as i64 * gap);
            pointers.set(i, 0, Pointer::VerticalGap);
        }
        for j in 1..cols {
            scores.set(0, j, j as i64 * gap);
            pointers.set(0, j, Pointer::HorizontalGap);
        }

        for j in 1..cols {
            for i in 1..rows {
                let vertical = scores.get(i - 1, j) + gap;
                let horizontal = scores.get(i, j - 1) + gap;
                let diagonal =
                    scores.get(i - 1, j - 1) + self.scheme.substitution(a[i - 1], b[j - 1]) as i64;

                let best = diagonal.min(vertical).min(horizontal);
                let pointer = select_pointer(best, diagonal, vertical, horizontal).ok_or_else(|| {
                    AlignError::InternalConsistency {
                        row: i,
                        col: j,
                        detail: format!(
                            "minimum {} matches no branch (diagonal {}, vertical {}, horizontal {})",
                            best, diagonal, vertical, horizontal
                        ),
                    }
                })?;

                scores.set(i, j, best);
                pointers.set(i, j, pointer);
            }
        }

        Ok(DpTables {
            score: scores.get(rows - 1, cols - 1),
            scores,
            pointers,
        })
    }

    /// Optimal cost only, using two rolling rows over the shorter sequence.
    pub fn score(&self, seq1: &[u8], seq2: &[u8]) -> AlignResult<i64> {
        let (a, b) = encode_pair(seq1, seq2)?;
        let gap = self.scheme.gap_cost() as i64;
        let scheme = &self.scheme;

        let score = if b.len() <= a.len() {
            rolling_score(&a, &b, gap, |x, y| scheme.substitution(x, y) as i64)
        } else {
            // Outer loop walks seq2, so the closure sees (seq2 symbol, seq1 symbol)
            rolling_score(&b, &a, gap, |y, x| scheme.substitution(x, y) as i64)
        };

        Ok(score)
    }

    /// Fill the matrices and reconstruct the tie-break-selected optimal alignment
    pub fn align(&self, seq1: &[u8], seq2: &[u8]) -> AlignResult<Alignment> {
        let tables = self.fill(seq1, seq2)?;
        let (aligned1, aligned2) = reconstruct(seq1, seq2, &tables.pointers)?;
        Ok(Alignment::new(tables.score, aligned1, aligned2))
    }
}

/// Apply the diagonal > vertical > horizontal tie-break.
///
/// Returns `None` only if `best` equals none of the candidates.
pub(crate) fn select_pointer(best: i64, diagonal: i64, vertical: i64, horizontal: i64) -> Option<Pointer> {
    if best == diagonal {
        Some(Pointer::Diagonal)
    } else if best == vertical {
        Some(Pointer::VerticalGap)
    } else if best == horizontal {
        Some(Pointer::HorizontalGap)
    } else {
        None
    }
}

fn encode_pair(seq1: &[u8], seq2: &[u8]) -> AlignResult<(Vec<usize>, Vec<usize>)> {
    let a = Alphabet::encode_all(seq1).map_err(|(position, symbol)| AlignError::InvalidSymbol {
        sequence: SequenceSide::First,
        symbol,
        position,
    })?;
    let b = Alphabet::encode_all(seq2).map_err(|(position, symbol)| AlignError::InvalidSymbol {
        sequence: SequenceSide::Second,
        symbol,
        position,
    })?;
    Ok((a, b))
}

fn rolling_score(outer: &[usize], inner: &[usize], gap: i64, cost: impl Fn(usize, usize) -> i64) -> i64 {
    let mut prev: Vec<i64> = (0..=inner.len()).map(|k| k as i64 * gap).collect();
    let mut cur = vec![0i64; inner.len() + 1];

    for (o, &x) in outer.iter().enumerate() {
        cur[0] = (o as i64 + 1) * gap;
        for (k, &y) in inner.iter().enumerate() {
            let diagonal = prev[k] + cost(x, y);
            let from_prev = prev[k + 1] + gap;
            let from_cur = cur[k] + gap;
            cur[k + 1] = diagonal.min(from_prev).min(from_cur);
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    prev[inner.len()]
}
