//! Traceback over the pointer matrix and the resulting alignment
//!
//! Walks from `(m, n)` back to the origin following the recorded pointers,
//! which yields the single optimal alignment picked by the tie-break.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::align::{AlignError, AlignResult, Pointer};
use crate::alphabet::{Alphabet, GAP};
use crate::matrix::DpMatrix;
use crate::scoring::ScoringScheme;

/// One column of an alignment, seen from seq1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditOp {
    Match,
    Mismatch,
    /// Symbol present only in seq2 (gap in seq1)
    Insertion,
    /// Symbol present only in seq1 (gap in seq2)
    Deletion,
}

impl EditOp {
    fn cigar_code(self) -> char {
        match self {
            EditOp::Match => '=',
            EditOp::Mismatch => 'X',
            EditOp::Insertion => 'I',
            EditOp::Deletion => 'D',
        }
    }
}

/// Reconstruct the aligned pair of strings from a filled pointer matrix.
pub fn reconstruct(seq1: &[u8], seq2: &[u8], pointers: &DpMatrix<Pointer>) -> AlignResult<(String, String)> {
    if pointers.rows() != seq1.len() + 1 || pointers.cols() != seq2.len() + 1 {
        return Err(AlignError::InternalConsistency {
            row: pointers.rows(),
            col: pointers.cols(),
            detail: format!(
                "pointer matrix does not match sequence lengths {} x {}",
                seq1.len(),
                seq2.len()
            ),
        });
    }

    let capacity = seq1.len() + seq2.len();
    let mut out1 = Vec::with_capacity(capacity);
    let mut out2 = Vec::with_capacity(capacity);
    let (mut i, mut j) = (seq1.len(), seq2.len());

    loop {
        let pointer = pointers.try_get(i, j).ok_or_else(|| AlignError::InternalConsistency {
            row: i,
            col: j,
            detail: "traceback left the pointer matrix".to_string(),
        })?;
        let invalid = match pointer {
            Pointer::None => i != 0 || j != 0,
            Pointer::Diagonal => i == 0 || j == 0,
            Pointer::VerticalGap => i == 0,
            Pointer::HorizontalGap => j == 0,
        };
        if invalid {
            return Err(AlignError::InternalConsistency {
                row: i,
                col: j,
                detail: format!("pointer {:?} cannot be followed from this cell", pointer),
            });
        }

        match pointer {
            Pointer::None => break,
            Pointer::Diagonal => {
                out1.push(seq1[i - 1]);
                out2.push(seq2[j - 1]);
                i -= 1;
                j -= 1;
            }
            Pointer::VerticalGap => {
                out1.push(seq1[i - 1]);
                out2.push(GAP);
                i -= 1;
            }
            Pointer::HorizontalGap => {
                out1.push(GAP);
                out2.push(seq2[j - 1]);
                j -= 1;
            }
        }
    }

    // Built back to front
    let aligned1 = out1.into_iter().rev().map(char::from).collect();
    let aligned2 = out2.into_iter().rev().map(char::from).collect();
    Ok((aligned1, aligned2))
}

/// Summary counts over alignment columns
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignmentStats {
    pub length: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub gaps: usize,
    /// Percentage of columns that are identical symbols
    pub identity: f64,
}

/// An optimal global alignment and its total cost
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alignment {
    score: i64,
    aligned1: String,
    aligned2: String,
}

impl Alignment {
    pub fn new(score: i64, aligned1: String, aligned2: String) -> Self {
        Self { score, aligned1, aligned2 }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn aligned1(&self) -> &str {
        &self.aligned1
    }

    pub fn aligned2(&self) -> &str {
        &self.aligned2
    }

    pub fn len(&self) -> usize {
        self.aligned1.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned1.is_empty()
    }

    /// Column pairs `(seq1 symbol, seq2 symbol)`, gaps as `-`
    pub fn columns(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.aligned1.bytes().zip(self.aligned2.bytes())
    }

    /// Input sequences with gap markers removed
    pub fn ungapped(&self) -> (String, String) {
        let strip = |s: &str| s.chars().filter(|&c| c != GAP as char).collect::<String>();
        (strip(&self.aligned1), strip(&self.aligned2))
    }

    pub fn operations(&self) -> Vec<EditOp> {
        self.columns()
            .map(|(a, b)| match (a, b) {
                (GAP, _) => EditOp::Insertion,
                (_, GAP) => EditOp::Deletion,
                (a, b) if a == b => EditOp::Match,
                _ => EditOp::Mismatch,
            })
            .collect()
    }

    /// Extended CIGAR with `=`, `X`, `I` and `D` runs
    pub fn cigar(&self) -> String {
        let mut cigar = String::new();
        let ops = self.operations();
        let mut iter = ops.iter().peekable();

        while let Some(&op) = iter.next() {
            let mut run = 1;
            while iter.peek() == Some(&&op) {
                iter.next();
                run += 1;
            }
            cigar.push_str(&run.to_string());
            cigar.push(op.cigar_code());
        }

        cigar
    }

    pub fn stats(&self) -> AlignmentStats {
        let mut stats = AlignmentStats {
            length: self.len(),
            matches: 0,
            mismatches: 0,
            gaps: 0,
            identity: 0.0,
        };

        for op in self.operations() {
            match op {
                EditOp::Match => stats.matches += 1,
                EditOp::Mismatch => stats.mismatches += 1,
                EditOp::Insertion | EditOp::Deletion => stats.gaps += 1,
            }
        }

        if stats.length > 0 {
            stats.identity = stats.matches as f64 / stats.length as f64 * 100.0;
        }
        stats
    }

    /// Recompute the total cost column by column.
    ///
    /// `None` if a column holds a symbol outside the alphabet or two gaps.
    pub fn rescore(&self, scheme: &ScoringScheme) -> Option<i64> {
        let gap = scheme.gap_cost() as i64;
        self.columns().try_fold(0i64, |total, (a, b)| match (a, b) {
            (GAP, GAP) => None,
            (GAP, b) => Alphabet::encode(b).map(|_| total + gap),
            (a, GAP) => Alphabet::encode(a).map(|_| total + gap),
            (a, b) => scheme.substitution_symbols(a, b).map(|c| total + c as i64),
        })
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "{}", self.aligned1)?;
        write!(f, "{}", self.aligned2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::NeedlemanWunsch;

    fn pointers_for(seq1: &[u8], seq2: &[u8]) -> DpMatrix<Pointer> {
        NeedlemanWunsch::default().fill(seq1, seq2).unwrap().pointers
    }

    #[test]
    fn test_reconstruct_identical() {
        let (a, b) = reconstruct(b"AG", b"AG", &pointers_for(b"AG", b"AG")).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("AG", "AG"));
    }

    #[test]
    fn test_reconstruct_empty_side() {
        let (a, b) = reconstruct(b"A", b"", &pointers_for(b"A", b"")).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("A", "-"));

        let (a, b) = reconstruct(b"", b"GT", &pointers_for(b"", b"GT")).unwrap();
        assert_eq!((a.as_str(), b.as_str()), ("--", "GT"));

        let (a, b) = reconstruct(b"", b"", &pointers_for(b"", b"")).unwrap();
        assert!(a.is_empty() && b.is_empty());
    }

    #[test]
    fn test_reconstruct_insertion() {
        // A single extra base in seq2 costs one gap
        let (a, b) = reconstruct(b"ACGT", b"ACGGT", &pointers_for(b"ACGT", b"ACGGT")).unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a.matches('-').count(), 1);
        assert_eq!(b.matches('-').count(), 0);
    }

    #[test]
    fn test_reconstruct_rejects_wrong_dimensions() {
        let pointers = pointers_for(b"AG", b"AG");
        let err = reconstruct(b"AGC", b"AG", &pointers).unwrap_err();
        assert!(matches!(err, AlignError::InternalConsistency { .. }));
    }

    #[test]
    fn test_reconstruct_rejects_dangling_pointer() {
        let mut pointers = pointers_for(b"AG", b"AG");
        pointers.set(1, 1, Pointer::None);
        let err = reconstruct(b"AG", b"AG", &pointers).unwrap_err();
        assert_eq!(
            err,
            AlignError::InternalConsistency {
                row: 1,
                col: 1,
                detail: "pointer None cannot be followed from this cell".to_string(),
            }
        );

        let mut pointers = pointers_for(b"A", b"A");
        pointers.set(1, 1, Pointer::HorizontalGap);
        pointers.set(1, 0, Pointer::Diagonal);
        assert!(reconstruct(b"A", b"A", &pointers).is_err());
    }

    #[test]
    fn test_operations_and_cigar() {
        let alignment = Alignment::new(0, "AC-GTT".to_string(), "AGAGT-".to_string());
        assert_eq!(
            alignment.operations(),
            vec![
                EditOp::Match,
                EditOp::Mismatch,
                EditOp::Insertion,
                EditOp::Match,
                EditOp::Match,
                EditOp::Deletion,
            ]
        );
        assert_eq!(alignment.cigar(), "1=1X1I2=1D");
        assert_eq!(Alignment::new(0, String::new(), String::new()).cigar(), "");
    }

    #[test]
    fn test_stats() {
        let alignment = Alignment::new(0, "AC-GT".to_string(), "AGAGT".to_string());
        let stats = alignment.stats();
        assert_eq!(stats.length, 5);
        assert_eq!(stats.matches, 3);
        assert_eq!(stats.mismatches, 1);
        assert_eq!(stats.gaps, 1);
        assert!((stats.identity - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_rescore() {
        let scheme = ScoringScheme::default();
        let alignment = Alignment::new(0, "AC-GT".to_string(), "AGAGT".to_string());
        // C/G transversion 2 + gap 4
        assert_eq!(alignment.rescore(&scheme), Some(6));
        assert_eq!(Alignment::new(0, "-".to_string(), "-".to_string()).rescore(&scheme), None);
        assert_eq!(Alignment::new(0, "N".to_string(), "A".to_string()).rescore(&scheme), None);
    }

    #[test]
    fn test_ungapped_and_display() {
        let alignment = Alignment::new(6, "AC-GT".to_string(), "AGAGT".to_string());
        assert_eq!(alignment.ungapped(), ("ACGT".to_string(), "AGAGT".to_string()));
        assert_eq!(alignment.to_string(), "Score: 6\nAC-GT\nAGAGT");
    }
}
