//! Nucleotide alphabet codec
//!
//! Maps the four recognised symbols to matrix indices. The index order is
//! A, G, C, T, which is also the row/column order of every cost table.

/// Gap marker emitted in aligned strings
pub const GAP: u8 = b'-';

/// The fixed four-letter alphabet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Alphabet;

impl Alphabet {
    /// Symbols in index order
    pub const SYMBOLS: [u8; 4] = [b'A', b'G', b'C', b'T'];

    /// Number of symbols
    pub const SIZE: usize = 4;

    /// Encode a symbol to its index, `None` for anything outside the alphabet.
    ///
    /// Symbols are expected upper-case; case folding belongs to ingestion.
    #[inline]
    pub fn encode(symbol: u8) -> Option<usize> {
        match symbol {
            b'A' => Some(0),
            b'G' => Some(1),
            b'C' => Some(2),
            b'T' => Some(3),
            _ => None,
        }
    }

    /// Encode a whole sequence, failing on the first unrecognised symbol
    pub fn encode_all(sequence: &[u8]) -> Result<Vec<usize>, (usize, u8)> {
        sequence
            .iter()
            .enumerate()
            .map(|(i, &b)| Self::encode(b).ok_or((i, b)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_in_index_order() {
        for (i, &s) in Alphabet::SYMBOLS.iter().enumerate() {
            assert_eq!(Alphabet::encode(s), Some(i));
        }
    }

    #[test]
    fn test_rejects_other_symbols() {
        for b in [b'N', b'a', b'U', GAP, b' '] {
            assert_eq!(Alphabet::encode(b), None);
        }
    }

    #[test]
    fn test_encode_all() {
        assert_eq!(Alphabet::encode_all(b"TCGA"), Ok(vec![3, 2, 1, 0]));
        assert_eq!(Alphabet::encode_all(b"TCxA"), Err((2, b'x')));
    }
}
