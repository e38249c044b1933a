//! Substitution costs and gap cost
//!
//! A [`ScoringScheme`] is built once and shared read-only by every alignment
//! call. All costs are nonnegative magnitudes; the engine minimises their sum.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::alphabet::Alphabet;
use crate::align::AlignError;

/// Reference substitution table, rows and columns in A, G, C, T order
pub const DEFAULT_COSTS: [[u32; 4]; 4] = [
    //A  G  C  T
    [0, 1, 2, 2], // A
    [1, 0, 2, 2], // G
    [2, 2, 0, 1], // C
    [2, 2, 1, 0], // T
];

/// Reference cost per gap position
pub const DEFAULT_GAP_COST: u32 = 4;

/// Immutable alignment configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringScheme {
    costs: [[u32; 4]; 4],
    gap_cost: u32,
}

impl Default for ScoringScheme {
    fn default() -> Self {
        Self {
            costs: DEFAULT_COSTS,
            gap_cost: DEFAULT_GAP_COST,
        }
    }
}

impl ScoringScheme {
    pub fn new(costs: [[u32; 4]; 4], gap_cost: u32) -> Self {
        Self { costs, gap_cost }
    }

    /// Build a scheme from signed values, as read from configuration.
    ///
    /// Negative entries are rejected: a gap or substitution never earns a bonus.
    pub fn from_signed(costs: [[i64; 4]; 4], gap_cost: i64) -> Result<Self, AlignError> {
        let gap_cost = u32::try_from(gap_cost).map_err(|_| {
            AlignError::InvalidScoring(format!(
                "gap cost must be a nonnegative magnitude, got {}",
                gap_cost
            ))
        })?;

        let mut table = [[0u32; 4]; 4];
        for (x, row) in costs.iter().enumerate() {
            for (y, &value) in row.iter().enumerate() {
                table[x][y] = u32::try_from(value).map_err(|_| {
                    AlignError::InvalidScoring(format!(
                        "substitution cost {}->{} must be nonnegative, got {}",
                        Alphabet::SYMBOLS[x] as char,
                        Alphabet::SYMBOLS[y] as char,
                        value
                    ))
                })?;
            }
        }

        Ok(Self::new(table, gap_cost))
    }

    /// Replace the gap cost
    pub fn with_gap_cost(mut self, gap_cost: u32) -> Self {
        self.gap_cost = gap_cost;
        self
    }

    #[inline]
    pub fn gap_cost(&self) -> u32 {
        self.gap_cost
    }

    /// Cost of aligning symbol index `x` (seq1) against `y` (seq2)
    #[inline]
    pub fn substitution(&self, x: usize, y: usize) -> u32 {
        self.costs[x][y]
    }

    /// Cost of aligning two raw symbols, `None` if either is not in the alphabet
    pub fn substitution_symbols(&self, a: u8, b: u8) -> Option<u32> {
        Some(self.costs[Alphabet::encode(a)?][Alphabet::encode(b)?])
    }

    pub fn costs(&self) -> &[[u32; 4]; 4] {
        &self.costs
    }

    pub fn is_symmetric(&self) -> bool {
        (0..Alphabet::SIZE).all(|x| (0..Alphabet::SIZE).all(|y| self.costs[x][y] == self.costs[y][x]))
    }
}

/// Named scoring tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPreset {
    /// Transitions cost 1, transversions cost 2
    #[default]
    Default,
    /// Every mismatch costs 1
    Unit,
}

impl ScoringPreset {
    pub fn costs(self) -> [[u32; 4]; 4] {
        match self {
            ScoringPreset::Default => DEFAULT_COSTS,
            ScoringPreset::Unit => {
                let mut table = [[1u32; 4]; 4];
                for (i, row) in table.iter_mut().enumerate() {
                    row[i] = 0;
                }
                table
            }
        }
    }

    pub fn scheme(self, gap_cost: u32) -> ScoringScheme {
        ScoringScheme::new(self.costs(), gap_cost)
    }

    pub fn available() -> Vec<&'static str> {
        vec!["default", "unit"]
    }
}

impl FromStr for ScoringPreset {
    type Err = AlignError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(ScoringPreset::Default),
            "unit" => Ok(ScoringPreset::Unit),
            other => Err(AlignError::InvalidScoring(format!(
                "unknown scoring preset '{}', available: {}",
                other,
                Self::available().join(", ")
            ))),
        }
    }
}
