//! Diagonal band quality metric
//!
//! Two lines `y = slope * x + offset` bound the region where hits of two
//! collinear sequences are expected. Hits strictly between them count as
//! on-diagonal.

use serde::{Deserialize, Serialize};

use super::Hit;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagonalBand {
    pub slope_upper: f64,
    pub offset_upper: f64,
    pub slope_lower: f64,
    pub offset_lower: f64,
}

impl DiagonalBand {
    /// Band whose boundary lines run from `(start, 0)` to `(end, span)`
    pub fn from_x_intercepts(upper: (f64, f64), lower: (f64, f64), span: f64) -> Self {
        let slope_upper = span / (upper.1 - upper.0);
        let slope_lower = span / (lower.1 - lower.0);
        Self {
            slope_upper,
            offset_upper: -slope_upper * upper.0,
            slope_lower,
            offset_lower: -slope_lower * lower.0,
        }
    }

    /// Band around the human/mouse HOXA region comparison
    pub fn hoxa() -> Self {
        Self::from_x_intercepts((48_000.0, 825_000.0), (141_000.0, 914_000.0), 1.0e6)
    }

    pub fn upper_at(&self, x: f64) -> f64 {
        self.slope_upper * x + self.offset_upper
    }

    pub fn lower_at(&self, x: f64) -> f64 {
        self.slope_lower * x + self.offset_lower
    }

    pub fn contains(&self, hit: &Hit) -> bool {
        let x = hit.seq2_pos as f64;
        let y = hit.seq1_pos as f64;
        self.lower_at(x) < y && y < self.upper_at(x)
    }

    pub fn filter(&self, hits: &[Hit]) -> Vec<Hit> {
        hits.iter().filter(|h| self.contains(h)).copied().collect()
    }

    /// Percentage of hits inside the band, 0 for no hits
    pub fn percent_on_diagonal(&self, hits: &[Hit]) -> f64 {
        if hits.is_empty() {
            return 0.0;
        }
        let inside = hits.iter().filter(|h| self.contains(h)).count();
        100.0 * inside as f64 / hits.len() as f64
    }
}
