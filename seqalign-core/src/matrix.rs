//! Flat dynamic-programming matrix
//!
//! Row-major storage of `(m + 1) x (n + 1)` cells, one allocation per table.

use std::ops::{Index, IndexMut};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DpMatrix<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T: Copy> DpMatrix<T> {
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            data: vec![fill; rows * cols],
            rows,
            cols,
        }
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> T {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: T) {
        self.data[row * self.cols + col] = value;
    }

    /// Bounds-checked read
    pub fn try_get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn column(&self, col: usize) -> impl Iterator<Item = T> + '_ {
        (0..self.rows).map(move |row| self.get(row, col))
    }
}

impl<T> DpMatrix<T> {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Index<(usize, usize)> for DpMatrix<T> {
    type Output = T;

    fn index(&self, (row, col): (usize, usize)) -> &T {
        &self.data[row * self.cols + col]
    }
}

impl<T> IndexMut<(usize, usize)> for DpMatrix<T> {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        &mut self.data[row * self.cols + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_and_fill() {
        let m = DpMatrix::new(3, 4, 7i64);
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert_eq!(m.as_slice().len(), 12);
        assert!(m.as_slice().iter().all(|&v| v == 7));
    }

    #[test]
    fn test_row_major_layout() {
        let mut m = DpMatrix::new(2, 3, 0u8);
        m.set(1, 2, 9);
        m[(0, 1)] = 4;
        assert_eq!(m.as_slice(), &[0, 4, 0, 0, 0, 9]);
        assert_eq!(m.row(1), &[0, 0, 9]);
        assert_eq!(m.column(1).collect::<Vec<_>>(), vec![4, 0]);
        assert_eq!(m[(1, 2)], 9);
    }

    #[test]
    fn test_try_get_bounds() {
        let m = DpMatrix::new(1, 1, 1u8);
        assert_eq!(m.try_get(0, 0), Some(1));
        assert_eq!(m.try_get(1, 0), None);
        assert_eq!(m.try_get(0, 1), None);
    }
}
