use std::fmt;

use rand::Rng;

use crate::error::VersoError;
use crate::Result;

/// A dense row-major f32 matrix.
///
/// Dimensions are fixed at construction and validated against the data
/// length, so every later operation can check compatibility up front
/// instead of failing mid-computation.
///
/// # Examples
///
/// ```
/// use verso_core::Matrix;
///
/// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
/// assert_eq!(m.matvec(&[1.0, 0.0]).unwrap(), vec![1.0, 3.0]);
/// ```
#[derive(Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Matrix {
    /// Create a matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a matrix from row-major data with the given dimensions.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f32>) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(VersoError::ShapeMismatch {
                expected: vec![rows, cols],
                got: vec![data.len()],
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Create a matrix with entries drawn from the standard normal N(0, 1).
    ///
    /// Uses the Box-Muller transform over the caller's generator, so a
    /// seeded `Rng` yields a reproducible matrix.
    pub fn randn(rows: usize, cols: usize, rng: &mut impl Rng) -> Self {
        let data: Vec<f32> = (0..rows * cols)
            .map(|_| {
                let u1: f32 = rng.gen_range(1e-7f32..1.0f32);
                let u2: f32 = rng.gen_range(0.0f32..std::f32::consts::TAU);
                (-2.0 * u1.ln()).sqrt() * u2.cos()
            })
            .collect();
        Self { rows, cols, data }
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get a single element, or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    /// Set a single element. Out-of-bounds writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        if row < self.rows && col < self.cols {
            self.data[row * self.cols + col] = value;
        }
    }

    /// Copy out column `col`, or `None` when out of range.
    pub fn col(&self, col: usize) -> Option<Vec<f32>> {
        if col >= self.cols {
            return None;
        }
        Some(
            (0..self.rows)
                .map(|r| self.data[r * self.cols + col])
                .collect(),
        )
    }

    /// Matrix-vector product `self · x`.
    pub fn matvec(&self, x: &[f32]) -> Result<Vec<f32>> {
        if x.len() != self.cols {
            return Err(VersoError::ShapeMismatch {
                expected: vec![self.cols],
                got: vec![x.len()],
            });
        }
        let mut out = vec![0.0f32; self.rows];
        for (r, out_r) in out.iter_mut().enumerate() {
            let row = &self.data[r * self.cols..(r + 1) * self.cols];
            *out_r = row.iter().zip(x).map(|(a, b)| a * b).sum();
        }
        Ok(out)
    }

    /// The underlying row-major data.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }
}

impl fmt::Debug for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Matrix({}x{})", self.rows, self.cols)
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.len() <= 20 {
            write!(f, "matrix({:?}, {}x{})", self.data, self.rows, self.cols)
        } else {
            write!(
                f,
                "matrix([{:.4}, {:.4}, ..., {:.4}], {}x{})",
                self.data[0],
                self.data[1],
                self.data[self.data.len() - 1],
                self.rows,
                self.cols
            )
        }
    }
}
