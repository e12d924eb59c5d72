//! Dense linear algebra primitives used by the AROW update
//!
//! Every operation assumes operands of matching dimension. A mismatch is a
//! caller bug and panics immediately; the trainer and evaluator validate
//! their inputs before reaching this module.

use std::ops::{Index, IndexMut};

/// Dot product of two equal-length vectors
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    assert_eq!(x.len(), y.len(), "dot: vector lengths differ");
    x.iter().zip(y).map(|(a, b)| a * b).sum()
}

/// Elementwise vector addition
pub fn add(x: &[f64], y: &[f64]) -> Vec<f64> {
    assert_eq!(x.len(), y.len(), "add: vector lengths differ");
    x.iter().zip(y).map(|(a, b)| a + b).collect()
}

/// Multiply every component of a vector by a constant
pub fn scale(x: &[f64], constant: f64) -> Vec<f64> {
    x.iter().map(|v| v * constant).collect()
}

/// True when every component is exactly 0.0
///
/// No tolerance: this gates whether an AROW update is applied.
pub fn is_zero_vector(x: &[f64]) -> bool {
    x.iter().all(|&v| v == 0.0)
}

/// Comma-separated rendering of a vector for progress output
pub fn format_vector(x: &[f64]) -> String {
    x.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Square matrix stored as a flat row-major array
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    dim: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// All-zero matrix of the given dimension
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            data: vec![0.0; dim * dim],
        }
    }

    /// Identity matrix of the given dimension
    pub fn identity(dim: usize) -> Self {
        let mut m = Self::zeros(dim);
        for i in 0..dim {
            m[(i, i)] = 1.0;
        }
        m
    }

    /// Build from nested rows
    ///
    /// # Panics
    /// Panics if the rows do not form a square matrix
    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[Vec<f64>]) -> Self {
        let dim = rows.len();
        let mut data = Vec::with_capacity(dim * dim);
        for row in rows {
            assert_eq!(row.len(), dim, "from_rows: matrix must be square");
            data.extend_from_slice(row);
        }
        Self { dim, data }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Row `i` as a slice
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.dim..(i + 1) * self.dim]
    }

    /// Matrix–vector product `M x` (row-wise dot products)
    pub fn mul_vec(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(self.dim, x.len(), "mul_vec: dimension mismatch");
        (0..self.dim).map(|i| dot(self.row(i), x)).collect()
    }

    /// Vector–matrix product `xᵀ M` (dot against each column)
    pub fn vec_mul(&self, x: &[f64]) -> Vec<f64> {
        assert_eq!(self.dim, x.len(), "vec_mul: dimension mismatch");
        let mut out = vec![0.0; self.dim];
        for (row, &xi) in x.iter().enumerate() {
            for (o, m) in out.iter_mut().zip(self.row(row)) {
                *o += xi * m;
            }
        }
        out
    }

    /// Quadratic form `xᵀ M x`
    pub fn quadratic_form(&self, x: &[f64]) -> f64 {
        dot(x, &self.vec_mul(x))
    }

    /// Matrix–matrix product `self · other`
    pub fn matmul(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.dim, other.dim, "matmul: dimension mismatch");
        let n = self.dim;
        let mut out = Matrix::zeros(n);
        for i in 0..n {
            for k in 0..n {
                let a = self[(i, k)];
                if a == 0.0 {
                    continue;
                }
                let row = other.row(k);
                let target = &mut out.data[i * n..(i + 1) * n];
                for (t, b) in target.iter_mut().zip(row) {
                    *t += a * b;
                }
            }
        }
        out
    }

    /// Multiply every entry by a constant
    pub fn scale(&self, constant: f64) -> Matrix {
        Matrix {
            dim: self.dim,
            data: self.data.iter().map(|v| v * constant).collect(),
        }
    }

    /// Elementwise subtraction `self - other`
    pub fn subtract(&self, other: &Matrix) -> Matrix {
        assert_eq!(self.dim, other.dim, "subtract: dimension mismatch");
        Matrix {
            dim: self.dim,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a - b)
                .collect(),
        }
    }

    /// Outer product `x yᵀ` of two equal-length vectors
    pub fn outer(x: &[f64], y: &[f64]) -> Matrix {
        assert_eq!(x.len(), y.len(), "outer: vector lengths differ");
        let mut data = Vec::with_capacity(x.len() * y.len());
        for &a in x {
            data.extend(y.iter().map(|b| a * b));
        }
        Matrix { dim: x.len(), data }
    }

    /// Transposed copy
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.dim);
        for i in 0..self.dim {
            for j in 0..self.dim {
                out[(j, i)] = self[(i, j)];
            }
        }
        out
    }

    /// Symmetry check with an absolute tolerance
    pub fn is_symmetric(&self, tolerance: f64) -> bool {
        self.data
            .iter()
            .zip(&self.transpose().data)
            .all(|(a, b)| (a - b).abs() <= tolerance)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, column): (usize, usize)) -> &f64 {
        &self.data[row * self.dim + column]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut f64 {
        &mut self.data[row * self.dim + column]
    }
}
