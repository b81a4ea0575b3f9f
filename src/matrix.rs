//! Dense matrices
//!
//! [Matrix] carries its own shape and stores its elements column after column.
//! Factorization and the general multiply kernel are delegated to `nalgebra`.
//!
//! Matrix storage, and the operand copies handed over to `nalgebra`, are
//! reserved fallibly: running out of memory there is reported as
//! [Error::Allocation]. Buffers that `nalgebra` creates on its own while
//! inverting or solving (result and permutation storage) are not covered.
use std::{
    fmt::Write,
    ops::{Index, IndexMut},
};

use nalgebra::DMatrix;

use crate::error::Error;

/// Operand selection in [Matrix::multiply_accumulate] and [Matrix::solve]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Transpose {
    /// Use the operand as is
    #[default]
    No,
    /// Use the transposed operand
    Yes,
}

impl Transpose {
    fn shape(&self, m: &Matrix) -> (usize, usize) {
        match self {
            Self::No => (m.rows, m.cols),
            Self::Yes => (m.cols, m.rows),
        }
    }
    /// Copies op(m) into `nalgebra` storage.
    fn operand(&self, m: &Matrix) -> Result<DMatrix<f64>, Error> {
        match self {
            Self::No => m.to_dmatrix(),
            Self::Yes => m.transpose()?.to_dmatrix(),
        }
    }
}

/// Dense column-major matrix of doubles
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// Fallible allocation of `rows`x`cols` elements initialized to `value`
fn try_alloc(rows: usize, cols: usize, value: f64) -> Result<Vec<f64>, Error> {
    let size = rows
        .checked_mul(cols)
        .ok_or(Error::Allocation(rows, cols))?;
    let mut data = Vec::new();
    data.try_reserve_exact(size)
        .map_err(|_| Error::Allocation(rows, cols))?;
    data.resize(size, value);
    Ok(data)
}

impl Matrix {
    /// Allocates a new `rows`x`cols` [Matrix] filled with zeros.
    pub fn zeros(rows: usize, cols: usize) -> Result<Self, Error> {
        Ok(Self {
            rows,
            cols,
            data: try_alloc(rows, cols, 0.0)?,
        })
    }
    /// Allocates the `n`x`n` identity [Matrix].
    pub fn identity(n: usize) -> Result<Self, Error> {
        let mut m = Self::zeros(n, n)?;
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        Ok(m)
    }
    /// Wraps existing column-major storage.
    pub fn from_column_major(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, Error> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(Error::DimensionMismatch("storage size"));
        }
        Ok(Self { rows, cols, data })
    }
    /// Builds a [Matrix] from a row-major description,
    /// which is the natural way to write one down.
    /// ```
    /// use rtkcore::prelude::Matrix;
    /// let m = Matrix::from_rows(&[&[1.0, 2.0], &[3.0, 4.0]]).unwrap();
    /// assert_eq!(m[(0, 1)], 2.0);
    /// assert_eq!(m.as_slice(), &[1.0, 3.0, 2.0, 4.0]);
    /// ```
    pub fn from_rows(rows: &[&[f64]]) -> Result<Self, Error> {
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut m = Self::zeros(rows.len(), cols)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::DimensionMismatch("ragged rows"));
            }
            for (j, value) in row.iter().enumerate() {
                m[(i, j)] = *value;
            }
        }
        Ok(m)
    }
    /// Builds a column vector.
    pub fn column(values: &[f64]) -> Result<Self, Error> {
        let mut data = try_alloc(values.len(), 1, 0.0)?;
        data.copy_from_slice(values);
        Ok(Self {
            rows: values.len(),
            cols: 1,
            data,
        })
    }
    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }
    /// Column-major storage
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
    /// Mutable column-major storage
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }
    /// Returns (i, j) element, if it exists.
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        if i < self.rows && j < self.cols {
            Some(self.data[i + j * self.rows])
        } else {
            None
        }
    }
    /// Returns the transposed [Matrix].
    pub fn transpose(&self) -> Result<Self, Error> {
        let mut t = Self::zeros(self.cols, self.rows)?;
        for j in 0..self.cols {
            for i in 0..self.rows {
                t[(j, i)] = self[(i, j)];
            }
        }
        Ok(t)
    }
    /// Returns a copy of this [Matrix], or [Error::Allocation]
    /// when its storage cannot be reserved.
    pub fn try_clone(&self) -> Result<Self, Error> {
        let mut data = try_alloc(self.rows, self.cols, 0.0)?;
        data.copy_from_slice(&self.data);
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
    fn to_dmatrix(&self) -> Result<DMatrix<f64>, Error> {
        let mut data = try_alloc(self.rows, self.cols, 0.0)?;
        data.copy_from_slice(&self.data);
        Ok(DMatrix::from_vec(self.rows, self.cols, data))
    }
    fn from_dmatrix(m: &DMatrix<f64>) -> Result<Self, Error> {
        let mut data = try_alloc(m.nrows(), m.ncols(), 0.0)?;
        data.copy_from_slice(m.as_slice());
        Ok(Self {
            rows: m.nrows(),
            cols: m.ncols(),
            data,
        })
    }
    /// Computes C = alpha * op(A) * op(B) + beta * C, where op
    /// is selected by `ta` and `tb`. op(A) must be n x m, op(B) m x k
    /// and C n x k. When `beta` is zero, prior content of C is ignored.
    pub fn multiply_accumulate(
        ta: Transpose,
        tb: Transpose,
        alpha: f64,
        a: &Self,
        b: &Self,
        beta: f64,
        c: &mut Self,
    ) -> Result<(), Error> {
        let (n, m) = ta.shape(a);
        let (mb, k) = tb.shape(b);
        if m != mb {
            return Err(Error::DimensionMismatch("inner dimensions"));
        }
        if c.rows != n || c.cols != k {
            return Err(Error::DimensionMismatch("output dimensions"));
        }
        if beta == 0.0 {
            c.data.iter_mut().for_each(|x| *x = 0.0);
        }
        let op_a = ta.operand(a)?;
        let op_b = tb.operand(b)?;
        let mut out = c.to_dmatrix()?;
        out.gemm(alpha, &op_a, &op_b, beta);
        c.data.copy_from_slice(out.as_slice());
        Ok(())
    }
    /// Returns op(A) * op(B).
    pub fn multiply(ta: Transpose, tb: Transpose, a: &Self, b: &Self) -> Result<Self, Error> {
        let (n, _) = ta.shape(a);
        let (_, k) = tb.shape(b);
        let mut c = Self::zeros(n, k)?;
        Self::multiply_accumulate(ta, tb, 1.0, a, b, 0.0, &mut c)?;
        Ok(c)
    }
    /// Inverts this square [Matrix] in place, using LU factorization.
    /// On failure, self is left untouched.
    pub fn invert(&mut self) -> Result<(), Error> {
        if !self.is_square() {
            return Err(Error::DimensionMismatch("inversion of non square matrix"));
        }
        let inv = self
            .to_dmatrix()?
            .lu()
            .try_inverse()
            .ok_or(Error::SingularMatrix)?;
        if inv.iter().any(|x| !x.is_finite()) {
            return Err(Error::SingularMatrix);
        }
        self.data.copy_from_slice(inv.as_slice());
        Ok(())
    }
    /// Returns the inverse of this square [Matrix].
    pub fn inverse(&self) -> Result<Self, Error> {
        let mut inv = self.try_clone()?;
        inv.invert()?;
        Ok(inv)
    }
    /// Solves op(A) * X = Y, where A is n x n and Y is n x m.
    pub fn solve(ta: Transpose, a: &Self, y: &Self) -> Result<Self, Error> {
        if !a.is_square() {
            return Err(Error::DimensionMismatch("solve with non square matrix"));
        }
        if y.rows != a.rows {
            return Err(Error::DimensionMismatch("right hand side"));
        }
        let lu = ta.operand(a)?.lu();
        let x = lu.solve(&y.to_dmatrix()?).ok_or(Error::SingularMatrix)?;
        if x.iter().any(|v| !v.is_finite()) {
            return Err(Error::SingularMatrix);
        }
        Self::from_dmatrix(&x)
    }
    /// Least squares estimation of x in y = Aᵀ x, from the transposed
    /// design matrix `a` (n x m, n parameters, m measurements).
    /// Returns the estimate and its covariance (A Aᵀ)⁻¹.
    pub fn least_squares(a: &Self, y: &[f64]) -> Result<(Vec<f64>, Self), Error> {
        let (n, m) = (a.rows, a.cols);
        if m < n {
            return Err(Error::InsufficientMeasurements {
                parameters: n,
                measurements: m,
            });
        }
        if y.len() != m {
            return Err(Error::DimensionMismatch("measurement vector"));
        }
        let y = Self::column(y)?;
        let ay = Self::multiply(Transpose::No, Transpose::No, a, &y)?;
        let mut q = Self::multiply(Transpose::No, Transpose::Yes, a, a)?;
        q.invert()?;
        let x = Self::multiply(Transpose::No, Transpose::No, &q, &ay)?;
        Ok((x.data, q))
    }
    /// Renders this [Matrix] row by row, each element right aligned
    /// over `width` characters with `decimals` digits.
    pub fn to_string_fixed(&self, width: usize, decimals: usize) -> String {
        let mut s = String::new();
        for i in 0..self.rows {
            for j in 0..self.cols {
                let _ = write!(s, " {:>width$.decimals$}", self[(i, j)]);
            }
            s.push('\n');
        }
        s
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;
    fn index(&self, (i, j): (usize, usize)) -> &f64 {
        &self.data[i + j * self.rows]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut f64 {
        &mut self.data[i + j * self.rows]
    }
}

impl std::fmt::Display for Matrix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.to_string_fixed(12, 6))
    }
}

/// Inner product of two vectors, over their common length
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b.iter()).map(|(a, b)| a * b).sum()
}

/// Euclidean norm
pub fn norm(a: &[f64]) -> f64 {
    dot(a, a).sqrt()
}

/// Cross product of two 3D vectors
pub fn cross3(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

/// Returns the unit vector of `a`, or [Error::DegenerateVector]
/// when its norm is not strictly positive.
pub fn normalize3(a: &[f64; 3]) -> Result<[f64; 3], Error> {
    let r = norm(a);
    if r <= 0.0 {
        return Err(Error::DegenerateVector);
    }
    Ok([a[0] / r, a[1] / r, a[2] / r])
}
