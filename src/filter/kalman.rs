use log::{trace, warn};

use crate::{
    error::Error,
    matrix::{Matrix, Transpose},
};

/// Indices of states that take part in the update:
/// a state is initialized once it has a non zero value and a positive variance.
fn active_states(x: &[f64], p: &Matrix) -> Vec<usize> {
    (0..x.len())
        .filter(|i| x[*i] != 0.0 && p[(*i, *i)] > 0.0)
        .collect()
}

/// Kalman measurement update over fully initialized states.
/// Returns updated (x, P) and leaves inputs untouched.
fn update(
    x: &[f64],
    p: &Matrix,
    h: &Matrix,
    v: &[f64],
    r: &Matrix,
) -> Result<(Vec<f64>, Matrix), Error> {
    let n = x.len();
    // F = P H
    let f = Matrix::multiply(Transpose::No, Transpose::No, p, h)?;
    // Q = Hᵀ P H + R
    let mut q = r.clone();
    Matrix::multiply_accumulate(Transpose::Yes, Transpose::No, 1.0, h, &f, 1.0, &mut q)?;
    q.invert()?;
    // K = F Q⁻¹
    let k = Matrix::multiply(Transpose::No, Transpose::No, &f, &q)?;
    // x + K v
    let mut xp = Matrix::column(x)?;
    let v = Matrix::column(v)?;
    Matrix::multiply_accumulate(Transpose::No, Transpose::No, 1.0, &k, &v, 1.0, &mut xp)?;
    // (I - K Hᵀ) P
    let mut i_kh = Matrix::identity(n)?;
    Matrix::multiply_accumulate(Transpose::No, Transpose::Yes, -1.0, &k, h, 1.0, &mut i_kh)?;
    let pp = Matrix::multiply(Transpose::No, Transpose::No, &i_kh, p)?;
    Ok((xp.as_slice().to_vec(), pp))
}

/// Sequential Kalman filter measurement update.
///
/// - `x`: n states, updated in place
/// - `p`: n x n state covariance, updated in place
/// - `h`: n x m transposed design matrix
/// - `v`: m innovations
/// - `r`: m x m measurement covariance
///
/// States that are not initialized yet (null value or non positive variance)
/// are left out of the update and returned untouched.
/// When the innovation covariance is singular, [Error::SingularMatrix]
/// is returned and neither `x` nor `p` is modified.
pub fn kalman_update(
    x: &mut [f64],
    p: &mut Matrix,
    h: &Matrix,
    v: &[f64],
    r: &Matrix,
) -> Result<(), Error> {
    let (n, m) = (x.len(), v.len());
    if p.rows() != n || p.cols() != n {
        return Err(Error::DimensionMismatch("state covariance"));
    }
    if h.rows() != n || h.cols() != m {
        return Err(Error::DimensionMismatch("design matrix"));
    }
    if r.rows() != m || r.cols() != m {
        return Err(Error::DimensionMismatch("measurement covariance"));
    }

    let ix = active_states(x, p);
    let k = ix.len();
    if k == 0 {
        warn!("kalman update: no initialized state");
        return Ok(());
    }
    trace!("kalman update: {}/{} active states, {} measurements", k, n, m);

    let x_ = ix.iter().map(|i| x[*i]).collect::<Vec<_>>();
    let mut p_ = Matrix::zeros(k, k)?;
    let mut h_ = Matrix::zeros(k, m)?;
    for (a, i) in ix.iter().enumerate() {
        for (b, j) in ix.iter().enumerate() {
            p_[(a, b)] = p[(*i, *j)];
        }
        for j in 0..m {
            h_[(a, j)] = h[(*i, j)];
        }
    }

    let (xp, pp) = update(&x_, &p_, &h_, v, r)?;

    for (a, i) in ix.iter().enumerate() {
        x[*i] = xp[a];
        for (b, j) in ix.iter().enumerate() {
            p[(*i, *j)] = pp[(a, b)];
        }
    }
    Ok(())
}
