use crate::{
    error::Error,
    matrix::{Matrix, Transpose},
};

/// Combination of a forward and a backward solution
#[derive(Debug, Clone, PartialEq)]
pub struct SmoothedState {
    /// Smoothed states
    pub x: Vec<f64>,
    /// Smoothed covariance
    pub q: Matrix,
}

/// Fixed interval smoother: combines the forward solution (`xf`, `qf`)
/// and the backward solution (`xb`, `qb`) weighted by their inverse covariances.
///
/// Qs = (Qf⁻¹ + Qb⁻¹)⁻¹, xs = Qs (Qf⁻¹ xf + Qb⁻¹ xb)
pub fn fixed_interval_smoother(
    xf: &[f64],
    qf: &Matrix,
    xb: &[f64],
    qb: &Matrix,
) -> Result<SmoothedState, Error> {
    let n = xf.len();
    if xb.len() != n {
        return Err(Error::DimensionMismatch("backward states"));
    }
    if qf.rows() != n || qf.cols() != n || qb.rows() != n || qb.cols() != n {
        return Err(Error::DimensionMismatch("covariance"));
    }

    let inv_qf = qf.inverse()?;
    let inv_qb = qb.inverse()?;

    let mut qs = inv_qf.clone();
    for (s, b) in qs.as_mut_slice().iter_mut().zip(inv_qb.as_slice().iter()) {
        *s += b;
    }
    qs.invert()?;

    let mut info = Matrix::zeros(n, 1)?;
    Matrix::multiply_accumulate(
        Transpose::No,
        Transpose::No,
        1.0,
        &inv_qf,
        &Matrix::column(xf)?,
        0.0,
        &mut info,
    )?;
    Matrix::multiply_accumulate(
        Transpose::No,
        Transpose::No,
        1.0,
        &inv_qb,
        &Matrix::column(xb)?,
        1.0,
        &mut info,
    )?;
    let xs = Matrix::multiply(Transpose::No, Transpose::No, &qs, &info)?;

    Ok(SmoothedState {
        x: xs.as_slice().to_vec(),
        q: qs,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    #[test]
    fn equal_weights() {
        let q = Matrix::from_rows(&[&[2.0, 0.0], &[0.0, 8.0]]).unwrap();
        let smoothed = fixed_interval_smoother(&[1.0, 10.0], &q, &[3.0, 20.0], &q).unwrap();
        assert!((smoothed.x[0] - 2.0).abs() < 1e-12);
        assert!((smoothed.x[1] - 15.0).abs() < 1e-12);
        assert!((smoothed.q[(0, 0)] - 1.0).abs() < 1e-12);
        assert!((smoothed.q[(1, 1)] - 4.0).abs() < 1e-12);
    }
    #[test]
    fn weighted_combination() {
        let qf = Matrix::from_rows(&[&[1.0]]).unwrap();
        let qb = Matrix::from_rows(&[&[3.0]]).unwrap();
        let smoothed = fixed_interval_smoother(&[0.0], &qf, &[4.0], &qb).unwrap();
        // (0/1 + 4/3) / (1 + 1/3)
        assert!((smoothed.x[0] - 1.0).abs() < 1e-12);
        assert!((smoothed.q[(0, 0)] - 0.75).abs() < 1e-12);
    }
    #[test]
    fn singular_covariance() {
        let qf = Matrix::identity(2).unwrap();
        let qb = Matrix::zeros(2, 2).unwrap();
        assert!(matches!(
            fixed_interval_smoother(&[0.0; 2], &qf, &[0.0; 2], &qb),
            Err(Error::SingularMatrix)
        ));
    }
}
