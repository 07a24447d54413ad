//! Validation helpers for flattened optimizer quantities.
//!
//! - [`validate_value`]: finite cost.
//! - [`validate_grad`]: dimension and finite entries.
//! - [`validate_hessian`]: square shape and finite entries.
//! - [`theta_matrix`] / [`flatten`]: conversion between the `n × (n + 1)`
//!   parameter matrix and the row-major optimizer vector.
use crate::optimization::{
    errors::{OptError, OptResult},
    types::{Grad, Hessian, Theta},
};
use ndarray::{Array1, Array2, ArrayView2};

/// Validate that a scalar cost is finite.
///
/// # Errors
/// Returns [`OptError::NonFiniteCost`] if the value is `NaN` or infinite.
pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Validate a gradient vector against dimension and finiteness.
///
/// # Errors
/// - [`OptError::GradientDimMismatch`] if length does not match `dim`.
/// - [`OptError::InvalidGradient`] for the first non-finite element.
pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    for (index, &value) in grad.iter().enumerate() {
        if !value.is_finite() {
            return Err(OptError::InvalidGradient {
                index,
                value,
                reason: "Gradient elements must be finite.",
            });
        }
    }
    Ok(())
}

/// Validate the shape and entries of a Hessian matrix.
///
/// # Errors
/// - [`OptError::HessianDimMismatch`] unless the matrix is `dim × dim`.
/// - [`OptError::InvalidHessian`] for the first non-finite entry.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    for ((row, col), &value) in hessian.indexed_iter() {
        if !value.is_finite() {
            return Err(OptError::InvalidHessian { row, col, value });
        }
    }
    Ok(())
}

/// View a flattened vector as the `n × (n + 1)` parameter matrix.
///
/// # Errors
/// - [`OptError::ThetaLengthMismatch`] unless `theta.len() == n·(n + 1)`.
pub fn theta_matrix(theta: &Theta, n_components: usize) -> OptResult<ArrayView2<'_, f64>> {
    let expected = n_components * (n_components + 1);
    let mismatch = OptError::ThetaLengthMismatch { expected, actual: theta.len() };
    if theta.len() != expected {
        return Err(mismatch);
    }
    theta.view().into_shape((n_components, n_components + 1)).map_err(|_| mismatch)
}

/// Row-major flattening of a matrix.
pub fn flatten(matrix: &Array2<f64>) -> Array1<f64> {
    matrix.iter().copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Gradient/Hessian/value checks on valid and invalid inputs.
    // - Matrix ↔ vector layout.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify the first offending element is reported.
    //
    // Expect
    // ------
    // - Wrong length → `GradientDimMismatch`; NaN at index 1 → `InvalidGradient`.
    // - Non-square Hessian → `HessianDimMismatch`; ∞ at (1, 0) → `InvalidHessian`.
    // - NaN cost → `NonFiniteCost`.
    fn validators_report_first_violation() {
        assert!(validate_grad(&array![1.0, 2.0], 2).is_ok());
        assert_eq!(
            validate_grad(&array![1.0], 2),
            Err(OptError::GradientDimMismatch { expected: 2, found: 1 })
        );
        assert!(matches!(
            validate_grad(&array![1.0, f64::NAN], 2),
            Err(OptError::InvalidGradient { index: 1, .. })
        ));

        assert_eq!(
            validate_hessian(&Array2::zeros((2, 3)), 2),
            Err(OptError::HessianDimMismatch { expected: 2, found: (2, 3) })
        );
        assert_eq!(
            validate_hessian(&array![[1.0, 0.0], [f64::INFINITY, 1.0]], 2),
            Err(OptError::InvalidHessian { row: 1, col: 0, value: f64::INFINITY })
        );

        assert!(validate_value(-3.0).is_ok());
        assert!(matches!(validate_value(f64::NAN), Err(OptError::NonFiniteCost { .. })));
    }

    #[test]
    // Purpose
    // -------
    // The optimizer vector is the row-major flattening of theta.
    //
    // Given
    // -----
    // - A 2 × 3 matrix.
    //
    // Expect
    // ------
    // - `flatten` lists rows in order; `theta_matrix` restores the matrix and
    //   rejects a vector of the wrong length.
    fn theta_matrix_and_flatten_share_row_major_layout() {
        let theta = array![[0.1, 0.2, 0.3], [0.4, 0.5, 0.6]];
        let flat = flatten(&theta);
        assert_eq!(flat, array![0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        assert_eq!(theta_matrix(&flat, 2).unwrap(), theta.view());
        assert_eq!(
            theta_matrix(&array![1.0, 2.0], 2),
            Err(OptError::ThetaLengthMismatch { expected: 6, actual: 2 })
        );
    }
}
