//! optimization::finite_diff — numerical derivatives of Hawkes objectives.
//!
//! Purpose
//! -------
//! Provide finite-difference gradients and Hessians of any
//! [`HawkesObjective`] on the parameter matrix, so analytic derivatives can
//! be checked against a reference and objectives without a Hessian can still
//! offer curvature information.
//!
//! Key behaviors
//! -------------
//! - [`numerical_grad`] differentiates `value`; central differences first,
//!   forward differences when the central pass fails.
//! - [`numerical_hessian`] differentiates the analytic `grad`, with the same
//!   fallback, and symmetrizes the result via [`symmetrize_hess`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `finitediff` closures must return plain values, so the first objective
//!   error raised inside a closure is captured in a `RefCell` and the closure
//!   returns `NaN`; the captured error is surfaced after the pass.
//! - Returned derivatives always pass [`validate_grad`] /
//!   [`validate_hessian`].
//!
//! Conventions
//! -----------
//! - Gradients are returned shaped like `theta`; Hessians are over the
//!   row-major flattened vector, `n·(n + 1)` square.
//! - Near the boundary of the log-likelihood domain a central step can leave
//!   the domain while a forward step does not; that is what the fallback is
//!   for.
use crate::optimization::{
    errors::{OptError, OptResult},
    objective::HawkesObjective,
    types::{Grad, Hessian, Theta},
    validation::{flatten, theta_matrix, validate_grad, validate_hessian},
};
use finitediff::FiniteDiff;
use ndarray::{Array1, Array2, ArrayView2};
use std::cell::RefCell;

/// Finite-difference gradient of `objective.value` at `theta`.
///
/// # Errors
/// - The first objective error raised during the forward pass, if the
///   central pass already failed.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` if the
///   forward-difference gradient is not valid.
pub fn numerical_grad<O: HawkesObjective>(
    objective: &O, theta: ArrayView2<f64>,
) -> OptResult<Array2<f64>> {
    let n = objective.n_components();
    let flat: Theta = theta.iter().copied().collect();
    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let cost_func = |x: &Theta| -> f64 {
        match theta_matrix(x, n).and_then(|m| objective.value(m)) {
            Ok(val) => val,
            Err(e) => {
                capture(&closure_err, e);
                f64::NAN
            }
        }
    };

    let central = flat.central_diff(&cost_func);
    let grad = if closure_err.borrow().is_none() && validate_grad(&central, flat.len()).is_ok() {
        central
    } else {
        run_fd_diff(&flat, &cost_func, &closure_err)?
    };
    reshape(grad, n)
}

/// Finite-difference Hessian of the flattened problem, from the analytic
/// gradient.
///
/// # Errors
/// - The first objective error raised during the forward pass.
/// - `OptError::HessianDimMismatch` / `OptError::InvalidHessian` if the
///   forward-difference Hessian is not valid.
pub fn numerical_hessian<O: HawkesObjective>(
    objective: &O, theta: ArrayView2<f64>,
) -> OptResult<Hessian> {
    let n = objective.n_components();
    let flat: Theta = theta.iter().copied().collect();
    let dim = flat.len();
    let closure_err: RefCell<Option<OptError>> = RefCell::new(None);
    let grad_func = |x: &Theta| -> Grad {
        match theta_matrix(x, n).and_then(|m| objective.grad(m)) {
            Ok(g) => flatten(&g),
            Err(e) => {
                capture(&closure_err, e);
                Array1::from_elem(dim, f64::NAN)
            }
        }
    };

    let mut hess = flat.central_hessian(&grad_func);
    if closure_err.borrow().is_some() || validate_hessian(&hess, dim).is_err() {
        closure_err.replace(None);
        hess = flat.forward_hessian(&grad_func);
        if let Some(err) = closure_err.take() {
            return Err(err);
        }
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

/// Forward-difference gradient with error capture and validation.
fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<OptError>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err);
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Replace each off-diagonal pair with its average.
pub fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}

// ---- Helper methods ----

fn capture(slot: &RefCell<Option<OptError>>, err: OptError) {
    let mut slot = slot.borrow_mut();
    if slot.is_none() {
        *slot = Some(err);
    }
}

fn reshape(grad: Grad, n: usize) -> OptResult<Array2<f64>> {
    let actual = grad.len();
    grad.into_shape((n, n + 1))
        .map_err(|_| OptError::GradientDimMismatch { expected: n * (n + 1), found: actual })
}
