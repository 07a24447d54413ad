//! Adapter that exposes a [`HawkesObjective`] as an `argmin` problem.
//!
//! argmin works on flat vectors, while the Hawkes models work on the
//! `n × (n + 1)` parameter matrix. The adapter reshapes the solver's vector
//! (row-major), evaluates the objective, and flattens the result back.
//!
//! - `CostFunction::cost` returns `objective.value(θ)`.
//! - `Gradient::gradient` returns the flattened analytic gradient.
//! - `Hessian::hessian` returns the block-diagonal matrix with `n` copies of
//!   the objective's `(n + 1) × (n + 1)` block, or an error for objectives
//!   without one.
//!
//! Every returned quantity is validated (finite, right shape) before it
//! reaches the solver.
use crate::optimization::{
    errors::OptResult,
    objective::HawkesObjective,
    types::{Cost, Grad, Hessian, Theta},
    validation::{flatten, theta_matrix, validate_grad, validate_hessian, validate_value},
};
use argmin::core::{CostFunction, Error, Gradient};
use ndarray::{s, Array2};

/// Bridges a [`HawkesObjective`] to argmin's `CostFunction`, `Gradient`, and
/// `Hessian` traits.
#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, O: HawkesObjective> {
    pub objective: &'a O,
}

impl<'a, O: HawkesObjective> ArgMinAdapter<'a, O> {
    pub fn new(objective: &'a O) -> Self {
        Self { objective }
    }

    /// Length of the flattened parameter vector.
    pub fn dim(&self) -> usize {
        self.objective.dim()
    }

    /// Evaluate the objective on a flattened vector.
    ///
    /// # Errors
    /// - `OptError::ThetaLengthMismatch` for a vector of the wrong length.
    /// - `OptError::NonFiniteCost` if the objective value is not finite.
    /// - Model errors wrapped in `OptError::Model`.
    pub fn eval_cost(&self, theta: &Theta) -> OptResult<Cost> {
        let matrix = theta_matrix(theta, self.objective.n_components())?;
        let value = self.objective.value(matrix)?;
        validate_value(value)?;
        Ok(value)
    }

    /// Flattened analytic gradient.
    pub fn eval_grad(&self, theta: &Theta) -> OptResult<Grad> {
        let matrix = theta_matrix(theta, self.objective.n_components())?;
        let grad = flatten(&self.objective.grad(matrix)?);
        validate_grad(&grad, theta.len())?;
        Ok(grad)
    }

    /// Block-diagonal Hessian of the flattened problem.
    pub fn eval_hessian(&self, theta: &Theta) -> OptResult<Hessian> {
        theta_matrix(theta, self.objective.n_components())?;
        let block = self.objective.hessian_block()?;
        let hessian = block_diagonal(&block, self.objective.n_components());
        validate_hessian(&hessian, theta.len())?;
        Ok(hessian)
    }
}

impl<O: HawkesObjective> CostFunction for ArgMinAdapter<'_, O> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.eval_cost(theta)?)
    }
}

impl<O: HawkesObjective> Gradient for ArgMinAdapter<'_, O> {
    type Param = Theta;
    type Gradient = Grad;

    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        Ok(self.eval_grad(theta)?)
    }
}

impl<O: HawkesObjective> argmin::core::Hessian for ArgMinAdapter<'_, O> {
    type Param = Theta;
    type Hessian = Hessian;

    fn hessian(&self, theta: &Self::Param) -> Result<Self::Hessian, Error> {
        Ok(self.eval_hessian(theta)?)
    }
}

/// `n` copies of `block` along the diagonal.
pub fn block_diagonal(block: &Array2<f64>, copies: usize) -> Array2<f64> {
    let size = block.nrows();
    let mut full = Array2::<f64>::zeros((size * copies, size * copies));
    for k in 0..copies {
        let range = k * size..(k + 1) * size;
        full.slice_mut(s![range.clone(), range]).assign(block);
    }
    full
}
