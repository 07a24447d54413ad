//! Single-repetition least-squares contrast for exponential Hawkes processes.
//!
//! This module wires the cached [`LeastSquaresWeights`] of one realization to
//! the least-squares contrast, its gradient, and its Hessian with respect to
//! the parameter matrix `θ = [μ | α]` (`n × (n + 1)`).
//!
//! Key ideas:
//! - The contrast is quadratic in `θ`, so every evaluation only touches the
//!   aggregate statistics `N, I, I2, V, W`; the event times are read once,
//!   when the weights are first computed.
//! - Rows of `θ` decouple: the loss is a sum over target components `i`, and
//!   the Hessian block of every row is the same `(n + 1) × (n + 1)` matrix.
//! - All quantities are divided by the end time `T`.
//!
//! For component `i` (before dividing by `T`):
//!
//! ```text
//! L_i = μ_i²·T − 2·μ_i·N[i] + Σ_j α_ij²·I2[j] + 2·μ_i·Σ_j α_ij·I[j]
//!       − 2·Σ_j α_ij·V(i,j) + Σ_{j,j2} α_ij·α_ij2·W(j,j2)
//! ```
use crate::hawkes::{
    core::{
        cache::{WeightsCache, WeightsState},
        data::HawkesData,
        statistics::LeastSquaresWeights,
        validation::{validate_decay, validate_theta},
    },
    errors::{HawkesError, HawkesResult},
};
use ndarray::{Array2, ArrayView2, ArrayViewMut1};

/// Least-squares model for one observed realization.
///
/// Holds the component count and a compute-once cache of the statistics. A
/// model instance is bound to the first `(data, decay)` it is evaluated on;
/// later evaluations with a different decay, end time, or event counts fail
/// with `HawkesError::StaleWeights`.
#[derive(Debug, Clone, Default)]
pub struct LeastSquaresSingle {
    n_components: usize,
    weights: WeightsCache<LeastSquaresWeights>,
}

impl LeastSquaresSingle {
    /// Build a model for `n_components` components with no statistics yet.
    pub fn new(n_components: usize) -> Self {
        LeastSquaresSingle { n_components, weights: WeightsCache::new() }
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    pub fn state(&self) -> WeightsState {
        self.weights.state()
    }

    /// Cached statistics, if already computed.
    pub fn weights(&self) -> Option<&LeastSquaresWeights> {
        self.weights.get()
    }

    /// Validate inputs and compute the statistics if not already cached.
    ///
    /// Idempotent; calling it before sharing the model across threads avoids
    /// redundant first computations.
    ///
    /// # Errors
    /// - `HawkesError::InvalidDecay` for a non-positive or non-finite decay.
    /// - `HawkesError::InvalidDimension` if `data` does not have
    ///   `n_components` components.
    /// - `HawkesError::StaleWeights` if the cache was built from other inputs.
    pub fn initialize(&self, data: &HawkesData, decay: f64) -> HawkesResult<&LeastSquaresWeights> {
        let decay = validate_decay(decay)?;
        if data.n_components() != self.n_components {
            return Err(HawkesError::InvalidDimension {
                what: "components",
                expected: self.n_components,
                actual: data.n_components(),
            });
        }
        self.weights.get_or_compute(data, decay)
    }

    /// Least-squares contrast at `theta`, divided by the end time.
    ///
    /// # Errors
    /// - Everything [`initialize`](Self::initialize) returns.
    /// - `HawkesError::ThetaShapeMismatch` / `HawkesError::NonFiniteTheta`.
    pub fn compute_loss(
        &self, data: &HawkesData, decay: f64, theta: ArrayView2<f64>,
    ) -> HawkesResult<f64> {
        let weights = self.initialize(data, decay)?;
        validate_theta(theta, self.n_components)?;
        let end_time = data.end_time();
        let loss: f64 =
            (0..self.n_components).map(|i| loss_component(weights, theta, i, end_time)).sum();
        Ok(loss / end_time)
    }

    /// Gradient of [`compute_loss`](Self::compute_loss), shaped like `theta`.
    ///
    /// The `α` derivative uses the symmetrized `W(j,j2) + W(j2,j)` because
    /// `W` is causal (directional) while the quadratic cross term is
    /// symmetric in `(j, j2)`.
    pub fn compute_grad(
        &self, data: &HawkesData, decay: f64, theta: ArrayView2<f64>,
    ) -> HawkesResult<Array2<f64>> {
        let weights = self.initialize(data, decay)?;
        validate_theta(theta, self.n_components)?;
        let end_time = data.end_time();
        let mut grad = Array2::<f64>::zeros((self.n_components, self.n_components + 1));
        for (i, row) in grad.rows_mut().into_iter().enumerate() {
            grad_component(weights, theta, i, end_time, row);
        }
        grad /= end_time;
        Ok(grad)
    }

    /// Hessian of the contrast with respect to one row of `theta`.
    ///
    /// The contrast is quadratic, so the Hessian does not depend on `theta`
    /// and is identical for every row; the full Hessian over all `n·(n + 1)`
    /// parameters is block-diagonal with `n` copies of this matrix.
    ///
    /// Layout (before dividing by `T`):
    /// - `H(0, 0) = 2T`
    /// - `H(0, j+1) = H(j+1, 0) = 2·I[j]`
    /// - `H(j+1, j2+1) = W(j,j2) + W(j2,j)`, plus `2·I2[j]` when `j == j2`.
    pub fn compute_hessian(&self, data: &HawkesData, decay: f64) -> HawkesResult<Array2<f64>> {
        let weights = self.initialize(data, decay)?;
        let end_time = data.end_time();
        let n = self.n_components;
        let w = weights.w();
        let mut hessian = Array2::<f64>::zeros((n + 1, n + 1));
        hessian[[0, 0]] = 2.0 * end_time;
        for j in 0..n {
            hessian[[0, j + 1]] = 2.0 * weights.i()[j];
            hessian[[j + 1, 0]] = 2.0 * weights.i()[j];
        }
        for j in 0..n {
            for j2 in 0..n {
                hessian[[j + 1, j2 + 1]] = w[[j, j2]] + w[[j2, j]];
            }
            hessian[[j + 1, j + 1]] += 2.0 * weights.i2()[j];
        }
        hessian /= end_time;
        Ok(hessian)
    }
}

// ---- Helper methods ----

fn loss_component(
    weights: &LeastSquaresWeights, theta: ArrayView2<f64>, i: usize, end_time: f64,
) -> f64 {
    let n = weights.n_components();
    let (i_vec, i2, v, w) = (weights.i(), weights.i2(), weights.v(), weights.w());
    let mu = theta[[i, 0]];

    let mut term_square = 0.0;
    let mut term_cross_mu = 0.0;
    let mut term_stieltjes = 0.0;
    let mut term_cross_alpha = 0.0;
    for j in 0..n {
        let a_j = theta[[i, j + 1]];
        term_square += a_j * a_j * i2[j];
        term_cross_mu += a_j * i_vec[j];
        term_stieltjes += a_j * v[[i, j]];
        for j2 in 0..n {
            term_cross_alpha += a_j * theta[[i, j2 + 1]] * w[[j, j2]];
        }
    }

    mu * mu * end_time - 2.0 * mu * weights.n()[i] as f64
        + term_square
        + 2.0 * mu * term_cross_mu
        - 2.0 * term_stieltjes
        + term_cross_alpha
}

fn grad_component(
    weights: &LeastSquaresWeights, theta: ArrayView2<f64>, i: usize, end_time: f64,
    mut row: ArrayViewMut1<f64>,
) {
    let n = weights.n_components();
    let (i_vec, i2, v, w) = (weights.i(), weights.i2(), weights.v(), weights.w());
    let mu = theta[[i, 0]];

    row[0] = 2.0 * (mu * end_time - weights.n()[i] as f64);
    for j in 0..n {
        let a_j = theta[[i, j + 1]];
        row[0] += 2.0 * a_j * i_vec[j];
        let mut d_alpha =
            2.0 * a_j * i2[j] + 2.0 * a_j * w[[j, j]] + 2.0 * mu * i_vec[j] - 2.0 * v[[i, j]];
        for j2 in 0..n {
            if j2 != j {
                d_alpha += theta[[i, j2 + 1]] * (w[[j, j2]] + w[[j2, j]]);
            }
        }
        row[j + 1] = d_alpha;
    }
}
