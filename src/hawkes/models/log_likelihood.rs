//! Single-repetition log-likelihood for exponential Hawkes processes.
//!
//! This module wires the cached [`LogLikelihoodWeights`] of one realization
//! to the log-likelihood and its gradient with respect to `θ = [μ | α]`.
//!
//! Key ideas:
//! - The log term `log(μ_i + Σ_j α_ij·Psi[i][l][j])` is evaluated at every
//!   observed event `l` of component `i`, so per-event influences are cached
//!   instead of aggregates.
//! - The intensity at every observed event must be strictly positive; a
//!   non-positive (or non-finite) value is reported as
//!   `HawkesError::NonPositiveIntensity` and never clamped.
//! - `negate = true` returns the negative log-likelihood (and its gradient),
//!   the form minimizers expect.
//! - No Hessian is provided for this objective.
//!
//! For component `i`:
//!
//! ```text
//! ℓ_i = −μ_i·T − Σ_j α_ij·I[j] + Σ_l log(λ_il),   λ_il = μ_i + Σ_j α_ij·Psi[i][l][j]
//! ```
use crate::hawkes::{
    core::{
        cache::{WeightsCache, WeightsState},
        data::HawkesData,
        statistics::LogLikelihoodWeights,
        validation::{validate_decay, validate_theta},
    },
    errors::{HawkesError, HawkesResult},
};
use ndarray::{Array1, Array2, ArrayView2};

/// Log-likelihood model for one observed realization.
///
/// Like [`LeastSquaresSingle`](super::least_squares::LeastSquaresSingle), an
/// instance is bound to the first `(data, decay)` it is evaluated on.
#[derive(Debug, Clone, Default)]
pub struct LogLikelihoodSingle {
    n_components: usize,
    weights: WeightsCache<LogLikelihoodWeights>,
}

impl LogLikelihoodSingle {
    pub fn new(n_components: usize) -> Self {
        LogLikelihoodSingle { n_components, weights: WeightsCache::new() }
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    pub fn state(&self) -> WeightsState {
        self.weights.state()
    }

    pub fn weights(&self) -> Option<&LogLikelihoodWeights> {
        self.weights.get()
    }

    /// Validate inputs and compute the per-event weights if not cached.
    ///
    /// # Errors
    /// - `HawkesError::InvalidDecay`, `HawkesError::InvalidDimension`,
    ///   `HawkesError::StaleWeights`.
    pub fn initialize(
        &self, data: &HawkesData, decay: f64,
    ) -> HawkesResult<&LogLikelihoodWeights> {
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

    /// Log-likelihood at `theta`, or its negative when `negate` is set.
    ///
    /// # Errors
    /// - Everything [`initialize`](Self::initialize) returns.
    /// - `HawkesError::ThetaShapeMismatch` / `HawkesError::NonFiniteTheta`.
    /// - `HawkesError::NonPositiveIntensity` for the first observed event
    ///   whose intensity is not strictly positive.
    pub fn compute_loss(
        &self, data: &HawkesData, decay: f64, theta: ArrayView2<f64>, negate: bool,
    ) -> HawkesResult<f64> {
        let weights = self.initialize(data, decay)?;
        validate_theta(theta, self.n_components)?;
        let end_time = data.end_time();
        let sign = if negate { -1.0 } else { 1.0 };

        let mut loss = 0.0;
        for i in 0..self.n_components {
            let intensities = event_intensities(weights, theta, i)?;
            let term_log: f64 = intensities.iter().map(|lambda| lambda.ln()).sum();
            let term_integral: f64 =
                (0..self.n_components).map(|j| theta[[i, j + 1]] * weights.i()[j]).sum();
            loss += sign * (-theta[[i, 0]] * end_time - term_integral + term_log);
        }
        Ok(loss)
    }

    /// Gradient of [`compute_loss`](Self::compute_loss), shaped like `theta`.
    ///
    /// ```text
    /// ∂ℓ/∂μ_i  = −T + Σ_l 1/λ_il
    /// ∂ℓ/∂α_ij = Σ_l Psi[i][l][j]/λ_il − I[j]
    /// ```
    pub fn compute_grad(
        &self, data: &HawkesData, decay: f64, theta: ArrayView2<f64>, negate: bool,
    ) -> HawkesResult<Array2<f64>> {
        let weights = self.initialize(data, decay)?;
        validate_theta(theta, self.n_components)?;
        let end_time = data.end_time();
        let n = self.n_components;
        let mut grad = Array2::<f64>::zeros((n, n + 1));

        for i in 0..n {
            let intensities = event_intensities(weights, theta, i)?;
            let inv = intensities.mapv(f64::recip);
            let psi = weights.psi(i);
            grad[[i, 0]] = -end_time + inv.sum();
            for j in 0..n {
                grad[[i, j + 1]] = psi.column(j).dot(&inv) - weights.i()[j];
            }
        }
        if negate {
            grad.mapv_inplace(|g| -g);
        }
        Ok(grad)
    }
}

/// Intensity of component `i` at each of its observed events.
///
/// # Errors
/// - [`HawkesError::NonPositiveIntensity`] for the first event with `λ ≤ 0`
///   or a non-finite `λ`.
fn event_intensities(
    weights: &LogLikelihoodWeights, theta: ArrayView2<f64>, i: usize,
) -> HawkesResult<Array1<f64>> {
    let psi = weights.psi(i);
    let alpha = theta.row(i);
    let alpha = alpha.slice(ndarray::s![1..]);
    let mut intensities = psi.dot(&alpha);
    intensities += theta[[i, 0]];
    for (event, &value) in intensities.iter().enumerate() {
        if !(value > 0.0) || !value.is_finite() {
            return Err(HawkesError::NonPositiveIntensity { component: i, event, value });
        }
    }
    Ok(intensities)
}
