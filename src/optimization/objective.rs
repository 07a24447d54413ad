//! Hawkes objectives bound to their data, ready for an optimizer.
//!
//! Purpose
//! -------
//! A model evaluation needs the model, its data, and the decay alongside
//! `theta`. The types here bundle the first three so an optimizer only ever
//! passes the parameter matrix. All of them implement [`HawkesObjective`],
//! the trait the argmin adapter and the finite-difference helpers consume.
//!
//! Conventions
//! -----------
//! - `value` is the quantity to **minimize**. Least-squares objectives return
//!   the contrast itself; the log-likelihood objective returns `−ℓ(θ)` unless
//!   it was built with [`LogLikelihoodObjective::maximizing`].
//! - `hessian_block` is the `(n + 1) × (n + 1)` block shared by every row of
//!   `theta`; objectives without an analytic Hessian return
//!   `OptError::HessianNotImplemented`.
use crate::{
    hawkes::{
        core::data::{HawkesData, HawkesRepetitions},
        models::{LeastSquaresAggregated, LeastSquaresSingle, LogLikelihoodSingle},
    },
    optimization::errors::{OptError, OptResult},
};
use ndarray::{Array2, ArrayView2};

/// Objective over the `n × (n + 1)` Hawkes parameter matrix.
pub trait HawkesObjective {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Number of process components `n`.
    fn n_components(&self) -> usize;

    /// Length of the flattened parameter vector, `n·(n + 1)`.
    fn dim(&self) -> usize {
        let n = self.n_components();
        n * (n + 1)
    }

    /// Objective value at `theta`.
    fn value(&self, theta: ArrayView2<f64>) -> OptResult<f64>;

    /// Gradient at `theta`, shaped like `theta`.
    fn grad(&self, theta: ArrayView2<f64>) -> OptResult<Array2<f64>>;

    /// Per-row Hessian block; `theta`-independent for quadratic objectives.
    fn hessian_block(&self) -> OptResult<Array2<f64>> {
        Err(OptError::HessianNotImplemented { objective: self.name() })
    }
}

/// Least-squares contrast of one realization.
#[derive(Debug, Clone, Copy)]
pub struct LeastSquaresObjective<'a> {
    model: &'a LeastSquaresSingle,
    data: &'a HawkesData,
    decay: f64,
}

impl<'a> LeastSquaresObjective<'a> {
    pub fn new(model: &'a LeastSquaresSingle, data: &'a HawkesData, decay: f64) -> Self {
        LeastSquaresObjective { model, data, decay }
    }
}

impl HawkesObjective for LeastSquaresObjective<'_> {
    fn name(&self) -> &'static str {
        "least-squares"
    }

    fn n_components(&self) -> usize {
        self.model.n_components()
    }

    fn value(&self, theta: ArrayView2<f64>) -> OptResult<f64> {
        Ok(self.model.compute_loss(self.data, self.decay, theta)?)
    }

    fn grad(&self, theta: ArrayView2<f64>) -> OptResult<Array2<f64>> {
        Ok(self.model.compute_grad(self.data, self.decay, theta)?)
    }

    fn hessian_block(&self) -> OptResult<Array2<f64>> {
        Ok(self.model.compute_hessian(self.data, self.decay)?)
    }
}

/// Least-squares contrast averaged over repetitions.
#[derive(Debug, Clone, Copy)]
pub struct AveragedLeastSquaresObjective<'a> {
    model: &'a LeastSquaresAggregated,
    repetitions: &'a HawkesRepetitions,
    decay: f64,
}

impl<'a> AveragedLeastSquaresObjective<'a> {
    pub fn new(
        model: &'a LeastSquaresAggregated, repetitions: &'a HawkesRepetitions, decay: f64,
    ) -> Self {
        AveragedLeastSquaresObjective { model, repetitions, decay }
    }
}

impl HawkesObjective for AveragedLeastSquaresObjective<'_> {
    fn name(&self) -> &'static str {
        "averaged least-squares"
    }

    fn n_components(&self) -> usize {
        self.model.n_components()
    }

    fn value(&self, theta: ArrayView2<f64>) -> OptResult<f64> {
        Ok(self.model.compute_averaged_loss(self.repetitions, self.decay, theta)?)
    }

    fn grad(&self, theta: ArrayView2<f64>) -> OptResult<Array2<f64>> {
        Ok(self.model.compute_averaged_grad(self.repetitions, self.decay, theta)?)
    }

    fn hessian_block(&self) -> OptResult<Array2<f64>> {
        Ok(self.model.compute_averaged_hessian(self.repetitions, self.decay)?)
    }
}

/// Log-likelihood of one realization.
///
/// Built with [`new`](Self::new) it reports `−ℓ(θ)` so that minimizing the
/// objective maximizes the likelihood.
#[derive(Debug, Clone, Copy)]
pub struct LogLikelihoodObjective<'a> {
    model: &'a LogLikelihoodSingle,
    data: &'a HawkesData,
    decay: f64,
    negate: bool,
}

impl<'a> LogLikelihoodObjective<'a> {
    pub fn new(model: &'a LogLikelihoodSingle, data: &'a HawkesData, decay: f64) -> Self {
        LogLikelihoodObjective { model, data, decay, negate: true }
    }

    /// Report `ℓ(θ)` itself instead of its negative.
    pub fn maximizing(mut self) -> Self {
        self.negate = false;
        self
    }

    pub fn is_negated(&self) -> bool {
        self.negate
    }
}

impl HawkesObjective for LogLikelihoodObjective<'_> {
    fn name(&self) -> &'static str {
        "log-likelihood"
    }

    fn n_components(&self) -> usize {
        self.model.n_components()
    }

    fn value(&self, theta: ArrayView2<f64>) -> OptResult<f64> {
        Ok(self.model.compute_loss(self.data, self.decay, theta, self.negate)?)
    }

    fn grad(&self, theta: ArrayView2<f64>) -> OptResult<Array2<f64>> {
        Ok(self.model.compute_grad(self.data, self.decay, theta, self.negate)?)
    }
}
