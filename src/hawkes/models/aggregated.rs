//! Least-squares contrast averaged over i.i.d. repetitions.
//!
//! Purpose
//! -------
//! Fit one parameter matrix to a batch of independent realizations observed
//! on the same window. Each repetition gets its own [`LeastSquaresSingle`]
//! (and therefore its own statistics cache); loss, gradient, and Hessian are
//! the arithmetic means of the per-repetition values.
//!
//! Key behaviors
//! -------------
//! - Evaluation only goes through the single model's public operations.
//! - Repetitions are evaluated in parallel with `rayon` when
//!   [`AggregationOptions::parallel`] is set and the batch has at least
//!   [`AggregationOptions::min_parallel_repetitions`] entries; otherwise
//!   sequentially. Both paths return the same mean up to summation order.
//! - The batch is checked against the configured repetition and component
//!   counts before any repetition is evaluated. The first successful check
//!   is recorded and exposed through [`LeastSquaresAggregated::is_validated`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Repetition `r` of every call is paired with model `r`, so a model's
//!   cache always belongs to the same realization.
//! - `n_repetitions = 0` is a valid configuration but every evaluation on it
//!   fails with `HawkesError::NoRepetitions`.
use crate::hawkes::{
    core::data::{HawkesData, HawkesRepetitions},
    errors::{HawkesError, HawkesResult},
    models::least_squares::LeastSquaresSingle,
};
use log::trace;
use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

/// Configuration for repetition-level parallelism.
///
/// Default:
/// - `parallel`: `true`
/// - `min_parallel_repetitions`: `2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregationOptions {
    pub parallel: bool,
    pub min_parallel_repetitions: usize,
}

impl AggregationOptions {
    /// Construct validated options.
    ///
    /// # Errors
    /// - [`HawkesError::InvalidOption`] if `min_parallel_repetitions == 0`.
    pub fn new(parallel: bool, min_parallel_repetitions: usize) -> HawkesResult<Self> {
        if min_parallel_repetitions == 0 {
            return Err(HawkesError::InvalidOption {
                name: "min_parallel_repetitions",
                reason: "Parallel threshold must be at least one repetition.",
            });
        }
        Ok(AggregationOptions { parallel, min_parallel_repetitions })
    }

    /// Options that never leave the calling thread.
    pub fn sequential() -> Self {
        AggregationOptions { parallel: false, ..Self::default() }
    }

    fn use_parallel(&self, n_repetitions: usize) -> bool {
        self.parallel && n_repetitions >= self.min_parallel_repetitions
    }
}

impl Default for AggregationOptions {
    fn default() -> Self {
        AggregationOptions { parallel: true, min_parallel_repetitions: 2 }
    }
}

/// Averaged least-squares model over a fixed number of repetitions.
#[derive(Debug)]
pub struct LeastSquaresAggregated {
    n_repetitions: usize,
    n_components: usize,
    models: Vec<LeastSquaresSingle>,
    options: AggregationOptions,
    validated: AtomicBool,
}

impl LeastSquaresAggregated {
    pub fn new(n_repetitions: usize, n_components: usize) -> Self {
        Self::with_options(n_repetitions, n_components, AggregationOptions::default())
    }

    pub fn with_options(
        n_repetitions: usize, n_components: usize, options: AggregationOptions,
    ) -> Self {
        let models = (0..n_repetitions).map(|_| LeastSquaresSingle::new(n_components)).collect();
        LeastSquaresAggregated {
            n_repetitions,
            n_components,
            models,
            options,
            validated: AtomicBool::new(false),
        }
    }

    pub fn n_repetitions(&self) -> usize {
        self.n_repetitions
    }

    pub fn n_components(&self) -> usize {
        self.n_components
    }

    pub fn options(&self) -> AggregationOptions {
        self.options
    }

    /// Per-repetition models, in repetition order.
    pub fn models(&self) -> &[LeastSquaresSingle] {
        &self.models
    }

    /// `true` once a batch has passed the repetition/component checks.
    pub fn is_validated(&self) -> bool {
        self.validated.load(Ordering::Acquire)
    }

    /// Mean least-squares loss over all repetitions.
    ///
    /// # Errors
    /// - `HawkesError::NoRepetitions` / `HawkesError::InvalidDimension` from
    ///   the batch checks.
    /// - The first per-repetition error encountered.
    pub fn compute_averaged_loss(
        &self, repetitions: &HawkesRepetitions, decay: f64, theta: ArrayView2<f64>,
    ) -> HawkesResult<f64> {
        let losses =
            self.map_repetitions(repetitions, |model, data| model.compute_loss(data, decay, theta))?;
        Ok(losses.iter().sum::<f64>() / self.n_repetitions as f64)
    }

    /// Mean gradient over all repetitions, shaped like `theta`.
    pub fn compute_averaged_grad(
        &self, repetitions: &HawkesRepetitions, decay: f64, theta: ArrayView2<f64>,
    ) -> HawkesResult<Array2<f64>> {
        let grads =
            self.map_repetitions(repetitions, |model, data| model.compute_grad(data, decay, theta))?;
        Ok(self.mean_matrix(grads, (self.n_components, self.n_components + 1)))
    }

    /// Mean `(n + 1) × (n + 1)` Hessian block over all repetitions.
    pub fn compute_averaged_hessian(
        &self, repetitions: &HawkesRepetitions, decay: f64,
    ) -> HawkesResult<Array2<f64>> {
        let hessians =
            self.map_repetitions(repetitions, |model, data| model.compute_hessian(data, decay))?;
        Ok(self.mean_matrix(hessians, (self.n_components + 1, self.n_components + 1)))
    }

    fn validate_batch(&self, repetitions: &HawkesRepetitions) -> HawkesResult<()> {
        if self.n_repetitions == 0 {
            return Err(HawkesError::NoRepetitions);
        }
        if repetitions.len() != self.n_repetitions {
            return Err(HawkesError::InvalidDimension {
                what: "repetitions",
                expected: self.n_repetitions,
                actual: repetitions.len(),
            });
        }
        if repetitions.n_components() != self.n_components {
            return Err(HawkesError::InvalidDimension {
                what: "components",
                expected: self.n_components,
                actual: repetitions.n_components(),
            });
        }
        self.validated.store(true, Ordering::Release);
        Ok(())
    }

    fn map_repetitions<R, F>(&self, repetitions: &HawkesRepetitions, f: F) -> HawkesResult<Vec<R>>
    where
        R: Send,
        F: Fn(&LeastSquaresSingle, &HawkesData) -> HawkesResult<R> + Sync + Send,
    {
        self.validate_batch(repetitions)?;
        let data = repetitions.as_slice();
        if self.options.use_parallel(self.n_repetitions) {
            trace!("averaging {} repetitions in parallel", self.n_repetitions);
            self.models.par_iter().zip(data.par_iter()).map(|(m, d)| f(m, d)).collect()
        } else {
            trace!("averaging {} repetitions sequentially", self.n_repetitions);
            self.models.iter().zip(data.iter()).map(|(m, d)| f(m, d)).collect()
        }
    }

    fn mean_matrix(&self, parts: Vec<Array2<f64>>, shape: (usize, usize)) -> Array2<f64> {
        let mut total = parts.into_iter().fold(Array2::<f64>::zeros(shape), |acc, m| acc + m);
        total /= self.n_repetitions as f64;
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hawkes::core::cache::WeightsState;
    use approx::assert_relative_eq;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Averages over identical repetitions equal the single-repetition value.
    // - Parallel and sequential paths agree.
    // - Batch checks (empty configuration, repetition/component mismatch).
    // - AggregationOptions validation.
    //
    // They intentionally DO NOT cover:
    // - Correctness of the per-repetition quantities (see `least_squares`).
    // -------------------------------------------------------------------------

    fn realization() -> Vec<Array1<f64>> {
        vec![array![0.4, 1.1, 2.6, 4.2], array![0.9, 3.0]]
    }

    fn theta() -> Array2<f64> {
        array![[0.2, 0.3, 0.1], [0.15, 0.05, 0.4]]
    }

    fn distinct_batch() -> HawkesRepetitions {
        HawkesRepetitions::new(
            vec![
                realization(),
                vec![array![0.2, 2.2], array![1.5, 1.9, 4.4]],
                vec![array![], array![3.3]],
            ],
            5.0,
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Averaging `k` copies of one realization must reproduce the single value.
    //
    // Given
    // -----
    // - Three identical repetitions and a single model on the same data.
    //
    // Expect
    // ------
    // - Loss, gradient, and Hessian match the single-repetition values.
    fn identical_repetitions_average_to_single_value() {
        let batch = HawkesRepetitions::new(vec![realization(); 3], 5.0).unwrap();
        let single_data = HawkesData::new(realization(), 5.0).unwrap();
        let single = LeastSquaresSingle::new(2);
        let agg = LeastSquaresAggregated::new(3, 2);
        let theta = theta();

        let loss = agg.compute_averaged_loss(&batch, 0.8, theta.view()).unwrap();
        let grad = agg.compute_averaged_grad(&batch, 0.8, theta.view()).unwrap();
        let hess = agg.compute_averaged_hessian(&batch, 0.8).unwrap();

        assert_relative_eq!(
            loss,
            single.compute_loss(&single_data, 0.8, theta.view()).unwrap(),
            max_relative = 1e-12
        );
        let single_grad = single.compute_grad(&single_data, 0.8, theta.view()).unwrap();
        let single_hess = single.compute_hessian(&single_data, 0.8).unwrap();
        for (a, b) in grad.iter().zip(single_grad.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-12);
        }
        for (a, b) in hess.iter().zip(single_hess.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-12);
        }
        assert!(agg.is_validated());
        assert!(agg.models().iter().all(|m| m.state() == WeightsState::Ready));
    }

    #[test]
    // Purpose
    // -------
    // The rayon path and the sequential path must agree.
    //
    // Given
    // -----
    // - Three distinct repetitions; one model with default options and one
    //   with `AggregationOptions::sequential()`.
    //
    // Expect
    // ------
    // - Loss and gradient agree to 1e-12, and equal the hand-computed mean.
    fn parallel_and_sequential_paths_agree() {
        let batch = distinct_batch();
        let theta = theta();
        let par = LeastSquaresAggregated::new(3, 2);
        let seq = LeastSquaresAggregated::with_options(3, 2, AggregationOptions::sequential());

        let loss_par = par.compute_averaged_loss(&batch, 1.3, theta.view()).unwrap();
        let loss_seq = seq.compute_averaged_loss(&batch, 1.3, theta.view()).unwrap();
        let grad_par = par.compute_averaged_grad(&batch, 1.3, theta.view()).unwrap();
        let grad_seq = seq.compute_averaged_grad(&batch, 1.3, theta.view()).unwrap();

        let manual: f64 = batch
            .iter()
            .map(|d| LeastSquaresSingle::new(2).compute_loss(d, 1.3, theta.view()).unwrap())
            .sum::<f64>()
            / 3.0;

        assert_relative_eq!(loss_par, loss_seq, max_relative = 1e-12);
        assert_relative_eq!(loss_par, manual, max_relative = 1e-12);
        for (a, b) in grad_par.iter().zip(grad_seq.iter()) {
            assert_relative_eq!(*a, *b, epsilon = 1e-12, max_relative = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // Ensure malformed batches are rejected before evaluation.
    //
    // Given
    // -----
    // - A model configured for zero repetitions.
    // - A model expecting 2 repetitions fed 3.
    // - A model expecting 3 components fed 2.
    //
    // Expect
    // ------
    // - `NoRepetitions`, then `InvalidDimension` naming repetitions and
    //   components; `is_validated()` stays false.
    fn malformed_batches_are_rejected() {
        let batch = distinct_batch();
        let theta = theta();

        let empty = LeastSquaresAggregated::new(0, 2);
        assert_eq!(
            empty.compute_averaged_loss(&batch, 1.0, theta.view()),
            Err(HawkesError::NoRepetitions)
        );

        let wrong_count = LeastSquaresAggregated::new(2, 2);
        assert_eq!(
            wrong_count.compute_averaged_hessian(&batch, 1.0),
            Err(HawkesError::InvalidDimension { what: "repetitions", expected: 2, actual: 3 })
        );
        assert!(!wrong_count.is_validated());

        let wrong_dim = LeastSquaresAggregated::new(3, 3);
        assert_eq!(
            wrong_dim.compute_averaged_grad(&batch, 1.0, theta.view()),
            Err(HawkesError::InvalidDimension { what: "components", expected: 3, actual: 2 })
        );
        assert!(!wrong_dim.is_validated());
    }

    #[test]
    // Purpose
    // -------
    // Verify option validation and defaults.
    //
    // Expect
    // ------
    // - Zero threshold → `InvalidOption`; default is parallel with threshold 2.
    fn aggregation_options_validate_threshold() {
        assert!(matches!(
            AggregationOptions::new(true, 0),
            Err(HawkesError::InvalidOption { name: "min_parallel_repetitions", .. })
        ));
        let opts = AggregationOptions::new(false, 4).unwrap();
        assert!(!opts.use_parallel(10));
        let default = AggregationOptions::default();
        assert!(default.parallel);
        assert!(!default.use_parallel(1));
        assert!(default.use_parallel(2));
    }
}
