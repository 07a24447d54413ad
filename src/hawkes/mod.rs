//! hawkes — multivariate Hawkes processes with exponential kernels.
//!
//! Purpose
//! -------
//! Evaluate the objectives used to fit a Hawkes process with kernel
//! `φ_ij(t) = α_ij·β·exp(−β·t)` to observed jump times: the least-squares
//! contrast (loss, gradient, Hessian, single or averaged over repetitions)
//! and the log-likelihood (loss, gradient). Fitting itself is left to the
//! caller; see [`crate::optimization`] for the argmin bridge.
//!
//! Layout
//! ------
//! - [`core`]: data containers, validation, the decayed recursion, the
//!   statistics engines, and their compute-once cache.
//! - [`models`]: the objective functions.
//! - [`errors`]: [`HawkesError`] and [`HawkesResult`].
//!
//! Conventions
//! -----------
//! - `decay` is the kernel rate `β > 0`, shared by every component pair.
//! - Observation window is `[0, end_time)`.
//! - `theta` has shape `n × (n + 1)`: column 0 holds baselines `μ`, columns
//!   `1..=n` hold excitation amplitudes `α`.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{HawkesData, HawkesRepetitions, WeightsState};
pub use self::errors::{HawkesError, HawkesResult};
pub use self::models::{
    AggregationOptions, LeastSquaresAggregated, LeastSquaresSingle, LogLikelihoodSingle,
};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_hawkes::hawkes::prelude::*;
//
// to import the model surface in a single line.

pub mod prelude {
    pub use super::{
        AggregationOptions, HawkesData, HawkesError, HawkesRepetitions, HawkesResult,
        LeastSquaresAggregated, LeastSquaresSingle, LogLikelihoodSingle, WeightsState,
    };
}
