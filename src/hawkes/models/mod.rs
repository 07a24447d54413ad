//! hawkes::models — objective functions over one or many realizations.
//!
//! - [`least_squares`]: [`LeastSquaresSingle`], loss/gradient/Hessian of the
//!   least-squares contrast for one realization.
//! - [`log_likelihood`]: [`LogLikelihoodSingle`], log-likelihood and gradient
//!   for one realization (no Hessian).
//! - [`aggregated`]: [`LeastSquaresAggregated`], the least-squares contrast
//!   averaged over i.i.d. repetitions, with [`AggregationOptions`].
//!
//! Every model takes the parameter matrix `theta` as an `n × (n + 1)` view
//! whose row `i` is `[μ_i, α_i1, …, α_in]`.

pub mod aggregated;
pub mod least_squares;
pub mod log_likelihood;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::aggregated::{AggregationOptions, LeastSquaresAggregated};
pub use self::least_squares::LeastSquaresSingle;
pub use self::log_likelihood::LogLikelihoodSingle;
