//! hawkes::core — data containers, validation, the decayed recursion, and
//! cached statistics.
//!
//! Purpose
//! -------
//! Collect the building blocks the Hawkes models are assembled from:
//! validated jump-time data, boundary checks, the shared exponential-decay
//! recursion, the two statistics engines, and the compute-once cache that
//! holds them.
//!
//! Key behaviors
//! -------------
//! - [`data`]: [`HawkesData`] (one realization) and [`HawkesRepetitions`]
//!   (i.i.d. batch on a shared window).
//! - [`validation`]: decay, end-time, jump-time, and theta checks.
//! - [`recursion`]: [`accumulate_decayed`], the O(n) two-pointer pass.
//! - [`statistics`]: [`LeastSquaresWeights`] and [`LogLikelihoodWeights`].
//! - [`cache`]: [`WeightsCache`] with an explicit [`WeightsState`].
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; component `j` of a realization is
//!   `data.component(j)`.
//! - Nothing in this module depends on the parameter matrix theta.

pub mod cache;
pub mod data;
pub mod recursion;
pub mod statistics;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::cache::{CachedWeights, Provenance, WeightsCache, WeightsState};
pub use self::data::{HawkesData, HawkesRepetitions};
pub use self::recursion::accumulate_decayed;
pub use self::statistics::{LeastSquaresWeights, LogLikelihoodWeights};
pub use self::validation::{validate_decay, validate_end_time, validate_jump_times, validate_theta};
