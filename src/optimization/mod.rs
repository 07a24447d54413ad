//! optimization — bridge from Hawkes objectives to the `argmin` ecosystem.
//!
//! Purpose
//! -------
//! Let an external optimizer drive the Hawkes objectives without knowing
//! about parameter matrices, data, or decay. Objectives are bound to their
//! data once, exposed as argmin problems over a flat vector, and paired with
//! finite-difference helpers for derivative checks.
//!
//! Key behaviors
//! -------------
//! - [`objective`]: the [`HawkesObjective`] trait and the bound objectives
//!   [`LeastSquaresObjective`], [`AveragedLeastSquaresObjective`], and
//!   [`LogLikelihoodObjective`].
//! - [`adapter`]: [`ArgMinAdapter`], implementing argmin's `CostFunction`,
//!   `Gradient`, and `Hessian` on the row-major flattened vector.
//! - [`finite_diff`]: [`numerical_grad`] and [`numerical_hessian`] built on
//!   `finitediff`.
//! - [`errors`]: [`OptError`] / [`OptResult`], including conversions from
//!   argmin's error type and from `HawkesError`.
//!
//! Invariants & assumptions
//! ------------------------
//! - The flattened vector has `n·(n + 1)` entries; entry `i·(n + 1) + c` is
//!   `theta[[i, c]]`.
//! - Least-squares Hessians over the flattened vector are block-diagonal
//!   with `n` identical `(n + 1) × (n + 1)` blocks.
//! - Every value handed to a solver is validated as finite first; nothing is
//!   clamped.
//!
//! Conventions
//! -----------
//! - Objectives are minimized. The log-likelihood objective reports `−ℓ(θ)`
//!   unless built with `maximizing()`.
//! - This layer never logs; model-level diagnostics come from `hawkes`.
//!
//! Testing notes
//! -------------
//! - Unit tests in each submodule cover validation, layout, error
//!   round-trips through argmin, and agreement between numerical and
//!   analytic derivatives.
//! - The integration test drives an argmin L-BFGS run through
//!   [`ArgMinAdapter`].

pub mod adapter;
pub mod errors;
pub mod finite_diff;
pub mod objective;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::adapter::ArgMinAdapter;
pub use self::errors::{OptError, OptResult};
pub use self::finite_diff::{numerical_grad, numerical_hessian};
pub use self::objective::{
    AveragedLeastSquaresObjective, HawkesObjective, LeastSquaresObjective, LogLikelihoodObjective,
};
pub use self::types::{Cost, Grad, Hessian, Theta};

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_hawkes::optimization::prelude::*;
//
// to import the optimizer bridge in a single line.

pub mod prelude {
    pub use super::{
        ArgMinAdapter, AveragedLeastSquaresObjective, HawkesObjective, LeastSquaresObjective,
        LogLikelihoodObjective, OptError, OptResult, Theta, numerical_grad, numerical_hessian,
    };
}
