//! optimization::types — numeric aliases shared by the optimizer bridge.
//!
//! Conventions
//! -----------
//! - `Theta` is the row-major flattening of the `n × (n + 1)` parameter
//!   matrix, so entry `i·(n + 1) + c` is `theta[[i, c]]`.
//! - `Grad` has the same layout as `Theta`.
//! - `Hessian` is `n·(n + 1)` square when it describes the flattened problem.
use ndarray::{Array1, Array2};

/// Flattened parameter vector.
pub type Theta = Array1<f64>;

/// Gradient of the cost, laid out like [`Theta`].
pub type Grad = Array1<f64>;

/// Dense Hessian of the cost.
pub type Hessian = Array2<f64>;

/// Scalar objective value minimized by the optimizer.
pub type Cost = f64;
