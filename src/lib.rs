//! rust_hawkes — objectives for fitting multivariate exponential Hawkes
//! processes.
//!
//! Purpose
//! -------
//! Serve as the crate root. The crate computes the losses, gradients, and
//! Hessians an optimizer needs to fit a multivariate Hawkes process with
//! exponential kernels to observed event times, and bridges them to
//! `argmin`.
//!
//! Key behaviors
//! -------------
//! - [`hawkes`]: validated event data, the cached statistics engines, and
//!   the least-squares (single and averaged) and log-likelihood models.
//! - [`optimization`]: bound objectives, the argmin adapter over the
//!   flattened parameter vector, and finite-difference helpers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Statistics depend only on data and decay; they are computed once per
//!   model and reused for every `theta`.
//! - Every failure is returned as a typed error (`HawkesError` or
//!   `OptError`); library code does not panic on bad input.
//!
//! Conventions
//! -----------
//! - Dense arrays are `ndarray` containers over `f64`.
//! - Diagnostics go through the `log` facade; the crate installs no logger.
//!
//! Downstream usage
//! ----------------
//! ```rust
//! use ndarray::array;
//! use rust_hawkes::hawkes::prelude::*;
//!
//! let data = HawkesData::from_vecs(vec![vec![1.0, 3.0], vec![2.0]], 5.0)?;
//! let model = LeastSquaresSingle::new(2);
//! let theta = array![[0.1, 0.05, 0.02], [0.1, 0.02, 0.05]];
//!
//! let loss = model.compute_loss(&data, 1.0, theta.view())?;
//! let grad = model.compute_grad(&data, 1.0, theta.view())?;
//! assert!(loss.is_finite());
//! assert_eq!(grad.dim(), (2, 3));
//! # Ok::<(), HawkesError>(())
//! ```
//!
//! Testing notes
//! -------------
//! - Unit tests live next to the code they cover; `tests/` holds an
//!   end-to-end pipeline on synthetic event sequences.

pub mod hawkes;
pub mod optimization;
