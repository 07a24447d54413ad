//! Hawkes validation helpers — reusable checks for decay, observation window,
//! jump times, and parameter matrices.
//!
//! Purpose
//! -------
//! Centralize the boundary checks shared by the data layer and the models so
//! every public operation fails fast with a structured [`HawkesError`]
//! before any statistic is accumulated.
//!
//! Invariants & assumptions
//! ------------------------
//! - Decay and end time must be finite and strictly positive.
//! - Jump times must be finite, strictly ascending, and lie in
//!   `[0, end_time)`.
//! - A parameter matrix for `n` components has shape `n × (n + 1)` with
//!   finite entries; column 0 holds baselines, column `j + 1` the excitation
//!   from component `j`.
//!
//! Conventions
//! -----------
//! - Validation functions return [`HawkesResult`] and never panic on invalid
//!   inputs. The first offending element is reported.
//! - This module contains no I/O and no logging.
use crate::hawkes::errors::{HawkesError, HawkesResult};
use ndarray::{ArrayView1, ArrayView2};

/// Validate the exponential kernel decay rate.
///
/// Returns the decay unchanged when it is finite and `> 0`.
///
/// # Errors
/// - [`HawkesError::InvalidDecay`] if `decay` is NaN, ±∞, or ≤ 0.
///
/// # Examples
/// ```rust
/// # use rust_hawkes::hawkes::core::validation::validate_decay;
/// use rust_hawkes::hawkes::errors::HawkesError;
///
/// assert_eq!(validate_decay(2.0), Ok(2.0));
/// assert!(matches!(validate_decay(0.0), Err(HawkesError::InvalidDecay { .. })));
/// ```
pub fn validate_decay(decay: f64) -> HawkesResult<f64> {
    if !decay.is_finite() {
        return Err(HawkesError::InvalidDecay { value: decay, reason: "Decay must be finite." });
    }
    if decay <= 0.0 {
        return Err(HawkesError::InvalidDecay {
            value: decay,
            reason: "Decay must be strictly positive.",
        });
    }
    Ok(decay)
}

/// Validate the observation window upper bound.
///
/// # Errors
/// - [`HawkesError::InvalidTimeWindow`] if `end_time` is NaN, ±∞, or ≤ 0.
pub fn validate_end_time(end_time: f64) -> HawkesResult<f64> {
    if !end_time.is_finite() {
        return Err(HawkesError::InvalidTimeWindow {
            end_time,
            reason: "End time must be finite.",
        });
    }
    if end_time <= 0.0 {
        return Err(HawkesError::InvalidTimeWindow {
            end_time,
            reason: "End time must be strictly positive.",
        });
    }
    Ok(end_time)
}

/// Validate one component's jump-time sequence against the observation window.
///
/// Parameters
/// ----------
/// - `component`: `usize`
///   Index of the component, used only for error reporting.
/// - `times`: `ArrayView1<f64>`
///   Candidate jump times. May be empty.
/// - `end_time`: `f64`
///   Already validated observation window upper bound.
///
/// Errors
/// ------
/// - `HawkesError::NonFiniteJumpTime` for NaN/±∞ entries.
/// - `HawkesError::JumpTimeOutsideWindow` for entries `< 0` or `≥ end_time`.
/// - `HawkesError::UnsortedEvents` when an entry does not strictly exceed
///   its predecessor (ties included).
pub fn validate_jump_times(
    component: usize, times: ArrayView1<f64>, end_time: f64,
) -> HawkesResult<()> {
    let mut previous: Option<f64> = None;
    for (index, &value) in times.iter().enumerate() {
        if !value.is_finite() {
            return Err(HawkesError::NonFiniteJumpTime { component, index, value });
        }
        if value < 0.0 || value >= end_time {
            return Err(HawkesError::JumpTimeOutsideWindow { component, index, value, end_time });
        }
        if let Some(prev) = previous {
            if value <= prev {
                return Err(HawkesError::UnsortedEvents {
                    component,
                    index,
                    previous: prev,
                    value,
                });
            }
        }
        previous = Some(value);
    }
    Ok(())
}

/// Validate the shape and entries of a parameter matrix.
///
/// # Errors
/// - [`HawkesError::ThetaShapeMismatch`] if `theta` is not
///   `n_components × (n_components + 1)`.
/// - [`HawkesError::NonFiniteTheta`] for the first NaN/±∞ entry.
pub fn validate_theta(theta: ArrayView2<f64>, n_components: usize) -> HawkesResult<()> {
    let expected = (n_components, n_components + 1);
    let found = theta.dim();
    if found != expected {
        return Err(HawkesError::ThetaShapeMismatch { expected, found });
    }
    for ((row, col), &value) in theta.indexed_iter() {
        if !value.is_finite() {
            return Err(HawkesError::NonFiniteTheta { row, col, value });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Decay and end-time positivity/finiteness checks.
    // - Jump-time ordering, window, and finiteness checks, including ties.
    // - Theta shape and finiteness checks.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that positive finite decays pass and everything else is rejected.
    //
    // Given
    // -----
    // - Decays `1.5`, `0.0`, `-1.0`, `NaN`.
    //
    // Expect
    // ------
    // - Only `1.5` is accepted.
    fn validate_decay_rejects_non_positive_and_non_finite() {
        assert_eq!(validate_decay(1.5), Ok(1.5));
        assert!(matches!(validate_decay(0.0), Err(HawkesError::InvalidDecay { .. })));
        assert!(matches!(validate_decay(-1.0), Err(HawkesError::InvalidDecay { .. })));
        assert!(matches!(validate_decay(f64::NAN), Err(HawkesError::InvalidDecay { .. })));
    }

    #[test]
    // Purpose
    // -------
    // Verify end-time validation.
    //
    // Given
    // -----
    // - End times `5.0`, `0.0`, `+∞`.
    //
    // Expect
    // ------
    // - Only `5.0` is accepted; the others map to `InvalidTimeWindow`.
    fn validate_end_time_rejects_invalid_windows() {
        assert_eq!(validate_end_time(5.0), Ok(5.0));
        assert!(matches!(validate_end_time(0.0), Err(HawkesError::InvalidTimeWindow { .. })));
        assert!(matches!(
            validate_end_time(f64::INFINITY),
            Err(HawkesError::InvalidTimeWindow { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Ensure ties and decreasing times are reported as `UnsortedEvents` with
    // the first offending index.
    //
    // Given
    // -----
    // - `[0.5, 1.0, 1.0]` within a window of length 2.
    //
    // Expect
    // ------
    // - `UnsortedEvents { component: 3, index: 2, previous: 1.0, value: 1.0 }`.
    fn validate_jump_times_rejects_ties() {
        let times = array![0.5, 1.0, 1.0];

        let err = validate_jump_times(3, times.view(), 2.0).unwrap_err();

        assert_eq!(
            err,
            HawkesError::UnsortedEvents { component: 3, index: 2, previous: 1.0, value: 1.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure jump times at or beyond the end time, or before zero, are rejected.
    //
    // Given
    // -----
    // - `[1.0, 2.0]` with `end_time = 2.0` and `[-0.1]` with `end_time = 1.0`.
    //
    // Expect
    // ------
    // - Both return `JumpTimeOutsideWindow` pointing at the offending entry.
    fn validate_jump_times_rejects_out_of_window() {
        let at_end = array![1.0, 2.0];
        let negative = array![-0.1];

        let err_end = validate_jump_times(0, at_end.view(), 2.0).unwrap_err();
        let err_neg = validate_jump_times(1, negative.view(), 1.0).unwrap_err();

        assert_eq!(
            err_end,
            HawkesError::JumpTimeOutsideWindow { component: 0, index: 1, value: 2.0, end_time: 2.0 }
        );
        assert!(matches!(err_neg, HawkesError::JumpTimeOutsideWindow { component: 1, .. }));
    }

    #[test]
    // Purpose
    // -------
    // Ensure an empty sequence is valid and NaN entries are reported.
    //
    // Given
    // -----
    // - An empty array and `[0.1, NaN]`.
    //
    // Expect
    // ------
    // - The empty array passes; the NaN yields `NonFiniteJumpTime` at index 1.
    fn validate_jump_times_handles_empty_and_nan() {
        let empty: ndarray::Array1<f64> = array![];
        let with_nan = array![0.1, f64::NAN];

        assert!(validate_jump_times(0, empty.view(), 1.0).is_ok());
        assert!(matches!(
            validate_jump_times(2, with_nan.view(), 1.0),
            Err(HawkesError::NonFiniteJumpTime { component: 2, index: 1, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Check theta shape and finiteness validation.
    //
    // Given
    // -----
    // - A 2×3 matrix (valid for two components), a 2×2 matrix, and a 2×3
    //   matrix containing +∞.
    //
    // Expect
    // ------
    // - Valid shape passes, wrong shape yields `ThetaShapeMismatch`, and the
    //   infinite entry yields `NonFiniteTheta` at its position.
    fn validate_theta_checks_shape_and_entries() {
        let good = Array2::<f64>::zeros((2, 3));
        let bad_shape = Array2::<f64>::zeros((2, 2));
        let mut bad_value = Array2::<f64>::zeros((2, 3));
        bad_value[[1, 2]] = f64::INFINITY;

        assert!(validate_theta(good.view(), 2).is_ok());
        assert_eq!(
            validate_theta(bad_shape.view(), 2),
            Err(HawkesError::ThetaShapeMismatch { expected: (2, 3), found: (2, 2) })
        );
        assert_eq!(
            validate_theta(bad_value.view(), 2),
            Err(HawkesError::NonFiniteTheta { row: 1, col: 2, value: f64::INFINITY })
        );
    }
}
