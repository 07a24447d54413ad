//! Errors for exponential Hawkes objectives (data validation, dimension
//! checks, cache provenance, and intensity-domain failures).
//!
//! This module defines the model error type, [`HawkesError`], used across the
//! data layer, the statistics engines, and the single/aggregated models. It
//! implements `Display`/`Error` and converts into the optimizer-level
//! `OptError` at the argmin boundary.
//!
//! ## Conventions
//! - **Indices are 0-based**. `component` always refers to the index of a
//!   process component, `index`/`event` to the position of an event inside
//!   that component's jump-time sequence.
//! - Jump times must be **finite**, **strictly ascending**, and lie in
//!   `[0, end_time)`.
//! - Every variant is a caller-input violation; none is recovered from
//!   internally.

/// Crate-wide result alias for Hawkes operations that may produce [`HawkesError`].
pub type HawkesResult<T> = Result<T, HawkesError>;

/// Unified error type for Hawkes objective evaluation.
///
/// Covers input/data validation, dimension agreement between data, model,
/// and parameter matrix, cache provenance, and log-likelihood domain
/// failures.
#[derive(Debug, Clone, PartialEq)]
pub enum HawkesError {
    // ---- Dimensions ----
    /// A count (components, repetitions, statistics shape) disagrees with the
    /// model configuration.
    InvalidDimension { what: &'static str, expected: usize, actual: usize },

    /// Parameter matrix is not `n_components × (n_components + 1)`.
    ThetaShapeMismatch { expected: (usize, usize), found: (usize, usize) },

    /// Averaging requires at least one repetition.
    NoRepetitions,

    // ---- Kernel / observation window ----
    /// Decay must be finite and > 0.
    InvalidDecay { value: f64, reason: &'static str },

    /// End time must be finite and > 0.
    InvalidTimeWindow { end_time: f64, reason: &'static str },

    /// A jump time lies outside `[0, end_time)`.
    JumpTimeOutsideWindow { component: usize, index: usize, value: f64, end_time: f64 },

    // ---- Event sequences ----
    /// A jump time is NaN/±inf.
    NonFiniteJumpTime { component: usize, index: usize, value: f64 },

    /// A component's jump times are not strictly ascending.
    UnsortedEvents { component: usize, index: usize, previous: f64, value: f64 },

    // ---- Parameters ----
    /// A parameter matrix entry is NaN/±inf.
    NonFiniteTheta { row: usize, col: usize, value: f64 },

    /// Fitted intensity at an observed event is not strictly positive.
    NonPositiveIntensity { component: usize, event: usize, value: f64 },

    // ---- Cache provenance ----
    /// Cached statistics were built from a different decay, end time, or
    /// event counts than the ones supplied to this evaluation.
    StaleWeights { what: &'static str, cached: f64, requested: f64 },

    // ---- Options ----
    /// A configuration value is out of range.
    InvalidOption { name: &'static str, reason: &'static str },
}

impl std::error::Error for HawkesError {}

impl std::fmt::Display for HawkesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Dimensions ----
            HawkesError::InvalidDimension { what, expected, actual } => {
                write!(f, "Dimension mismatch for {what}: expected {expected}, got {actual}")
            }
            HawkesError::ThetaShapeMismatch { expected, found } => {
                write!(f, "Theta shape mismatch: expected {expected:?}, found {found:?}")
            }
            HawkesError::NoRepetitions => {
                write!(f, "At least one repetition is required for averaging.")
            }
            // ---- Kernel / observation window ----
            HawkesError::InvalidDecay { value, reason } => {
                write!(f, "Decay must be finite and > 0; got: {value}. {reason}")
            }
            HawkesError::InvalidTimeWindow { end_time, reason } => {
                write!(f, "End time must be finite and > 0; got: {end_time}. {reason}")
            }
            HawkesError::JumpTimeOutsideWindow { component, index, value, end_time } => {
                write!(
                    f,
                    "Jump time {value} (component {component}, index {index}) lies outside [0, {end_time})"
                )
            }
            // ---- Event sequences ----
            HawkesError::NonFiniteJumpTime { component, index, value } => {
                write!(f, "Jump time at component {component}, index {index} is non-finite: {value}")
            }
            HawkesError::UnsortedEvents { component, index, previous, value } => {
                write!(
                    f,
                    "Jump times of component {component} must be strictly ascending; index {index} has {value} after {previous}"
                )
            }
            // ---- Parameters ----
            HawkesError::NonFiniteTheta { row, col, value } => {
                write!(f, "Theta entry at ({row}, {col}) is non-finite: {value}")
            }
            HawkesError::NonPositiveIntensity { component, event, value } => {
                write!(
                    f,
                    "Intensity of component {component} at event {event} must be strictly positive; got: {value}"
                )
            }
            // ---- Cache provenance ----
            HawkesError::StaleWeights { what, cached, requested } => {
                write!(
                    f,
                    "Cached weights were computed with {what} = {cached}, but {requested} was requested; build a fresh model."
                )
            }
            // ---- Options ----
            HawkesError::InvalidOption { name, reason } => {
                write!(f, "Invalid option '{name}': {reason}")
            }
        }
    }
}
