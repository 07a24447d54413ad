//! Jump-time containers for multivariate Hawkes realizations.
//!
//! Purpose
//! -------
//! Provide small, validated containers for observed event times so the
//! statistics engines and models can assume clean input. One realization
//! ("repetition") is a [`HawkesData`]; a batch of i.i.d. realizations sharing
//! an observation window is a [`HawkesRepetitions`].
//!
//! Key behaviors
//! -------------
//! - [`HawkesData::new`] enforces a finite, strictly positive end time and,
//!   for each component, finite, strictly ascending jump times in
//!   `[0, end_time)`.
//! - [`HawkesRepetitions::new`] validates every repetition against the shared
//!   end time and requires every repetition to carry the same number of
//!   components.
//!
//! Invariants & assumptions
//! ------------------------
//! - Data are immutable after construction; models only borrow them.
//! - Components with zero events are allowed.
//!
//! Conventions
//! -----------
//! - Component `j` of a realization is `jump_times[j]`, an `Array1<f64>`
//!   with the oldest event at index 0.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, component-count agreement across
//!   repetitions, and propagation of validation errors with the right
//!   component index.
use crate::hawkes::{
    core::validation::{validate_end_time, validate_jump_times},
    errors::{HawkesError, HawkesResult},
};
use ndarray::{Array1, ArrayView1};

/// `HawkesData` — one validated realization of a multivariate point process.
///
/// Fields
/// ------
/// - `jump_times`: `Vec<Array1<f64>>`
///   Per-component event times, strictly ascending, in `[0, end_time)`.
/// - `end_time`: `f64`
///   Observation window upper bound; finite and `> 0`.
///
/// Performance
/// -----------
/// - Validation is a single O(n) scan over all events.
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesData {
    jump_times: Vec<Array1<f64>>,
    end_time: f64,
}

impl HawkesData {
    /// Construct a validated [`HawkesData`] from per-component event times.
    ///
    /// Errors
    /// ------
    /// - `HawkesError::InvalidTimeWindow` for a non-finite or non-positive
    ///   `end_time`.
    /// - `HawkesError::NonFiniteJumpTime`, `HawkesError::JumpTimeOutsideWindow`,
    ///   or `HawkesError::UnsortedEvents` for the first offending event.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use ndarray::array;
    /// # use rust_hawkes::hawkes::core::data::HawkesData;
    /// let data = HawkesData::new(vec![array![1.0, 3.0], array![2.0]], 5.0).unwrap();
    /// assert_eq!(data.n_components(), 2);
    /// assert_eq!(data.n_events(0), 2);
    /// ```
    pub fn new(jump_times: Vec<Array1<f64>>, end_time: f64) -> HawkesResult<Self> {
        let end_time = validate_end_time(end_time)?;
        for (component, times) in jump_times.iter().enumerate() {
            validate_jump_times(component, times.view(), end_time)?;
        }
        Ok(HawkesData { jump_times, end_time })
    }

    /// Convenience constructor from plain vectors.
    pub fn from_vecs(jump_times: Vec<Vec<f64>>, end_time: f64) -> HawkesResult<Self> {
        Self::new(jump_times.into_iter().map(Array1::from).collect(), end_time)
    }

    pub fn n_components(&self) -> usize {
        self.jump_times.len()
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Event times of `component`.
    ///
    /// Panics if `component >= n_components()`.
    pub fn component(&self, component: usize) -> ArrayView1<'_, f64> {
        self.jump_times[component].view()
    }

    pub fn jump_times(&self) -> &[Array1<f64>] {
        &self.jump_times
    }

    /// Number of events observed for `component`.
    pub fn n_events(&self, component: usize) -> usize {
        self.jump_times[component].len()
    }

    /// Total number of events across all components.
    pub fn total_events(&self) -> usize {
        self.jump_times.iter().map(|t| t.len()).sum()
    }
}

/// `HawkesRepetitions` — a batch of i.i.d. realizations on a shared window.
///
/// Every repetition has the same `end_time` and the same number of
/// components. Used by the aggregated least-squares model.
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesRepetitions {
    repetitions: Vec<HawkesData>,
    end_time: f64,
}

impl HawkesRepetitions {
    /// Validate and wrap a list of per-repetition, per-component event times.
    ///
    /// Errors
    /// ------
    /// - `HawkesError::NoRepetitions` if the list is empty.
    /// - `HawkesError::InvalidDimension` if a repetition's component count
    ///   differs from the first repetition's.
    /// - Any error from [`HawkesData::new`].
    pub fn new(list_jump_times: Vec<Vec<Array1<f64>>>, end_time: f64) -> HawkesResult<Self> {
        let end_time = validate_end_time(end_time)?;
        let n_components = match list_jump_times.first() {
            Some(first) => first.len(),
            None => return Err(HawkesError::NoRepetitions),
        };
        let mut repetitions = Vec::with_capacity(list_jump_times.len());
        for jump_times in list_jump_times {
            if jump_times.len() != n_components {
                return Err(HawkesError::InvalidDimension {
                    what: "components per repetition",
                    expected: n_components,
                    actual: jump_times.len(),
                });
            }
            repetitions.push(HawkesData::new(jump_times, end_time)?);
        }
        Ok(HawkesRepetitions { repetitions, end_time })
    }

    /// Build a batch from already validated realizations.
    ///
    /// All repetitions must share the same end time and component count.
    pub fn from_data(repetitions: Vec<HawkesData>) -> HawkesResult<Self> {
        let first = repetitions.first().ok_or(HawkesError::NoRepetitions)?;
        let end_time = first.end_time();
        let n_components = first.n_components();
        for rep in &repetitions {
            if rep.end_time() != end_time {
                return Err(HawkesError::InvalidTimeWindow {
                    end_time: rep.end_time(),
                    reason: "All repetitions must share the same end time.",
                });
            }
            if rep.n_components() != n_components {
                return Err(HawkesError::InvalidDimension {
                    what: "components per repetition",
                    expected: n_components,
                    actual: rep.n_components(),
                });
            }
        }
        Ok(HawkesRepetitions { repetitions, end_time })
    }

    pub fn len(&self) -> usize {
        self.repetitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repetitions.is_empty()
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn n_components(&self) -> usize {
        self.repetitions.first().map_or(0, HawkesData::n_components)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HawkesData> {
        self.repetitions.iter()
    }

    pub fn as_slice(&self) -> &[HawkesData] {
        &self.repetitions
    }
}
