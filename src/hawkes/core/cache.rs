//! Compute-once cache for theta-independent Hawkes statistics.
//!
//! Purpose
//! -------
//! Hold the statistics a model derives from one realization and one decay,
//! computing them on first use and reusing them for every later evaluation.
//! The cache is an explicit two-state machine, [`WeightsState::Uninitialized`]
//! → [`WeightsState::Ready`], backed by `std::sync::OnceLock` so a model can be
//! shared across threads.
//!
//! Key behaviors
//! -------------
//! - [`WeightsCache::get_or_compute`] is idempotent: the first call computes
//!   and installs the statistics; later calls return the installed value.
//! - Every cached value records its [`Provenance`] (decay, end time, event
//!   counts). A later call with different inputs is rejected with
//!   `HawkesError::StaleWeights` rather than served stale statistics.
//!
//! Invariants & assumptions
//! ------------------------
//! - Installed statistics are never mutated.
//! - If two threads race on the first call, both may compute but exactly one
//!   value is installed and both observe it.
//! - Callers validate decay and data before reaching the cache.
use crate::hawkes::{
    core::data::HawkesData,
    errors::{HawkesError, HawkesResult},
};
use log::debug;
use std::sync::OnceLock;

/// Observable state of a [`WeightsCache`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightsState {
    /// No statistics computed yet.
    Uninitialized,
    /// Statistics computed and frozen.
    Ready,
}

/// Inputs a set of cached statistics was computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Provenance {
    decay: f64,
    end_time: f64,
    n_events: Vec<usize>,
}

impl Provenance {
    pub fn new(data: &HawkesData, decay: f64) -> Self {
        let n_events = (0..data.n_components()).map(|j| data.n_events(j)).collect();
        Provenance { decay, end_time: data.end_time(), n_events }
    }

    pub fn decay(&self) -> f64 {
        self.decay
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Reject an evaluation whose inputs differ from the cached ones.
    ///
    /// Decay and end time are compared exactly; event counts per component
    /// act as a cheap fingerprint of the data.
    ///
    /// # Errors
    /// - [`HawkesError::StaleWeights`] naming the first differing input.
    /// - [`HawkesError::InvalidDimension`] if the component count differs.
    pub fn check(&self, data: &HawkesData, decay: f64) -> HawkesResult<()> {
        if decay != self.decay {
            return Err(HawkesError::StaleWeights {
                what: "decay",
                cached: self.decay,
                requested: decay,
            });
        }
        if data.end_time() != self.end_time {
            return Err(HawkesError::StaleWeights {
                what: "end_time",
                cached: self.end_time,
                requested: data.end_time(),
            });
        }
        if data.n_components() != self.n_events.len() {
            return Err(HawkesError::InvalidDimension {
                what: "components",
                expected: self.n_events.len(),
                actual: data.n_components(),
            });
        }
        for (j, &cached) in self.n_events.iter().enumerate() {
            if data.n_events(j) != cached {
                return Err(HawkesError::StaleWeights {
                    what: "event count",
                    cached: cached as f64,
                    requested: data.n_events(j) as f64,
                });
            }
        }
        Ok(())
    }
}

/// Statistics that can live in a [`WeightsCache`].
pub trait CachedWeights: Sized {
    /// Human-readable name used in diagnostics.
    const NAME: &'static str;

    /// Build the statistics from validated data and decay.
    fn compute(data: &HawkesData, decay: f64) -> Self;

    /// Inputs the statistics were built from.
    fn provenance(&self) -> &Provenance;
}

/// Compute-once holder for model statistics.
#[derive(Debug, Clone)]
pub struct WeightsCache<T> {
    cell: OnceLock<T>,
}

impl<T> Default for WeightsCache<T> {
    fn default() -> Self {
        WeightsCache { cell: OnceLock::new() }
    }
}

impl<T: CachedWeights> WeightsCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WeightsState {
        match self.cell.get() {
            Some(_) => WeightsState::Ready,
            None => WeightsState::Uninitialized,
        }
    }

    /// Installed statistics, if any.
    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    /// Return the cached statistics, computing them on first use.
    ///
    /// # Errors
    /// - Provenance errors from [`Provenance::check`] when the cache is Ready
    ///   but was built from different inputs.
    pub fn get_or_compute(&self, data: &HawkesData, decay: f64) -> HawkesResult<&T> {
        let weights = match self.cell.get() {
            Some(w) => w,
            None => {
                let computed = T::compute(data, decay);
                debug!(
                    "{} ready: {} components, {} events, decay = {}",
                    T::NAME,
                    data.n_components(),
                    data.total_events(),
                    decay
                );
                self.cell.get_or_init(|| computed)
            }
        };
        weights.provenance().check(data, decay)?;
        Ok(weights)
    }
}
