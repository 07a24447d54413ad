//! Theta-independent statistics for exponential Hawkes objectives.
//!
//! Purpose
//! -------
//! Turn one validated realization and a decay into the cached quantities the
//! objectives need, so that every evaluation against a new parameter matrix
//! is cheap.
//!
//! Key behaviors
//! -------------
//! - [`LeastSquaresWeights`] stores aggregates only: event counts `N`,
//!   compensator sums `I`, `I2`, and the causal cross sums `V`, `W`. The
//!   least-squares contrast is quadratic in theta, so aggregates suffice.
//! - [`LogLikelihoodWeights`] stores `N`, `I`, and one per-event matrix
//!   `Psi[i]` per component, because the log-likelihood takes a logarithm of
//!   the excitation at each individual event.
//! - Both run [`accumulate_decayed`] over every ordered component pair; they
//!   differ only in what they keep from the running sum.
//!
//! Invariants & assumptions
//! ------------------------
//! - For `n` components: `N`, `I`, `I2` have length `n`; `V`, `W` are
//!   `n × n`; `Psi[i]` is `N[i] × n`.
//! - `V(i, j)` and `W(i, j)` only see events of `j` strictly earlier than
//!   the observing event of `i`; they are not symmetric.
//! - A component without events contributes zero to every statistic it
//!   participates in.
//!
//! Performance
//! -----------
//! - O(n² · m) for `m` total events instead of the O(n² · m²) double sum.
//!
//! Testing notes
//! -------------
//! - Unit tests compare every statistic with an O(m²) brute-force reference
//!   on seeded random data, check a small hand-computed scenario, and cover
//!   a component without events.
use crate::hawkes::core::{
    cache::{CachedWeights, Provenance},
    data::HawkesData,
    recursion::accumulate_decayed,
};
use ndarray::{Array1, Array2, ArrayView1};

/// Compensator sums `I[j]` over the events of one component.
fn compensator(times: ArrayView1<f64>, end_time: f64, decay: f64) -> f64 {
    times.iter().map(|&t| 1.0 - (-decay * (end_time - t)).exp()).sum()
}

/// Squared-kernel compensator `I2[j]` over the events of one component.
fn squared_compensator(times: ArrayView1<f64>, end_time: f64, decay: f64) -> f64 {
    let raw: f64 = times.iter().map(|&t| 1.0 - (-2.0 * decay * (end_time - t)).exp()).sum();
    0.5 * decay * raw
}

/// Aggregate statistics for the least-squares contrast.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresWeights {
    n: Array1<usize>,
    i: Array1<f64>,
    i2: Array1<f64>,
    v: Array2<f64>,
    w: Array2<f64>,
    provenance: Provenance,
}

impl LeastSquaresWeights {
    /// Event counts `N[j]`.
    pub fn n(&self) -> &Array1<usize> {
        &self.n
    }

    /// Compensator sums `I[j]`.
    pub fn i(&self) -> &Array1<f64> {
        &self.i
    }

    /// Scaled squared compensator sums `I2[j]`.
    pub fn i2(&self) -> &Array1<f64> {
        &self.i2
    }

    /// Causal decayed cross sums `V(i, j)`.
    pub fn v(&self) -> &Array2<f64> {
        &self.v
    }

    /// Window-weighted causal cross sums `W(i, j)`.
    pub fn w(&self) -> &Array2<f64> {
        &self.w
    }

    pub fn n_components(&self) -> usize {
        self.n.len()
    }
}

impl CachedWeights for LeastSquaresWeights {
    const NAME: &'static str = "least-squares weights";

    fn compute(data: &HawkesData, decay: f64) -> Self {
        let n_components = data.n_components();
        let end_time = data.end_time();
        let mut n = Array1::<usize>::zeros(n_components);
        let mut i = Array1::<f64>::zeros(n_components);
        let mut i2 = Array1::<f64>::zeros(n_components);
        let mut v = Array2::<f64>::zeros((n_components, n_components));
        let mut w = Array2::<f64>::zeros((n_components, n_components));

        for j in 0..n_components {
            let times_j = data.component(j);
            n[j] = times_j.len();
            for j2 in 0..n_components {
                let mut v_acc = 0.0;
                let mut w_acc = 0.0;
                accumulate_decayed(times_j, data.component(j2), decay, |_, t_h, g| {
                    v_acc += g;
                    w_acc += (1.0 - (-2.0 * decay * (end_time - t_h)).exp()) * g;
                });
                v[[j, j2]] = v_acc;
                w[[j, j2]] = w_acc;
            }
            i[j] = compensator(times_j, end_time, decay);
            i2[j] = squared_compensator(times_j, end_time, decay);
        }

        LeastSquaresWeights { n, i, i2, v, w, provenance: Provenance::new(data, decay) }
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

/// Per-event influence statistics for the log-likelihood.
#[derive(Debug, Clone, PartialEq)]
pub struct LogLikelihoodWeights {
    n: Array1<usize>,
    i: Array1<f64>,
    psi: Vec<Array2<f64>>,
    provenance: Provenance,
}

impl LogLikelihoodWeights {
    /// Event counts `N[j]`.
    pub fn n(&self) -> &Array1<usize> {
        &self.n
    }

    /// Compensator sums `I[j]`.
    pub fn i(&self) -> &Array1<f64> {
        &self.i
    }

    /// Per-event influence matrix `Psi[component]`, shape `N[component] × n`.
    ///
    /// Panics if `component` is out of range.
    pub fn psi(&self, component: usize) -> &Array2<f64> {
        &self.psi[component]
    }

    pub fn n_components(&self) -> usize {
        self.n.len()
    }
}

impl CachedWeights for LogLikelihoodWeights {
    const NAME: &'static str = "log-likelihood weights";

    fn compute(data: &HawkesData, decay: f64) -> Self {
        let n_components = data.n_components();
        let end_time = data.end_time();
        let mut n = Array1::<usize>::zeros(n_components);
        let mut i = Array1::<f64>::zeros(n_components);
        let mut psi = Vec::with_capacity(n_components);

        for j in 0..n_components {
            let times_j = data.component(j);
            n[j] = times_j.len();
            let mut psi_j = Array2::<f64>::zeros((times_j.len(), n_components));
            for j2 in 0..n_components {
                accumulate_decayed(times_j, data.component(j2), decay, |l, _, g| {
                    psi_j[[l, j2]] = g;
                });
            }
            psi.push(psi_j);
            i[j] = compensator(times_j, end_time, decay);
        }

        LogLikelihoodWeights { n, i, psi, provenance: Provenance::new(data, decay) }
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of `LeastSquaresWeights` and `LogLikelihoodWeights` with an
    //   O(m²) brute-force reference.
    // - The two-component hand-computed scenario.
    // - Components without events.
    // -------------------------------------------------------------------------

    fn kernel_sum(t: f64, sources: ArrayView1<f64>, decay: f64) -> f64 {
        sources.iter().filter(|&&s| s < t).map(|&s| decay * (-decay * (t - s)).exp()).sum()
    }

    fn random_data(seed: u64, n_components: usize, max_events: usize, end_time: f64) -> HawkesData {
        let mut rng = StdRng::seed_from_u64(seed);
        let jump_times = (0..n_components)
            .map(|_| {
                let count = rng.gen_range(0..=max_events);
                let mut v: Vec<f64> = (0..count).map(|_| rng.gen::<f64>() * end_time).collect();
                v.sort_by(|a, b| a.partial_cmp(b).unwrap());
                v.dedup();
                v
            })
            .collect();
        HawkesData::from_vecs(jump_times, end_time).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Verify every least-squares statistic against its definition.
    //
    // Given
    // -----
    // - Seeded random data with 3 components, up to 40 events each, `T = 8`.
    // - Decay 1.7.
    //
    // Expect
    // ------
    // - `N`, `I`, `I2`, `V`, `W` match brute-force sums to 1e-9 relative.
    fn least_squares_weights_match_brute_force() {
        let data = random_data(3, 3, 40, 8.0);
        let decay = 1.7;
        let t_end = data.end_time();

        let weights = LeastSquaresWeights::compute(&data, decay);

        for j in 0..3 {
            let times = data.component(j);
            assert_eq!(weights.n()[j], times.len());
            let i_ref: f64 = times.iter().map(|&t| 1.0 - (-decay * (t_end - t)).exp()).sum();
            let i2_ref: f64 = 0.5
                * decay
                * times.iter().map(|&t| 1.0 - (-2.0 * decay * (t_end - t)).exp()).sum::<f64>();
            assert_relative_eq!(weights.i()[j], i_ref, max_relative = 1e-9);
            assert_relative_eq!(weights.i2()[j], i2_ref, max_relative = 1e-9);
            for j2 in 0..3 {
                let sources = data.component(j2);
                let v_ref: f64 = times.iter().map(|&t| kernel_sum(t, sources, decay)).sum();
                let w_ref: f64 = times
                    .iter()
                    .map(|&t| {
                        (1.0 - (-2.0 * decay * (t_end - t)).exp()) * kernel_sum(t, sources, decay)
                    })
                    .sum();
                assert_relative_eq!(weights.v()[[j, j2]], v_ref, max_relative = 1e-9);
                assert_relative_eq!(weights.w()[[j, j2]], w_ref, max_relative = 1e-9);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Verify the per-event influence matrices against their definition.
    //
    // Given
    // -----
    // - Seeded random data with 2 components, up to 30 events, `T = 5`.
    //
    // Expect
    // ------
    // - `Psi[i]` has shape `N[i] × 2` and each entry matches the brute-force
    //   kernel sum; `I` matches the least-squares engine exactly.
    fn log_likelihood_weights_match_brute_force() {
        let data = random_data(11, 2, 30, 5.0);
        let decay = 0.8;

        let ll = LogLikelihoodWeights::compute(&data, decay);
        let ls = LeastSquaresWeights::compute(&data, decay);

        assert_eq!(ll.n(), ls.n());
        assert_eq!(ll.i(), ls.i());
        for i in 0..2 {
            let times = data.component(i);
            assert_eq!(ll.psi(i).dim(), (times.len(), 2));
            for (l, &t) in times.iter().enumerate() {
                for j in 0..2 {
                    let want = kernel_sum(t, data.component(j), decay);
                    assert_relative_eq!(ll.psi(i)[[l, j]], want, max_relative = 1e-9);
                }
            }
            // Aggregating Psi over events recovers V.
            for j in 0..2 {
                let col_sum: f64 = ll.psi(i).column(j).sum();
                assert_relative_eq!(col_sum, ls.v()[[i, j]], max_relative = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Reproduce the two-component scenario by hand.
    //
    // Given
    // -----
    // - Component 0 at `{1, 3}`, component 1 at `{2}`, `T = 5`, decay 1.
    //
    // Expect
    // ------
    // - `N = [2, 1]`, `V(0,1) = e⁻¹`, `V(0,0) = e⁻²`, `V(1,0) = e⁻¹`,
    //   `V(1,1) = 0`, `W(0,1) = (1 − e⁻⁴)·e⁻¹`, and the closed-form `I`, `I2`.
    fn least_squares_weights_two_component_scenario() {
        let data = HawkesData::from_vecs(vec![vec![1.0, 3.0], vec![2.0]], 5.0).unwrap();
        let e = |x: f64| x.exp();

        let w = LeastSquaresWeights::compute(&data, 1.0);

        assert_eq!(w.n().to_vec(), vec![2, 1]);
        assert!(w.v()[[0, 1]] > 0.0);
        assert_relative_eq!(w.v()[[0, 1]], e(-1.0), max_relative = 1e-14);
        assert_relative_eq!(w.v()[[0, 0]], e(-2.0), max_relative = 1e-14);
        assert_relative_eq!(w.v()[[1, 0]], e(-1.0), max_relative = 1e-14);
        assert_eq!(w.v()[[1, 1]], 0.0);
        assert_relative_eq!(w.w()[[0, 1]], (1.0 - e(-4.0)) * e(-1.0), max_relative = 1e-14);
        assert_relative_eq!(w.w()[[1, 0]], (1.0 - e(-6.0)) * e(-1.0), max_relative = 1e-14);
        assert_relative_eq!(w.i()[0], (1.0 - e(-4.0)) + (1.0 - e(-2.0)), max_relative = 1e-14);
        assert_relative_eq!(w.i()[1], 1.0 - e(-3.0), max_relative = 1e-14);
        assert_relative_eq!(
            w.i2()[0],
            0.5 * ((1.0 - e(-8.0)) + (1.0 - e(-4.0))),
            max_relative = 1e-14
        );
    }

    #[test]
    // Purpose
    // -------
    // Ensure a component without events contributes nothing.
    //
    // Given
    // -----
    // - Component 1 is empty; components 0 and 2 have events.
    //
    // Expect
    // ------
    // - `N[1] = I[1] = I2[1] = 0`; row 1 and column 1 of `V`, `W` are zero;
    //   `Psi[1]` has zero rows.
    fn weights_vanish_for_empty_component() {
        let data =
            HawkesData::from_vecs(vec![vec![0.2, 0.9, 1.4], vec![], vec![0.5, 1.1]], 2.0).unwrap();

        let ls = LeastSquaresWeights::compute(&data, 2.0);
        let ll = LogLikelihoodWeights::compute(&data, 2.0);

        assert_eq!(ls.n()[1], 0);
        assert_eq!(ls.i()[1], 0.0);
        assert_eq!(ls.i2()[1], 0.0);
        for k in 0..3 {
            assert_eq!(ls.v()[[1, k]], 0.0);
            assert_eq!(ls.v()[[k, 1]], 0.0);
            assert_eq!(ls.w()[[1, k]], 0.0);
            assert_eq!(ls.w()[[k, 1]], 0.0);
        }
        assert_eq!(ll.psi(1).dim(), (0, 3));
    }
}
