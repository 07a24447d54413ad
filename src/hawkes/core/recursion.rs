//! Decayed cross-excitation recursion for exponential kernels.
//!
//! Purpose
//! -------
//! Compute, at every event `t_h` of a *target* component, the decayed sum
//! `G(t_h) = Σ_{s < t_h} decay · exp(−decay · (t_h − s))` over the events `s`
//! of a *source* component, in a single O(n_target + n_source) merge pass.
//!
//! Key behaviors
//! -------------
//! - Between consecutive target events the running sum is multiplied by
//!   `exp(−decay · (t_h − t_{h−1}))`; the memoryless exponential kernel makes
//!   this equal to recomputing the sum from scratch.
//! - A merge cursor folds in every source event strictly earlier than `t_h`
//!   that has not been folded in yet.
//! - What gets kept from `G` is up to the caller: the least-squares engine
//!   sums it into aggregates, the log-likelihood engine writes it into a
//!   per-event matrix.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both sequences are strictly ascending (enforced by `HawkesData`).
//! - Source events tied with a target event are not counted (strict `<`).
//!
//! Testing notes
//! -------------
//! - Unit tests compare against the O(n²) double sum on random sequences and
//!   cover empty target/source sequences.
use ndarray::ArrayView1;

/// Run the two-pointer decayed accumulation and hand each intermediate value
/// to `retain(h, t_h, G)`.
///
/// `retain` is called exactly once per target event, in ascending order.
///
/// Examples
/// --------
/// ```rust
/// # use ndarray::array;
/// # use rust_hawkes::hawkes::core::recursion::accumulate_decayed;
/// let targets = array![1.0, 3.0];
/// let sources = array![2.0];
/// let mut kept = Vec::new();
/// accumulate_decayed(targets.view(), sources.view(), 1.0, |_, _, g| kept.push(g));
/// assert_eq!(kept[0], 0.0);
/// assert!((kept[1] - (-1.0_f64).exp()).abs() < 1e-15);
/// ```
pub fn accumulate_decayed<F>(
    targets: ArrayView1<f64>, sources: ArrayView1<f64>, decay: f64, mut retain: F,
) where
    F: FnMut(usize, f64, f64),
{
    let n_sources = sources.len();
    let mut h2 = 0_usize;
    let mut g = 0.0_f64;
    let mut previous: Option<f64> = None;
    for (h, &t_h) in targets.iter().enumerate() {
        if let Some(t_prev) = previous {
            g *= (-decay * (t_h - t_prev)).exp();
        }
        while h2 < n_sources && sources[h2] < t_h {
            g += decay * (-decay * (t_h - sources[h2])).exp();
            h2 += 1;
        }
        retain(h, t_h, g);
        previous = Some(t_h);
    }
}
