//! Weighted and uniform random draws
//!
//! Every helper takes its generator explicitly; seed a
//! `rand::rngs::StdRng` for reproducible runs.

use rand::Rng;

/// Cumulative weights normalized to end at 1.0. Empty when the weights sum to 0.
///
/// # Examples
/// ```
/// use genomic_regions::core::sampling::weighted_cumsum;
/// assert_eq!(weighted_cumsum(&[1.0, 1.0, 2.0]), vec![0.25, 0.5, 1.0]);
/// assert!(weighted_cumsum(&[0.0, 0.0]).is_empty());
/// ```
pub fn weighted_cumsum(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    if total == 0.0 {
        return Vec::new();
    }

    let mut running = 0.0;
    weights
        .iter()
        .map(|w| {
            running += w;
            running / total
        })
        .collect()
}

/// Pick a bucket from a cumulative distribution built by [`weighted_cumsum`].
/// Returns `cumsum.len()` when no bucket is selected (empty distribution).
pub fn weighted_choice<R: Rng + ?Sized>(rng: &mut R, cumsum: &[f64]) -> usize {
    let draw: f64 = rng.gen();
    cumsum
        .iter()
        .position(|&edge| draw <= edge)
        .unwrap_or(cumsum.len())
}

/// Uniform value in `0..=max`
pub fn random_value<R: Rng + ?Sized>(rng: &mut R, max: u32) -> u32 {
    rng.gen_range(0..=max)
}

/// Two independent uniform values in `0..=max`
pub fn random_pair<R: Rng + ?Sized>(rng: &mut R, max: u32) -> (u32, u32) {
    (random_value(rng, max), random_value(rng, max))
}
