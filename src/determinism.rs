use once_cell::sync::Lazy;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;

/// The fixed seed used by `seed0()`. Reproducibility only: the scheduling core is deterministic
/// given its inputs, this exists purely so example/demo profile generation reproduces the same
/// numbers run to run.
const SEED: u64 = 0;

static RNG: Lazy<Mutex<StdRng>> = Lazy::new(|| Mutex::new(StdRng::seed_from_u64(SEED)));

/// Re-seeds the process-wide deterministic RNG to its fixed seed.
pub fn seed0() {
    let mut rng = RNG.lock().expect("determinism RNG mutex poisoned");
    *rng = StdRng::seed_from_u64(SEED);
}

/// Generates a demo profile of `len` ticks, each value drawn uniformly from `[min, max]`, using
/// the process-wide seeded RNG.
///
/// # Arguments
///
/// * 'len' - number of ticks
/// * 'min' - lower bound of each per-tick value
/// * 'max' - upper bound of each per-tick value
pub fn demo_profile(len: usize, min: f64, max: f64) -> Vec<f64> {
    let mut rng = RNG.lock().expect("determinism RNG mutex poisoned");
    (0..len).map(|_| rng.gen_range(min..=max)).collect()
}

/// Generates a profile shaped like a daytime solar curve over `len` ticks: a smooth rise and
/// fall scaled to `peak`, with no randomness. Useful for scenario construction in tests and demos.
///
/// # Arguments
///
/// * 'len' - number of ticks
/// * 'peak' - the peak per-tick value, reached at the midpoint
pub fn solar_like_profile(len: usize, peak: f64) -> Vec<f64> {
    if len == 0 {
        return Vec::new();
    }
    (0..len)
        .map(|i| {
            let x = i as f64 / (len - 1).max(1) as f64;
            let shape = (std::f64::consts::PI * x).sin();
            (shape * peak).max(0.0)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed0_makes_demo_profile_reproducible() {
        seed0();
        let a = demo_profile(5, 0.0, 1.0);
        seed0();
        let b = demo_profile(5, 0.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn demo_profile_respects_bounds() {
        seed0();
        let p = demo_profile(50, 0.2, 0.8);
        assert!(p.iter().all(|&v| (0.2..=0.8).contains(&v)));
    }

    #[test]
    fn solar_like_profile_peaks_near_midpoint_and_is_nonnegative() {
        let p = solar_like_profile(20, 1.0);
        assert!(p.iter().all(|&v| v >= 0.0));
        let (peak_idx, _) = p
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap())
            .unwrap();
        assert!(peak_idx > 5 && peak_idx < 15);
    }

    #[test]
    fn solar_like_profile_of_zero_length_is_empty() {
        assert_eq!(solar_like_profile(0, 1.0), Vec::<f64>::new());
    }
}
