use crate::profile::{pad, sub_aligned};

/// Weighting coefficients for the three terms of the scheduling cost function. Identical
/// weights are shared by the brute-force evaluator, the LP objective, and the hub's score view
/// so the three stay provably in sync; not user-configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostWeights {
    pub energy_to_buy: f64,
    pub energy_wasted: f64,
    pub average_delay: f64,
}

impl Default for CostWeights {
    fn default() -> Self {
        CostWeights {
            energy_to_buy: 1.0,
            energy_wasted: 0.05,
            average_delay: 0.1,
        }
    }
}

/// Scores a plan given the available and planned per-tick energy and the chosen offsets.
///
/// `energy_wasted` is non-positive (it is the surplus left after the deficit partition), so it
/// reduces the score rather than adding to it.
///
/// # Arguments
///
/// * 'available' - per-tick energy from generation minus energy consumed by running jobs
/// * 'planned' - per-tick energy demanded by scheduled but not-yet-running requests
/// * 'offsets' - the chosen start offset of each waiting request
/// * 'weights' - the cost weights to apply
pub fn score(available: &[f64], planned: &[f64], offsets: &[u32], weights: &CostWeights) -> f64 {
    let ticks = available.len().max(planned.len());
    let available = pad(available, ticks);
    let planned = pad(planned, ticks);
    let delta = sub_aligned(&available, &planned);

    let energy_to_buy: f64 = delta.iter().map(|d| d.max(0.0)).sum();
    let energy_wasted: f64 = delta.iter().map(|d| d.min(0.0)).sum();
    let average_delay = if offsets.is_empty() {
        0.0
    } else {
        offsets.iter().sum::<u32>() as f64 / offsets.len() as f64
    };

    weights.energy_to_buy * energy_to_buy
        + weights.energy_wasted * energy_wasted
        + weights.average_delay * average_delay
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_of_no_requests_is_zero_when_profiles_match() {
        let weights = CostWeights::default();
        assert_eq!(score(&[1.0, 1.0], &[1.0, 1.0], &[], &weights), 0.0);
    }

    #[test]
    fn score_accounts_deficit_as_energy_to_buy() {
        let weights = CostWeights::default();
        let s = score(&[1.0], &[0.5], &[], &weights);
        assert_eq!(s, weights.energy_to_buy * 0.5);
    }

    #[test]
    fn score_accounts_surplus_as_energy_wasted_reducing_score() {
        let weights = CostWeights::default();
        let s = score(&[2.0], &[1.0], &[], &weights);
        assert_eq!(s, weights.energy_to_buy * 1.0);
    }

    #[test]
    fn score_includes_average_delay_term() {
        let weights = CostWeights::default();
        let s = score(&[0.0], &[0.0], &[4, 6], &weights);
        assert_eq!(s, weights.average_delay * 5.0);
    }

    #[test]
    fn score_zero_extends_mismatched_lengths() {
        let weights = CostWeights::default();
        let s = score(&[1.0, 1.0, 1.0], &[1.0], &[], &weights);
        assert_eq!(s, weights.energy_to_buy * 2.0);
    }
}
