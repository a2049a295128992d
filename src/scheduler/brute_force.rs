use itertools::Itertools;
use rayon::prelude::*;

use crate::cost::{score, CostWeights};
use crate::errors::SchedulerError;
use crate::profile::pad;
use crate::request::Request;

use super::{max_offset, Plan, Scheduler};

/// Enumerates every combination of per-request start offsets and keeps the one that minimises
/// the cost function. Complexity is `Π max_offset(r)`; only practical for small fleets.
pub struct BruteForceScheduler {
    lookahead: usize,
    weights: CostWeights,
}

impl BruteForceScheduler {
    /// Builds a scheduler with the given lookahead horizon, in ticks.
    pub fn new(lookahead: usize) -> Self {
        BruteForceScheduler {
            lookahead,
            weights: CostWeights::default(),
        }
    }
}

impl Scheduler for BruteForceScheduler {
    fn schedule(&self, available: &[f64], requests: &[Request]) -> Result<Plan, SchedulerError> {
        if requests.is_empty() {
            return Ok(Plan::new());
        }

        let mut ranges = Vec::with_capacity(requests.len());
        for r in requests {
            let max = max_offset(self.lookahead, r.timeout, r.profile.len()).ok_or_else(|| {
                SchedulerError::InfeasibleSchedule(format!(
                    "request {} has profile length {} exceeding lookahead {}",
                    r.request_id,
                    r.profile.len(),
                    self.lookahead
                ))
            })?;
            ranges.push(0..=max);
        }

        let available = pad(available, self.lookahead);

        let best = ranges
            .into_iter()
            .multi_cartesian_product()
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|offsets| {
                let planned = lay_out(requests, &offsets, self.lookahead);
                let s = score(&available, &planned, &offsets, &self.weights);
                (s, offsets)
            })
            .min_by(|(a, _), (b, _)| a.partial_cmp(b).expect("scores must be comparable"));

        let (_, offsets) = best.expect("requests is non-empty so at least one tuple exists");

        Ok(requests
            .iter()
            .zip(offsets)
            .map(|(r, o)| (r.request_id, o))
            .collect())
    }
}

/// Lays each request's profile into a length-`lookahead` vector starting at its offset, truncating
/// whatever overruns the horizon, and sums them pointwise.
fn lay_out(requests: &[Request], offsets: &[u32], lookahead: usize) -> Vec<f64> {
    let mut planned = vec![0.0; lookahead];
    for (r, &offset) in requests.iter().zip(offsets) {
        let offset = offset as usize;
        for (i, &v) in r.profile.iter().enumerate() {
            let t = offset + i;
            if t >= lookahead {
                break;
            }
            planned[t] += v;
        }
    }
    planned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_requests_yields_empty_plan() {
        let s = BruteForceScheduler::new(10);
        assert!(s.schedule(&[1.0; 10], &[]).unwrap().is_empty());
    }

    #[test]
    fn infeasible_profile_raises_error() {
        let s = BruteForceScheduler::new(4);
        let r = Request::new(1, "oven", vec![0.1; 6], 99);
        assert!(matches!(
            s.schedule(&[1.0; 4], &[r]),
            Err(SchedulerError::InfeasibleSchedule(_))
        ));
    }

    #[test]
    fn single_request_with_zero_timeout_gets_offset_zero() {
        let s = BruteForceScheduler::new(10);
        let r = Request::new(1, "kettle", vec![0.5, 0.5], 0);
        let plan = s.schedule(&[1.0; 10], &[r]).unwrap();
        assert_eq!(plan[&1], 0);
    }

    #[test]
    fn delays_high_demand_request_toward_high_supply_tail() {
        let s = BruteForceScheduler::new(20);
        let available: Vec<f64> = (0..20).map(|i| i as f64 / 19.0).collect();
        let low = Request::new(1, "low", vec![0.1; 6], 99);
        let high = Request::new(2, "high", vec![0.8; 6], 99);
        let plan = s.schedule(&available, &[low, high]).unwrap();
        assert!(plan[&2] > plan[&1]);
    }

    #[test]
    fn complementary_requests_offset_to_avoid_overlap_when_possible() {
        let s = BruteForceScheduler::new(20);
        let available = vec![0.5; 20];
        let profile = vec![0.1, 0.3, 0.1, 0.3, 0.1, 0.3, 0.1, 0.3];
        let a = Request::new(1, "a", profile.clone(), 0);
        let b = Request::new(2, "b", profile, 2);
        let plan = s.schedule(&available, &[a, b]).unwrap();
        assert_eq!(plan[&1], 0);
        assert!(plan[&2] <= 2);
    }
}
