mod brute_force;
mod lp;
mod no_delay;

pub use brute_force::BruteForceScheduler;
pub use lp::LpScheduler;
pub use no_delay::NoDelayScheduler;

use std::collections::HashMap;

use crate::errors::SchedulerError;
use crate::request::Request;

/// Map from `request_id` to the chosen start offset, in ticks.
pub type Plan = HashMap<u64, u32>;

/// A policy that turns a set of waiting requests and the available energy profile into a plan.
pub trait Scheduler: Send + Sync {
    /// Computes a plan, or fails if no feasible plan exists at this scheduler's lookahead.
    ///
    /// # Arguments
    ///
    /// * 'available' - per-tick available energy over the lookahead horizon
    /// * 'requests' - the waiting requests to plan offsets for
    fn schedule(&self, available: &[f64], requests: &[Request]) -> Result<Plan, SchedulerError>;
}

/// The feasible offset range for a request at a given lookahead: `[0, min(timeout, lookahead -
/// len(profile))]`. Returns `None` if the request cannot fit within the lookahead at all.
pub(crate) fn max_offset(lookahead: usize, timeout: u32, profile_len: usize) -> Option<u32> {
    if profile_len > lookahead {
        return None;
    }
    let slack = (lookahead - profile_len) as u32;
    Some(timeout.min(slack))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_offset_is_bounded_by_timeout() {
        assert_eq!(max_offset(20, 3, 6), Some(3));
    }

    #[test]
    fn max_offset_is_bounded_by_lookahead_slack() {
        assert_eq!(max_offset(10, 99, 6), Some(4));
    }

    #[test]
    fn max_offset_is_none_when_profile_exceeds_lookahead() {
        assert_eq!(max_offset(4, 99, 6), None);
    }

    #[test]
    fn max_offset_is_zero_when_profile_exactly_fills_lookahead() {
        assert_eq!(max_offset(6, 99, 6), Some(0));
    }
}
