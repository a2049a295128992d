use crate::errors::SchedulerError;
use crate::request::Request;

use super::{Plan, Scheduler};

/// Assigns offset 0 to every request unconditionally. Useful as a baseline and in tests; never
/// fails, even on input the other schedulers would call infeasible — it makes no feasibility
/// claim about whether the tick actually fits the lookahead.
pub struct NoDelayScheduler;

impl Scheduler for NoDelayScheduler {
    fn schedule(&self, _available: &[f64], requests: &[Request]) -> Result<Plan, SchedulerError> {
        Ok(requests.iter().map(|r| (r.request_id, 0)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assigns_offset_zero_to_every_request() {
        let s = NoDelayScheduler;
        let requests = vec![
            Request::new(1, "a", vec![0.1], 5),
            Request::new(2, "b", vec![0.2, 0.2], 0),
        ];
        let plan = s.schedule(&[1.0], &requests).unwrap();
        assert_eq!(plan[&1], 0);
        assert_eq!(plan[&2], 0);
    }

    #[test]
    fn never_fails_even_on_profiles_longer_than_any_plausible_lookahead() {
        let s = NoDelayScheduler;
        let requests = vec![Request::new(1, "a", vec![0.1; 1000], 0)];
        assert!(s.schedule(&[], &requests).is_ok());
    }
}
