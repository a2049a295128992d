use std::collections::HashMap;

use good_lp::solvers::microlp::microlp;
use good_lp::{constraint, variable, Expression, ProblemVariables, Solution, SolverModel, Variable};

use crate::cost::CostWeights;
use crate::errors::SchedulerError;
use crate::request::Request;

use super::{max_offset, Plan, Scheduler};

/// Encodes the scheduling problem as a mixed-integer linear program and solves it with the
/// bundled pure-Rust `microlp` backend.
pub struct LpScheduler {
    lookahead: usize,
    weights: CostWeights,
    /// Reserved for solver backends that support cancellation; `microlp` does not, so this is
    /// currently unread. Kept for forward compatibility.
    #[allow(dead_code)]
    timeout: Option<std::time::Duration>,
}

impl LpScheduler {
    /// Builds a scheduler with the given lookahead horizon, in ticks.
    pub fn new(lookahead: usize) -> Self {
        LpScheduler {
            lookahead,
            weights: CostWeights::default(),
            timeout: None,
        }
    }

    /// Builds a scheduler with an additional solver timeout hint.
    pub fn with_timeout(lookahead: usize, timeout: std::time::Duration) -> Self {
        LpScheduler {
            lookahead,
            weights: CostWeights::default(),
            timeout: Some(timeout),
        }
    }
}

impl Scheduler for LpScheduler {
    fn schedule(&self, available: &[f64], requests: &[Request]) -> Result<Plan, SchedulerError> {
        if requests.is_empty() {
            return Ok(Plan::new());
        }

        let lookahead = self.lookahead;
        let mut offset_ranges = Vec::with_capacity(requests.len());
        for r in requests {
            let max = max_offset(lookahead, r.timeout, r.profile.len()).ok_or_else(|| {
                SchedulerError::InfeasibleSchedule(format!(
                    "request {} has profile length {} exceeding lookahead {}",
                    r.request_id,
                    r.profile.len(),
                    lookahead
                ))
            })?;
            offset_ranges.push(0..=max);
        }

        let mut vars = ProblemVariables::new();

        // b[r, o]: offset indicator. v[r, o]: offset-value carrier, bounded [0, o].
        let mut b: Vec<HashMap<u32, Variable>> = Vec::with_capacity(requests.len());
        let mut v: Vec<HashMap<u32, Variable>> = Vec::with_capacity(requests.len());
        for range in &offset_ranges {
            let mut bo = HashMap::new();
            let mut vo = HashMap::new();
            for o in range.clone() {
                bo.insert(o, vars.add(variable().binary()));
                vo.insert(o, vars.add(variable().integer().min(0.0).max(o as f64)));
            }
            b.push(bo);
            v.push(vo);
        }

        // req[r, t]: demand imputed to r at tick t, over the union of its feasible window.
        let mut req: Vec<HashMap<usize, Variable>> = Vec::with_capacity(requests.len());
        for (ri, r) in requests.iter().enumerate() {
            let max_o = *offset_ranges[ri].end() as usize;
            let mut rt = HashMap::new();
            for t in 0..=(max_o + r.profile.len().saturating_sub(1)) {
                rt.insert(t, vars.add(variable().min(0.0)));
            }
            req.push(rt);
        }

        let pos: Vec<Variable> = (0..lookahead).map(|_| vars.add(variable().min(0.0))).collect();
        let neg: Vec<Variable> = (0..lookahead).map(|_| vars.add(variable().max(0.0))).collect();

        let n = requests.len() as f64;
        let objective: Expression = self.weights.energy_wasted * pos.iter().map(|&p| p).sum::<Expression>()
            - self.weights.energy_to_buy * neg.iter().map(|&p| p).sum::<Expression>()
            + (self.weights.average_delay / n)
                * v.iter().flat_map(|vo| vo.values()).map(|&x| x).sum::<Expression>();

        let mut model = vars.minimise(objective).using(microlp);

        for ri in 0..requests.len() {
            // Exactly one offset per request.
            let sum: Expression = b[ri].values().map(|&x| x).sum();
            model = model.with(constraint!(sum == 1));

            for (&o, &bvar) in &b[ri] {
                let vvar = v[ri][&o];
                model = model.with(constraint!(vvar >= o as f64 * bvar));
            }
        }

        let available_padded = crate::profile::pad(available, lookahead);

        for t in 0..lookahead {
            let mut demand = Expression::from(0.0);
            for ri in 0..requests.len() {
                if let Some(&rvar) = req[ri].get(&t) {
                    demand += rvar;
                }
            }
            let delta = available_padded[t] - demand;
            model = model.with(constraint!(pos[t] >= delta.clone()));
            model = model.with(constraint!(neg[t] <= delta));
        }

        for ri in 0..requests.len() {
            let r = &requests[ri];
            for (&t, &rvar) in &req[ri] {
                // Lower envelope: profile value forces req up when any offset laying profile
                // index (t - o) onto t is selected.
                let mut upper = Expression::from(0.0);
                for (&o, &bvar) in &b[ri] {
                    if t >= o as usize {
                        let i = t - o as usize;
                        if let Some(&demand_i) = r.profile.get(i) {
                            model = model.with(constraint!(demand_i * bvar <= rvar));
                            upper += demand_i * bvar;
                        }
                    }
                }
                model = model.with(constraint!(rvar <= upper));
            }
        }

        let solution = model
            .solve()
            .map_err(|e| SchedulerError::SolverFailure(e.to_string()))?;

        let mut plan = Plan::new();
        for (ri, r) in requests.iter().enumerate() {
            let chosen = b[ri]
                .iter()
                .find(|(_, &bvar)| solution.value(bvar) > 0.5)
                .map(|(&o, _)| o)
                .ok_or_else(|| {
                    SchedulerError::SolverFailure(format!(
                        "no offset selected for request {}",
                        r.request_id
                    ))
                })?;
            plan.insert(r.request_id, chosen);
        }

        Ok(plan)
    }
}
