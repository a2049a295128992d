use std::collections::HashMap;

use crate::cost::{score, CostWeights};
use crate::errors::{CoreError, HubError};
use crate::job::Job;
use crate::profile::{pad, sub_aligned, sum_aligned, validate};
use crate::request::Request;
use crate::scheduler::{Plan, Scheduler};

/// Hub-side bookkeeping for a waiting request: the request itself is immutable once admitted, so
/// the remaining timeout and planned offset live here instead.
struct WaitingEntry {
    request: Request,
    remaining_timeout: u32,
    offset: u32,
}

/// Holds source profiles, waiting requests, running jobs, and the current plan for one
/// scheduling horizon, and drives the discrete tick state machine.
pub struct Hub {
    lookahead: usize,
    scheduler: Box<dyn Scheduler>,
    source_profiles: HashMap<String, Vec<f64>>,
    waiting: Vec<WaitingEntry>,
    running: Vec<Job>,
    weights: CostWeights,
}

impl Hub {
    /// The lookahead horizon, in ticks, this hub was built with.
    pub fn lookahead(&self) -> usize {
        self.lookahead
    }

    /// Builds a hub with the given lookahead horizon and scheduling policy.
    pub fn new(lookahead: usize, scheduler: Box<dyn Scheduler>) -> Self {
        Hub {
            lookahead,
            scheduler,
            source_profiles: HashMap::new(),
            waiting: Vec::new(),
            running: Vec::new(),
            weights: CostWeights::default(),
        }
    }

    /// Replaces or inserts a named source profile. If `autoschedule`, recomputes the plan
    /// afterward.
    pub fn update_source_profile(
        &mut self,
        name: impl Into<String>,
        profile: Vec<f64>,
        autoschedule: bool,
    ) -> Result<(), HubError> {
        validate(&profile)?;
        self.source_profiles.insert(name.into(), profile);
        if autoschedule {
            self.schedule()?;
        }
        Ok(())
    }

    /// Admits a new request into the waiting set with offset 0. If `autoschedule`, recomputes
    /// the plan afterward.
    pub fn add_request(&mut self, request: Request, autoschedule: bool) -> Result<(), HubError> {
        if self.waiting.iter().any(|w| w.request.request_id == request.request_id)
            || self.running.iter().any(|j| j.request_id == request.request_id)
        {
            return Err(HubError::DuplicateRequestId(request.request_id));
        }
        validate(&request.profile)?;

        let remaining_timeout = request.timeout;
        self.waiting.push(WaitingEntry {
            request,
            remaining_timeout,
            offset: 0,
        });
        if autoschedule {
            self.schedule()?;
        }
        Ok(())
    }

    /// Recomputes the plan for the current waiting set. Replaces the plan wholesale on success;
    /// leaves it untouched on failure.
    pub fn schedule(&mut self) -> Result<(), HubError> {
        let requests: Vec<Request> = self.waiting.iter().map(|w| w.request.clone()).collect();
        let available = self.available_energy();
        let plan: Plan = self.scheduler.schedule(&available, &requests)?;

        for w in &mut self.waiting {
            if let Some(&offset) = plan.get(&w.request.request_id) {
                w.offset = offset;
            }
        }
        Ok(())
    }

    /// Advances the hub by one discrete tick: source profiles shift first, then waiting requests
    /// are promoted or have their bookkeeping decremented, and finally running jobs advance. This
    /// order matters: a request promoted this tick does not contribute to `assigned_energy` until
    /// the NEXT tick.
    pub fn tick(&mut self) {
        for profile in self.source_profiles.values_mut() {
            if !profile.is_empty() {
                profile.remove(0);
            }
        }

        let mut promoted = Vec::new();
        self.waiting.retain_mut(|w| {
            if w.offset == 0 || w.remaining_timeout == 0 {
                promoted.push(Job::new(
                    w.request.request_id,
                    w.request.device_name.clone(),
                    w.request.profile.clone(),
                ));
                false
            } else {
                w.remaining_timeout -= 1;
                w.offset -= 1;
                true
            }
        });

        // Jobs already running before this tick advance now; a job promoted this tick is
        // appended afterward, so it keeps its full original profile until the next tick.
        self.running.retain_mut(|job| !job.advance());
        self.running.extend(promoted);
    }

    /// `sum_aligned` over all source profiles.
    pub fn source_energy(&self) -> Vec<f64> {
        sum_aligned(self.source_profiles.values().map(|p| p.as_slice()))
    }

    /// `sum_aligned` over every running job's remaining profile.
    pub fn assigned_energy(&self) -> Vec<f64> {
        sum_aligned(self.running.iter().map(|j| j.remaining_profile()))
    }

    /// `source_energy - assigned_energy`, zero-extended.
    pub fn available_energy(&self) -> Vec<f64> {
        sub_aligned(&self.source_energy(), &self.assigned_energy())
    }

    /// The sum of waiting requests' profiles laid out at their planned offsets.
    pub fn planned_energy(&self) -> Vec<f64> {
        let ticks = self
            .waiting
            .iter()
            .map(|w| w.offset as usize + w.request.profile.len())
            .max()
            .unwrap_or(0);
        let mut planned = vec![0.0; ticks];
        for w in &self.waiting {
            let offset = w.offset as usize;
            for (i, &v) in w.request.profile.iter().enumerate() {
                planned[offset + i] += v;
            }
        }
        planned
    }

    /// The current plan's score, or `0.0` when there are no waiting requests.
    pub fn score(&self) -> f64 {
        if self.waiting.is_empty() {
            return 0.0;
        }
        let available = self.available_energy();
        let planned = self.planned_energy();
        let offsets: Vec<u32> = self.waiting.iter().map(|w| w.offset).collect();
        let ticks = available.len().max(planned.len());
        score(&pad(&available, ticks), &pad(&planned, ticks), &offsets, &self.weights)
    }

    /// The planned offset for a given waiting request, if it is currently waiting.
    pub fn plan_offset(&self, request_id: u64) -> Option<u32> {
        self.waiting
            .iter()
            .find(|w| w.request.request_id == request_id)
            .map(|w| w.offset)
    }

    /// Number of currently waiting requests.
    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    /// Number of currently running jobs.
    pub fn running_count(&self) -> usize {
        self.running.len()
    }
}

impl From<CoreError> for HubError {
    fn from(e: CoreError) -> Self {
        HubError::InvalidRequest(e)
    }
}
