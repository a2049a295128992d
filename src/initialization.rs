use std::env;
use std::time::Duration;

use log::info;

use crate::config::{load_config, Config, SchedulerPolicy};
use crate::determinism::seed0;
use crate::errors::InitError;
use crate::hub::Hub;
use crate::logging::setup_logger;
use crate::scheduler::{BruteForceScheduler, LpScheduler, NoDelayScheduler, Scheduler};

/// Bundles the config-derived state the worker needs to run: the hub itself plus the tick
/// interval its clock adapter should use.
pub struct Mgr {
    pub hub: Hub,
    pub tick_interval: Duration,
}

/// Parses the `--config=` CLI argument, loads configuration, sets up logging, seeds determinism
/// if requested, and builds a `Mgr` holding the initialized hub.
pub fn init() -> Result<(Config, Mgr), InitError> {
    let args: Vec<String> = env::args().collect();
    let config_path = args
        .iter()
        .find(|p| p.starts_with("--config="))
        .ok_or("missing --config= argument")?;
    let config_path = config_path
        .split_once('=')
        .ok_or("malformed --config= argument")?
        .1;

    let config = load_config(config_path)?;

    let _ = setup_logger(&config.general.log_path, config.general.log_level, config.general.log_to_stdout)?;

    info!("starting powerhub scheduler version: {}", env!("CARGO_PKG_VERSION"));

    if config.hub.seed_on_start {
        seed0();
    }

    let scheduler: Box<dyn Scheduler> = match config.hub.scheduler {
        SchedulerPolicy::BruteForce => Box::new(BruteForceScheduler::new(config.hub.lookahead)),
        SchedulerPolicy::Lp => match config.hub.solver_timeout_ms {
            Some(ms) => Box::new(LpScheduler::with_timeout(config.hub.lookahead, Duration::from_millis(ms))),
            None => Box::new(LpScheduler::new(config.hub.lookahead)),
        },
        SchedulerPolicy::NoDelay => Box::new(NoDelayScheduler),
    };

    let hub = Hub::new(config.hub.lookahead, scheduler);
    let tick_interval = Duration::from_millis(config.hub.tick_interval_ms);

    let mgr = Mgr { hub, tick_interval };

    Ok((config, mgr))
}
