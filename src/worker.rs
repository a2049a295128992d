use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::info;

use crate::bus::{channel, run_drain_loop, spawn_clock_adapter, spawn_device_adapter, spawn_source_adapter};
use crate::determinism::solar_like_profile;
use crate::initialization::Mgr;
use crate::request::Request;

/// Runs the hub for as long as its clock adapter keeps ticking, with the hub itself behind a
/// mutex shared with the drain loop. Alongside the clock, spawns a source adapter publishing a
/// solar-like profile sized to the hub's lookahead and a device adapter publishing a pair of
/// demo deferrable-load requests, standing in for the external source/device feeds a real
/// deployment would wire in here instead.
///
/// # Arguments
///
/// * 'mgr' - struct with the initialized hub and its configured tick interval
pub fn run(mgr: Mgr) -> anyhow::Result<()> {
    let lookahead = mgr.hub.lookahead();
    let hub = Arc::new(Mutex::new(mgr.hub));
    let (tx, rx) = channel();

    info!("starting clock adapter with tick interval {:?}", mgr.tick_interval);
    let clock = spawn_clock_adapter(tx.clone(), mgr.tick_interval);

    let source = spawn_source_adapter(
        tx.clone(),
        "solar".into(),
        vec![solar_like_profile(lookahead, 1.0)],
        Duration::from_millis(0),
    );

    let requests = vec![
        Request::new(1, "demo-load-1", vec![0.1; 6], 99),
        Request::new(2, "demo-load-2", vec![0.8; 6], 99),
    ];
    let device = spawn_device_adapter(tx, requests, mgr.tick_interval);

    run_drain_loop(Arc::clone(&hub), rx);

    // The drain loop only returns once every sender has been dropped; join the adapter threads
    // to surface any panic rather than letting it leak silently.
    if clock.join().is_err() {
        info!("clock adapter thread ended abnormally");
    }
    if source.join().is_err() {
        info!("source adapter thread ended abnormally");
    }
    if device.join().is_err() {
        info!("device adapter thread ended abnormally");
    }

    Ok(())
}

/// Runs the hub for a bounded number of ticks without spawning a background clock, useful for
/// demos and scripted scenarios where ticks are driven explicitly rather than by wall-clock time.
///
/// # Arguments
///
/// * 'mgr' - struct with the initialized hub
/// * 'ticks' - number of ticks to advance
pub fn run_bounded(mgr: &mut Mgr, ticks: usize) {
    for _ in 0..ticks {
        mgr.hub.tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::NoDelayScheduler;
    use crate::hub::Hub;

    #[test]
    fn run_bounded_advances_the_hub_the_requested_number_of_ticks() {
        let mut mgr = Mgr {
            hub: Hub::new(10, Box::new(NoDelayScheduler)),
            tick_interval: Duration::from_millis(1),
        };
        mgr.hub
            .update_source_profile("solar", vec![1.0, 1.0, 1.0], false)
            .unwrap();
        run_bounded(&mut mgr, 2);
        assert_eq!(mgr.hub.source_energy(), vec![1.0]);
    }
}
