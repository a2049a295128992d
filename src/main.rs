use anyhow::Result;
use log::error;
use rayon::ThreadPoolBuilder;

use crate::initialization::init;
use crate::worker::run;

mod bus;
mod config;
mod cost;
mod determinism;
mod errors;
mod hub;
mod initialization;
mod job;
mod logging;
mod profile;
mod request;
mod scheduler;
mod worker;

fn main() -> Result<()> {
    ThreadPoolBuilder::new().num_threads(2).build_global()?;

    // Load config and build the hub. If initialization fails, we are pretty much out of luck and
    // can't even log yet.
    let (_config, mgr) = init()?;

    if let Err(e) = run(mgr) {
        error!("run failed: {}", e);
        return Err(e);
    }

    Ok(())
}
