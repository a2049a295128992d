use std::sync::mpsc::{Receiver, Sender};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use log::{error, info};

use crate::hub::Hub;
use crate::request::Request;

/// An event delivered onto the hub's single event queue by one of the adapter stand-ins below.
/// Mirrors the message-bus topics the original agent pair (a source agent and a device agent)
/// would publish.
pub enum HubEvent {
    SourceProfile { name: String, profile: Vec<f64> },
    NewRequest(Request),
    Tick,
}

/// Spawns a thread that periodically enqueues `HubEvent::Tick` every `interval`.
///
/// # Arguments
///
/// * 'tx' - the shared event queue sender
/// * 'interval' - the wall-clock period between ticks
pub fn spawn_clock_adapter(tx: Sender<HubEvent>, interval: Duration) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        thread::sleep(interval);
        if tx.send(HubEvent::Tick).is_err() {
            return;
        }
    })
}

/// Spawns a thread that feeds a fixed sequence of source-profile updates onto the queue, one per
/// `interval`, standing in for an external source/weather adapter.
///
/// # Arguments
///
/// * 'tx' - the shared event queue sender
/// * 'name' - the source name to publish under
/// * 'updates' - the sequence of profiles to publish, in order
/// * 'interval' - the wall-clock period between publications
pub fn spawn_source_adapter(
    tx: Sender<HubEvent>,
    name: String,
    updates: Vec<Vec<f64>>,
    interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for profile in updates {
            if tx
                .send(HubEvent::SourceProfile {
                    name: name.clone(),
                    profile,
                })
                .is_err()
            {
                return;
            }
            thread::sleep(interval);
        }
    })
}

/// Spawns a thread that feeds a fixed sequence of new requests onto the queue, one per
/// `interval`, standing in for an external device/request adapter.
///
/// # Arguments
///
/// * 'tx' - the shared event queue sender
/// * 'requests' - the requests to publish, in order
/// * 'interval' - the wall-clock period between publications
pub fn spawn_device_adapter(
    tx: Sender<HubEvent>,
    requests: Vec<Request>,
    interval: Duration,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for request in requests {
            if tx.send(HubEvent::NewRequest(request)).is_err() {
                return;
            }
            thread::sleep(interval);
        }
    })
}

/// Drains `rx` until the sender side is dropped, applying each event to `hub` behind its mutex.
/// A single bad request or source update logs and continues rather than taking down the process.
/// After each applied tick, publishes the hub's top-of-horizon energy figures via `log::info!`.
///
/// # Arguments
///
/// * 'hub' - the shared hub
/// * 'rx' - the event queue receiver
pub fn run_drain_loop(hub: Arc<Mutex<Hub>>, rx: Receiver<HubEvent>) {
    for event in rx.iter() {
        let mut hub = hub.lock().expect("hub mutex poisoned");
        match event {
            HubEvent::SourceProfile { name, profile } => {
                if let Err(e) = hub.update_source_profile(name, profile, true) {
                    error!("source profile update rejected: {}", e);
                }
            }
            HubEvent::NewRequest(request) => {
                if let Err(e) = hub.add_request(request, true) {
                    error!("request rejected: {}", e);
                }
            }
            HubEvent::Tick => {
                hub.tick();
                let available = hub.available_energy();
                let assigned = hub.assigned_energy();
                let planned = hub.planned_energy();
                info!(
                    "tick: available[0]={:.3} assigned[0]={:.3} planned[0]={:.3}",
                    available.first().copied().unwrap_or(0.0),
                    assigned.first().copied().unwrap_or(0.0),
                    planned.first().copied().unwrap_or(0.0),
                );
            }
        }
    }
}

/// Builds a fresh `mpsc` channel for `HubEvent`s.
pub fn channel() -> (Sender<HubEvent>, Receiver<HubEvent>) {
    mpsc::channel()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::NoDelayScheduler;

    #[test]
    fn drain_loop_applies_events_until_senders_drop() {
        let hub = Arc::new(Mutex::new(Hub::new(10, Box::new(NoDelayScheduler))));
        let (tx, rx) = channel();

        tx.send(HubEvent::SourceProfile {
            name: "solar".into(),
            profile: vec![1.0, 1.0],
        })
        .unwrap();
        tx.send(HubEvent::NewRequest(Request::new(1, "kettle", vec![0.2], 0)))
            .unwrap();
        tx.send(HubEvent::Tick).unwrap();
        drop(tx);

        run_drain_loop(Arc::clone(&hub), rx);

        let hub = hub.lock().unwrap();
        assert_eq!(hub.running_count(), 1);
    }

    #[test]
    fn drain_loop_survives_a_rejected_duplicate_request() {
        let hub = Arc::new(Mutex::new(Hub::new(10, Box::new(NoDelayScheduler))));
        let (tx, rx) = channel();

        tx.send(HubEvent::NewRequest(Request::new(1, "a", vec![0.1], 5)))
            .unwrap();
        tx.send(HubEvent::NewRequest(Request::new(1, "dup", vec![0.1], 5)))
            .unwrap();
        drop(tx);

        run_drain_loop(Arc::clone(&hub), rx);

        let hub = hub.lock().unwrap();
        assert_eq!(hub.waiting_count(), 1);
    }
}
