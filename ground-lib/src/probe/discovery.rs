//! USB probe discovery: the 1s-poll background task from spec §5
//! ("one background thread enumerates USB serial devices on a 1 s poll and
//! instantiates probe sessions"), minus the actual USB enumeration itself.
//!
//! The real serial-port scan (filtering by vendor/product id and interface
//! description, spec §6) is an external collaborator per spec §1's Non-goal
//! list; [`ProbeSource`] is its named interface. This module owns only the
//! polling cadence and the added/removed diffing, mirroring the teacher's
//! `tokio::time::interval` loop shape used for periodic housekeeping.

use std::collections::HashSet;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::error::Result;

/// A snapshot of currently-present probe ports. Implemented by the real USB
/// enumeration in production; tests supply a scripted fake.
pub trait ProbeSource: Send {
    /// Returns every probe port currently visible on the bus, filtered by
    /// the configured vendor/product id and interface description.
    fn scan(&mut self) -> Result<Vec<String>>;
}

/// One change observed between two consecutive polls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryEvent {
    Added(String),
    Removed(String),
}

/// Diffs two port snapshots into the events needed to bring a roster from
/// `previous` to `current`. Order is stable: removals before additions,
/// each sorted lexically so test expectations don't depend on hash order.
fn diff(previous: &HashSet<String>, current: &HashSet<String>) -> Vec<DiscoveryEvent> {
    let mut removed: Vec<&String> = previous.difference(current).collect();
    removed.sort();
    let mut added: Vec<&String> = current.difference(previous).collect();
    added.sort();

    removed
        .into_iter()
        .map(|p| DiscoveryEvent::Removed(p.clone()))
        .chain(added.into_iter().map(|p| DiscoveryEvent::Added(p.clone())))
        .collect()
}

/// Runs the discovery poll loop until `source.scan()` returns an error or
/// the event channel's receiver is dropped. Each tick emits the
/// [`DiscoveryEvent`]s needed to reconcile the caller's roster with the
/// freshly observed port set; a scan error is logged and the loop keeps
/// polling rather than tearing down (spec §7: transport faults never
/// propagate past this boundary).
pub async fn run_discovery<S: ProbeSource>(
    mut source: S,
    poll_interval: Duration,
    events: mpsc::Sender<DiscoveryEvent>,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut known: HashSet<String> = HashSet::new();

    info!(interval_ms = poll_interval.as_millis() as u64, "usb discovery poll started");
    loop {
        ticker.tick().await;
        let current = match source.scan() {
            Ok(ports) => ports.into_iter().collect::<HashSet<_>>(),
            Err(err) => {
                debug!(%err, "usb discovery scan failed, keeping previous snapshot");
                continue;
            }
        };

        for event in diff(&known, &current) {
            if events.send(event).await.is_err() {
                info!("discovery event channel closed, stopping poll loop");
                return;
            }
        }
        known = current;
    }
}
