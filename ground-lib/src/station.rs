//! Control loop (spec expansion, §2/§5): the single task that owns the
//! transmitter registry and probe roster, routes inbound `RECV_DATA`
//! notifications into the matching chip abstraction, and re-runs the
//! scheduler/hacking dispatch on operator commands.
//!
//! Modeled on the teacher's `tcp::handler::TcpHandler::run` shape: one
//! `tokio::select!` loop over a channel of inbound events and a `watch`
//! shutdown signal, with ownership (not a mutex) serializing access to
//! the registry and roster since only this task ever touches them.

use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::chip::{Cc2500, Cyrf6936, RfChip};
use crate::probe::message::RecvData;
use crate::probe::{run_discovery, DiscoveryEvent, Probe, ProbeRoster, ProbeSession, ProbeSource, ProbeTransport};
use crate::schedule::{dispatch_hacking, schedule, Assignment, HackAssignment};
use crate::transmitter::{ChipId, Transmitter, TransmitterRegistry};

/// A `RECV_DATA` notification lifted off a probe session's `poll()` queue,
/// labeled with the probe port it arrived from.
pub struct RecvEvent {
    pub port: String,
    pub data: RecvData,
}

/// Operator-facing commands the control task accepts on its command
/// channel (spec §5: "the UI pushes commands back").
pub enum StationCommand {
    /// Recompute the probe/chip assignment and return it to the caller.
    Rebalance {
        probes: Vec<Probe>,
        reply: tokio::sync::oneshot::Sender<Vec<Assignment>>,
    },
    /// Run hacking dispatch over every `do_hack` transmitter.
    HackAll {
        reply: tokio::sync::oneshot::Sender<(Vec<HackAssignment>, Vec<String>)>,
    },
    /// A probe session finished its handshake; upsert it into the roster
    /// (spec §5/§6: "registers new ProbeSessions into the roster"). Sent by
    /// [`spawn_probe_session`] instead of touching the roster directly,
    /// since only the control loop task is allowed to mutate it.
    ProbeReady(Probe),
    /// Stop the control loop.
    Shutdown,
}

/// Owns the registry and roster; the only task that ever mutates either.
pub struct Station {
    pub registry: TransmitterRegistry,
    pub roster: ProbeRoster,
    cyrf6936: Cyrf6936,
    cc2500: Cc2500,
}

impl Station {
    pub fn new() -> Self {
        Self {
            registry: TransmitterRegistry::new(),
            roster: ProbeRoster::new(),
            cyrf6936: Cyrf6936::new(),
            cc2500: Cc2500::new(),
        }
    }

    fn chip_for(&self, chip_id: ChipId) -> &dyn RfChip {
        match chip_id {
            ChipId::Cyrf6936 => &self.cyrf6936,
            ChipId::Cc2500 => &self.cc2500,
        }
    }

    fn chips(&self) -> Vec<(ChipId, &dyn RfChip)> {
        vec![
            (ChipId::Cyrf6936, &self.cyrf6936 as &dyn RfChip),
            (ChipId::Cc2500, &self.cc2500 as &dyn RfChip),
        ]
    }

    /// Routes one inbound packet into its chip's `parse_recv_msg`, merging
    /// any resulting candidate into the registry (spec data flow: "probe
    /// session -> RECV_DATA -> chip abstraction -> protocol validator ->
    /// registry merge").
    pub fn handle_recv(&mut self, event: &RecvEvent) {
        let chip_id: ChipId = event.data.chip.into();
        let chip = self.chip_for(chip_id);
        match chip.parse_recv_msg(&event.data.data) {
            Some(candidate) => {
                let idx = self.registry.add_or_merge(candidate);
                debug!(port = %event.port, ?chip_id, idx, "merged candidate transmitter");
            }
            None => {
                debug!(port = %event.port, ?chip_id, "discarded unparseable or ambiguous packet");
            }
        }
    }

    /// The registry's "dirty" signal (spec §9: callback-to-message-passing
    /// redesign). An external UI would hold the receiver and redraw on
    /// every tick, coalescing as its own responsibility.
    pub fn subscribe_dirty(&self) -> tokio::sync::watch::Receiver<u64> {
        self.registry.subscribe()
    }

    pub fn rebalance(&self, probes: &[Probe]) -> Vec<Assignment> {
        let chips = self.chips();
        schedule(probes, &chips)
    }

    pub fn hack_all(&self) -> (Vec<HackAssignment>, Vec<String>) {
        let chips = self.chips();
        dispatch_hacking(&self.registry, &self.roster, &chips)
    }

    /// Targeted hacking of one transmitter already present in the registry.
    pub fn hack_one(&self, tx: &Transmitter) -> Result<HackAssignment, String> {
        let chips = self.chips();
        crate::schedule::hacking::dispatch_single(tx, &self.roster, &chips)
    }

    /// Applies one USB-discovery event to the roster (spec §5/§6: "registers
    /// new ProbeSessions into the roster and removes disconnected ones").
    fn apply_discovery(&mut self, event: DiscoveryEvent) {
        match event {
            DiscoveryEvent::Added(port) => {
                info!(%port, "probe discovered, registering into roster");
                self.roster.insert(Probe::discovered(port));
            }
            DiscoveryEvent::Removed(port) => {
                info!(%port, "probe disconnected, removing from roster");
                self.roster.remove(&port);
            }
        }
    }

    /// Drives the control loop until `Shutdown` is received or every
    /// essential channel closes. `recv_rx` carries inbound packets from
    /// per-probe session tasks; `cmd_rx` carries operator commands (and
    /// probe-ready upserts from [`spawn_probe_session`]); `discovery_rx`
    /// carries USB-discovery add/remove events from [`run_discovery`],
    /// driving the roster the way SPEC_FULL.md's control-loop section
    /// describes. Discovery is optional: once its channel closes the loop
    /// keeps running on `recv_rx`/`cmd_rx` alone, the same way a sender-less
    /// `recv_rx` is tolerated by `ground-station scan` when no probes are
    /// attached yet.
    pub async fn run(
        mut self,
        mut recv_rx: mpsc::Receiver<RecvEvent>,
        mut cmd_rx: mpsc::Receiver<StationCommand>,
        mut discovery_rx: mpsc::Receiver<DiscoveryEvent>,
    ) {
        info!("control loop started");
        let mut discovery_open = true;
        loop {
            tokio::select! {
                event = recv_rx.recv() => {
                    match event {
                        Some(event) => self.handle_recv(&event),
                        None => {
                            info!("recv channel closed, stopping control loop");
                            break;
                        }
                    }
                }
                discovered = discovery_rx.recv(), if discovery_open => {
                    match discovered {
                        Some(event) => self.apply_discovery(event),
                        None => {
                            debug!("discovery channel closed, continuing without usb discovery");
                            discovery_open = false;
                        }
                    }
                }
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(StationCommand::Rebalance { probes, reply }) => {
                            let assignments = self.rebalance(&probes);
                            let _ = reply.send(assignments);
                        }
                        Some(StationCommand::HackAll { reply }) => {
                            let (assignments, diagnostics) = self.hack_all();
                            for reason in &diagnostics {
                                warn!(%reason, "hack dispatch skipped a candidate");
                            }
                            let _ = reply.send((assignments, diagnostics));
                        }
                        Some(StationCommand::ProbeReady(probe)) => {
                            info!(port = %probe.port, "probe session ready, registering into roster");
                            self.roster.insert(probe);
                        }
                        Some(StationCommand::Shutdown) | None => {
                            info!("control loop shutting down");
                            break;
                        }
                    }
                }
            }
        }
    }

    /// Convenience entry point that spawns the USB-discovery poll loop
    /// (spec §5: "one background thread enumerates USB serial devices on a
    /// 1 s poll") over the given [`ProbeSource`] before handing off to
    /// [`Station::run`]. The discovery task is aborted once the control
    /// loop returns.
    pub async fn run_with_discovery<S: ProbeSource + 'static>(
        self,
        source: S,
        poll_interval: Duration,
        recv_rx: mpsc::Receiver<RecvEvent>,
        cmd_rx: mpsc::Receiver<StationCommand>,
    ) {
        let (discovery_tx, discovery_rx) = mpsc::channel(16);
        let discovery_handle = tokio::spawn(run_discovery(source, poll_interval, discovery_tx));
        self.run(recv_rx, cmd_rx, discovery_rx).await;
        discovery_handle.abort();
    }
}

/// Spawns the per-session poll loop for one already handshake-complete
/// probe session (spec §5: "one thread per probe session" draining inbound
/// `RECV_DATA`). Reports itself ready over `cmd_tx` so the control loop
/// registers it into the roster, then forwards every drained packet as a
/// `RecvEvent` until the session errors or a receiver is dropped. Mutates
/// no shared state directly: ownership of the roster and registry stays
/// with the task running [`Station::run`].
pub fn spawn_probe_session<T: ProbeTransport + 'static>(
    mut session: ProbeSession<T>,
    poll_interval: Duration,
    cmd_tx: mpsc::Sender<StationCommand>,
    recv_tx: mpsc::Sender<RecvEvent>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let port = session.probe.port.clone();
        if cmd_tx.send(StationCommand::ProbeReady(session.probe.clone())).await.is_err() {
            debug!(%port, "control loop gone before probe session could register");
            return;
        }

        let mut ticker = tokio::time::interval(poll_interval);
        loop {
            ticker.tick().await;
            match session.poll() {
                Ok(items) => {
                    for data in items {
                        let event = RecvEvent { port: port.clone(), data };
                        if recv_tx.send(event).await.is_err() {
                            info!(%port, "recv channel closed, stopping probe session poll loop");
                            return;
                        }
                    }
                }
                Err(err) => {
                    warn!(%port, %err, "probe session poll failed, stopping session poll loop");
                    return;
                }
            }
        }
    })
}

impl Default for Station {
    fn default() -> Self {
        Self::new()
    }
}
