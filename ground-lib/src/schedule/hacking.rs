//! Hacking dispatch (spec component 4.8): pairs `do_hack` transmitters with
//! a free probe that can carry their chip's hack payload.

use crate::chip::RfChip;
use crate::probe::ProbeRoster;
use crate::transmitter::{ChipId, Transmitter, TransmitterRegistry};

/// One transmitter paired with the probe and payload that will attempt to
/// take it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HackAssignment {
    pub port: String,
    pub chip_id: ChipId,
    pub payload: Vec<u8>,
}

fn find_probe(
    roster: &ProbeRoster,
    chip_id: ChipId,
    already_used: &[String],
    eligible: impl Fn(&crate::probe::Probe) -> bool,
) -> Option<String> {
    roster
        .iter()
        .find(|p| eligible(p) && p.chips().contains(&chip_id) && !already_used.contains(&p.port))
        .map(|p| p.port.clone())
}

fn chip_for(chip_id: ChipId, chips: &[(ChipId, &dyn RfChip)]) -> Option<&dyn RfChip> {
    chips
        .iter()
        .find(|(id, _)| *id == chip_id)
        .map(|(_, chip)| *chip)
}

/// Greedily pairs every `do_hack` transmitter (sorted by decreasing
/// received-packet count, per [`TransmitterRegistry::hack_candidates`])
/// with the first strictly-idle, chip-eligible probe not already claimed in
/// this batch. Unlike the targeted path below, batch dispatch never
/// preempts a probe that is already scanning (spec §4.8: "the first
/// currently-free probe"). A candidate with no eligible idle probe, or
/// whose chip has no defined hack payload, is skipped: its port is reported
/// as a diagnostic rather than queued (spec §4.8, §7 logic faults).
pub fn dispatch_hacking(
    registry: &TransmitterRegistry,
    roster: &ProbeRoster,
    chips: &[(ChipId, &dyn RfChip)],
) -> (Vec<HackAssignment>, Vec<String>) {
    let mut assignments = Vec::new();
    let mut diagnostics = Vec::new();
    let mut used_ports = Vec::new();

    for tx in registry.hack_candidates() {
        match dispatch_one(tx, roster, chips, &used_ports, crate::probe::Probe::is_idle) {
            Ok(assignment) => {
                used_ports.push(assignment.port.clone());
                assignments.push(assignment);
            }
            Err(reason) => diagnostics.push(reason),
        }
    }

    (assignments, diagnostics)
}

/// Targeted hacking of a single transmitter: idle-or-scanning probes are
/// eligible, so this can preempt a probe's in-progress scan (spec §4.8).
pub fn dispatch_single(
    tx: &Transmitter,
    roster: &ProbeRoster,
    chips: &[(ChipId, &dyn RfChip)],
) -> Result<HackAssignment, String> {
    dispatch_one(tx, roster, chips, &[], crate::probe::Probe::is_free)
}

fn dispatch_one(
    tx: &Transmitter,
    roster: &ProbeRoster,
    chips: &[(ChipId, &dyn RfChip)],
    already_used: &[String],
    eligible: impl Fn(&crate::probe::Probe) -> bool,
) -> Result<HackAssignment, String> {
    let chip_id = tx.chip();
    let chip = chip_for(chip_id, chips)
        .ok_or_else(|| format!("no chip abstraction registered for {chip_id:?}"))?;
    // A chip with no defined host-built hack payload (FrSkyX/CC2500, spec
    // open question) still gets dispatched to a probe; the firmware drives
    // the takeover from there with no payload bytes attached.
    let payload = chip.encode_hack_payload(tx).unwrap_or_default();
    let port = find_probe(roster, chip_id, already_used, eligible)
        .ok_or_else(|| format!("no eligible free probe for chip {chip_id:?}"))?;
    Ok(HackAssignment {
        port,
        chip_id,
        payload,
    })
}
