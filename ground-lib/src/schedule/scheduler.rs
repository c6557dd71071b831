//! Scan scheduler: assigns probes to chips, then partitions each chip's
//! channel set across its assigned probes (spec component 4.7).
//!
//! A greedy longest-processing-time-style balancer: chips with zero scan
//! time are dropped, probes that physically host only one chip are
//! committed to it, and the remaining free probes are handed one at a time
//! to whichever chip currently has the highest scan-time pressure per
//! assigned probe.

use crate::chip::RfChip;
use crate::probe::Probe;
use crate::transmitter::ChipId;

/// One probe's assigned chip and contiguous channel-index slice within that
/// chip's own sorted channel ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub chip_id: ChipId,
    pub port: String,
    pub channel_range: (usize, usize),
}

struct ChipState<'a> {
    id: ChipId,
    chip: &'a dyn RfChip,
    scan_time_us: u64,
    assigned_count: usize,
}

impl ChipState<'_> {
    fn pressure(&self) -> f64 {
        if self.assigned_count == 0 {
            f64::INFINITY
        } else {
            self.scan_time_us as f64 / self.assigned_count as f64
        }
    }
}

/// Computes the probe-to-chip assignment and channel partition for the
/// current probe set `probes` and chip set `chips`.
pub fn schedule(probes: &[Probe], chips: &[(ChipId, &dyn RfChip)]) -> Vec<Assignment> {
    let mut states: Vec<ChipState> = chips
        .iter()
        .map(|&(id, chip)| ChipState {
            id,
            chip,
            scan_time_us: chip.calc_scan_time_us(),
            assigned_count: 0,
        })
        .filter(|s| s.scan_time_us > 0)
        .collect();

    if states.is_empty() {
        return Vec::new();
    }

    let mut committed: Vec<(ChipId, String)> = Vec::new();
    let mut free_probes: Vec<&Probe> = Vec::new();

    for probe in probes {
        let probe_chips = probe.chips();
        if probe_chips.len() == 1 {
            if let Some(state) = states.iter_mut().find(|s| s.id == probe_chips[0]) {
                state.assigned_count += 1;
                committed.push((state.id, probe.port.clone()));
                continue;
            }
        }
        free_probes.push(probe);
    }

    for probe in free_probes {
        let probe_chips = probe.chips();
        let best = states
            .iter_mut()
            .filter(|s| probe_chips.contains(&s.id))
            .max_by(|a, b| a.pressure().partial_cmp(&b.pressure()).unwrap());
        if let Some(state) = best {
            state.assigned_count += 1;
            committed.push((state.id, probe.port.clone()));
        }
    }

    let mut assignments = Vec::new();
    for state in &states {
        let ports: Vec<&String> = committed
            .iter()
            .filter(|(id, _)| *id == state.id)
            .map(|(_, port)| port)
            .collect();
        let k = ports.len();
        if k == 0 {
            continue;
        }
        let n = state.chip.channel_count();
        for (i, port) in ports.into_iter().enumerate() {
            let start = i * n / k;
            let end = (i + 1) * n / k;
            assignments.push(Assignment {
                chip_id: state.id,
                port: port.clone(),
                channel_range: (start, end),
            });
        }
    }
    assignments
}
