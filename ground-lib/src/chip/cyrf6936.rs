use std::collections::HashSet;

use crate::chip::RfChip;
use crate::protocol::descriptor::{Cyrf6936Channel, ProtocolDescriptor};
use crate::protocol::{dsm2, dsmx};
use crate::transmitter::{ChipId, DsmTransmitter, Transmitter};

/// CYRF6936: drives DSM2 and DSMX.
pub struct Cyrf6936 {
    pub dsmx: ProtocolDescriptor<Cyrf6936Channel>,
    pub dsm2: ProtocolDescriptor<Cyrf6936Channel>,
}

impl Cyrf6936 {
    pub fn new() -> Self {
        Self {
            dsmx: dsmx::descriptor(),
            dsm2: dsm2::descriptor(),
        }
    }

    fn sorted_channels(&self) -> Vec<Cyrf6936Channel> {
        let mut set: HashSet<Cyrf6936Channel> = HashSet::new();
        set.extend(self.dsmx.channels().iter().copied());
        set.extend(self.dsm2.channels().iter().copied());
        let mut channels: Vec<_> = set.into_iter().collect();
        channels.sort_by_key(|c| (c.rf_channel, c.pn_row, c.pn_column));
        channels
    }
}

impl Default for Cyrf6936 {
    fn default() -> Self {
        Self::new()
    }
}

impl RfChip for Cyrf6936 {
    fn chip_id(&self) -> ChipId {
        ChipId::Cyrf6936
    }

    fn calc_scan_time_us(&self) -> u64 {
        self.dsmx.scan_time_us() + self.dsm2.scan_time_us()
    }

    fn channel_count(&self) -> usize {
        self.sorted_channels().len()
    }

    fn encode_scan_slice(&self, start: usize, end: usize) -> Vec<u8> {
        let channels = self.sorted_channels();
        let mut data = Vec::with_capacity((end - start) * 2);
        for ch in &channels[start..end] {
            data.push(ch.rf_channel);
            data.push((ch.pn_row << 4) | ch.pn_column);
        }
        data
    }

    fn encode_hack_payload(&self, tx: &Transmitter) -> Option<Vec<u8>> {
        let Transmitter::Dsm(dsm) = tx else {
            return None;
        };
        Some(encode_dsm_hack_payload(dsm))
    }

    fn parse_recv_msg(&self, data: &[u8]) -> Option<Transmitter> {
        if let Some(candidate) = dsmx::parse(data) {
            return Some(Transmitter::Dsm(DsmTransmitter::new(
                candidate.id,
                candidate.dsmx,
                Some(data),
            )));
        }
        if let Some(candidate) = dsm2::parse(data) {
            return Some(Transmitter::Dsm(DsmTransmitter::new(
                candidate.id,
                candidate.dsmx,
                Some(data),
            )));
        }
        None
    }
}

fn encode_dsm_hack_payload(tx: &DsmTransmitter) -> Vec<u8> {
    let mut data = vec![0u8; 7];
    if tx.dsmx {
        data[0] = 1;
        data[1..5].copy_from_slice(&tx.id);
    } else {
        data[0] = 0;
        data[1..5].copy_from_slice(&tx.id);
        let mut channels = tx.channels.iter().copied();
        if let Some(c0) = channels.next() {
            data[5] = c0;
        }
        if let Some(c1) = channels.next() {
            data[6] = c1;
        }
    }
    data
}
