use std::collections::HashSet;

use crate::chip::RfChip;
use crate::protocol::descriptor::{Cc2500Channel, ProtocolDescriptor};
use crate::protocol::frskyx;
use crate::transmitter::{ChipId, FrSkyXTransmitter, Transmitter};

/// CC2500: drives FrSkyX and FrSkyXEU.
///
/// The scanner payload layout (rf_channel, fsctrl0 bytes) generalizes
/// CYRF6936's 2-bytes-per-channel encoding, since the firmware contract for
/// CC2500 scanning is not fully specified upstream (see DESIGN.md).
pub struct Cc2500 {
    pub frskyx: ProtocolDescriptor<Cc2500Channel>,
    pub frskyx_eu: ProtocolDescriptor<Cc2500Channel>,
}

impl Cc2500 {
    pub fn new() -> Self {
        Self {
            frskyx: frskyx::descriptor(),
            frskyx_eu: frskyx::descriptor_eu(),
        }
    }

    fn sorted_channels(&self) -> Vec<Cc2500Channel> {
        let mut set: HashSet<Cc2500Channel> = HashSet::new();
        set.extend(self.frskyx.channels().iter().copied());
        set.extend(self.frskyx_eu.channels().iter().copied());
        let mut channels: Vec<_> = set.into_iter().collect();
        channels.sort_by_key(|c| (c.rf_channel, c.fsctrl0));
        channels
    }
}

impl Default for Cc2500 {
    fn default() -> Self {
        Self::new()
    }
}

impl RfChip for Cc2500 {
    fn chip_id(&self) -> ChipId {
        ChipId::Cc2500
    }

    fn calc_scan_time_us(&self) -> u64 {
        self.frskyx.scan_time_us() + self.frskyx_eu.scan_time_us()
    }

    fn channel_count(&self) -> usize {
        self.sorted_channels().len()
    }

    fn encode_scan_slice(&self, start: usize, end: usize) -> Vec<u8> {
        let channels = self.sorted_channels();
        let mut data = Vec::with_capacity((end - start) * 2);
        for ch in &channels[start..end] {
            data.push(ch.rf_channel);
            data.push(ch.fsctrl0);
        }
        data
    }

    /// FrSkyX hacking is not defined by the upstream firmware contract
    /// (only the DSM/CYRF6936 hack payload is); always `None`.
    fn encode_hack_payload(&self, _tx: &Transmitter) -> Option<Vec<u8>> {
        None
    }

    fn parse_recv_msg(&self, data: &[u8]) -> Option<Transmitter> {
        if let Some(candidate) = frskyx::parse(data, false) {
            return Some(Transmitter::FrSkyX(FrSkyXTransmitter::new(
                candidate.id,
                candidate.eu,
                Some(data),
            )));
        }
        if let Some(candidate) = frskyx::parse(data, true) {
            return Some(Transmitter::FrSkyX(FrSkyXTransmitter::new(
                candidate.id,
                candidate.eu,
                Some(data),
            )));
        }
        None
    }
}
