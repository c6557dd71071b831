//! FrSkyX / FrSkyXEU: CC2500 link protocol. The EU variant differs only in
//! packet length (LBT-compliant hopping uses the extra bytes, which this
//! core does not need to interpret beyond the length check).

use crate::crc::frskyx::crc16;
use crate::protocol::descriptor::{Cc2500Channel, ProtocolDescriptor, ProtocolId, ScanPlan};

/// Highest channel number used by the hopping table derivation below.
pub const CHAN_MAX: u8 = 48;
/// Number of hop-table slots a fully characterized transmitter occupies.
pub const CHAN_USED: usize = 47;

const NON_EU_LEN: u8 = 29;
const EU_LEN: u8 = 32;

/// A candidate identity recovered from a validated FrSkyX packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrSkyXCandidate {
    pub id: [u8; 2],
    pub eu: bool,
}

fn packet_len(eu: bool) -> u8 {
    if eu {
        EU_LEN
    } else {
        NON_EU_LEN
    }
}

fn plan_minimum() -> ScanPlan<Cc2500Channel> {
    let last = CHAN_MAX - CHAN_USED as u8 + 1;
    let channels = (1..last)
        .map(|rf_channel| Cc2500Channel {
            rf_channel,
            fsctrl0: 0,
        })
        .collect::<Vec<_>>();
    ScanPlan {
        scan_time_us: 0,
        channels,
    }
}

fn plan_average() -> ScanPlan<Cc2500Channel> {
    let channels = (1..CHAN_MAX)
        .map(|rf_channel| Cc2500Channel {
            rf_channel,
            fsctrl0: 0,
        })
        .collect::<Vec<_>>();
    ScanPlan {
        scan_time_us: 0,
        channels,
    }
}

fn plan_maximum() -> ScanPlan<Cc2500Channel> {
    let mut channels = Vec::with_capacity((CHAN_MAX as usize - 1) * 8);
    for rf_channel in 1..CHAN_MAX {
        for fsctrl0 in 0..8 {
            channels.push(Cc2500Channel {
                rf_channel,
                fsctrl0,
            });
        }
    }
    ScanPlan {
        scan_time_us: 0,
        channels,
    }
}

/// Builds the FrSkyX protocol descriptor (shared by FrSkyXEU; `eu` only
/// affects packet validation, not the scan plan).
pub fn descriptor() -> ProtocolDescriptor<Cc2500Channel> {
    ProtocolDescriptor::new(
        ProtocolId::FrSkyX,
        [
            ScanPlan {
                channels: Vec::new(),
                scan_time_us: 0,
            },
            plan_minimum(),
            plan_average(),
            plan_maximum(),
        ],
    )
}

/// Builds the FrSkyXEU protocol descriptor (see [`descriptor`]).
pub fn descriptor_eu() -> ProtocolDescriptor<Cc2500Channel> {
    let mut d = descriptor();
    d.id = ProtocolId::FrSkyXEu;
    d
}

/// Validates a raw CC2500 payload as a FrSkyX/FrSkyXEU packet.
///
/// Rejects unless the reported length matches the protocol's fixed packet
/// length and the chip-level CRC-ok bit is set; then recomputes the inner
/// CRC-16 over the body and compares it against the trailing CRC bytes.
pub fn parse(buf: &[u8], eu: bool) -> Option<FrSkyXCandidate> {
    let len = packet_len(eu) as usize;
    if buf.len() <= len + 2 {
        return None;
    }
    if buf[0] as usize != len {
        return None;
    }
    if buf[len + 2] & 0x80 != 0x80 {
        return None;
    }

    let computed = crc16(&buf[3..len - 1]);
    let transmitted = (buf[len - 1] as u16) << 8 | buf[len] as u16;
    if computed != transmitted {
        return None;
    }

    Some(FrSkyXCandidate {
        id: [buf[1], buf[2]],
        eu,
    })
}
