//! DSM2: CYRF6936 link protocol, older sibling of DSMX with a fixed 2-channel
//! hop set discovered empirically rather than derived from the id.

use crate::crc::cyrf6936::find_crc_seed;
use crate::protocol::descriptor::{Cyrf6936Channel, ProtocolDescriptor, ProtocolId, ScanPlan};
use crate::protocol::dsmx::DsmCandidate;

const CHAN_TIME_US: u64 = 19500 * 3 / 2;
const CHAN_MIN: u8 = 0;
const CHAN_MAX: u8 = 79;
const DATA_CODES: u8 = 8;

fn full_plan() -> ScanPlan<Cyrf6936Channel> {
    let width = CHAN_MAX - CHAN_MIN + 1;
    let mut channels = Vec::with_capacity(width as usize * DATA_CODES as usize);
    for channel in CHAN_MIN..=CHAN_MAX {
        let pn_row = channel % 5;
        for pn_column in 0..DATA_CODES {
            channels.push(Cyrf6936Channel {
                rf_channel: channel,
                pn_row,
                pn_column,
            });
        }
    }
    let scan_time_us = CHAN_TIME_US * width as u64 * DATA_CODES as u64;
    ScanPlan {
        channels,
        scan_time_us,
    }
}

/// Builds the DSM2 protocol descriptor. Unlike DSMX the same channel set is
/// searched at every non-disabled depth.
pub fn descriptor() -> ProtocolDescriptor<Cyrf6936Channel> {
    let minimum = full_plan();
    let average = full_plan();
    let maximum = full_plan();
    ProtocolDescriptor::new(
        ProtocolId::Dsm2,
        [
            ScanPlan {
                channels: Vec::new(),
                scan_time_us: 0,
            },
            minimum,
            average,
            maximum,
        ],
    )
}

/// Validates a raw CYRF6936 payload as a DSM2 packet. See [`dsmx::parse`] for
/// the shared validator shape; DSM2's `pn_row` test and recovered id use the
/// complement of the transmitted manufacturer bytes.
///
/// [`dsmx::parse`]: crate::protocol::dsmx::parse
pub fn parse(buf: &[u8]) -> Option<DsmCandidate> {
    if buf.len() < 24 {
        return None;
    }
    let channel = buf[19];
    let pn_row = buf[20] >> 4;
    if channel % 5 != pn_row {
        return None;
    }

    let crc = (buf[17] as u16) << 8 | buf[18] as u16;
    let payload = &buf[..buf.len() - 4];
    let seeds = find_crc_seed(payload, crc);
    if seeds.len() > 1 {
        tracing::debug!(channel, seeds = seeds.len(), "dsm2: ambiguous crc seed recovery");
        return None;
    }
    if seeds.is_empty() {
        return None;
    }
    let seed = *seeds.iter().next().unwrap();
    Some(DsmCandidate {
        id: [
            (seed & 0xFF) as u8,
            (seed >> 8) as u8,
            !buf[1],
            !buf[2],
        ],
        dsmx: false,
    })
}
