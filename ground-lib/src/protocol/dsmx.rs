//! DSMX: CYRF6936 link protocol with a 23-channel derived hop set.

use crate::crc::cyrf6936::find_crc_seed;
use crate::protocol::descriptor::{Cyrf6936Channel, ProtocolDescriptor, ProtocolId, ScanPlan};

const CHAN_TIME_US: u64 = 8500 * 23;
const CHAN_MIN: u8 = 3;
const CHAN_USED: usize = 23;
const DATA_CODES: u8 = 8;

const CHAN_SEARCH_MIN: u8 = 24 - 8 + 1;
const CHAN_SEARCH_AVG: u8 = 24;
const CHAN_SEARCH_MAX: u8 = 76 - 3;

/// A candidate identity recovered from a validated DSMX packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DsmCandidate {
    pub id: [u8; 4],
    pub dsmx: bool,
}

/// Derives the deterministic 23-channel hop set for transmitter id `id`.
///
/// `id` is fed through a 32-bit LCG seeded with its bit-complement; each
/// iteration yields a candidate channel which is accepted into one of three
/// buckets ([3,28) x8, [28,52) x7, [52,77) x8) subject to a parity check
/// against the original seed.
pub fn calc_channels(id: [u8; 4]) -> Vec<u8> {
    let packed = u32::from_be_bytes(id);
    let seed = !packed;
    let mut rnd = seed;
    let mut channels = Vec::with_capacity(CHAN_USED);
    let mut cnt_low = 0u8;
    let mut cnt_mid = 0u8;
    let mut cnt_high = 0u8;

    while channels.len() < CHAN_USED {
        rnd = rnd.wrapping_mul(0x0019_660D).wrapping_add(0x3C6E_F35F);
        let next_ch = (((rnd >> 8) % 0x49) + 3) as u8;

        if (next_ch as u32 ^ seed) & 1 == 0 || channels.contains(&next_ch) {
            continue;
        }

        match next_ch {
            3..=27 if cnt_low < 8 => {
                cnt_low += 1;
                channels.push(next_ch);
            }
            28..=51 if cnt_mid < 7 => {
                cnt_mid += 1;
                channels.push(next_ch);
            }
            52..=76 if cnt_high < 8 => {
                cnt_high += 1;
                channels.push(next_ch);
            }
            _ => continue,
        }
    }
    channels
}

fn plan(search_width: u8) -> ScanPlan<Cyrf6936Channel> {
    let mut channels = Vec::with_capacity(search_width as usize * DATA_CODES as usize);
    for channel in CHAN_MIN..CHAN_MIN + search_width {
        let pn_row = (channel.wrapping_sub(2)) % 5;
        for pn_column in 0..DATA_CODES {
            channels.push(Cyrf6936Channel {
                rf_channel: channel,
                pn_row,
                pn_column,
            });
        }
    }
    let scan_time_us = CHAN_TIME_US * search_width as u64 * DATA_CODES as u64;
    ScanPlan {
        channels,
        scan_time_us,
    }
}

/// Builds the DSMX protocol descriptor with its three non-empty scan plans.
pub fn descriptor() -> ProtocolDescriptor<Cyrf6936Channel> {
    ProtocolDescriptor::new(
        ProtocolId::Dsmx,
        [
            ScanPlan {
                channels: Vec::new(),
                scan_time_us: 0,
            },
            plan(CHAN_SEARCH_MIN),
            plan(CHAN_SEARCH_AVG),
            plan(CHAN_SEARCH_MAX),
        ],
    )
}

/// Validates a raw CYRF6936 payload as a DSMX packet.
///
/// `buf` is the full received buffer including the 4 trailing RSSI/LQI/status
/// bytes. Returns `None` on a wrong `pn_row`, a failed CRC, or an ambiguous
/// (multi-seed) CRC recovery; the ambiguous case is logged, unlike the other
/// rejections (spec §7: "Ambiguous CRC is logged for diagnostics").
pub fn parse(buf: &[u8]) -> Option<DsmCandidate> {
    if buf.len() < 24 {
        return None;
    }
    let channel = buf[19];
    let pn_row = buf[20] >> 4;
    if channel.wrapping_sub(2) % 5 != pn_row {
        return None;
    }

    let crc = (buf[17] as u16) << 8 | buf[18] as u16;
    let payload = &buf[..buf.len() - 4];
    let seeds = find_crc_seed(payload, crc);
    if seeds.len() > 1 {
        tracing::debug!(channel, seeds = seeds.len(), "dsmx: ambiguous crc seed recovery");
        return None;
    }
    if seeds.is_empty() {
        return None;
    }
    let seed = *seeds.iter().next().unwrap();
    Some(DsmCandidate {
        id: [(seed & 0xFF) as u8, (seed >> 8) as u8, buf[1], buf[2]],
        dsmx: true,
    })
}
