//! FrSkyX/FrSkyXEU transmitter record: identity plus a dense hop-index to
//! RF-channel hopping table.

use crate::protocol::frskyx::CHAN_USED;
use crate::transmitter::header::{id_str, ChipId, TxHeader};
use crate::transmitter::ring::RingBuffer;

const RING_CAPACITY: usize = 20;
/// Sentinel meaning "no channel observed yet" for a hop-table slot.
const UNKNOWN_CHANNEL: i16 = -1;
/// LQI sentinel meaning "never updated"; lower LQI values are better.
const UNKNOWN_LQI: u8 = 128;

#[derive(Debug, Clone)]
pub struct FrSkyXTransmitter {
    pub header: TxHeader,
    pub id: [u8; 2],
    pub eu: bool,
    /// hop index -> (rf_channel, best_lqi); channel == -1 means unknown.
    pub channels: [(i16, u8); CHAN_USED],
    recv_data: RingBuffer<Vec<u8>>,
}

impl FrSkyXTransmitter {
    pub fn new(id: [u8; 2], eu: bool, data: Option<&[u8]>) -> Self {
        let prot_name = if eu { "FrSkyXEU" } else { "FrSkyX" };
        let mut tx = Self {
            header: TxHeader::new(prot_name, format!("UNK {}", id_str(&id)), ChipId::Cc2500),
            id,
            eu,
            channels: [(UNKNOWN_CHANNEL, UNKNOWN_LQI); CHAN_USED],
            recv_data: RingBuffer::new(RING_CAPACITY),
        };
        if let Some(data) = data {
            tx.parse_data(data);
        }
        tx.check_hackable();
        tx
    }

    pub fn is_same(&self, other: &FrSkyXTransmitter) -> bool {
        self.eu == other.eu && self.id == other.id
    }

    pub fn parse_data(&mut self, data: &[u8]) {
        self.recv_data.push(data.to_vec());
        self.header.recv_cnt += 1;

        let Some(&idx_byte) = data.get(4) else {
            return;
        };
        let idx = (idx_byte & 0x3F) as usize;
        if idx >= CHAN_USED {
            return;
        }
        let Some(&channel) = data.get(data.len().wrapping_sub(2)) else {
            return;
        };
        let Some(&lqi_byte) = data.get(data.len().wrapping_sub(3)) else {
            return;
        };
        let lqi = lqi_byte & 0x7F;
        if lqi < self.channels[idx].1 {
            self.channels[idx] = (channel as i16, lqi);
        }

        // Packet type byte 0 carries RC channel values; skip failsafe frames.
        if data.get(7) != Some(&0) {
            return;
        }
        for i in (0..12).step_by(3) {
            let Some(base) = data.get(i + 9..i + 12) else {
                continue;
            };
            let chan0 = base[0] as u16 | ((base[1] as u16 & 0x0F) << 8);
            let chan1 = (base[1] as u16 >> 4) | ((base[2] as u16) << 4);
            let idx = i / 3 * 2;

            if chan0 & 0x800 != 0 {
                self.header.channel_values[idx + 8] = (chan0 - 0x800) as f32 / 2047.0 * 100.0;
            } else {
                self.header.channel_values[idx] = chan0 as f32 / 2047.0 * 100.0;
            }
            if chan1 & 0x800 != 0 {
                self.header.channel_values[idx + 9] = (chan1 - 0x800) as f32 / 2047.0 * 100.0;
            } else {
                self.header.channel_values[idx + 1] = chan1 as f32 / 2047.0 * 100.0;
            }
        }
    }

    pub fn merge(&mut self, other: &FrSkyXTransmitter) {
        for data in other.recv_data.iter() {
            self.parse_data(data);
        }
        self.check_hackable();
    }

    pub fn check_hackable(&mut self) {
        let not_found = self.channels.iter().filter(|(c, _)| *c == UNKNOWN_CHANNEL).count();
        self.header.hackable = if not_found == 0 {
            100
        } else {
            (100.0 - 100.0 / CHAN_USED as f32 * not_found as f32) as u8
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frskyx_packet(idx: u8, channel: u8, lqi: u8) -> Vec<u8> {
        let mut buf = vec![0u8; 32];
        buf[4] = idx;
        buf[7] = 1; // not a data frame, skip RC parsing
        let len = buf.len();
        buf[len - 2] = channel;
        buf[len - 3] = lqi & 0x7F;
        buf
    }

    #[test]
    fn prot_name_reflects_the_eu_flag() {
        let eu = FrSkyXTransmitter::new([1, 2], true, None);
        let non_eu = FrSkyXTransmitter::new([1, 2], false, None);
        assert_eq!(eu.header.prot_name, "FrSkyXEU");
        assert_eq!(non_eu.header.prot_name, "FrSkyX");
    }

    #[test]
    fn lower_lqi_replaces_stored_entry() {
        let mut tx = FrSkyXTransmitter::new([0x01, 0x02], false, None);
        tx.parse_data(&frskyx_packet(7, 42, 50));
        assert_eq!(tx.channels[7], (42, 50));
        tx.parse_data(&frskyx_packet(7, 99, 60));
        assert_eq!(tx.channels[7], (42, 50), "higher lqi must not overwrite");
    }

    #[test]
    fn hackable_reaches_100_only_when_fully_characterized() {
        let mut tx = FrSkyXTransmitter::new([0x01, 0x02], false, None);
        assert_eq!(tx.header.hackable, 0);
        for i in 0..CHAN_USED as u8 {
            tx.parse_data(&frskyx_packet(i, i, 10));
        }
        assert_eq!(tx.header.hackable, 100);
    }

    /// Property 6 (spec §8): hackability is non-decreasing as table slots
    /// fill in, and bottoms out / tops out exactly at 0/47 and 47/47.
    #[test]
    fn hackable_is_monotonic_across_a_growing_set_of_known_slots() {
        let mut tx = FrSkyXTransmitter::new([0x01, 0x02], false, None);
        assert_eq!(tx.header.hackable, 0);

        let mut previous = tx.header.hackable;
        for i in 0..CHAN_USED as u8 {
            tx.parse_data(&frskyx_packet(i, i, 10));
            assert!(
                tx.header.hackable >= previous,
                "hackable regressed at slot {i}: {previous} -> {}",
                tx.header.hackable
            );
            previous = tx.header.hackable;
        }
        assert_eq!(tx.header.hackable, 100);
    }
}
