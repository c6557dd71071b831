//! DSM2/DSMX transmitter record: identity, observed channel set, and the
//! hackability decision described in spec component 4.5.

use std::collections::BTreeSet;

use crate::protocol::dsmx::calc_channels;
use crate::transmitter::header::{id_str, ChipId, TxHeader};
use crate::transmitter::ring::RingBuffer;

const RING_CAPACITY: usize = 20;

#[derive(Debug, Clone)]
pub struct DsmTransmitter {
    pub header: TxHeader,
    pub id: [u8; 4],
    pub dsmx: bool,
    pub resolution: Option<u8>,
    pub bm_10bit: u16,
    pub bm_11bit: u16,
    pub channels: BTreeSet<u8>,
    recv_data: RingBuffer<Vec<u8>>,
}

impl DsmTransmitter {
    pub fn new(id: [u8; 4], dsmx: bool, data: Option<&[u8]>) -> Self {
        let prot_name = if dsmx { "DSMX" } else { "DSM2" };
        let mut tx = Self {
            header: TxHeader::new(prot_name, format!("UNK {}", id_str(&id)), ChipId::Cyrf6936),
            id,
            dsmx,
            resolution: None,
            bm_10bit: 0,
            bm_11bit: 0,
            channels: BTreeSet::new(),
            recv_data: RingBuffer::new(RING_CAPACITY),
        };
        if let Some(data) = data {
            tx.parse_data(data);
        }
        tx.check_hackable();
        tx
    }

    /// Returns the id with bytes 0 and 1 bit-complemented; firmware may
    /// advertise either form for the same physical transmitter.
    pub fn inverse_id(&self) -> [u8; 4] {
        [!self.id[0], !self.id[1], self.id[2], self.id[3]]
    }

    pub fn is_same(&self, other: &DsmTransmitter) -> bool {
        other.dsmx == self.dsmx && (other.id == self.id || other.id == self.inverse_id())
    }

    /// Decodes a hypothetical channel/value pair from a 2-byte slot at the
    /// given bit resolution. `0xFFFF` marks an unused slot.
    fn decode_channel(data: &[u8], resolution: u8) -> Option<(u8, u16)> {
        let raw = (data[0] as u16) << 8 | data[1] as u16;
        if raw == 0xFFFF {
            return None;
        }
        let channel = ((raw >> resolution) & 0xF) as u8;
        let mask = (1u16 << resolution) - 1;
        Some((channel, raw & mask))
    }

    /// Returns the forced resolution if set, else 11. The 10-bit branch
    /// observed in the source always resolves to 11 as well; preserved
    /// verbatim, the bitmaps are still maintained for future use.
    pub fn get_resolution(&self) -> u8 {
        self.resolution.unwrap_or(11)
    }

    fn update_channels(&mut self, data: &[u8]) {
        let resolution = self.get_resolution();
        for i in 0..7 {
            let Some(slot) = data.get(3 + i * 2..5 + i * 2) else {
                continue;
            };
            if let Some((channel, value)) = Self::decode_channel(slot, resolution) {
                self.header.channel_values[channel as usize] =
                    value as f32 / (1u32 << resolution) as f32 * 100.0;
            }
        }
    }

    pub fn parse_data(&mut self, data: &[u8]) {
        self.recv_data.push(data.to_vec());
        self.header.recv_cnt += 1;
        if let Some(&channel) = data.get(19) {
            self.channels.insert(channel);
        }

        for i in 0..7 {
            let Some(slot) = data.get(3 + i * 2..5 + i * 2) else {
                continue;
            };
            if let Some((channel, _)) = Self::decode_channel(slot, 10) {
                self.bm_10bit |= 1 << channel;
            }
            if let Some((channel, _)) = Self::decode_channel(slot, 11) {
                self.bm_11bit |= 1 << channel;
            }
        }

        self.update_channels(data);
    }

    /// Replays the other transmitter's buffered packets and re-evaluates
    /// hackability. Used when the registry merges a new observation into an
    /// existing entry.
    pub fn merge(&mut self, other: &DsmTransmitter) {
        for data in other.recv_data.iter() {
            self.parse_data(data);
        }
        self.check_hackable();
    }

    pub fn check_hackable(&mut self) {
        let sop_col_n = (self.id[0] as i32 + self.id[1] as i32 + self.id[2] as i32 + 2) & 7;
        let sop_col_i =
            ((!self.id[0]) as i32 + (!self.id[1]) as i32 + self.id[2] as i32 + 2) & 7;
        let last_sop_col = self.recv_data.last().map(|d| (d[20] & 0xF) as i32);
        let matches_n = last_sop_col == Some(sop_col_n);
        let matches_i = last_sop_col == Some(sop_col_i);

        if !self.dsmx {
            if self.channels.len() == 2 {
                if matches_i && !matches_n {
                    self.id = self.inverse_id();
                    self.header.hackable = 100;
                } else if matches_n && !matches_i {
                    self.header.hackable = 100;
                } else {
                    self.header.hackable = (20 * self.channels.len()).min(100) as u8;
                }
            } else {
                self.header.hackable = (20 * self.channels.len()).min(100) as u8;
            }
            return;
        }

        let calc_n: BTreeSet<u8> = calc_channels(self.id).into_iter().collect();
        let calc_i: BTreeSet<u8> = calc_channels(self.inverse_id()).into_iter().collect();
        let diff_n = self.channels.difference(&calc_n).count();
        let diff_i = self.channels.difference(&calc_i).count();

        if (matches_i && !matches_n) || (diff_n > 0 && diff_i == 0) {
            self.id = self.inverse_id();
            self.header.hackable = 100;
        } else if (matches_n && !matches_i) || (diff_n == 0 && diff_i > 0) {
            self.header.hackable = 100;
        } else {
            self.header.hackable = self.channels.len().min(100) as u8;
        }
    }
}
