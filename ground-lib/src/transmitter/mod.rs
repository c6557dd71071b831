//! Transmitter records and the registry that deduplicates, merges, and
//! persists them.
//!
//! Replaces the original's dynamic dispatch on a Python base class with a
//! tagged sum: merge/parse/is_same dispatch on the variant tag instead of
//! virtual calls (spec redesign flag, §9).

pub mod dsm;
pub mod frskyx;
pub mod header;
pub mod persistence;
pub mod registry;
mod ring;

pub use dsm::DsmTransmitter;
pub use frskyx::FrSkyXTransmitter;
pub use header::{ChipId, TxHeader};
pub use registry::TransmitterRegistry;

/// A fingerprinted transmitter, DSM-family or FrSkyX-family.
#[derive(Debug, Clone)]
pub enum Transmitter {
    Dsm(DsmTransmitter),
    FrSkyX(FrSkyXTransmitter),
}

impl Transmitter {
    pub fn header(&self) -> &TxHeader {
        match self {
            Transmitter::Dsm(tx) => &tx.header,
            Transmitter::FrSkyX(tx) => &tx.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut TxHeader {
        match self {
            Transmitter::Dsm(tx) => &mut tx.header,
            Transmitter::FrSkyX(tx) => &mut tx.header,
        }
    }

    pub fn recv_cnt(&self) -> u64 {
        self.header().recv_cnt
    }

    pub fn do_hack(&self) -> bool {
        self.header().do_hack
    }

    pub fn chip(&self) -> ChipId {
        self.header().chip
    }

    /// True when `other` refers to the same physical transmitter, including
    /// inverse-id aliasing for DSM and exact id/eu matching for FrSkyX.
    pub fn is_same(&self, other: &Transmitter) -> bool {
        match (self, other) {
            (Transmitter::Dsm(a), Transmitter::Dsm(b)) => a.is_same(b),
            (Transmitter::FrSkyX(a), Transmitter::FrSkyX(b)) => a.is_same(b),
            _ => false,
        }
    }

    /// Replays `other`'s buffered packets through this entry's protocol-
    /// specific parser and re-evaluates hackability.
    pub fn merge(&mut self, other: &Transmitter) {
        match (self, other) {
            (Transmitter::Dsm(a), Transmitter::Dsm(b)) => a.merge(b),
            (Transmitter::FrSkyX(a), Transmitter::FrSkyX(b)) => a.merge(b),
            _ => {}
        }
    }
}
