//! RF-chip abstractions: each chip type bundles the protocols it supports,
//! aggregates their scan plans, and emits chip-specific probe command
//! payloads (spec component 4.6).

pub mod cc2500;
pub mod cyrf6936;

pub use cc2500::Cc2500;
pub use cyrf6936::Cyrf6936;

use crate::transmitter::{ChipId, Transmitter};

/// Common surface every RF chip exposes to the scheduler and probe session
/// layer. Each implementation fully encapsulates its own channel-descriptor
/// type; callers never see it directly, only indices into the chip's own
/// sorted channel ordering.
pub trait RfChip: Send + Sync {
    fn chip_id(&self) -> ChipId;

    /// Sum of the current-depth scan time across this chip's protocols.
    fn calc_scan_time_us(&self) -> u64;

    /// Size of the union of current-depth channel sets across protocols.
    fn channel_count(&self) -> usize;

    /// Encodes the contiguous channel slice `[start, end)` (indices into
    /// this chip's own sorted channel ordering) as a scan payload.
    fn encode_scan_slice(&self, start: usize, end: usize) -> Vec<u8>;

    /// Encodes a hack-start payload for `tx`, or `None` if this chip has no
    /// defined hacking payload for that transmitter variant.
    fn encode_hack_payload(&self, tx: &Transmitter) -> Option<Vec<u8>>;

    /// Tries each supported protocol's validator in order, returning the
    /// first candidate transmitter.
    fn parse_recv_msg(&self, data: &[u8]) -> Option<Transmitter>;
}
