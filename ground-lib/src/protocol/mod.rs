//! Per-link-protocol packet validators, scan plans, and (for DSMX) the
//! deterministic channel-set derivation from a transmitter id.

pub mod descriptor;
pub mod dsm2;
pub mod dsmx;
pub mod frskyx;

pub use descriptor::{Cc2500Channel, Cyrf6936Channel, ProtocolDescriptor, ProtocolId, ScanDepth};
pub use dsmx::DsmCandidate;
pub use frskyx::FrSkyXCandidate;
