#![forbid(unsafe_code)]

//! Host-side core of a ground station that passively fingerprints
//! DSM2/DSMX/FrSkyX/FrSkyXEU transmitters from demodulated packet buffers,
//! schedules scanning across attached USB probes, and drives attack
//! handoff. USB framing, the wire envelope codec, and any GUI are external
//! collaborators, represented here only by narrow trait boundaries and
//! typed command/notification payloads.

pub mod chip;
pub mod config;
pub mod crc;
pub mod error;
pub mod probe;
pub mod protocol;
pub mod schedule;
pub mod station;
pub mod telemetry;
pub mod transmitter;

pub use chip::{Cc2500, Cyrf6936, RfChip};
pub use config::{load_from_path, Config};
pub use error::{GroundError, Result};
pub use probe::{DiscoveryEvent, Probe, ProbeRoster, ProbeSession, ProbeSource, ProbeTransport};
pub use protocol::{ProtocolId, ScanDepth};
pub use schedule::{dispatch_hacking, schedule, Assignment, HackAssignment};
pub use station::Station;
pub use transmitter::{ChipId, DsmTransmitter, FrSkyXTransmitter, Transmitter, TransmitterRegistry};
