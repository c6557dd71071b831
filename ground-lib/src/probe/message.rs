//! Logical payloads for the four host/probe messages (spec §6). The wire
//! envelope/serial framing that carries these is out of scope; these types
//! describe only the information each message carries.

/// Host -> probe, issued immediately on open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReqInfo {
    /// Ground-station version times 1000.
    pub version: u32,
}

/// Probe -> host, response to `ReqInfo`. A probe that never sends this is
/// ineligible for use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Info {
    pub id: [u16; 4],
    pub board: u8,
    pub version: u32,
}

/// Firmware-side protocol identifiers used in `PROT_EXEC.id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareProtocol {
    Scanner = 0,
    DsmHack = 1,
    Cc2500Scanner = 2,
    FrSkyHack = 3,
    FrSkyReceiver = 4,
    FrSkyTransmitter = 5,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProtExecKind {
    Stop = 0,
    Start = 1,
}

/// Host -> probe. Payloads larger than 200 bytes are chunked by the caller,
/// with the host responsible for inter-chunk pacing of ~30ms (spec §6/§9);
/// a zero-length `arg_data` (a stop command) still sends exactly one chunk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtExec {
    pub id: FirmwareProtocol,
    pub kind: ProtExecKind,
    pub arg_offset: u16,
    pub arg_size: u16,
    pub arg_data: Vec<u8>,
}

/// The RF chip a `RECV_DATA` notification originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecvChip {
    Cyrf6936 = 0,
    Cc2500 = 1,
}

/// Probe -> host: a raw packet for `chip`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecvData {
    pub chip: RecvChip,
    pub data: Vec<u8>,
}

impl From<RecvChip> for crate::transmitter::ChipId {
    fn from(chip: RecvChip) -> Self {
        match chip {
            RecvChip::Cyrf6936 => crate::transmitter::ChipId::Cyrf6936,
            RecvChip::Cc2500 => crate::transmitter::ChipId::Cc2500,
        }
    }
}

/// Splits `data` into ~200-byte chunks carrying `arg_offset`/`arg_size`,
/// preserving the spec's "always at least one chunk" rule for empty data.
pub fn chunk_prot_exec(
    id: FirmwareProtocol,
    kind: ProtExecKind,
    data: &[u8],
) -> Vec<ProtExec> {
    const CHUNK_SIZE: usize = 200;
    let mut chunks = Vec::new();
    let mut offset = 0usize;
    loop {
        let end = (offset + CHUNK_SIZE).min(data.len());
        chunks.push(ProtExec {
            id,
            kind,
            arg_offset: offset as u16,
            arg_size: data.len() as u16,
            arg_data: data[offset..end].to_vec(),
        });
        if end >= data.len() {
            break;
        }
        offset = end;
    }
    chunks
}
