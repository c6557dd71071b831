//! One session per connected probe: runs the handshake, dispatches chunked
//! `PROT_EXEC` commands, and routes inbound packet notifications.

use crate::error::Result;
use crate::probe::message::{chunk_prot_exec, FirmwareProtocol, ProtExecKind, RecvData, ReqInfo};
use crate::probe::transport::ProbeTransport;
use crate::probe::{Probe, ProbeActivity};
use crate::transmitter::ChipId;

/// Inter-chunk pacing for multi-chunk `PROT_EXEC` payloads (spec §6).
pub const CHUNK_PACING_MS: u64 = 30;

pub struct ProbeSession<T: ProbeTransport> {
    transport: T,
    pub probe: Probe,
}

impl<T: ProbeTransport> ProbeSession<T> {
    /// Opens the transport and runs the `REQ_INFO`/`INFO` handshake. A
    /// probe that never responds is the caller's responsibility to drop.
    pub fn open(mut transport: T, version: u32) -> Result<Self> {
        let port = transport.port().to_string();
        let mut probe = Probe::discovered(port);
        let info = transport.handshake(ReqInfo { version })?;
        probe.mark_ready(info.id, info.board, info.version);
        Ok(Self { transport, probe })
    }

    fn dispatch(&mut self, id: FirmwareProtocol, kind: ProtExecKind, data: &[u8]) -> Result<()> {
        for exec in chunk_prot_exec(id, kind, data) {
            self.transport.send_prot_exec(&exec)?;
        }
        Ok(())
    }

    pub fn start_scan(&mut self, chip: ChipId, payload: &[u8]) -> Result<()> {
        let id = match chip {
            ChipId::Cyrf6936 => FirmwareProtocol::Scanner,
            ChipId::Cc2500 => FirmwareProtocol::Cc2500Scanner,
        };
        self.dispatch(id, ProtExecKind::Start, payload)?;
        self.probe.activity = ProbeActivity::Scanning(chip);
        Ok(())
    }

    pub fn start_hack(&mut self, chip: ChipId, payload: &[u8]) -> Result<()> {
        let id = match chip {
            ChipId::Cyrf6936 => FirmwareProtocol::DsmHack,
            ChipId::Cc2500 => FirmwareProtocol::FrSkyHack,
        };
        self.dispatch(id, ProtExecKind::Start, payload)?;
        self.probe.activity = ProbeActivity::Hacking(chip);
        Ok(())
    }

    /// Stops whichever protocol is currently running. Per spec §9 this
    /// always sends exactly one (possibly zero-length) chunk.
    pub fn stop(&mut self) -> Result<()> {
        let id = match self.probe.activity {
            ProbeActivity::Scanning(ChipId::Cc2500) => FirmwareProtocol::Cc2500Scanner,
            ProbeActivity::Hacking(ChipId::Cc2500) => FirmwareProtocol::FrSkyHack,
            ProbeActivity::Hacking(ChipId::Cyrf6936) => FirmwareProtocol::DsmHack,
            _ => FirmwareProtocol::Scanner,
        };
        self.dispatch(id, ProtExecKind::Stop, &[])?;
        self.probe.activity = ProbeActivity::Idle;
        Ok(())
    }

    /// Drains inbound `RECV_DATA` notifications for the control loop to
    /// route into the matching chip abstraction.
    pub fn poll(&mut self) -> Result<Vec<RecvData>> {
        self.transport.try_recv()
    }
}
