//! The seam standing in for the external USB/serial transport (spec §1's
//! "external collaborators with named interfaces only"). Production wiring
//! provides a real implementation; tests use an in-memory fake.

use crate::error::Result;
use crate::probe::message::{Info, ProtExec, RecvData, ReqInfo};

/// One connected probe's framed message channel.
pub trait ProbeTransport: Send {
    /// The transport's identifying port string (e.g. a serial device path).
    fn port(&self) -> &str;

    /// Sends `REQ_INFO` and blocks for the `INFO` handshake response.
    fn handshake(&mut self, req: ReqInfo) -> Result<Info>;

    /// Sends one `PROT_EXEC` chunk.
    fn send_prot_exec(&mut self, exec: &ProtExec) -> Result<()>;

    /// Drains any `RECV_DATA` notifications received since the last poll,
    /// without blocking.
    fn try_recv(&mut self) -> Result<Vec<RecvData>>;
}
