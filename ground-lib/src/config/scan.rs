use serde::Deserialize;

use crate::protocol::ScanDepth;

/// Default scan depth per protocol, loaded at startup and handed to each
/// [`crate::protocol::ProtocolDescriptor`] before the first scan.
#[derive(Debug, Deserialize, Clone)]
pub struct ScanConfig {
    #[serde(default = "default_depth")]
    pub dsmx: ScanDepth,
    #[serde(default = "default_depth")]
    pub dsm2: ScanDepth,
    #[serde(default = "default_depth")]
    pub frskyx: ScanDepth,
    #[serde(default = "default_depth")]
    pub frskyx_eu: ScanDepth,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            dsmx: default_depth(),
            dsm2: default_depth(),
            frskyx: default_depth(),
            frskyx_eu: default_depth(),
        }
    }
}

fn default_depth() -> ScanDepth {
    ScanDepth::Average
}
