use serde::{Deserialize, Serialize};

/// Which RF chip a transmitter was last heard on, resolved explicitly
/// instead of the duck-typed `rfchip` attribute the original host carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChipId {
    Cyrf6936,
    Cc2500,
}

/// Fields shared by every transmitter variant.
#[derive(Debug, Clone)]
pub struct TxHeader {
    /// Static protocol label ("DSMX"/"DSM2"/"FrSkyX"/"FrSkyXEU"), distinct
    /// from the user-editable `name` below.
    pub prot_name: &'static str,
    pub name: String,
    pub hackable: u8,
    pub do_hack: bool,
    pub recv_cnt: u64,
    pub channel_values: [f32; 20],
    pub chip: ChipId,
}

impl TxHeader {
    pub fn new(prot_name: &'static str, name: String, chip: ChipId) -> Self {
        Self {
            prot_name,
            name,
            hackable: 0,
            do_hack: false,
            recv_cnt: 0,
            channel_values: [0.0; 20],
            chip,
        }
    }
}

pub fn id_str(id: &[u8]) -> String {
    id.iter().map(|b| format!("{b:02X}")).collect()
}
