use serde::Deserialize;

/// USB identification used to locate probes among enumerated serial ports
/// (spec §6): vendor/product id plus the interface description string.
#[derive(Debug, Deserialize, Clone)]
pub struct UsbConfig {
    #[serde(default = "default_vendor_id")]
    pub vendor_id: u16,
    #[serde(default = "default_product_id")]
    pub product_id: u16,
    #[serde(default = "default_interface_description")]
    pub interface_description: String,
    /// Discovery poll interval, matching the spec §5 "1s poll" figure.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Ground-station version, sent as `version * 1000` in `REQ_INFO`
    /// (spec §6), replacing the original's process-wide global constant
    /// (spec §9 redesign flag).
    #[serde(default = "default_version")]
    pub version: u32,
}

impl Default for UsbConfig {
    fn default() -> Self {
        Self {
            vendor_id: default_vendor_id(),
            product_id: default_product_id(),
            interface_description: default_interface_description(),
            poll_interval_ms: default_poll_interval_ms(),
            version: default_version(),
        }
    }
}

fn default_vendor_id() -> u16 {
    0x0484
}

fn default_product_id() -> u16 {
    0x5741
}

fn default_interface_description() -> String {
    "SuperbitRF data port".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_version() -> u32 {
    1
}
