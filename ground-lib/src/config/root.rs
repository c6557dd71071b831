use serde::Deserialize;

use super::logging::LoggingConfig;
use super::persistence::PersistenceConfig;
use super::scan::ScanConfig;
use super::usb::UsbConfig;

/// Top-level ground-station configuration, loaded from a TOML file at
/// startup (spec expansion: config layer). Every field has a built-in
/// default so an absent config file (or an absent section within one)
/// still produces a usable configuration.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    /// Default scan depth per protocol.
    #[serde(default)]
    pub scan: ScanConfig,
    /// USB vendor/product/interface filter used to locate probes.
    #[serde(default)]
    pub usb: UsbConfig,
    /// Registry persistence path.
    #[serde(default)]
    pub persistence: PersistenceConfig,
    /// Structured logging options.
    #[serde(default)]
    pub logging: LoggingConfig,
}
