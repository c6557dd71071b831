use serde::Deserialize;
use std::path::PathBuf;

/// Where the transmitter registry is read from and written to (spec §6).
/// An **(expansion)** over the original's hardcoded `transmitters.json`: the
/// path is now configurable, justified by the config layer's existence.
#[derive(Debug, Deserialize, Clone)]
pub struct PersistenceConfig {
    #[serde(default = "default_path")]
    pub path: PathBuf,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("transmitters.json")
}
