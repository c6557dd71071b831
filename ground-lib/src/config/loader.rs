use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::error::{GroundError, Result};

/// Loads and validates a config TOML file. A missing file is an error (the
/// caller decides whether to fall back to `Config::default()`); a present
/// but malformed file is always an error.
pub fn load_from_path<P: AsRef<Path>>(p: P) -> Result<Config> {
    let txt = fs::read_to_string(p)
        .map_err(|e| GroundError::Config(format!("failed to read config file: {e}")))?;
    let cfg: Config = toml::from_str(&txt)
        .map_err(|e| GroundError::Config(format!("failed to parse config: {e}")))?;

    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> Result<()> {
    if cfg.usb.vendor_id == 0 && cfg.usb.product_id == 0 {
        return Err(GroundError::Config(
            "usb.vendor_id and usb.product_id cannot both be zero".into(),
        ));
    }
    if cfg.usb.interface_description.trim().is_empty() {
        return Err(GroundError::Config(
            "usb.interface_description cannot be empty".into(),
        ));
    }
    if cfg.usb.poll_interval_ms == 0 {
        return Err(GroundError::Config("usb.poll_interval_ms must be > 0".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ground-station.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[usb]\nvendor_id = 1160").unwrap();

        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.usb.vendor_id, 1160);
        assert_eq!(cfg.usb.product_id, 0x5741);
        assert_eq!(cfg.persistence.path.to_str().unwrap(), "transmitters.json");
    }

    #[test]
    fn rejects_empty_interface_description() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ground-station.toml");
        let mut file = fs::File::create(&path).unwrap();
        writeln!(file, "[usb]\ninterface_description = \"\"").unwrap();

        assert!(load_from_path(&path).is_err());
    }
}
