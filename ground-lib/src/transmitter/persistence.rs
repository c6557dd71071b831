//! Registry persistence: a JSON array of `{cls, data}` entries (spec §6).

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GroundError, Result};
use crate::transmitter::{DsmTransmitter, FrSkyXTransmitter, Transmitter, TransmitterRegistry};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DsmData {
    name: String,
    id: [u8; 4],
    dsmx: bool,
    resolution: Option<u8>,
    channels: Vec<u8>,
    do_hack: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FrSkyXData {
    name: String,
    id: [u8; 2],
    eu: bool,
    /// Keyed by string index so loaders tolerant of either string or int
    /// keys round-trip cleanly; lqi is reset to "unknown" on load.
    channels: BTreeMap<String, (i16, u8)>,
    do_hack: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct JsonEntry {
    cls: String,
    data: serde_json::Value,
}

fn to_entry(tx: &Transmitter) -> Result<JsonEntry> {
    let (cls, data) = match tx {
        Transmitter::Dsm(tx) => {
            let data = DsmData {
                name: tx.header.name.clone(),
                id: tx.id,
                dsmx: tx.dsmx,
                resolution: tx.resolution,
                channels: if tx.dsmx {
                    tx.channels.iter().copied().collect()
                } else {
                    Vec::new()
                },
                do_hack: tx.header.do_hack,
            };
            ("DSMTransmitter", serde_json::to_value(data))
        }
        Transmitter::FrSkyX(tx) => {
            let channels = tx
                .channels
                .iter()
                .enumerate()
                .map(|(idx, &(channel, lqi))| (idx.to_string(), (channel, lqi)))
                .collect();
            let data = FrSkyXData {
                name: tx.header.name.clone(),
                id: tx.id,
                eu: tx.eu,
                channels,
                do_hack: tx.header.do_hack,
            };
            ("FrSkyXTransmitter", serde_json::to_value(data))
        }
    };
    let data = data.map_err(|e| GroundError::Persistence(e.to_string()))?;
    Ok(JsonEntry {
        cls: cls.to_string(),
        data,
    })
}

fn from_entry(entry: JsonEntry) -> Result<Option<Transmitter>> {
    match entry.cls.as_str() {
        "DSMTransmitter" => {
            let d: DsmData = serde_json::from_value(entry.data)
                .map_err(|e| GroundError::Persistence(e.to_string()))?;
            let mut tx = DsmTransmitter::new(d.id, d.dsmx, None);
            tx.header.name = d.name;
            tx.resolution = d.resolution;
            tx.header.do_hack = d.do_hack;
            if tx.dsmx {
                tx.channels = d.channels.into_iter().collect();
            }
            tx.check_hackable();
            Ok(Some(Transmitter::Dsm(tx)))
        }
        "FrSkyXTransmitter" => {
            let d: FrSkyXData = serde_json::from_value(entry.data)
                .map_err(|e| GroundError::Persistence(e.to_string()))?;
            let mut tx = FrSkyXTransmitter::new(d.id, d.eu, None);
            tx.header.name = d.name;
            tx.header.do_hack = d.do_hack;
            for (idx, (channel, _lqi)) in d.channels {
                if let Ok(idx) = idx.parse::<usize>() {
                    if idx < tx.channels.len() {
                        tx.channels[idx] = (channel, 128);
                    }
                }
            }
            tx.check_hackable();
            Ok(Some(Transmitter::FrSkyX(tx)))
        }
        other => {
            tracing::warn!(cls = other, "unknown transmitter class in persisted registry");
            Ok(None)
        }
    }
}

pub fn save(registry: &TransmitterRegistry, path: impl AsRef<Path>) -> Result<()> {
    let entries = registry
        .iter()
        .map(to_entry)
        .collect::<Result<Vec<_>>>()?;
    let json =
        serde_json::to_string(&entries).map_err(|e| GroundError::Persistence(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load(registry: &mut TransmitterRegistry, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(());
    }
    let text = fs::read_to_string(path)?;
    let entries: Vec<JsonEntry> =
        serde_json::from_str(&text).map_err(|e| GroundError::Persistence(e.to_string()))?;
    for entry in entries {
        if let Some(tx) = from_entry(entry)? {
            registry.replace_or_insert(tx);
        }
    }
    Ok(())
}
