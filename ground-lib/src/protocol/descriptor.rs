use serde::{Deserialize, Serialize};

/// One of the four link protocols this core fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolId {
    Dsmx,
    Dsm2,
    FrSkyX,
    FrSkyXEu,
}

/// Operator-selected scan thoroughness. Ordered: deeper depths search a
/// larger channel set at a proportionally higher scan-time cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScanDepth {
    Disabled,
    Minimum,
    Average,
    Maximum,
}

impl ScanDepth {
    pub const ALL: [ScanDepth; 4] = [
        ScanDepth::Disabled,
        ScanDepth::Minimum,
        ScanDepth::Average,
        ScanDepth::Maximum,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl Default for ScanDepth {
    fn default() -> Self {
        ScanDepth::Average
    }
}

/// CYRF6936 channel descriptor: a physical RF channel plus the spreading
/// code it is searched under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cyrf6936Channel {
    pub rf_channel: u8,
    pub pn_row: u8,
    pub pn_column: u8,
}

/// CC2500 channel descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cc2500Channel {
    pub rf_channel: u8,
    pub fsctrl0: u8,
}

/// The channel set and scan-time estimate for one scan depth.
#[derive(Debug, Clone)]
pub struct ScanPlan<C> {
    pub channels: Vec<C>,
    pub scan_time_us: u64,
}

/// A protocol's precomputed scan plans, one per [`ScanDepth`].
#[derive(Debug, Clone)]
pub struct ProtocolDescriptor<C> {
    pub id: ProtocolId,
    depth: ScanDepth,
    plans: [ScanPlan<C>; 4],
}

impl<C> ProtocolDescriptor<C> {
    pub fn new(id: ProtocolId, plans: [ScanPlan<C>; 4]) -> Self {
        Self {
            id,
            depth: ScanDepth::default(),
            plans,
        }
    }

    pub fn depth(&self) -> ScanDepth {
        self.depth
    }

    pub fn set_depth(&mut self, depth: ScanDepth) {
        self.depth = depth;
    }

    pub fn channels(&self) -> &[C] {
        &self.plans[self.depth.index()].channels
    }

    pub fn scan_time_us(&self) -> u64 {
        self.plans[self.depth.index()].scan_time_us
    }
}
