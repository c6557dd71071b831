//! The shared probe table (spec §5: "the probe roster ... guarded by a
//! single mutex"), keyed by port string the way the teacher's
//! `RateLimitManager` keys its limiter map.

use ahash::AHashMap;

use crate::probe::Probe;

#[derive(Default)]
pub struct ProbeRoster {
    probes: AHashMap<String, Probe>,
}

impl ProbeRoster {
    pub fn new() -> Self {
        Self {
            probes: AHashMap::new(),
        }
    }

    pub fn insert(&mut self, probe: Probe) {
        self.probes.insert(probe.port.clone(), probe);
    }

    pub fn remove(&mut self, port: &str) -> Option<Probe> {
        self.probes.remove(port)
    }

    pub fn get(&self, port: &str) -> Option<&Probe> {
        self.probes.get(port)
    }

    pub fn get_mut(&mut self, port: &str) -> Option<&mut Probe> {
        self.probes.get_mut(port)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Probe> {
        self.probes.values()
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove_round_trip() {
        let mut roster = ProbeRoster::new();
        roster.insert(Probe::discovered("/dev/ttyUSB0".into()));
        assert_eq!(roster.len(), 1);
        assert!(roster.remove("/dev/ttyUSB0").is_some());
        assert!(roster.is_empty());
    }
}
