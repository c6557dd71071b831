//! The transmitter registry: an ordered, deduplicated sequence of
//! [`Transmitter`] entries with change notification.
//!
//! Replaces the original's `on_change` callback with a `watch` channel
//! edge-triggered "registry dirty" signal (spec redesign flag, §9); a
//! subscriber (the external UI) only ever sees the latest tick, coalescing
//! is its own responsibility.

use tokio::sync::watch;

use crate::transmitter::Transmitter;

pub struct TransmitterRegistry {
    transmitters: Vec<Transmitter>,
    dirty_tx: watch::Sender<u64>,
    generation: u64,
}

impl TransmitterRegistry {
    pub fn new() -> Self {
        let (dirty_tx, _rx) = watch::channel(0);
        Self {
            transmitters: Vec::new(),
            dirty_tx,
            generation: 0,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.dirty_tx.subscribe()
    }

    fn mark_dirty(&mut self) {
        self.generation += 1;
        let _ = self.dirty_tx.send(self.generation);
    }

    /// Adds `candidate`, merging into the first matching existing entry
    /// (`is_same`) if one exists. Returns the index of the entry that
    /// received the observation.
    pub fn add_or_merge(&mut self, candidate: Transmitter) -> usize {
        if let Some(idx) = self
            .transmitters
            .iter()
            .position(|tx| tx.is_same(&candidate))
        {
            self.transmitters[idx].merge(&candidate);
            self.mark_dirty();
            return idx;
        }

        self.transmitters.push(candidate);
        self.mark_dirty();
        self.transmitters.len() - 1
    }

    pub fn clear(&mut self) {
        self.transmitters.clear();
        self.mark_dirty();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transmitter> {
        self.transmitters.iter()
    }

    pub fn len(&self) -> usize {
        self.transmitters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transmitters.is_empty()
    }

    /// Transmitters marked for hacking, sorted by decreasing received-packet
    /// count (spec §4.8's hacking-dispatch candidate order).
    pub fn hack_candidates(&self) -> Vec<&Transmitter> {
        let mut candidates: Vec<&Transmitter> =
            self.transmitters.iter().filter(|tx| tx.do_hack()).collect();
        candidates.sort_by_key(|tx| std::cmp::Reverse(tx.recv_cnt()));
        candidates
    }

    /// Replaces any entry matching `incoming` (by `is_same`), else appends.
    /// Used when restoring a persisted registry (spec §6 load semantics).
    pub fn replace_or_insert(&mut self, incoming: Transmitter) {
        if let Some(idx) = self
            .transmitters
            .iter()
            .position(|tx| tx.is_same(&incoming))
        {
            self.transmitters[idx] = incoming;
        } else {
            self.transmitters.push(incoming);
        }
        self.mark_dirty();
    }
}

impl Default for TransmitterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
