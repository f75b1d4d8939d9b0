use crate::model::Track;

use super::DEFAULT_CAPACITY;

/// Bounded mapping from track to recorded play count.
///
/// Recording an already-present track updates its count in place;
/// recording a new one past capacity evicts the entry with the smallest
/// recorded count, oldest-inserted first when several share the minimum.
/// Entries keep their insertion order internally so the exposed
/// descending sort is stable across equal counts.
#[derive(Debug, Clone)]
pub struct FrequentList {
    entries: Vec<(Track, u32)>,
    capacity: usize,
}

impl Default for FrequentList {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequentList {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Records `track` with its current total play count.
    pub fn record(&mut self, track: Track, count: u32) {
        match self.entries.iter_mut().find(|(t, _)| *t == track) {
            Some((_, recorded)) => *recorded = count,
            None => self.entries.push((track, count)),
        }
        while self.entries.len() > self.capacity {
            self.evict_min();
        }
    }

    fn evict_min(&mut self) {
        let mut min_idx = 0;
        for (idx, (_, count)) in self.entries.iter().enumerate() {
            // Strict comparison keeps the first (oldest) minimum.
            if *count < self.entries[min_idx].1 {
                min_idx = idx;
            }
        }
        self.entries.remove(min_idx);
    }

    pub fn remove(&mut self, track: &Track) {
        self.entries.retain(|(t, _)| t != track);
    }

    /// The tracked entries, descending by recorded count; ties keep
    /// insertion order.
    pub fn tracks(&self) -> Vec<Track> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.into_iter().map(|(t, _)| t).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
