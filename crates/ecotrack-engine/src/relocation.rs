//! Relocation priority queue
//!
//! Species inserted at a high risk level wait here, in the order they were
//! flagged, until their population recovers.

use std::collections::VecDeque;

use ecotrack_core::SpeciesId;

/// FIFO of species flagged for conservation relocation
#[derive(Debug, Clone, Default)]
pub struct RelocationQueue {
    entries: VecDeque<SpeciesId>,
}

impl RelocationQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a species at the back of the queue
    pub fn push(&mut self, species: SpeciesId) {
        self.entries.push_back(species);
    }

    /// Remove the first entry for `species`
    ///
    /// Returns `true` if an entry was removed.
    pub fn remove_first_matching(&mut self, species: &SpeciesId) -> bool {
        match self.entries.iter().position(|entry| entry == species) {
            Some(pos) => {
                self.entries.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Check whether `species` is queued
    pub fn contains(&self, species: &SpeciesId) -> bool {
        self.entries.contains(species)
    }

    /// Iterate in enqueue order
    pub fn iter(&self) -> impl Iterator<Item = &SpeciesId> {
        self.entries.iter()
    }

    /// Queued species in enqueue order
    pub fn snapshot(&self) -> Vec<SpeciesId> {
        self.entries.iter().cloned().collect()
    }

    /// Number of queued entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the queue is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
