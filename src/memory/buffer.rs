//! Perception buffer - an NPC's sliding window of recent observations

use crate::memory::entry::MemoryEntry;
use crate::store::Ref;

pub const DEFAULT_CAPACITY: usize = 20;

/// Insertion-ordered, bounded list of observations; oldest evicted first
#[derive(Debug, Clone)]
pub struct PerceptionBuffer {
    entries: Vec<Ref<MemoryEntry>>,
    capacity: usize,
}

impl PerceptionBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn entries(&self) -> &[Ref<MemoryEntry>] {
        &self.entries
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// New buffer holding these entries followed by `new_entries`, trimmed
    /// from the front down to `capacity`
    ///
    /// The capacity of the result is `capacity`, so a buffer can be resized
    /// when the configured capacity changes.
    pub fn appended(&self, new_entries: &[Ref<MemoryEntry>], capacity: usize) -> Self {
        let total = self.entries.len() + new_entries.len();
        let skip = total.saturating_sub(capacity);

        let entries: Vec<_> = self
            .entries
            .iter()
            .chain(new_entries.iter())
            .skip(skip)
            .cloned()
            .collect();

        Self { entries, capacity }
    }
}

impl Default for PerceptionBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
