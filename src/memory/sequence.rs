//! Action sequences - temporally coherent runs of observations

use crate::core::types::Tick;
use crate::memory::entry::MemoryEntry;
use crate::store::Ref;

#[derive(Debug, Clone)]
pub struct ActionStep {
    pub memory: Ref<MemoryEntry>,
    /// Ticks since the previous step; 0 for the first
    pub delay_after_previous: Tick,
}

/// Steps in non-decreasing timestamp order
#[derive(Debug, Clone)]
pub struct ActionSequence {
    pub id: String,
    pub steps: Vec<ActionStep>,
}

impl ActionSequence {
    /// Build a sequence from timestamp-ordered entries, computing delays
    pub fn from_entries(id: impl Into<String>, entries: &[Ref<MemoryEntry>]) -> Self {
        let steps = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let delay_after_previous = if i == 0 {
                    0
                } else {
                    entry.timestamp.saturating_sub(entries[i - 1].timestamp)
                };
                ActionStep {
                    memory: entry.clone(),
                    delay_after_previous,
                }
            })
            .collect();

        Self {
            id: id.into(),
            steps,
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn first(&self) -> Option<&Ref<MemoryEntry>> {
        self.steps.first().map(|s| &s.memory)
    }

    /// Timestamps of the first and last step
    pub fn time_span(&self) -> Option<(Tick, Tick)> {
        let first = self.steps.first()?;
        let last = self.steps.last()?;
        Some((first.memory.timestamp, last.memory.timestamp))
    }
}
