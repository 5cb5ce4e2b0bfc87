//! Episodic memory - durable, emotionally significant records

use crate::core::types::Tick;
use crate::entity::drives::DriveImpact;
use crate::memory::sequence::ActionSequence;
use crate::store::Ref;

#[derive(Debug, Clone)]
pub struct MemoryEpisode {
    pub start_time: Tick,
    pub end_time: Tick,
    pub action_sequence: Ref<ActionSequence>,
    /// Merged drive deltas the sequence produced in the observer
    pub drive_impacts: Vec<DriveImpact>,
    /// How many times this episode has been lived through; at least 1
    pub repetition_count: u32,
}

impl MemoryEpisode {
    /// First occurrence of an episode
    pub fn new(sequence: Ref<ActionSequence>, drive_impacts: Vec<DriveImpact>) -> Self {
        let (start_time, end_time) = sequence.time_span().unwrap_or((0, 0));
        Self {
            start_time,
            end_time,
            action_sequence: sequence,
            drive_impacts,
            repetition_count: 1,
        }
    }

    /// Same episode, lived through once more
    pub fn reinforced(&self) -> Self {
        Self {
            repetition_count: self.repetition_count + 1,
            ..self.clone()
        }
    }

    pub fn step_count(&self) -> usize {
        self.action_sequence.len()
    }
}
