//! NPC - one agent's complete, immutable state at a tick
//!
//! Every `with_*` method returns a new value that shares all other fields,
//! so an update never drops state it did not mean to touch.

use crate::core::types::Position;
use crate::entity::drives::Drive;
use crate::entity::identity::NpcIdentity;
use crate::entity::relationships::Relationship;
use crate::memory::{MemoryEpisode, PerceptionBuffer, WitnessedSequence};
use crate::store::Ref;

#[derive(Debug, Clone)]
pub struct Npc {
    pub identity: Ref<NpcIdentity>,
    /// One entry per drive type in practice
    pub drives: Vec<Drive>,
    pub perception: Ref<PerceptionBuffer>,
    pub episodic_memory: Vec<Ref<MemoryEpisode>>,
    pub observed_behaviors: Vec<Ref<WitnessedSequence>>,
    pub relationships: Vec<Ref<Relationship>>,
}

impl Npc {
    /// NPC with an empty perception buffer and no history
    pub fn new(identity: Ref<NpcIdentity>, drives: Vec<Drive>, buffer_capacity: usize) -> Self {
        Self {
            identity,
            drives,
            perception: Ref::new(PerceptionBuffer::new(buffer_capacity)),
            episodic_memory: Vec::new(),
            observed_behaviors: Vec::new(),
            relationships: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        self.identity.id()
    }

    pub fn position(&self) -> Position {
        self.identity.position()
    }

    pub fn with_identity(&self, identity: Ref<NpcIdentity>) -> Self {
        Self {
            identity,
            ..self.clone()
        }
    }

    pub fn with_drives(&self, drives: Vec<Drive>) -> Self {
        Self {
            drives,
            ..self.clone()
        }
    }

    pub fn with_perception(&self, perception: Ref<PerceptionBuffer>) -> Self {
        Self {
            perception,
            ..self.clone()
        }
    }

    pub fn with_episodic_memory(&self, episodic_memory: Vec<Ref<MemoryEpisode>>) -> Self {
        Self {
            episodic_memory,
            ..self.clone()
        }
    }

    pub fn with_relationships(&self, relationships: Vec<Ref<Relationship>>) -> Self {
        Self {
            relationships,
            ..self.clone()
        }
    }
}
