//! Memory entries - the atomic unit of observation

use crate::actions::ActionType;
use crate::core::types::{Position, Tick};
use crate::entity::identity::NpcIdentity;
use crate::entity::object::WorldObject;
use crate::entity::record::EntityRecord;
use crate::store::Ref;

/// One observed action: who did what to whom, and when
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    pub timestamp: Tick,
    pub actor: Ref<NpcIdentity>,
    pub action: ActionType,
    pub target_entity: Option<Ref<EntityRecord>>,
    pub target_object: Option<Ref<WorldObject>>,
}

impl MemoryEntry {
    pub fn new(timestamp: Tick, actor: Ref<NpcIdentity>, action: ActionType) -> Self {
        Self {
            timestamp,
            actor,
            action,
            target_entity: None,
            target_object: None,
        }
    }

    pub fn with_target_entity(mut self, entity: Ref<EntityRecord>) -> Self {
        self.target_entity = Some(entity);
        self
    }

    pub fn with_target_object(mut self, object: Ref<WorldObject>) -> Self {
        self.target_object = Some(object);
        self
    }

    /// Where the observed action took place
    ///
    /// The target entity's position when there is one, otherwise the actor's.
    pub fn location(&self) -> Position {
        self.target_entity
            .as_ref()
            .map(|e| e.position)
            .unwrap_or_else(|| self.actor.position())
    }

    /// Logical id of the target, entity first
    pub fn target_id(&self) -> Option<&str> {
        self.target_entity
            .as_ref()
            .map(|e| e.id.as_str())
            .or_else(|| self.target_object.as_ref().map(|o| o.id()))
    }
}
