//! NPC identity - who an NPC is and what it is currently doing
//!
//! Deliberately holds no memory handles: memories point at identities,
//! never the reverse, which keeps the record graph acyclic.

use crate::actions::ActionType;
use crate::core::types::Position;
use crate::entity::object::WorldObject;
use crate::entity::record::EntityRecord;
use crate::store::Ref;

#[derive(Debug, Clone)]
pub struct NpcIdentity {
    pub entity: Ref<EntityRecord>,
    pub current_action: Option<ActionType>,
    pub target_entity: Option<Ref<EntityRecord>>,
    pub target_object: Option<Ref<WorldObject>>,
}

impl NpcIdentity {
    /// Identity with no action selected yet
    pub fn new(entity: Ref<EntityRecord>) -> Self {
        Self {
            entity,
            current_action: None,
            target_entity: None,
            target_object: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn position(&self) -> Position {
        self.entity.position
    }

    /// Same entity, new action and targets
    pub fn with_action(
        &self,
        action: ActionType,
        target_entity: Option<Ref<EntityRecord>>,
        target_object: Option<Ref<WorldObject>>,
    ) -> Self {
        Self {
            entity: self.entity.clone(),
            current_action: Some(action),
            target_entity,
            target_object,
        }
    }

    /// Same action and targets, different entity record (e.g. after moving)
    pub fn with_entity(&self, entity: Ref<EntityRecord>) -> Self {
        Self {
            entity,
            ..self.clone()
        }
    }

    /// Id of whatever the current action aims at, entity first
    pub fn target_id(&self) -> Option<&str> {
        self.target_entity
            .as_ref()
            .map(|e| e.id.as_str())
            .or_else(|| self.target_object.as_ref().map(|o| o.id()))
    }
}
