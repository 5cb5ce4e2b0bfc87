//! World objects - placed things NPCs can perceive and act on

use crate::core::types::Position;
use crate::entity::identity::NpcIdentity;
use crate::entity::record::EntityRecord;
use crate::store::Ref;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectCategory {
    Food,
    Structure,
    Tool,
    Burial,
    Plant,
    Marker,
}

impl ObjectCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ObjectCategory::Food => "Food",
            ObjectCategory::Structure => "Structure",
            ObjectCategory::Tool => "Tool",
            ObjectCategory::Burial => "Burial",
            ObjectCategory::Plant => "Plant",
            ObjectCategory::Marker => "Marker",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WorldObject {
    pub entity: Ref<EntityRecord>,
    pub category: ObjectCategory,
    pub created_by: Ref<NpcIdentity>,
}

impl WorldObject {
    pub fn new(
        entity: Ref<EntityRecord>,
        category: ObjectCategory,
        created_by: Ref<NpcIdentity>,
    ) -> Self {
        Self {
            entity,
            category,
            created_by,
        }
    }

    pub fn id(&self) -> &str {
        &self.entity.id
    }

    pub fn position(&self) -> Position {
        self.entity.position
    }
}
