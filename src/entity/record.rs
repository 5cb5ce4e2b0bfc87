//! Identity and spatial presence for anything placeable in the world

use crate::core::types::Position;
use crate::store::Ref;

#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub id: String,
    pub position: Position,
}

impl EntityRecord {
    pub fn new(id: impl Into<String>, position: Position) -> Self {
        Self {
            id: id.into(),
            position,
        }
    }

    /// Allocate a record for the same logical entity at a new position
    pub fn moved_to(&self, position: Position) -> Ref<EntityRecord> {
        Ref::new(Self {
            id: self.id.clone(),
            position,
        })
    }
}
