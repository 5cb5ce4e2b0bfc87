//! Relationships - one NPC's subjective history with a target
//!
//! Asymmetric: each NPC holds its own relationships, and what A feels about
//! B says nothing about what B feels about A.

use crate::core::types::{Position, Tick};
use crate::entity::drives::DriveType;
use crate::entity::object::WorldObject;
use crate::entity::record::EntityRecord;
use crate::store::Ref;

/// A disc-shaped place an NPC can be attached to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationPoint {
    pub position: Position,
    pub radius: f32,
}

impl LocationPoint {
    pub fn new(position: Position, radius: f32) -> Self {
        Self { position, radius }
    }

    pub fn contains(&self, pos: &Position) -> bool {
        let dx = pos.x - self.position.x;
        let dy = pos.y - self.position.y;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

#[derive(Debug, Clone)]
pub enum RelationshipTarget {
    Entity(Ref<EntityRecord>),
    Object(Ref<WorldObject>),
    Location(LocationPoint),
}

impl RelationshipTarget {
    pub fn position(&self) -> Position {
        match self {
            RelationshipTarget::Entity(entity) => entity.position,
            RelationshipTarget::Object(object) => object.position(),
            RelationshipTarget::Location(location) => location.position,
        }
    }
}

/// Emotional residue a target has left on one drive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffectiveTrace {
    pub drive_type: DriveType,
    pub value: f32,
}

#[derive(Debug, Clone)]
pub struct Relationship {
    pub target: RelationshipTarget,
    /// Exposure, 0.0 (stranger) to 1.0 (intimately known)
    pub familiarity: f32,
    pub affective_traces: Vec<AffectiveTrace>,
    pub last_interaction: Tick,
    pub interaction_count: u32,
}

impl Relationship {
    pub fn new(target: RelationshipTarget, familiarity: f32, last_interaction: Tick) -> Self {
        Self {
            target,
            familiarity,
            affective_traces: Vec::new(),
            last_interaction,
            interaction_count: 1,
        }
    }

    pub fn with_traces(mut self, traces: Vec<AffectiveTrace>) -> Self {
        self.affective_traces = traces;
        self
    }

    /// Recorded residue for one drive, 0.0 if none
    pub fn affective_trace(&self, drive_type: DriveType) -> f32 {
        self.affective_traces
            .iter()
            .find(|t| t.drive_type == drive_type)
            .map(|t| t.value)
            .unwrap_or(0.0)
    }
}

/// Relationship with an entity, matched by logical id
///
/// Entities are re-allocated whenever they move, so handle equality would
/// lose track of a relationship after the first step.
pub fn find_entity_relationship<'a>(
    relationships: &'a [Ref<Relationship>],
    entity_id: &str,
) -> Option<&'a Ref<Relationship>> {
    relationships.iter().find(|rel| match &rel.target {
        RelationshipTarget::Entity(entity) => entity.id == entity_id,
        _ => false,
    })
}

/// Relationship with a world object, matched by the object's entity id
pub fn find_object_relationship<'a>(
    relationships: &'a [Ref<Relationship>],
    object_id: &str,
) -> Option<&'a Ref<Relationship>> {
    relationships.iter().find(|rel| match &rel.target {
        RelationshipTarget::Object(object) => object.id() == object_id,
        _ => false,
    })
}

/// First location relationship whose disc contains `position`
pub fn find_location_relationship<'a>(
    relationships: &'a [Ref<Relationship>],
    position: &Position,
) -> Option<&'a Ref<Relationship>> {
    relationships.iter().find(|rel| match &rel.target {
        RelationshipTarget::Location(location) => location.contains(position),
        _ => false,
    })
}

/// Familiarity of an optional relationship; strangers are 0.0
pub fn familiarity(relationship: Option<&Ref<Relationship>>) -> f32 {
    relationship.map(|rel| rel.familiarity).unwrap_or(0.0)
}
