//! Entity model - records, drives, identities, NPCs, objects, relationships

pub mod drives;
pub mod identity;
pub mod npc;
pub mod object;
pub mod record;
pub mod relationships;

pub use drives::{Drive, DriveImpact, DriveType, MAX_INTENSITY};
pub use identity::NpcIdentity;
pub use npc::Npc;
pub use object::{ObjectCategory, WorldObject};
pub use record::EntityRecord;
pub use relationships::{AffectiveTrace, LocationPoint, Relationship, RelationshipTarget};
