//! Shared builders for integration tests

#![allow(dead_code)]

use history_sim::core::types::Position;
use history_sim::entity::drives::{Drive, DriveType};
use history_sim::entity::identity::NpcIdentity;
use history_sim::entity::npc::Npc;
use history_sim::entity::object::{ObjectCategory, WorldObject};
use history_sim::entity::record::EntityRecord;
use history_sim::store::Ref;
use history_sim::world::{SimulationClock, World};

pub fn npc(id: &str, x: f32, y: f32, drives: &[(DriveType, f32)]) -> Ref<Npc> {
    let identity = Ref::new(NpcIdentity::new(Ref::new(EntityRecord::new(
        id,
        Position::new(x, y),
    ))));
    let drives = drives.iter().map(|&(t, i)| Drive::new(t, i)).collect();
    Ref::new(Npc::new(identity, drives, 20))
}

pub fn object(
    id: &str,
    x: f32,
    y: f32,
    category: ObjectCategory,
    maker: &Ref<Npc>,
) -> Ref<WorldObject> {
    Ref::new(WorldObject::new(
        Ref::new(EntityRecord::new(id, Position::new(x, y))),
        category,
        maker.identity.clone(),
    ))
}

pub fn world(npcs: Vec<Ref<Npc>>, objects: Vec<Ref<WorldObject>>) -> World {
    World::new(SimulationClock::new(100), npcs, objects)
}

/// Curiosity only, everything else satisfied
pub fn curious(level: f32) -> Vec<(DriveType, f32)> {
    vec![
        (DriveType::Sustenance, 0.0),
        (DriveType::Shelter, 0.0),
        (DriveType::Belonging, 0.0),
        (DriveType::Curiosity, level),
        (DriveType::Pride, 0.0),
    ]
}
