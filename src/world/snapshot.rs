//! World snapshot - the single root record per tick

use crate::entity::npc::Npc;
use crate::entity::object::WorldObject;
use crate::entity::record::EntityRecord;
use crate::store::Ref;
use crate::world::clock::SimulationClock;

/// Everything that exists at one tick. Built once, never mutated.
#[derive(Debug, Clone)]
pub struct World {
    pub clock: Ref<SimulationClock>,
    pub npcs: Vec<Ref<Npc>>,
    pub objects: Vec<Ref<WorldObject>>,
}

impl World {
    pub fn new(
        clock: SimulationClock,
        npcs: Vec<Ref<Npc>>,
        objects: Vec<Ref<WorldObject>>,
    ) -> Self {
        Self {
            clock: Ref::new(clock),
            npcs,
            objects,
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.clock.current_tick
    }

    pub fn with_npcs(&self, npcs: Vec<Ref<Npc>>) -> Self {
        Self {
            npcs,
            ..self.clone()
        }
    }

    pub fn with_clock(&self, clock: SimulationClock) -> Self {
        Self {
            clock: Ref::new(clock),
            ..self.clone()
        }
    }

    pub fn find_npc(&self, id: &str) -> Option<&Ref<Npc>> {
        self.npcs.iter().find(|npc| npc.id() == id)
    }

    pub fn find_object(&self, id: &str) -> Option<&Ref<WorldObject>> {
        self.objects.iter().find(|object| object.id() == id)
    }

    /// Current entity record of an NPC or object with this id
    pub fn find_entity(&self, id: &str) -> Option<Ref<EntityRecord>> {
        self.find_npc(id)
            .map(|npc| npc.identity.entity.clone())
            .or_else(|| self.find_object(id).map(|object| object.entity.clone()))
    }
}
