//! Perception to working memory
//!
//! Each perception pair becomes an Observe entry in the perceiver's buffer.

use crate::actions::ActionType;
use crate::core::types::Tick;
use crate::entity::npc::Npc;
use crate::memory::MemoryEntry;
use crate::simulation::perception::{perceptible_pairs_with_threshold, Perceived, PerceptionPair};
use crate::store::Ref;
use crate::world::World;
use ahash::AHashMap;
use rayon::prelude::*;

/// Observe entries for every pair, grouped by perceiver id in pair order
pub fn entries_by_perceiver(
    pairs: &[PerceptionPair],
    tick: Tick,
) -> AHashMap<String, Vec<Ref<MemoryEntry>>> {
    let mut grouped: AHashMap<String, Vec<Ref<MemoryEntry>>> = AHashMap::new();
    for pair in pairs {
        let entry = MemoryEntry::new(tick, pair.perceiver.identity.clone(), ActionType::Observe);
        let entry = match &pair.perceived {
            Perceived::Npc(other) => entry.with_target_entity(other.identity.entity.clone()),
            Perceived::Object(object) => entry.with_target_object(object.clone()),
        };
        grouped
            .entry(pair.perceiver.id().to_string())
            .or_default()
            .push(Ref::new(entry));
    }
    grouped
}

/// NPC with `entries` appended to its buffer, oldest evicted beyond `capacity`
pub fn update_perception_buffer(npc: &Npc, entries: &[Ref<MemoryEntry>], capacity: usize) -> Npc {
    if entries.is_empty() && npc.perception.capacity() == capacity {
        return npc.clone();
    }
    npc.with_perception(Ref::new(npc.perception.appended(entries, capacity)))
}

/// Recompute perception against `world` and feed every NPC's buffer
///
/// Returns the new world and the number of perception pairs found.
pub fn process_perceptions(
    world: &World,
    radius: f32,
    capacity: usize,
    parallel_threshold: usize,
) -> (World, usize) {
    let pairs = perceptible_pairs_with_threshold(world, radius, parallel_threshold);
    let grouped = entries_by_perceiver(&pairs, world.current_tick());

    let update = |npc: &Ref<Npc>| -> Ref<Npc> {
        match grouped.get(npc.id()) {
            Some(entries) => Ref::new(update_perception_buffer(npc, entries, capacity)),
            None if npc.perception.capacity() != capacity => {
                Ref::new(update_perception_buffer(npc, &[], capacity))
            }
            None => npc.clone(),
        }
    };

    let npcs: Vec<Ref<Npc>> = if world.npcs.len() >= parallel_threshold {
        world.npcs.par_iter().map(update).collect()
    } else {
        world.npcs.iter().map(update).collect()
    };

    tracing::debug!(
        tick = world.current_tick(),
        pairs = pairs.len(),
        perceivers = grouped.len(),
        "perceptions processed"
    );

    (world.with_npcs(npcs), pairs.len())
}
