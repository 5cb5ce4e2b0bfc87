//! Population bootstrap - the initial world
//!
//! NPCs are scattered uniformly over the world square with moderate drives;
//! food and shelters are placed the same way, each credited to a random NPC.

use crate::core::config::SimulationConfig;
use crate::core::types::Position;
use crate::entity::drives::{Drive, DriveType};
use crate::entity::identity::NpcIdentity;
use crate::entity::npc::Npc;
use crate::entity::object::{ObjectCategory, WorldObject};
use crate::entity::record::EntityRecord;
use crate::store::Ref;
use crate::world::{SimulationClock, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

/// Drives every bootstrapped NPC starts with
pub const INITIAL_DRIVES: [DriveType; 5] = [
    DriveType::Sustenance,
    DriveType::Shelter,
    DriveType::Belonging,
    DriveType::Curiosity,
    DriveType::Pride,
];

fn random_position(rng: &mut ChaCha8Rng, world_size: f32) -> Position {
    if world_size <= 0.0 {
        return Position::default();
    }
    Position::new(rng.gen_range(0.0..world_size), rng.gen_range(0.0..world_size))
}

fn random_intensity(rng: &mut ChaCha8Rng, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

fn spawn_objects(
    rng: &mut ChaCha8Rng,
    npcs: &[Ref<Npc>],
    count: usize,
    prefix: &str,
    category: ObjectCategory,
    world_size: f32,
) -> Vec<Ref<WorldObject>> {
    if npcs.is_empty() {
        if count > 0 {
            tracing::warn!(
                count,
                category = category.name(),
                "no NPCs to credit objects to, skipping"
            );
        }
        return Vec::new();
    }

    (0..count)
        .map(|i| {
            let position = random_position(rng, world_size);
            let creator = &npcs[rng.gen_range(0..npcs.len())];
            Ref::new(WorldObject::new(
                Ref::new(EntityRecord::new(format!("{prefix}_{i:04}"), position)),
                category,
                creator.identity.clone(),
            ))
        })
        .collect()
}

/// Initial world at tick 0, generation 1
pub fn bootstrap_world(config: &SimulationConfig, rng: &mut ChaCha8Rng) -> Ref<World> {
    let world_size = config.params.execution.world_size;
    let capacity = config.params.memory.buffer_capacity;

    let npcs: Vec<Ref<Npc>> = (0..config.npc_count)
        .map(|i| {
            let position = random_position(rng, world_size);
            let drives = INITIAL_DRIVES
                .iter()
                .map(|&t| {
                    let intensity =
                        random_intensity(rng, config.initial_drive_min, config.initial_drive_max);
                    Drive::new(t, intensity)
                })
                .collect();
            let identity = Ref::new(NpcIdentity::new(Ref::new(EntityRecord::new(
                format!("npc_{i:04}"),
                position,
            ))));
            Ref::new(Npc::new(identity, drives, capacity))
        })
        .collect();

    let mut objects = spawn_objects(
        rng,
        &npcs,
        config.food_count,
        "food",
        ObjectCategory::Food,
        world_size,
    );
    objects.extend(spawn_objects(
        rng,
        &npcs,
        config.structure_count,
        "shelter",
        ObjectCategory::Structure,
        world_size,
    ));

    tracing::info!(
        npcs = npcs.len(),
        objects = objects.len(),
        world_size,
        "world bootstrapped"
    );

    Ref::new(World::new(
        SimulationClock::new(config.ticks_per_generation),
        npcs,
        objects,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_bootstrap_counts_and_ids() {
        let config = SimulationConfig {
            npc_count: 12,
            food_count: 4,
            structure_count: 3,
            ..SimulationConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let world = bootstrap_world(&config, &mut rng);

        assert_eq!(world.npcs.len(), 12);
        assert_eq!(world.objects.len(), 7);
        assert_eq!(world.npcs[0].id(), "npc_0000");
        assert_eq!(world.objects[0].id(), "food_0000");
        assert_eq!(world.objects[4].id(), "shelter_0000");
        assert_eq!(world.objects[4].category, ObjectCategory::Structure);
        assert_eq!(world.current_tick(), 0);
        assert_eq!(world.clock.current_generation, 1);
    }

    #[test]
    fn test_bootstrap_ranges() {
        let config = SimulationConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let world = bootstrap_world(&config, &mut rng);

        for npc in &world.npcs {
            assert_eq!(npc.drives.len(), 5);
            assert!(npc
                .drives
                .iter()
                .all(|d| (10.0..40.0).contains(&d.intensity)));
            let p = npc.position();
            assert!((0.0..1000.0).contains(&p.x) && (0.0..1000.0).contains(&p.y));
            assert!(npc.perception.is_empty());
        }
    }

    #[test]
    fn test_same_seed_same_world() {
        let config = SimulationConfig::default();
        let a = bootstrap_world(&config, &mut ChaCha8Rng::seed_from_u64(7));
        let b = bootstrap_world(&config, &mut ChaCha8Rng::seed_from_u64(7));
        for (x, y) in a.npcs.iter().zip(b.npcs.iter()) {
            assert_eq!(x.position(), y.position());
            assert_eq!(x.drives, y.drives);
        }
    }

    #[test]
    fn test_no_npcs_means_no_objects() {
        let config = SimulationConfig {
            npc_count: 0,
            ..SimulationConfig::default()
        };
        let world = bootstrap_world(&config, &mut ChaCha8Rng::seed_from_u64(42));
        assert!(world.npcs.is_empty());
        assert!(world.objects.is_empty());
    }
}
