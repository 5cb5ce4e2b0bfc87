//! Perception - who and what each NPC can currently notice
//!
//! Everything is bucketed into a sparse grid whose cell size equals the
//! perception radius, so each NPC only needs to look at its own cell and the
//! eight around it before the exact distance check.

use crate::core::types::Position;
use crate::entity::npc::Npc;
use crate::entity::object::WorldObject;
use crate::spatial::sparse_hash::SparseHashGrid;
use crate::store::Ref;
use crate::world::World;
use rayon::prelude::*;

/// Something an NPC perceived
#[derive(Debug, Clone)]
pub enum Perceived {
    Npc(Ref<Npc>),
    Object(Ref<WorldObject>),
}

impl Perceived {
    pub fn id(&self) -> &str {
        match self {
            Perceived::Npc(npc) => npc.id(),
            Perceived::Object(object) => object.id(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PerceptionPair {
    pub perceiver: Ref<Npc>,
    pub perceived: Perceived,
    pub distance: f32,
}

/// Cells are this much wider than the radius, so an accepted pair can never
/// sit two cells apart
const CELL_SLACK: f32 = 1.0 + 1e-5;

/// Distance from `a` to `b` if it is at most `radius`
///
/// Compared on f64 squared distances; the grid and the exhaustive scan share
/// this test so they accept exactly the same pairs.
fn within_radius(a: Position, b: Position, radius: f32) -> Option<f32> {
    let dx = f64::from(a.x) - f64::from(b.x);
    let dy = f64::from(a.y) - f64::from(b.y);
    let r = f64::from(radius);
    (dx * dx + dy * dy <= r * r).then(|| a.distance(&b))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GridItem {
    Npc(usize),
    Object(usize),
}

/// All (perceiver, perceived, distance) pairs with distance <= `radius`
///
/// Pairs come out grouped by perceiver in NPC order; within one perceiver,
/// in 3x3 cell scan order and, inside a cell, NPCs before objects. An NPC
/// never perceives itself (matched by id). A non-positive radius perceives
/// nothing.
pub fn perceptible_pairs(world: &World, radius: f32) -> Vec<PerceptionPair> {
    perceptible_pairs_with_threshold(world, radius, usize::MAX)
}

/// [`perceptible_pairs`], querying per NPC in parallel once the population
/// reaches `parallel_threshold`
pub fn perceptible_pairs_with_threshold(
    world: &World,
    radius: f32,
    parallel_threshold: usize,
) -> Vec<PerceptionPair> {
    if radius.is_nan() || radius <= 0.0 || world.npcs.is_empty() {
        return Vec::new();
    }

    let mut grid = SparseHashGrid::new(radius * CELL_SLACK);
    grid.rebuild(
        world
            .npcs
            .iter()
            .enumerate()
            .map(|(i, npc)| (GridItem::Npc(i), npc.position()))
            .chain(
                world
                    .objects
                    .iter()
                    .enumerate()
                    .map(|(i, object)| (GridItem::Object(i), object.position())),
            ),
    );

    let query = |npc: &Ref<Npc>| -> Vec<PerceptionPair> {
        let origin = npc.position();
        grid.query_neighbors(origin)
            .filter_map(|item| {
                let (perceived, position) = match item {
                    GridItem::Npc(j) => {
                        let other = &world.npcs[j];
                        if other.id() == npc.id() {
                            return None;
                        }
                        (Perceived::Npc(other.clone()), other.position())
                    }
                    GridItem::Object(j) => {
                        let object = &world.objects[j];
                        (Perceived::Object(object.clone()), object.position())
                    }
                };
                within_radius(origin, position, radius).map(|distance| PerceptionPair {
                    perceiver: npc.clone(),
                    perceived,
                    distance,
                })
            })
            .collect()
    };

    let pairs: Vec<PerceptionPair> = if world.npcs.len() >= parallel_threshold {
        // collect() on an indexed parallel iterator keeps NPC order
        world.npcs.par_iter().flat_map_iter(query).collect()
    } else {
        world.npcs.iter().flat_map(query).collect()
    };

    tracing::debug!(
        npcs = world.npcs.len(),
        objects = world.objects.len(),
        cells = grid.occupied_cells(),
        pairs = pairs.len(),
        "perception grid queried"
    );

    for pair in &pairs {
        tracing::trace!(
            perceiver = pair.perceiver.id(),
            perceived = pair.perceived.id(),
            distance = pair.distance,
            "perceived"
        );
    }

    pairs
}

/// Exhaustive O(N^2) pairing, the reference the grid must agree with
pub fn brute_force_pairs(world: &World, radius: f32) -> Vec<PerceptionPair> {
    if radius.is_nan() || radius <= 0.0 {
        return Vec::new();
    }

    let mut pairs = Vec::new();
    for npc in &world.npcs {
        let origin = npc.position();
        for other in &world.npcs {
            if other.id() == npc.id() {
                continue;
            }
            if let Some(distance) = within_radius(origin, other.position(), radius) {
                pairs.push(PerceptionPair {
                    perceiver: npc.clone(),
                    perceived: Perceived::Npc(other.clone()),
                    distance,
                });
            }
        }
        for object in &world.objects {
            if let Some(distance) = within_radius(origin, object.position(), radius) {
                pairs.push(PerceptionPair {
                    perceiver: npc.clone(),
                    perceived: Perceived::Object(object.clone()),
                    distance,
                });
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::identity::NpcIdentity;
    use crate::entity::object::ObjectCategory;
    use crate::entity::record::EntityRecord;
    use crate::world::SimulationClock;

    fn npc(id: &str, x: f32, y: f32) -> Ref<Npc> {
        let identity = Ref::new(NpcIdentity::new(Ref::new(EntityRecord::new(
            id,
            Position::new(x, y),
        ))));
        Ref::new(Npc::new(identity, vec![], 20))
    }

    fn object(id: &str, x: f32, y: f32, maker: &Ref<Npc>) -> Ref<WorldObject> {
        Ref::new(WorldObject::new(
            Ref::new(EntityRecord::new(id, Position::new(x, y))),
            ObjectCategory::Food,
            maker.identity.clone(),
        ))
    }

    fn ids(pairs: &[PerceptionPair]) -> Vec<(String, String)> {
        let mut ids: Vec<_> = pairs
            .iter()
            .map(|p| (p.perceiver.id().to_string(), p.perceived.id().to_string()))
            .collect();
        ids.sort();
        ids
    }

    #[test]
    fn test_two_npcs_see_each_other() {
        let world = World::new(
            SimulationClock::default(),
            vec![npc("a", 0.0, 0.0), npc("b", 5.0, 0.0)],
            vec![],
        );
        let pairs = perceptible_pairs(&world, 10.0);
        assert_eq!(
            ids(&pairs),
            vec![("a".into(), "b".into()), ("b".into(), "a".into())]
        );
        assert!(pairs.iter().all(|p| (p.distance - 5.0).abs() < 1e-6));
    }

    #[test]
    fn test_self_excluded_by_id() {
        // two records for the same logical NPC still never pair up
        let world = World::new(
            SimulationClock::default(),
            vec![npc("a", 0.0, 0.0), npc("a", 1.0, 0.0)],
            vec![],
        );
        assert!(perceptible_pairs(&world, 10.0).is_empty());
    }

    #[test]
    fn test_boundary_distance_is_inclusive() {
        let a = npc("a", 0.0, 0.0);
        let food = object("food", 10.0, 0.0, &a);
        let world = World::new(SimulationClock::default(), vec![a], vec![food]);
        assert_eq!(perceptible_pairs(&world, 10.0).len(), 1);
        assert!(perceptible_pairs(&world, 9.99).is_empty());
    }

    #[test]
    fn test_pair_just_past_radius_agrees_with_brute_force() {
        // true distance 10.0000001 rounds to exactly 10.0 in f32
        let a = npc("a", -1e-7, 0.0);
        let b = npc("b", 10.0, 0.0);
        let world = World::new(SimulationClock::default(), vec![a, b], vec![]);

        let grid = perceptible_pairs(&world, 10.0);
        let brute = brute_force_pairs(&world, 10.0);
        assert_eq!(grid.len(), brute.len());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_pair_at_radius_across_cell_edge() {
        let a = npc("a", -1e-30, 0.0);
        let b = npc("b", 10.0, 0.0);
        let world = World::new(SimulationClock::default(), vec![a, b], vec![]);

        let grid = perceptible_pairs(&world, 10.0);
        let brute = brute_force_pairs(&world, 10.0);
        assert_eq!(grid.len(), brute.len());
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn test_non_positive_radius_perceives_nothing() {
        let world = World::new(
            SimulationClock::default(),
            vec![npc("a", 0.0, 0.0), npc("b", 0.0, 0.0)],
            vec![],
        );
        assert!(perceptible_pairs(&world, 0.0).is_empty());
        assert!(perceptible_pairs(&world, -5.0).is_empty());
        assert!(brute_force_pairs(&world, 0.0).is_empty());
    }

    #[test]
    fn test_npcs_before_objects_within_cell() {
        let a = npc("a", 1.0, 1.0);
        let food = object("food", 2.0, 2.0, &a);
        let b = npc("b", 3.0, 3.0);
        let world = World::new(SimulationClock::default(), vec![a, b], vec![food]);

        let pairs = perceptible_pairs(&world, 50.0);
        let seen_by_a: Vec<_> = pairs
            .iter()
            .filter(|p| p.perceiver.id() == "a")
            .map(|p| p.perceived.id().to_string())
            .collect();
        assert_eq!(seen_by_a, vec!["b", "food"]);
    }

    #[test]
    fn test_parallel_matches_sequential_order() {
        let npcs: Vec<_> = (0..40)
            .map(|i| npc(&format!("n{i}"), (i % 7) as f32 * 3.0, (i / 7) as f32 * 3.0))
            .collect();
        let world = World::new(SimulationClock::default(), npcs, vec![]);

        let sequential = perceptible_pairs(&world, 6.0);
        let parallel = perceptible_pairs_with_threshold(&world, 6.0, 1);
        let order = |pairs: &[PerceptionPair]| -> Vec<(String, String)> {
            pairs
                .iter()
                .map(|p| (p.perceiver.id().to_string(), p.perceived.id().to_string()))
                .collect()
        };
        assert_eq!(order(&sequential), order(&parallel));
        assert_eq!(ids(&sequential), ids(&brute_force_pairs(&world, 6.0)));
    }
}
