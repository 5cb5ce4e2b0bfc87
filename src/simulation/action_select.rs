//! Action selection - choosing what an NPC does next
//!
//! Candidates come from two places: innate heuristics triggered by what is
//! nearby, and episodes the NPC has lived through more than once. Each is
//! scored by how much it promises to relieve the NPC's current drives, plus
//! a preference bonus, and the final pick is drawn from the top few.

use crate::actions::ActionType;
use crate::core::config::SelectionWeights;
use crate::entity::drives::{Drive, DriveImpact};
use crate::entity::npc::Npc;
use crate::entity::object::{ObjectCategory, WorldObject};
use crate::entity::record::EntityRecord;
use crate::simulation::drive_dynamics::apply_impacts;
use crate::store::Ref;
use crate::world::World;
use ordered_float::OrderedFloat;
use rand::Rng;
use std::cmp::Reverse;

/// Other NPCs within this distance offer Follow and Observe
pub const NPC_PROXIMITY: f32 = 10.0;

/// Objects within this distance offer Observe and category actions
pub const OBJECT_PROXIMITY: f32 = 5.0;

/// Drives weaker than this are ignored when scoring
const MIN_SCORED_INTENSITY: f32 = 0.1;

/// A possible action with its target and what it is expected to do
#[derive(Debug, Clone)]
pub struct ActionOption {
    pub action: ActionType,
    pub target_entity: Option<Ref<EntityRecord>>,
    pub target_object: Option<Ref<WorldObject>>,
    pub expected_impacts: Vec<DriveImpact>,
    pub from_memory: bool,
}

impl ActionOption {
    /// Heuristic option using the action's catalog impacts
    pub fn primitive(action: ActionType) -> Self {
        Self {
            action,
            target_entity: None,
            target_object: None,
            expected_impacts: action.expected_impacts(),
            from_memory: false,
        }
    }

    pub fn at_entity(mut self, entity: Ref<EntityRecord>) -> Self {
        self.target_entity = Some(entity);
        self
    }

    pub fn at_object(mut self, object: Ref<WorldObject>) -> Self {
        self.target_object = Some(object);
        self
    }

    pub fn target_id(&self) -> Option<&str> {
        self.target_entity
            .as_ref()
            .map(|e| e.id.as_str())
            .or_else(|| self.target_object.as_ref().map(|o| o.id()))
    }
}

/// Options triggered by nearby NPCs and objects, then the always-available ones
pub fn generate_primitive_options(npc: &Npc, world: &World) -> Vec<ActionOption> {
    let origin = npc.position();
    let mut options = Vec::new();

    for other in &world.npcs {
        if other.id() == npc.id() || origin.distance(&other.position()) > NPC_PROXIMITY {
            continue;
        }
        let entity = other.identity.entity.clone();
        options.push(ActionOption::primitive(ActionType::Follow).at_entity(entity.clone()));
        options.push(ActionOption::primitive(ActionType::Observe).at_entity(entity));
    }

    for object in &world.objects {
        if origin.distance(&object.position()) > OBJECT_PROXIMITY {
            continue;
        }
        options.push(ActionOption::primitive(ActionType::Observe).at_object(object.clone()));
        match object.category {
            ObjectCategory::Food => {
                options.push(ActionOption::primitive(ActionType::Take).at_object(object.clone()))
            }
            ObjectCategory::Structure => {
                options.push(ActionOption::primitive(ActionType::Rest).at_object(object.clone()))
            }
            ObjectCategory::Tool
            | ObjectCategory::Burial
            | ObjectCategory::Plant
            | ObjectCategory::Marker => {}
        }
    }

    options.push(ActionOption::primitive(ActionType::Move));
    options.push(ActionOption::primitive(ActionType::Build));
    options.push(ActionOption::primitive(ActionType::Gesture));

    options
}

/// Replays of the first step of every episode lived through at least twice
///
/// Targets are looked up by id in `world`; episodes with any target gone are
/// skipped, and surviving ones aim at their targets' current records.
pub fn generate_memory_options(npc: &Npc, world: &World) -> Vec<ActionOption> {
    npc.episodic_memory
        .iter()
        .filter(|episode| episode.repetition_count >= 2)
        .filter_map(|episode| {
            let first = episode.action_sequence.first()?;
            let mut option = ActionOption {
                action: first.action,
                target_entity: None,
                target_object: None,
                expected_impacts: episode.drive_impacts.clone(),
                from_memory: true,
            };

            if let Some(entity) = &first.target_entity {
                let current = world.find_npc(&entity.id)?;
                option.target_entity = Some(current.identity.entity.clone());
            }
            if let Some(object) = &first.target_object {
                let current = world.find_object(object.id())?;
                option.target_object = Some(current.clone());
            }
            Some(option)
        })
        .collect()
}

/// How strongly an option promises to relieve the NPC's drives
///
/// `sum(-impact * intensity)` over drives of at least 0.1 intensity.
pub fn drive_score(option: &ActionOption, drives: &[Drive]) -> f32 {
    drives
        .iter()
        .filter(|d| d.intensity.abs() >= MIN_SCORED_INTENSITY)
        .map(|drive| {
            option
                .expected_impacts
                .iter()
                .filter(|i| i.drive_type == drive.drive_type)
                .map(|i| -i.intensity * drive.intensity)
                .sum::<f32>()
        })
        .sum()
}

pub fn preference_score(option: &ActionOption, weights: &SelectionWeights) -> f32 {
    let mut score = 0.0;
    if option.from_memory {
        score += weights.familiarity_preference * 10.0;
    }
    if option.target_entity.is_some() {
        score += weights.social_preference * 5.0;
    }
    score
}

pub fn total_score(option: &ActionOption, drives: &[Drive], weights: &SelectionWeights) -> f32 {
    drive_score(option, drives) + preference_score(option, weights)
}

/// Size of the pool the final choice is drawn from
pub fn top_k(candidates: usize, randomness: f32) -> usize {
    let widening = (randomness.max(0.0) * 10.0).floor() as usize;
    candidates.min(1 + widening)
}

/// Pick among the best-scoring options
///
/// Options are sorted by score, highest first (ties keep their order), and
/// one of the top `k` is drawn uniformly. With `randomness == 0` the best
/// option always wins and `rng` is not touched.
pub fn choose_action<R: Rng>(
    options: Vec<ActionOption>,
    drives: &[Drive],
    weights: &SelectionWeights,
    rng: &mut R,
) -> Option<ActionOption> {
    if options.is_empty() {
        return None;
    }

    let mut scored: Vec<(ActionOption, f32)> = options
        .into_iter()
        .map(|option| {
            let score = total_score(&option, drives, weights);
            (option, score)
        })
        .collect();
    scored.sort_by_key(|(_, score)| Reverse(OrderedFloat(*score)));

    let k = top_k(scored.len(), weights.randomness);
    let index = if k > 1 { rng.gen_range(0..k) } else { 0 };
    Some(scored.swap_remove(index).0)
}

/// Choose an option for `npc` against `world`, without applying it
pub fn choose_for<R: Rng>(
    npc: &Npc,
    world: &World,
    weights: &SelectionWeights,
    rng: &mut R,
) -> Option<ActionOption> {
    let mut options = generate_primitive_options(npc, world);
    options.extend(generate_memory_options(npc, world));
    choose_action(options, &npc.drives, weights, rng)
}

/// NPC whose identity carries the chosen action and targets
pub fn with_chosen_action(npc: &Npc, option: &ActionOption) -> Npc {
    tracing::debug!(
        npc = npc.id(),
        action = option.action.name(),
        target = option.target_id(),
        from_memory = option.from_memory,
        "action chosen"
    );
    let identity = npc.identity.with_action(
        option.action,
        option.target_entity.clone(),
        option.target_object.clone(),
    );
    npc.with_identity(Ref::new(identity))
}

/// NPC with its next action selected; unchanged if nothing is possible
pub fn select_next_action<R: Rng>(
    npc: &Npc,
    world: &World,
    weights: &SelectionWeights,
    rng: &mut R,
) -> Npc {
    match choose_for(npc, world, weights, rng) {
        Some(option) => with_chosen_action(npc, &option),
        None => npc.clone(),
    }
}

/// NPC with the option's expected impacts applied to its drives
///
/// Impacts are scaled by `effectiveness` and results clamped to [0, 100].
pub fn apply_drive_updates(npc: &Npc, option: &ActionOption, effectiveness: f32) -> Npc {
    npc.with_drives(apply_impacts(&npc.drives, &option.expected_impacts, effectiveness))
}
