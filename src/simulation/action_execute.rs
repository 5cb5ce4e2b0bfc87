//! Action execution - applying chosen actions to the world
//!
//! Only movement changes anything yet. Every other action is a valid no-op
//! transition that hands back the NPC with all of its state intact.

use crate::core::config::ExecutionParams;
use crate::core::types::Position;
use crate::entity::npc::Npc;
use crate::store::Ref;
use crate::world::World;
use rand::Rng;
use std::f32::consts::TAU;

/// Where a targeted action is aimed, using the target's record in `world`
/// when it still exists there
pub fn target_position(npc: &Npc, world: &World) -> Option<Position> {
    let identity = &npc.identity;
    let id = identity.target_id()?;
    if let Some(entity) = world.find_entity(id) {
        return Some(entity.position);
    }
    identity
        .target_entity
        .as_ref()
        .map(|e| e.position)
        .or_else(|| identity.target_object.as_ref().map(|o| o.position()))
}

/// Position after one step from `from` toward `to`
///
/// No movement once within `stop_distance`; otherwise covers
/// `min(move_speed, distance)`.
pub fn step_toward(from: Position, to: Position, params: &ExecutionParams) -> Position {
    let distance = from.distance(&to);
    if distance < params.stop_distance {
        return from;
    }
    let step = params.move_speed.min(distance);
    from + (to - from).normalize() * step
}

/// Random wandering step, clamped to the world square
pub fn wander<R: Rng>(from: Position, params: &ExecutionParams, rng: &mut R) -> Position {
    let angle = rng.gen_range(0.0..TAU);
    let length = if params.wander_max > params.wander_min {
        rng.gen_range(params.wander_min..params.wander_max)
    } else {
        params.wander_min
    };
    let offset = Position::new(angle.cos(), angle.sin()) * length;
    (from + offset).clamp(0.0, params.world_size)
}

fn moved(npc: &Npc, to: Position) -> Npc {
    if to == npc.position() {
        return npc.clone();
    }
    tracing::debug!(npc = npc.id(), x = to.x, y = to.y, "moved");
    let entity = npc.identity.entity.moved_to(to);
    npc.with_identity(Ref::new(npc.identity.with_entity(entity)))
}

/// NPC after performing its current action in `world`
pub fn execute_action<R: Rng>(
    npc: &Npc,
    world: &World,
    params: &ExecutionParams,
    rng: &mut R,
) -> Npc {
    let Some(action) = npc.identity.current_action else {
        return npc.clone();
    };

    if !action.moves_actor() {
        return npc.clone();
    }

    match target_position(npc, world) {
        Some(target) => moved(npc, step_toward(npc.position(), target, params)),
        None => moved(npc, wander(npc.position(), params, rng)),
    }
}
