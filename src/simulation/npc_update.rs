//! Per-NPC update phases
//!
//! Every NPC reads the same immutable pre-phase world and produces a new
//! NPC value, so the phases fan out over rayon once the population is large
//! enough. Results are collected in the original NPC order.

use crate::core::config::TickParams;
use crate::core::types::Tick;
use crate::entity::npc::Npc;
use crate::simulation::action_execute::execute_action;
use crate::simulation::action_select::{apply_drive_updates, choose_for, with_chosen_action};
use crate::simulation::drive_dynamics::update_drives;
use crate::simulation::episode_formation::form_episodic_memories;
use crate::store::Ref;
use crate::world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

/// Which random draw a stream belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Selection = 1,
    Execution = 2,
}

/// Independent random stream for one NPC in one phase of one tick
///
/// Streams never depend on scheduling, so a run is reproducible for a fixed
/// seed whether or not phases run in parallel.
pub fn stream_rng(seed: u64, tick: Tick, phase: Phase, npc_index: usize) -> ChaCha8Rng {
    let key = seed
        ^ tick.wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ (phase as u64).wrapping_mul(0xD1B5_4A32_D192_ED03);
    let mut rng = ChaCha8Rng::seed_from_u64(key);
    rng.set_stream(npc_index as u64);
    rng
}

/// Drive growth, then episode formation, then action selection
pub fn update_npc(npc: &Npc, world: &World, params: &TickParams, rng: &mut ChaCha8Rng) -> Npc {
    let tick = world.current_tick();
    let grown = update_drives(npc, &params.drives, 1);
    let remembered = form_episodic_memories(&grown, tick, &params.memory);

    match choose_for(&remembered, world, &params.selection, rng) {
        Some(option) => {
            let acting = with_chosen_action(&remembered, &option);
            if params.apply_selected_impacts {
                apply_drive_updates(&acting, &option, 1.0)
            } else {
                acting
            }
        }
        None => remembered,
    }
}

fn map_npcs<F>(world: &World, parallel_threshold: usize, f: F) -> Vec<Ref<Npc>>
where
    F: Fn(usize, &Ref<Npc>) -> Ref<Npc> + Sync + Send,
{
    if world.npcs.len() >= parallel_threshold {
        world
            .npcs
            .par_iter()
            .enumerate()
            .map(|(i, npc)| f(i, npc))
            .collect()
    } else {
        world.npcs.iter().enumerate().map(|(i, npc)| f(i, npc)).collect()
    }
}

/// Update every NPC against the same pre-tick world
pub fn update_all_npcs(world: &World, params: &TickParams) -> World {
    let tick = world.current_tick();
    let npcs = map_npcs(world, params.parallel_threshold, |i, npc| {
        let mut rng = stream_rng(params.seed, tick, Phase::Selection, i);
        Ref::new(update_npc(npc, world, params, &mut rng))
    });
    tracing::debug!(tick, npcs = npcs.len(), "npcs updated");
    world.with_npcs(npcs)
}

/// Execute every NPC's current action against the same world
pub fn execute_all_actions(world: &World, params: &TickParams) -> World {
    let tick = world.current_tick();
    let npcs = map_npcs(world, params.parallel_threshold, |i, npc| {
        let mut rng = stream_rng(params.seed, tick, Phase::Execution, i);
        let after = execute_action(npc, world, &params.execution, &mut rng);
        if Ref::same(&after.identity, &npc.identity) {
            npc.clone()
        } else {
            Ref::new(after)
        }
    });
    world.with_npcs(npcs)
}
