//! Tick system - orchestrates simulation updates
//!
//! One tick, strictly in order:
//! update NPCs (drives -> episodes -> selection) -> execute actions ->
//! perceive -> advance clock.
//!
//! Each tick reads one immutable World and produces the next one.

use crate::core::config::TickParams;
use crate::events::{DriveReading, EventSink, SimEvent};
use crate::simulation::memory_update::process_perceptions;
use crate::simulation::npc_update::{execute_all_actions, update_all_npcs};
use crate::store::{self, Ref};
use crate::world::World;

/// World with the clock moved forward one tick
pub fn advance_clock(world: &World) -> World {
    let clock = world.clock.advance();
    if clock.current_generation != world.clock.current_generation {
        tracing::info!(
            tick = clock.current_tick,
            generation = clock.current_generation,
            "new generation"
        );
    } else {
        tracing::debug!(tick = clock.current_tick, "clock advanced");
    }
    world.with_clock(clock)
}

fn emit_action_events(world: &World, sink: &mut (dyn EventSink + '_)) {
    for npc in &world.npcs {
        if let Some(action) = npc.identity.current_action {
            sink.emit(SimEvent::ActionExecution {
                entity_id: npc.id().to_string(),
                action_type: action.name().to_string(),
                target_id: npc.identity.target_id().map(str::to_string),
            });
        }
    }
}

fn emit_entity_updates(world: &World, limit: usize, sink: &mut (dyn EventSink + '_)) {
    for npc in world.npcs.iter().take(limit) {
        sink.emit(SimEvent::EntityUpdate {
            entity_id: npc.id().to_string(),
            entity_type: "NPC".to_string(),
            position: npc.position(),
            drives: Some(npc.drives.iter().map(DriveReading::from).collect()),
            current_action: npc.identity.current_action.map(|a| a.name().to_string()),
        });
    }
    for object in world.objects.iter().take(limit) {
        sink.emit(SimEvent::EntityUpdate {
            entity_id: object.id().to_string(),
            entity_type: "Object".to_string(),
            position: object.position(),
            drives: None,
            current_action: None,
        });
    }
}

/// Run one complete tick and return the next world
pub fn process_tick(
    world: &World,
    params: &TickParams,
    perception_range: f32,
    mut sink: Option<&mut (dyn EventSink + '_)>,
) -> World {
    let tick = world.current_tick();
    let generation = world.clock.current_generation;
    let allocations_before = store::allocations();

    if let Some(sink) = sink.as_deref_mut() {
        sink.emit(SimEvent::TickStart { tick, generation });
    }

    let with_actions = update_all_npcs(world, params);

    if let Some(sink) = sink.as_deref_mut() {
        emit_action_events(&with_actions, sink);
    }

    let after_actions = execute_all_actions(&with_actions, params);

    let (perceived, pair_count) = process_perceptions(
        &after_actions,
        perception_range,
        params.memory.buffer_capacity,
        params.parallel_threshold,
    );

    let next = advance_clock(&perceived);

    if let Some(sink) = sink.as_deref_mut() {
        sink.emit(SimEvent::Perception { tick, pair_count });
        sink.emit(SimEvent::TickEnd {
            tick,
            generation,
            npc_count: next.npcs.len(),
            object_count: next.objects.len(),
        });
        emit_entity_updates(&next, params.event_sample_limit, sink);
    }

    tracing::debug!(
        tick,
        pairs = pair_count,
        allocated = store::allocations() - allocations_before,
        "tick complete"
    );

    next
}

/// Run `ticks` ticks from `initial` and return the final world
///
/// `on_tick` is called after every tick with the new world and the 1-based
/// number of ticks completed so far.
pub fn run_simulation(
    initial: Ref<World>,
    ticks: u64,
    params: &TickParams,
    perception_range: f32,
    mut sink: Option<&mut (dyn EventSink + '_)>,
    mut on_tick: Option<&mut (dyn FnMut(&Ref<World>, u64) + '_)>,
) -> Ref<World> {
    tracing::info!(
        ticks,
        npcs = initial.npcs.len(),
        objects = initial.objects.len(),
        perception_range,
        seed = params.seed,
        "simulation start"
    );

    if let Some(sink) = sink.as_deref_mut() {
        sink.emit(SimEvent::SimulationStart {
            npc_count: initial.npcs.len(),
            object_count: initial.objects.len(),
            world_size: params.execution.world_size,
        });
    }

    let progress_every = (ticks / 10).max(1);
    let mut world = initial;

    for completed in 1..=ticks {
        world = Ref::new(process_tick(&world, params, perception_range, sink.as_deref_mut()));

        if let Some(callback) = on_tick.as_deref_mut() {
            callback(&world, completed);
        }

        if ticks >= 10 && completed % progress_every == 0 {
            tracing::info!(
                completed,
                total = ticks,
                percent = completed * 100 / ticks,
                "progress"
            );
        }
    }

    if let Some(sink) = sink.as_deref_mut() {
        sink.emit(SimEvent::SimulationEnd {
            total_ticks: ticks,
            final_generation: world.clock.current_generation,
            npc_count: world.npcs.len(),
            object_count: world.objects.len(),
        });
    }

    tracing::info!(
        tick = world.current_tick(),
        generation = world.clock.current_generation,
        "simulation end"
    );

    world
}
