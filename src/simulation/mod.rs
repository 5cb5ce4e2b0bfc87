//! The per-tick simulation pipeline

pub mod action_execute;
pub mod action_select;
pub mod drive_dynamics;
pub mod drive_impact;
pub mod episode_formation;
pub mod memory_update;
pub mod npc_update;
pub mod perception;
pub mod population;
pub mod tick;

pub use action_execute::execute_action;
pub use action_select::{choose_action, select_next_action, ActionOption};
pub use drive_dynamics::update_drives;
pub use episode_formation::{form_episodic_memories, identify_sequences};
pub use memory_update::{process_perceptions, update_perception_buffer};
pub use npc_update::{execute_all_actions, update_all_npcs, update_npc};
pub use perception::{brute_force_pairs, perceptible_pairs, Perceived, PerceptionPair};
pub use population::bootstrap_world;
pub use tick::{advance_clock, process_tick, run_simulation};
