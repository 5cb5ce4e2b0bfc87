//! History Sim - emergent behavioral history among non-verbal NPCs
//!
//! NPCs accumulate drives, perceive their surroundings, form episodic
//! memories out of what they observe and choose actions that relieve their
//! strongest needs. Every tick produces a new immutable [`world::World`].

pub mod actions;
pub mod core;
pub mod entity;
pub mod events;
pub mod memory;
pub mod simulation;
pub mod spatial;
pub mod store;
pub mod world;
