//! World snapshots and the simulation clock

pub mod clock;
pub mod snapshot;

pub use clock::SimulationClock;
pub use snapshot::World;
