pub mod config;
pub mod error;
pub mod types;

pub use config::{
    DriveParameters, ExecutionParams, MemoryParams, SelectionWeights, SimulationConfig, TickParams,
};
pub use types::{Position, Tick};
