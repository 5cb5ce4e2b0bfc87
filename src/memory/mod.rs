//! Working memory, action sequences and episodic memory

pub mod buffer;
pub mod entry;
pub mod episode;
pub mod sequence;
pub mod witnessed;

pub use buffer::{PerceptionBuffer, DEFAULT_CAPACITY};
pub use entry::MemoryEntry;
pub use episode::MemoryEpisode;
pub use sequence::{ActionSequence, ActionStep};
pub use witnessed::WitnessedSequence;
