//! Witnessed sequences - behavior seen in others, not yet internalized

use crate::entity::drives::DriveType;
use crate::entity::identity::NpcIdentity;
use crate::memory::sequence::ActionSequence;
use crate::store::Ref;

#[derive(Debug, Clone)]
pub struct WitnessedSequence {
    pub sequence: Ref<ActionSequence>,
    pub performer: Ref<NpcIdentity>,
    pub observation_count: u32,
    /// Apparent effect on the performer, per drive
    pub effectiveness: Vec<(DriveType, f32)>,
}
