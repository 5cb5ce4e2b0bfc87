//! Action definitions and catalog

use crate::entity::drives::{DriveImpact, DriveType};
use serde::{Deserialize, Serialize};

/// Closed set of non-verbal actions an NPC can perform or observe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    Move,
    Observe,
    Give,
    Take,
    Rest,
    Build,
    Plant,
    Bury,
    Gesture,
    Follow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Movement,
    Perception,
    Exchange,
    Survival,
    Making,
    Symbolic,
}

impl ActionType {
    pub const ALL: [ActionType; 10] = [
        ActionType::Move,
        ActionType::Observe,
        ActionType::Give,
        ActionType::Take,
        ActionType::Rest,
        ActionType::Build,
        ActionType::Plant,
        ActionType::Bury,
        ActionType::Gesture,
        ActionType::Follow,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ActionType::Move => "Move",
            ActionType::Observe => "Observe",
            ActionType::Give => "Give",
            ActionType::Take => "Take",
            ActionType::Rest => "Rest",
            ActionType::Build => "Build",
            ActionType::Plant => "Plant",
            ActionType::Bury => "Bury",
            ActionType::Gesture => "Gesture",
            ActionType::Follow => "Follow",
        }
    }

    pub fn category(&self) -> ActionCategory {
        match self {
            ActionType::Move | ActionType::Follow => ActionCategory::Movement,
            ActionType::Observe => ActionCategory::Perception,
            ActionType::Give | ActionType::Take => ActionCategory::Exchange,
            ActionType::Rest => ActionCategory::Survival,
            ActionType::Build | ActionType::Plant | ActionType::Bury => ActionCategory::Making,
            ActionType::Gesture => ActionCategory::Symbolic,
        }
    }

    /// Whether executing this action changes the actor's position
    pub fn moves_actor(&self) -> bool {
        self.category() == ActionCategory::Movement
    }

    /// Drive changes an NPC expects from performing this action itself
    ///
    /// Negative values mean the drive is satisfied. Used to score
    /// heuristic candidates; actions replayed from memory use the episode's
    /// recorded impacts instead.
    pub fn expected_impacts(&self) -> Vec<DriveImpact> {
        match self {
            ActionType::Follow => vec![DriveImpact::new(DriveType::Belonging, -0.3)],
            ActionType::Observe | ActionType::Move => {
                vec![DriveImpact::new(DriveType::Curiosity, -0.2)]
            }
            ActionType::Take => vec![DriveImpact::new(DriveType::Sustenance, -0.5)],
            ActionType::Rest => vec![
                DriveImpact::new(DriveType::Shelter, -0.4),
                DriveImpact::new(DriveType::Sustenance, -0.3),
            ],
            ActionType::Build => vec![
                DriveImpact::new(DriveType::Shelter, -0.3),
                DriveImpact::new(DriveType::Pride, -0.2),
            ],
            ActionType::Gesture => vec![DriveImpact::new(DriveType::Pride, -0.3)],
            ActionType::Give | ActionType::Plant | ActionType::Bury => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_are_unique() {
        let mut names: Vec<_> = ActionType::ALL.iter().map(|a| a.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), ActionType::ALL.len());
    }

    #[test]
    fn test_only_move_and_follow_move_the_actor() {
        for action in ActionType::ALL {
            let expected = matches!(action, ActionType::Move | ActionType::Follow);
            assert_eq!(action.moves_actor(), expected, "{}", action.name());
        }
    }

    #[test]
    fn test_expected_impacts_are_satisfying() {
        for action in ActionType::ALL {
            for impact in action.expected_impacts() {
                assert!(impact.intensity < 0.0, "{} should reduce drives", action.name());
            }
        }
    }

    #[test]
    fn test_rest_targets_shelter_and_sustenance() {
        let impacts = ActionType::Rest.expected_impacts();
        let types: Vec<_> = impacts.iter().map(|i| i.drive_type).collect();
        assert_eq!(types, vec![DriveType::Shelter, DriveType::Sustenance]);
    }
}
