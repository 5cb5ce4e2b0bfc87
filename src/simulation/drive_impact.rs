//! Drive impact - how an observation moves the observer's drives
//!
//! Base impacts depend on the action and on how familiar the observer is
//! with the actor, object and place involved. They are then scaled up by
//! how strongly the observer currently feels that drive.

use crate::actions::ActionType;
use crate::entity::drives::{DriveImpact, DriveType, MAX_INTENSITY};
use crate::entity::npc::Npc;
use crate::entity::relationships::{
    familiarity, find_entity_relationship, find_location_relationship, find_object_relationship,
};
use crate::memory::MemoryEntry;

/// Observer familiarity with what an observation involves
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Familiarity {
    pub actor: f32,
    pub object: Option<f32>,
    pub location: f32,
}

impl Familiarity {
    pub fn of(observer: &Npc, entry: &MemoryEntry) -> Self {
        let rels = &observer.relationships;
        Self {
            actor: familiarity(find_entity_relationship(rels, entry.actor.id())),
            object: entry
                .target_object
                .as_ref()
                .map(|o| familiarity(find_object_relationship(rels, o.id()))),
            location: familiarity(find_location_relationship(rels, &entry.location())),
        }
    }
}

/// Unscaled impacts of one observed action
pub fn base_impacts(action: ActionType, fam: Familiarity) -> Vec<DriveImpact> {
    match action {
        ActionType::Observe => {
            let subject = fam.object.unwrap_or(fam.actor);
            let novelty = 1.0 - (subject + fam.location) / 2.0;
            vec![DriveImpact::new(DriveType::Curiosity, -0.1 * (1.0 + novelty))]
        }
        ActionType::Follow => {
            vec![DriveImpact::new(DriveType::Belonging, -0.2 * (1.0 + fam.actor))]
        }
        ActionType::Rest => {
            let mut impacts = vec![DriveImpact::new(
                DriveType::Sustenance,
                -0.3 * (1.0 + fam.location),
            )];
            if fam.location > 0.3 {
                impacts.push(DriveImpact::new(DriveType::Shelter, -0.2 * fam.location));
            }
            impacts
        }
        ActionType::Move
        | ActionType::Give
        | ActionType::Take
        | ActionType::Build
        | ActionType::Plant
        | ActionType::Bury
        | ActionType::Gesture => Vec::new(),
    }
}

/// Scale impacts by the observer's current drive levels
///
/// `impact * (1 + intensity/100)`; impacts on drives the observer lacks pass
/// through unchanged.
pub fn scale_by_drive_levels(impacts: Vec<DriveImpact>, observer: &Npc) -> Vec<DriveImpact> {
    impacts
        .into_iter()
        .map(|impact| {
            match observer.drives.iter().find(|d| d.drive_type == impact.drive_type) {
                Some(drive) => DriveImpact::new(
                    impact.drive_type,
                    impact.intensity * (1.0 + drive.intensity / MAX_INTENSITY),
                ),
                None => impact,
            }
        })
        .collect()
}

/// Full impact of one observation on `observer`
pub fn evaluate_impact(observer: &Npc, entry: &MemoryEntry) -> Vec<DriveImpact> {
    let fam = Familiarity::of(observer, entry);
    scale_by_drive_levels(base_impacts(entry.action, fam), observer)
}

/// Merge impacts by drive type
///
/// The first impact of a type seeds it; every later one combines as
/// `(existing + new) * 0.6`. Types keep first-seen order.
pub fn merge_impacts(impacts: impl IntoIterator<Item = DriveImpact>) -> Vec<DriveImpact> {
    let mut merged: Vec<DriveImpact> = Vec::new();
    for impact in impacts {
        match merged.iter_mut().find(|m| m.drive_type == impact.drive_type) {
            Some(existing) => {
                existing.intensity = (existing.intensity + impact.intensity) * 0.6;
            }
            None => merged.push(impact),
        }
    }
    merged
}

/// Mean absolute intensity; 0.0 for no impacts
pub fn mean_magnitude(impacts: &[DriveImpact]) -> f32 {
    if impacts.is_empty() {
        return 0.0;
    }
    impacts.iter().map(|i| i.intensity.abs()).sum::<f32>() / impacts.len() as f32
}

pub fn is_significant(impacts: &[DriveImpact], threshold: f32) -> bool {
    mean_magnitude(impacts) >= threshold
}
