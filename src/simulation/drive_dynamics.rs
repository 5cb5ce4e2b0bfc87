//! Drive dynamics - natural growth of needs over time
//!
//! Drives only grow here. They fall when impacts are applied.

use crate::core::config::DriveParameters;
use crate::entity::drives::{Drive, DriveImpact, DriveType, MAX_INTENSITY};
use crate::entity::npc::Npc;

/// Growth multiplier for one drive type; unlisted types use 1.0
pub fn growth_modifier(params: &DriveParameters, drive_type: DriveType) -> f32 {
    params
        .growth_modifiers
        .iter()
        .find(|(t, _)| *t == drive_type)
        .map(|(_, m)| *m)
        .unwrap_or(1.0)
}

/// One drive after `ticks_elapsed` ticks of growth
///
/// `increase = base_rate * modifier * (1 + intensity/100 * intensity_factor) * ticks`,
/// capped at 100. Never lowers the intensity.
pub fn grow_drive(drive: &Drive, params: &DriveParameters, ticks_elapsed: u64) -> Drive {
    let urgency = 1.0 + drive.intensity / MAX_INTENSITY * params.intensity_factor;
    let increase = params.base_growth_rate
        * growth_modifier(params, drive.drive_type)
        * urgency
        * ticks_elapsed as f32;

    if increase.is_nan() || increase <= 0.0 {
        return *drive;
    }
    drive.with_intensity((drive.intensity + increase).min(MAX_INTENSITY))
}

/// NPC with every drive advanced by `ticks_elapsed`
pub fn update_drives(npc: &Npc, params: &DriveParameters, ticks_elapsed: u64) -> Npc {
    let drives = npc
        .drives
        .iter()
        .map(|d| grow_drive(d, params, ticks_elapsed))
        .collect();
    npc.with_drives(drives)
}

/// Apply signed impacts scaled by `effectiveness`, clamped to [0, 100]
///
/// Impacts on drive types the NPC does not carry are ignored.
pub fn apply_impacts(drives: &[Drive], impacts: &[DriveImpact], effectiveness: f32) -> Vec<Drive> {
    drives
        .iter()
        .map(|drive| {
            let delta: f32 = impacts
                .iter()
                .filter(|i| i.drive_type == drive.drive_type)
                .map(|i| i.intensity * effectiveness)
                .sum();
            if delta == 0.0 || delta.is_nan() {
                *drive
            } else {
                drive.with_intensity(drive.intensity + delta)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_growth_formula() {
        let params = DriveParameters::default();
        let drive = Drive::new(DriveType::Sustenance, 50.0);
        // 0.1 * 1.0 * (1 + 0.5 * 0.5) * 4 = 0.5
        let grown = grow_drive(&drive, &params, 4);
        assert!((grown.intensity - 50.5).abs() < 1e-5);
    }

    #[test]
    fn test_urgency_compounds() {
        let params = DriveParameters::default();
        let low = grow_drive(&Drive::new(DriveType::Pride, 0.0), &params, 10);
        let high = grow_drive(&Drive::new(DriveType::Pride, 90.0), &params, 10);
        assert!(high.intensity - 90.0 > low.intensity - 0.0);
    }

    #[test]
    fn test_modifier_lookup() {
        let params = DriveParameters {
            growth_modifiers: vec![(DriveType::Grief, 0.0), (DriveType::Curiosity, 3.0)],
            ..DriveParameters::default()
        };
        assert_eq!(growth_modifier(&params, DriveType::Grief), 0.0);
        assert_eq!(growth_modifier(&params, DriveType::Curiosity), 3.0);
        assert_eq!(growth_modifier(&params, DriveType::Shelter), 1.0);

        let frozen = grow_drive(&Drive::new(DriveType::Grief, 12.0), &params, 100);
        assert_eq!(frozen.intensity, 12.0);
    }

    #[test]
    fn test_growth_caps_at_max() {
        let params = DriveParameters::default();
        let grown = grow_drive(&Drive::new(DriveType::Shelter, 99.99), &params, 1_000);
        assert_eq!(grown.intensity, 100.0);
    }

    #[test]
    fn test_zero_ticks_is_identity() {
        let params = DriveParameters::default();
        let drive = Drive::new(DriveType::Belonging, 33.0);
        assert_eq!(grow_drive(&drive, &params, 0), drive);
    }

    #[test]
    fn test_apply_impacts_clamps() {
        let drives = vec![
            Drive::new(DriveType::Sustenance, 0.2),
            Drive::new(DriveType::Pride, 99.9),
        ];
        let impacts = vec![
            DriveImpact::new(DriveType::Sustenance, -0.5),
            DriveImpact::new(DriveType::Pride, 0.3),
            DriveImpact::new(DriveType::Grief, -1.0),
        ];
        let applied = apply_impacts(&drives, &impacts, 1.0);
        assert_eq!(applied[0].intensity, 0.0);
        assert_eq!(applied[1].intensity, 100.0);
        assert_eq!(applied.len(), 2);
    }
}
