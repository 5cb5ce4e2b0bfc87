//! Drives - quantified needs that push NPC behavior

use serde::{Deserialize, Serialize};

pub const MAX_INTENSITY: f32 = 100.0;

/// The universal drives every NPC may carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DriveType {
    Sustenance,
    Shelter,
    Belonging,
    Curiosity,
    Pride,
    Grief,
}

impl DriveType {
    pub const ALL: [DriveType; 6] = [
        DriveType::Sustenance,
        DriveType::Shelter,
        DriveType::Belonging,
        DriveType::Curiosity,
        DriveType::Pride,
        DriveType::Grief,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DriveType::Sustenance => "Sustenance",
            DriveType::Shelter => "Shelter",
            DriveType::Belonging => "Belonging",
            DriveType::Curiosity => "Curiosity",
            DriveType::Pride => "Pride",
            DriveType::Grief => "Grief",
        }
    }
}

/// A drive and how strongly it is felt
///
/// 0.0 = fully satisfied, 100.0 = overwhelming. Construction clamps, so a
/// `Drive` can never hold an out-of-range intensity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Drive {
    pub drive_type: DriveType,
    pub intensity: f32,
}

impl Drive {
    pub fn new(drive_type: DriveType, intensity: f32) -> Self {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, MAX_INTENSITY)
        };
        Self { drive_type, intensity }
    }

    /// Same drive type at a new (clamped) intensity
    pub fn with_intensity(&self, intensity: f32) -> Self {
        Self::new(self.drive_type, intensity)
    }
}

/// Signed change to a drive; negative means the drive is being satisfied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriveImpact {
    pub drive_type: DriveType,
    pub intensity: f32,
}

impl DriveImpact {
    pub fn new(drive_type: DriveType, intensity: f32) -> Self {
        Self { drive_type, intensity }
    }
}

/// Current intensity of one drive type, if the NPC carries it
pub fn intensity_of(drives: &[Drive], drive_type: DriveType) -> Option<f32> {
    drives
        .iter()
        .find(|d| d.drive_type == drive_type)
        .map(|d| d.intensity)
}

/// Most pressing drive
pub fn most_pressing(drives: &[Drive]) -> Option<Drive> {
    drives
        .iter()
        .copied()
        .max_by(|a, b| a.intensity.total_cmp(&b.intensity))
}
