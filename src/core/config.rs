//! Simulation configuration with documented constants
//!
//! Every tunable the tick pipeline reads is collected here. The structs are
//! serde-deserializable with `#[serde(default)]`, so a TOML file only has to
//! name the values it wants to change.

use crate::core::error::{Result, SimError};
use crate::entity::drives::DriveType;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Natural drive growth
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriveParameters {
    /// Intensity gained per tick by a drive at intensity 0 with modifier 1.0
    pub base_growth_rate: f32,

    /// How much faster strong drives grow than weak ones
    ///
    /// A drive at 100 grows `1 + intensity_factor` times faster than a drive
    /// at 0. Urgency compounds.
    pub intensity_factor: f32,

    /// Per-type multipliers on `base_growth_rate`; unlisted types use 1.0
    pub growth_modifiers: Vec<(DriveType, f32)>,
}

impl Default for DriveParameters {
    fn default() -> Self {
        Self {
            base_growth_rate: 0.1,
            intensity_factor: 0.5,
            growth_modifiers: Vec::new(),
        }
    }
}

/// Weights used when scoring candidate actions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionWeights {
    /// Preference for actions replayed from episodic memory (0.0-1.0)
    pub familiarity_preference: f32,

    /// Preference for actions aimed at another entity (0.0-1.0)
    pub social_preference: f32,

    /// Width of the top-k pool the final choice is drawn from (0.0-1.0)
    ///
    /// `k = 1 + floor(randomness * 10)`, so 0.0 always picks the best
    /// candidate and 1.0 picks uniformly among the eleven best.
    pub randomness: f32,
}

impl Default for SelectionWeights {
    fn default() -> Self {
        Self {
            familiarity_preference: 0.5,
            social_preference: 0.5,
            randomness: 0.2,
        }
    }
}

/// Episode formation and working memory
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryParams {
    /// Minimum mean absolute drive impact for a run to become an episode
    pub significance_threshold: f32,

    /// Maximum ticks between consecutive observations of one run
    pub max_sequence_gap: u64,

    /// Minimum observations in a run before it is considered at all
    pub min_sequence_length: usize,

    /// Capacity of each NPC's perception buffer (oldest evicted first)
    pub buffer_capacity: usize,
}

impl Default for MemoryParams {
    fn default() -> Self {
        Self {
            significance_threshold: 0.3,
            max_sequence_gap: 5,
            min_sequence_length: 2,
            buffer_capacity: 20,
        }
    }
}

/// Movement constants for action execution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionParams {
    /// Maximum distance covered per tick when moving toward a target
    pub move_speed: f32,

    /// Targeted movement stops once closer than this
    pub stop_distance: f32,

    /// Untargeted wandering step length range `[wander_min, wander_max)`
    pub wander_min: f32,
    pub wander_max: f32,

    /// Side of the square world; wandering is clamped to `[0, world_size]`
    pub world_size: f32,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            move_speed: 30.0,
            stop_distance: 10.0,
            wander_min: 5.0,
            wander_max: 20.0,
            world_size: 1000.0,
        }
    }
}

/// Everything a single tick needs besides the World itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickParams {
    pub drives: DriveParameters,
    pub selection: SelectionWeights,
    pub memory: MemoryParams,
    pub execution: ExecutionParams,

    /// Root seed for every random draw in the pipeline
    ///
    /// Each (tick, phase, NPC) gets its own ChaCha stream derived from this,
    /// so runs are reproducible regardless of thread scheduling.
    pub seed: u64,

    /// Minimum NPC count before per-NPC phases fan out over rayon
    pub parallel_threshold: usize,

    /// Apply the chosen action's expected impacts to drives right after
    /// selection. Off by default: drives then only grow.
    pub apply_selected_impacts: bool,

    /// How many NPCs and objects get an entity-update event per tick
    pub event_sample_limit: usize,
}

impl Default for TickParams {
    fn default() -> Self {
        Self {
            drives: DriveParameters::default(),
            selection: SelectionWeights::default(),
            memory: MemoryParams::default(),
            execution: ExecutionParams::default(),
            seed: 42,
            parallel_threshold: 256,
            apply_selected_impacts: false,
            event_sample_limit: 10,
        }
    }
}

impl TickParams {
    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        let d = &self.drives;
        if !d.base_growth_rate.is_finite() || d.base_growth_rate < 0.0 {
            return Err(invalid(format!(
                "base_growth_rate ({}) must be a non-negative number",
                d.base_growth_rate
            )));
        }
        if !d.intensity_factor.is_finite() || d.intensity_factor < 0.0 {
            return Err(invalid(format!(
                "intensity_factor ({}) must be a non-negative number",
                d.intensity_factor
            )));
        }
        for (drive, modifier) in &d.growth_modifiers {
            if !modifier.is_finite() || *modifier < 0.0 {
                return Err(invalid(format!(
                    "growth modifier for {} ({}) must be a non-negative number",
                    drive.name(),
                    modifier
                )));
            }
        }

        let s = &self.selection;
        for (name, value) in [
            ("familiarity_preference", s.familiarity_preference),
            ("social_preference", s.social_preference),
            ("randomness", s.randomness),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{} ({}) must be within [0, 1]", name, value)));
            }
        }

        let m = &self.memory;
        if m.min_sequence_length == 0 {
            return Err(invalid("min_sequence_length must be at least 1".into()));
        }
        if m.buffer_capacity == 0 {
            return Err(invalid("buffer_capacity must be at least 1".into()));
        }
        if !m.significance_threshold.is_finite() {
            return Err(invalid("significance_threshold must be finite".into()));
        }

        let e = &self.execution;
        if e.wander_min > e.wander_max {
            return Err(invalid(format!(
                "wander_min ({}) should be <= wander_max ({})",
                e.wander_min, e.wander_max
            )));
        }
        if e.move_speed < 0.0 || e.stop_distance < 0.0 || e.world_size <= 0.0 {
            return Err(invalid(
                "move_speed and stop_distance must be >= 0 and world_size > 0".into(),
            ));
        }

        Ok(())
    }
}

/// Runner-level configuration: tick parameters plus world bootstrap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub params: TickParams,

    /// How far NPCs perceive other NPCs and objects (world units)
    pub perception_range: f32,

    /// Ticks to run
    pub ticks: u64,

    /// Generation length; the generation counter rolls every N ticks
    pub ticks_per_generation: u32,

    // === POPULATION ===
    pub npc_count: usize,
    pub food_count: usize,
    pub structure_count: usize,

    /// Initial drive intensities are drawn uniformly from this range
    pub initial_drive_min: f32,
    pub initial_drive_max: f32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            params: TickParams::default(),
            perception_range: 10.0,
            ticks: 200,
            ticks_per_generation: 100,
            npc_count: 100,
            food_count: 50,
            structure_count: 50,
            initial_drive_min: 10.0,
            initial_drive_max: 40.0,
        }
    }
}

impl SimulationConfig {
    /// Parse a (possibly partial) TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load and validate a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;

        if !self.perception_range.is_finite() || self.perception_range <= 0.0 {
            return Err(invalid(format!(
                "perception_range ({}) must be positive",
                self.perception_range
            )));
        }
        if self.ticks_per_generation == 0 {
            return Err(invalid("ticks_per_generation must be at least 1".into()));
        }
        if self.initial_drive_min > self.initial_drive_max
            || self.initial_drive_min < 0.0
            || self.initial_drive_max > 100.0
        {
            return Err(invalid(format!(
                "initial drive range [{}, {}) must lie within [0, 100]",
                self.initial_drive_min, self.initial_drive_max
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> SimError {
    SimError::InvalidConfig(message)
}
