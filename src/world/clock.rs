//! Simulation clock - ticks and generations

use crate::core::types::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationClock {
    pub current_tick: Tick,
    pub current_generation: u32,
    pub ticks_per_generation: u32,
}

impl SimulationClock {
    pub fn new(ticks_per_generation: u32) -> Self {
        Self {
            current_tick: 0,
            current_generation: 1,
            ticks_per_generation,
        }
    }

    /// Clock one tick later
    ///
    /// The generation rolls over exactly when the new tick is a multiple of
    /// `ticks_per_generation`. A zero generation length never rolls.
    pub fn advance(&self) -> Self {
        let current_tick = self.current_tick + 1;
        let rolled = self.ticks_per_generation > 0
            && current_tick % Tick::from(self.ticks_per_generation) == 0;

        Self {
            current_tick,
            current_generation: if rolled {
                self.current_generation + 1
            } else {
                self.current_generation
            },
            ticks_per_generation: self.ticks_per_generation,
        }
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(100)
    }
}
