//! Evolution cadence: when a generation is due.

use cs_ir::{Algorithm, EvolutionSpeed};

/// Automaton settings plus the elapsed-tick counter that gates generations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvolutionState {
    pub algorithm: Algorithm,
    pub speed: EvolutionSpeed,
    /// Ticks counted since the last applied generation
    pub steps_since_last: u32,
    /// Generations are held while set; the counter keeps running
    pub paused: bool,
}

impl EvolutionState {
    pub fn new(algorithm: Algorithm, speed: EvolutionSpeed) -> Self {
        Self { algorithm, speed, steps_since_last: 0, paused: false }
    }

    /// Count one tick and report whether a generation is due.
    ///
    /// The gate depends only on elapsed ticks, never on the playback column,
    /// so generations drift against the bar when `speed` does not divide it.
    /// A due generation resets the counter.
    pub fn tick(&mut self) -> bool {
        self.steps_since_last = self.steps_since_last.saturating_add(1);
        if !self.paused && self.steps_since_last >= self.speed.steps() {
            self.steps_since_last = 0;
            true
        } else {
            false
        }
    }
}
