//! Session start-up configuration.

use cs_ir::{
    Algorithm, Direction, EvolutionSpeed, Grid, OutputRoute, SeqError, Tempo, TrackFlags,
};

/// Initial session state. Every field is already validated by its type.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    pub tempo: Tempo,
    pub evolution_speed: EvolutionSpeed,
    pub algorithm: Algorithm,
    pub direction: Direction,
    /// Seed for `randomize`; `None` lets the host pick one
    pub seed: Option<u64>,
    /// Start from a random grid instead of `grid`
    pub randomize: bool,
    /// Starting pattern (empty when unset)
    pub grid: Option<Grid>,
    pub flags: TrackFlags,
    /// Initial output route (built-in voices unless set)
    pub route: OutputRoute,
}

impl SessionConfig {
    pub fn with_bpm(mut self, bpm: f32) -> Result<Self, SeqError> {
        self.tempo = Tempo::from_bpm(bpm)?;
        Ok(self)
    }

    pub fn with_evolution_speed(mut self, steps: u32) -> Result<Self, SeqError> {
        self.evolution_speed = EvolutionSpeed::new(steps)?;
        Ok(self)
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_grid(mut self, grid: Grid) -> Self {
        self.grid = Some(grid);
        self
    }
}
