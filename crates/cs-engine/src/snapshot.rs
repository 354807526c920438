//! Read-only view of session state for renderers and front-ends.

use cs_ir::{Algorithm, Direction, Grid, Heading, OutputRoute, TransportState, TRACKS};

/// A consistent copy of everything a front-end displays.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub grid: Grid,
    pub current_step: usize,
    pub track_mutes: [bool; TRACKS],
    pub track_solos: [bool; TRACKS],
    pub track_freezes: [bool; TRACKS],
    pub algorithm: Algorithm,
    pub playback_direction: Direction,
    pub ping_pong_heading: Heading,
    pub evolution_speed: u32,
    pub steps_since_last_evolution: u32,
    pub is_evolution_paused: bool,
    pub bpm: f32,
    pub transport: TransportState,
    pub output_route: OutputRoute,
    /// Generations applied since the session was created
    pub generation: u64,
    /// Ticks processed since the session was created
    pub ticks: u64,
}

impl Snapshot {
    pub fn is_running(&self) -> bool {
        self.transport == TransportState::Running
    }

    pub fn midi_enabled(&self) -> bool {
        self.output_route == OutputRoute::Midi
    }
}
