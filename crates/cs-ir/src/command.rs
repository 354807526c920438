//! Commands that mutate session state between ticks.

use crate::grid::Grid;
use crate::rule::Algorithm;
use crate::transport::Direction;

/// A user-facing command. Each one is applied atomically: it either
/// succeeds completely or fails without changing anything.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// Flip one cell.
    ToggleCell { track: usize, step: usize },
    /// Replace the whole grid.
    SetGrid(Grid),
    /// Replace the grid with a random one (30% density).
    Randomize,
    /// Kill every cell.
    Clear,
    SetAlgorithm(Algorithm),
    /// Takes effect on the next tick.
    SetPlaybackDirection(Direction),
    /// Ticks per generation; a multiple of 4 in `4..=64`.
    SetEvolutionSpeed(u32),
    ToggleEvolutionPause,
    ToggleMute(usize),
    ToggleSolo(usize),
    ToggleFreeze(usize),
    /// Move the playhead without ticking.
    Seek(usize),
    Start,
    Stop,
    /// Start if stopped, stop if running.
    TogglePlayback,
    /// Tempo in BPM, `60..=200`.
    SetTempo(f32),
    /// Switch trigger output between the built-in voices and MIDI.
    ToggleMidi,
}

impl Command {
    /// Transport commands also need the clock driver, not just the session.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Command::Start | Command::Stop | Command::TogglePlayback | Command::SetTempo(_)
        )
    }
}
