//! Error type for caller misuse of the sequencer core.

use alloc::string::String;
use core::fmt;

/// Which grid axis an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Row index (one per percussion track)
    Track,
    /// Column index (one per sixteenth-note step)
    Step,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Track => f.write_str("track"),
            Axis::Step => f.write_str("step"),
        }
    }
}

/// Errors raised by sequencer operations.
///
/// The core performs no I/O, so every variant describes a malformed
/// argument. A failing operation never mutates state.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SeqError {
    #[error("{axis} index {index} out of range (0..{bound})")]
    InvalidIndex { axis: Axis, index: usize, bound: usize },
    #[error("unknown automaton rule '{0}'")]
    InvalidAlgorithm(String),
    #[error("grid must be 8x32, got {rows} rows with a row of {cols} cells")]
    InvalidGridShape { rows: usize, cols: usize },
    #[error("unknown playback direction '{0}'")]
    InvalidDirection(String),
    #[error("evolution speed {0} must be a multiple of 4 between 4 and 64")]
    InvalidSpeed(u32),
    #[error("tempo {0} BPM outside 60..=200")]
    InvalidTempo(f32),
    #[error("invalid pattern character '{0}', expected '#' or '.'")]
    InvalidPattern(char),
}
