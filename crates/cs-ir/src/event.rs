//! Trigger events emitted by the sequencer.

use crate::grid::TRACKS;
use crate::timestamp::Timestamp;
use crate::track::{TrackInfo, DEFAULT_KIT};

/// An active, eligible cell at the playback column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TriggerEvent {
    /// When the hit should sound
    pub time: Timestamp,
    /// Which track (grid row) fired, `0..TRACKS`
    pub track: u8,
}

impl TriggerEvent {
    pub fn new(track: usize, time: Timestamp) -> Self {
        debug_assert!(track < TRACKS);
        Self { time, track: track as u8 }
    }

    pub fn track_index(&self) -> usize {
        self.track as usize
    }

    /// Kit metadata for the firing track.
    pub fn info(&self) -> &'static TrackInfo {
        &DEFAULT_KIT[self.track_index()]
    }
}
