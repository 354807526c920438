//! Per-track flags and drum kit metadata.

use crate::error::SeqError;
use crate::grid::{check_track, TRACKS};

/// Name and General MIDI drum note for one track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackInfo {
    pub name: &'static str,
    pub midi_note: u8,
}

impl TrackInfo {
    pub const fn new(name: &'static str, midi_note: u8) -> Self {
        Self { name, midi_note }
    }
}

/// Default 909-style kit, one voice per grid row.
pub static DEFAULT_KIT: [TrackInfo; TRACKS] = [
    TrackInfo::new("Kick", 36),
    TrackInfo::new("Snare", 38),
    TrackInfo::new("Closed Hat", 42),
    TrackInfo::new("Open Hat", 46),
    TrackInfo::new("Low Tom", 41),
    TrackInfo::new("Mid Tom", 45),
    TrackInfo::new("Clap", 39),
    TrackInfo::new("Ride", 51),
];

/// Mute, solo and freeze flags, indexed by track.
///
/// Any combination is allowed; the trigger resolver gives solo precedence
/// over mute, and freeze only affects evolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackFlags {
    pub mute: [bool; TRACKS],
    pub solo: [bool; TRACKS],
    pub freeze: [bool; TRACKS],
}

impl TrackFlags {
    pub const fn new() -> Self {
        Self {
            mute: [false; TRACKS],
            solo: [false; TRACKS],
            freeze: [false; TRACKS],
        }
    }

    pub fn toggle_mute(&mut self, track: usize) -> Result<(), SeqError> {
        check_track(track)?;
        self.mute[track] = !self.mute[track];
        Ok(())
    }

    pub fn toggle_solo(&mut self, track: usize) -> Result<(), SeqError> {
        check_track(track)?;
        self.solo[track] = !self.solo[track];
        Ok(())
    }

    pub fn toggle_freeze(&mut self, track: usize) -> Result<(), SeqError> {
        check_track(track)?;
        self.freeze[track] = !self.freeze[track];
        Ok(())
    }

    pub fn any_solo(&self) -> bool {
        self.solo.iter().any(|&s| s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Axis;

    #[test]
    fn toggles_are_independent() {
        let mut flags = TrackFlags::new();
        flags.toggle_mute(2).unwrap();
        flags.toggle_solo(2).unwrap();
        flags.toggle_freeze(5).unwrap();

        assert!(flags.mute[2] && flags.solo[2]);
        assert!(flags.freeze[5]);
        assert!(!flags.freeze[2]);
        assert!(flags.any_solo());

        flags.toggle_solo(2).unwrap();
        assert!(!flags.any_solo());
    }

    #[test]
    fn bad_track_leaves_flags_untouched() {
        let mut flags = TrackFlags::new();
        let err = flags.toggle_mute(TRACKS).unwrap_err();
        assert_eq!(err, SeqError::InvalidIndex { axis: Axis::Track, index: 8, bound: 8 });
        assert_eq!(flags, TrackFlags::new());
    }

    #[test]
    fn kit_uses_general_midi_drum_notes() {
        let notes: [u8; TRACKS] = core::array::from_fn(|t| DEFAULT_KIT[t].midi_note);
        assert_eq!(notes, [36, 38, 42, 46, 41, 45, 39, 51]);
    }
}
