//! Playback direction, tempo and transport state.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::SeqError;

pub const DEFAULT_TEMPO_BPM: f32 = 120.0;
pub const MIN_TEMPO_BPM: f32 = 60.0;
pub const MAX_TEMPO_BPM: f32 = 200.0;

/// Policy for advancing the playback column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
    /// Bounce between the first and last step
    PingPong,
}

impl Direction {
    pub const ALL: [Direction; 3] = [Direction::Forward, Direction::Reverse, Direction::PingPong];

    pub const fn name(self) -> &'static str {
        match self {
            Direction::Forward => "Forward",
            Direction::Reverse => "Reverse",
            Direction::PingPong => "PingPong",
        }
    }

    /// Short transport label (FWD / REV / PING).
    pub const fn label(self) -> &'static str {
        match self {
            Direction::Forward => "FWD",
            Direction::Reverse => "REV",
            Direction::PingPong => "PING",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Direction::ALL
            .into_iter()
            .find(|d| s.eq_ignore_ascii_case(d.name()) || s.eq_ignore_ascii_case(d.label()))
            .or_else(|| {
                ["ping-pong", "ping_pong"]
                    .iter()
                    .any(|alias| s.eq_ignore_ascii_case(alias))
                    .then_some(Direction::PingPong)
            })
            .ok_or_else(|| SeqError::InvalidDirection(s.to_string()))
    }
}

/// Travel direction inside ping-pong playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    #[default]
    Forward,
    Reverse,
}

/// Whether the sequencer is advancing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransportState {
    #[default]
    Stopped,
    Running,
}

/// Where trigger events are meant to sound.
///
/// The core emits the same events either way; consumers pick the voice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputRoute {
    /// Built-in drum voices
    #[default]
    Synth,
    /// External MIDI notes instead of the built-in voices
    Midi,
}

impl OutputRoute {
    pub const fn toggled(self) -> Self {
        match self {
            OutputRoute::Synth => OutputRoute::Midi,
            OutputRoute::Midi => OutputRoute::Synth,
        }
    }
}

/// Tempo in hundredths of a BPM (12000 = 120.00 BPM).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f32", into = "f32"))]
pub struct Tempo(u16);

impl Tempo {
    /// Validate and quantize a BPM value.
    pub fn from_bpm(bpm: f32) -> Result<Self, SeqError> {
        if !bpm.is_finite() || !(MIN_TEMPO_BPM..=MAX_TEMPO_BPM).contains(&bpm) {
            return Err(SeqError::InvalidTempo(bpm));
        }
        Ok(Self(libm::roundf(bpm * 100.0) as u16))
    }

    pub const fn centi_bpm(self) -> u16 {
        self.0
    }

    pub fn bpm(self) -> f32 {
        self.0 as f32 / 100.0
    }

    /// Length of one sixteenth-note step in microseconds.
    pub const fn step_micros(self) -> u64 {
        // 60s * 1e6 us * 100 (centi) / 4 sixteenths per beat
        1_500_000_000 / self.0 as u64
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self((DEFAULT_TEMPO_BPM * 100.0) as u16)
    }
}

impl TryFrom<f32> for Tempo {
    type Error = SeqError;

    fn try_from(bpm: f32) -> Result<Self, Self::Error> {
        Self::from_bpm(bpm)
    }
}

impl From<Tempo> for f32 {
    fn from(tempo: Tempo) -> f32 {
        tempo.bpm()
    }
}

impl fmt::Display for Tempo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02} BPM", self.0 / 100, self.0 % 100)
    }
}
