//! Scheduled time supplied by the clock driver.

use crate::transport::Tempo;

/// Time position on the clock's timeline, in microseconds since it started.
///
/// The core never reads a wall clock; every timestamp comes from the
/// clock driver and is passed through unchanged to trigger sinks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timestamp {
    pub micros: u64,
}

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp { micros: 0 };

    pub const fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self { micros: millis * 1_000 }
    }

    /// Time of the `step`-th sixteenth at a constant tempo.
    pub const fn at_step(step: u64, tempo: Tempo) -> Self {
        Self { micros: step * tempo.step_micros() }
    }

    pub const fn add_micros(self, micros: u64) -> Self {
        Self { micros: self.micros + micros }
    }

    pub fn as_secs_f64(self) -> f64 {
        self.micros as f64 / 1_000_000.0
    }

    /// Convert to a sample position for an audio collaborator.
    pub fn to_samples(self, sample_rate: u32) -> u64 {
        self.micros * sample_rate as u64 / 1_000_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamp_ordering() {
        let t1 = Timestamp::from_millis(10);
        let t2 = Timestamp::from_millis(20);
        let t3 = Timestamp::from_micros(10_500);

        assert!(t1 < t2);
        assert!(t1 < t3);
        assert!(t3 < t2);
    }

    #[test]
    fn to_samples() {
        let t = Timestamp::from_millis(500);
        assert_eq!(t.to_samples(44100), 22050);
        assert_eq!(Timestamp::from_micros(125_000).to_samples(48000), 6000);
    }

    #[test]
    fn at_step_follows_tempo() {
        let tempo = Tempo::from_bpm(120.0).unwrap();
        assert_eq!(Timestamp::at_step(4, tempo), Timestamp::from_millis(500));
        assert_eq!(Timestamp::at_step(1, tempo).as_secs_f64(), 0.125);
    }
}
