//! Automaton rule selection and evolution cadence.

use alloc::string::ToString;
use core::fmt;
use core::str::FromStr;

use crate::error::SeqError;

pub const MIN_EVOLUTION_SPEED: u32 = 4;
pub const MAX_EVOLUTION_SPEED: u32 = 64;
pub const EVOLUTION_SPEED_STEP: u32 = 4;
/// One generation per bar of sixteenths.
pub const DEFAULT_EVOLUTION_SPEED: u32 = 16;

/// Life-like cellular automaton rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Conway's Game of Life, B3/S23
    #[default]
    GameOfLife,
    /// HighLife, B36/S23
    HighLife,
}

impl Algorithm {
    pub const ALL: [Algorithm; 2] = [Algorithm::GameOfLife, Algorithm::HighLife];

    /// Birth/survival notation.
    pub const fn notation(self) -> &'static str {
        match self {
            Algorithm::GameOfLife => "B3/S23",
            Algorithm::HighLife => "B36/S23",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::GameOfLife => "GameOfLife",
            Algorithm::HighLife => "HighLife",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = SeqError;

    /// Accepts the rule name (case-insensitive, `-`/`_` ignored) or its B/S notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let matches = |name: &str| {
            let mut key = s.chars().filter(|c| *c != '-' && *c != '_' && *c != ' ');
            let mut want = name.chars();
            loop {
                match (key.next(), want.next()) {
                    (Some(a), Some(b)) if a.eq_ignore_ascii_case(&b) => continue,
                    (None, None) => return true,
                    _ => return false,
                }
            }
        };

        Algorithm::ALL
            .into_iter()
            .find(|a| matches(a.name()) || s.eq_ignore_ascii_case(a.notation()))
            .or_else(|| matches("life").then_some(Algorithm::GameOfLife))
            .ok_or_else(|| SeqError::InvalidAlgorithm(s.to_string()))
    }
}

/// Ticks between generations: a multiple of 4 in `4..=64`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u32", into = "u32"))]
pub struct EvolutionSpeed(u8);

impl EvolutionSpeed {
    pub fn new(steps: u32) -> Result<Self, SeqError> {
        let in_range = (MIN_EVOLUTION_SPEED..=MAX_EVOLUTION_SPEED).contains(&steps);
        if in_range && steps % EVOLUTION_SPEED_STEP == 0 {
            Ok(Self(steps as u8))
        } else {
            Err(SeqError::InvalidSpeed(steps))
        }
    }

    pub const fn steps(self) -> u32 {
        self.0 as u32
    }
}

impl Default for EvolutionSpeed {
    fn default() -> Self {
        Self(DEFAULT_EVOLUTION_SPEED as u8)
    }
}

impl TryFrom<u32> for EvolutionSpeed {
    type Error = SeqError;

    fn try_from(steps: u32) -> Result<Self, Self::Error> {
        Self::new(steps)
    }
}

impl From<EvolutionSpeed> for u32 {
    fn from(speed: EvolutionSpeed) -> u32 {
        speed.steps()
    }
}
