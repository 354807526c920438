//! Core value types for the cellseq sequencer.
//!
//! This crate defines the state vocabulary shared by the engine, the clock
//! drivers and any front-end: the toroidal cell grid, per-track flags,
//! automaton and playback parameters, and trigger events.
//!
//! Designed to be `no_std` compatible with the `alloc` crate.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod command;
mod error;
mod event;
mod grid;
mod rule;
mod timestamp;
mod track;
mod transport;

pub use command::Command;
pub use error::{Axis, SeqError};
pub use event::TriggerEvent;
pub use grid::{check_step, check_track, Grid, RANDOM_DENSITY_THRESHOLD, STEPS, TRACKS};
pub use rule::{
    Algorithm, EvolutionSpeed, DEFAULT_EVOLUTION_SPEED, EVOLUTION_SPEED_STEP,
    MAX_EVOLUTION_SPEED, MIN_EVOLUTION_SPEED,
};
pub use timestamp::Timestamp;
pub use track::{TrackFlags, TrackInfo, DEFAULT_KIT};
pub use transport::{
    Direction, Heading, OutputRoute, Tempo, TransportState, DEFAULT_TEMPO_BPM, MAX_TEMPO_BPM,
    MIN_TEMPO_BPM,
};
