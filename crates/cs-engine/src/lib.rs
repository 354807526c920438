//! Sequencing engine for cellseq.
//!
//! Owns the step clock, the evolution cadence and the trigger resolver, and
//! ties them together in [`Session`], which turns one clock tick into a batch
//! of trigger events.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod cadence;
mod config;
pub mod evolution;
mod session;
mod snapshot;
mod step_clock;
mod trigger;

pub use cadence::EvolutionState;
pub use config::SessionConfig;
pub use evolution::{evolve, evolve_rows, live_neighbors, Rule};
pub use session::{Session, TickOutcome};
pub use snapshot::Snapshot;
pub use step_clock::{next_step, StepClock};
pub use trigger::{eligible_tracks, Eligible, TriggerSink};
