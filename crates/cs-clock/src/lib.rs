//! Tick drivers for cellseq.
//!
//! A driver calls back once per sixteenth-note step with the scheduled time
//! of that step. [`ThreadClock`] paces ticks against the wall clock on a
//! dedicated thread; [`ManualClock`] fires only when told to, for offline
//! rendering and tests.

mod manual;
mod thread;
mod traits;

pub use manual::ManualClock;
pub use thread::ThreadClock;
pub use traits::{ClockDriver, ClockError, TickCallback};
