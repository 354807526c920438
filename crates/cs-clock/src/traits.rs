//! Clock driver trait and error types.

use cs_ir::Tempo;
use cs_ir::Timestamp;

/// Called once per step with the step's scheduled time.
pub type TickCallback = Box<dyn FnMut(Timestamp) + Send + 'static>;

/// Error type for clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// No usable timing source
    #[error("clock unavailable: {0}")]
    Unavailable(String),
    /// Failed to start the clock thread
    #[error("failed to spawn clock thread: {0}")]
    Spawn(String),
    /// `start` was called before `set_callback`
    #[error("no tick callback installed")]
    NoCallback,
}

/// Trait for tick sources.
///
/// Timestamps continue from where the previous run left off, so a
/// stop/start pair never rewinds the timeline.
pub trait ClockDriver {
    /// Install the tick callback, replacing any previous one.
    fn set_callback(&mut self, callback: TickCallback);

    /// Begin ticking. Starting a running clock is a no-op.
    fn start(&mut self) -> Result<(), ClockError>;

    /// Stop ticking. Once this returns the callback will not run again
    /// until the next `start`.
    fn stop(&mut self);

    /// Change the step period. The tick not yet delivered moves to one new
    /// period after the last delivered tick.
    fn set_tempo(&mut self, tempo: Tempo);

    fn tempo(&self) -> Tempo;

    fn is_running(&self) -> bool;
}
