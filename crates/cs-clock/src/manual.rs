//! Driver that ticks only on request.

use cs_ir::{Tempo, Timestamp};

use crate::traits::{ClockDriver, ClockError, TickCallback};

/// Fires the callback when told to, stamping each tick one step (at the
/// current tempo) after the last.
///
/// Used for offline rendering and deterministic tests.
pub struct ManualClock {
    tempo: Tempo,
    callback: Option<TickCallback>,
    running: bool,
    last: Option<Timestamp>,
    fired: u64,
}

impl ManualClock {
    pub fn new(tempo: Tempo) -> Self {
        Self { tempo, callback: None, running: false, last: None, fired: 0 }
    }

    /// Deliver one tick. Returns false (and does nothing) while stopped.
    pub fn fire(&mut self) -> bool {
        if !self.running {
            return false;
        }
        let at = self.now();
        let Some(tick) = self.callback.as_mut() else {
            return false;
        };
        tick(at);
        self.last = Some(at);
        self.fired += 1;
        true
    }

    /// Deliver up to `ticks` ticks and return how many fired.
    pub fn advance(&mut self, ticks: u64) -> u64 {
        let mut fired = 0;
        for _ in 0..ticks {
            if !self.fire() {
                break;
            }
            fired += 1;
        }
        fired
    }

    /// Time the next tick will carry.
    pub fn now(&self) -> Timestamp {
        self.last.map_or(Timestamp::ZERO, |t| t.add_micros(self.tempo.step_micros()))
    }

    pub fn ticks_fired(&self) -> u64 {
        self.fired
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Tempo::default())
    }
}

impl ClockDriver for ManualClock {
    fn set_callback(&mut self, callback: TickCallback) {
        self.callback = Some(callback);
    }

    fn start(&mut self) -> Result<(), ClockError> {
        if self.callback.is_none() {
            return Err(ClockError::NoCallback);
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn set_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo;
    }

    fn tempo(&self) -> Tempo {
        self.tempo
    }

    fn is_running(&self) -> bool {
        self.running
    }
}
