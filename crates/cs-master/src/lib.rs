//! Headless controller for cellseq.
//!
//! Wires a [`Session`] to a clock driver and hands trigger events to the
//! front-end through a lock-free ring buffer. Both the terminal front-end
//! and tests drive the sequencer through this API.

mod midi;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use cs_clock::{ClockDriver, ClockError};
use cs_engine::{Session, TriggerSink};
use ringbuf::traits::{Consumer, Observer, Producer, Split};
use ringbuf::{HeapCons, HeapProd, HeapRb};

// Re-export common types so callers don't need cs-ir/cs-engine directly.
pub use cs_engine::{SessionConfig, Snapshot};
pub use cs_ir::{
    Algorithm, Command, Direction, Grid, OutputRoute, SeqError, Timestamp, TriggerEvent,
};

pub use midi::{
    MidiMessage, MidiNoteSink, NOTE_GATE_MICROS, NOTE_OFF, NOTE_OFF_VELOCITY, NOTE_ON,
    NOTE_ON_VELOCITY,
};

/// Trigger events buffered between the clock thread and the consumer.
/// At most `TRACKS` events per tick, so this covers several bars.
pub const TRIGGER_QUEUE_CAPACITY: usize = 1024;

/// Error type for controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ControlError {
    #[error(transparent)]
    Seq(#[from] SeqError),
    #[error(transparent)]
    Clock(#[from] ClockError),
}

/// Sequencer controller: owns the clock and shares the session with it.
pub struct Controller<C: ClockDriver> {
    session: Arc<Mutex<Session>>,
    clock: C,
    triggers: HeapCons<TriggerEvent>,
}

/// Pushes triggers into the ring buffer from the clock thread.
struct QueueSink<'a>(&'a mut HeapProd<TriggerEvent>);

impl TriggerSink for QueueSink<'_> {
    fn on_trigger(&mut self, event: TriggerEvent) {
        if self.0.try_push(event).is_err() {
            log::warn!(
                "trigger queue full, dropping track {} at {}us",
                event.track,
                event.time.micros
            );
        }
    }
}

impl<C: ClockDriver> Controller<C> {
    /// Build a stopped controller. A config without a seed gets one from entropy.
    pub fn new(mut clock: C, mut config: SessionConfig) -> Self {
        let seed = *config.seed.get_or_insert_with(rand::random);
        log::debug!("session seed {}", seed);

        let session = Session::new(&config);
        clock.set_tempo(session.tempo());
        let session = Arc::new(Mutex::new(session));

        let (mut producer, triggers) = HeapRb::<TriggerEvent>::new(TRIGGER_QUEUE_CAPACITY).split();
        let shared = session.clone();
        clock.set_callback(Box::new(move |time: Timestamp| {
            let mut session = shared.lock().unwrap_or_else(PoisonError::into_inner);
            session.tick(time, &mut QueueSink(&mut producer));
        }));

        Self { session, clock, triggers }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Direct access for caller-driven clocks.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    // --- Commands ---

    /// Apply any command, routing transport commands through the clock.
    pub fn apply(&mut self, command: Command) -> Result<(), ControlError> {
        if !command.is_transport() {
            return Ok(self.session().apply(command)?);
        }
        match command {
            Command::Start => self.start(),
            Command::Stop => {
                self.stop();
                Ok(())
            }
            Command::TogglePlayback => self.toggle_playback(),
            Command::SetTempo(bpm) => self.set_tempo(bpm),
            other => Ok(self.session().apply(other)?),
        }
    }

    pub fn toggle_cell(&mut self, track: usize, step: usize) -> Result<(), ControlError> {
        Ok(self.session().toggle_cell(track, step)?)
    }

    pub fn set_grid(&mut self, grid: Grid) {
        self.session().set_grid(grid);
    }

    pub fn randomize(&mut self) {
        self.session().randomize();
    }

    pub fn clear(&mut self) {
        self.session().clear();
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.session().set_algorithm(algorithm);
    }

    pub fn set_playback_direction(&mut self, direction: Direction) {
        self.session().set_playback_direction(direction);
    }

    pub fn set_evolution_speed(&mut self, steps: u32) -> Result<(), ControlError> {
        Ok(self.session().set_evolution_speed(steps)?)
    }

    pub fn toggle_evolution_pause(&mut self) {
        self.session().toggle_evolution_pause();
    }

    pub fn toggle_mute(&mut self, track: usize) -> Result<(), ControlError> {
        Ok(self.session().toggle_mute(track)?)
    }

    pub fn toggle_solo(&mut self, track: usize) -> Result<(), ControlError> {
        Ok(self.session().toggle_solo(track)?)
    }

    pub fn toggle_freeze(&mut self, track: usize) -> Result<(), ControlError> {
        Ok(self.session().toggle_freeze(track)?)
    }

    pub fn seek(&mut self, step: usize) -> Result<(), ControlError> {
        Ok(self.session().seek(step)?)
    }

    pub fn toggle_midi(&mut self) {
        self.session().toggle_midi();
    }

    // --- Transport ---

    /// Start playback. Idempotent.
    ///
    /// The session is marked running before the clock starts so the first
    /// tick is not dropped. If the clock cannot start, the session goes back
    /// to stopped and the error is returned.
    pub fn start(&mut self) -> Result<(), ControlError> {
        if self.is_running() && self.clock.is_running() {
            return Ok(());
        }
        self.session().start();
        if let Err(e) = self.clock.start() {
            self.session().stop();
            log::error!("clock failed to start: {}", e);
            return Err(e.into());
        }
        log::info!("playback started at {}", self.clock.tempo());
        Ok(())
    }

    /// Stop playback. Once this returns no tick will run until the next
    /// start; triggers from earlier ticks stay queued for draining. Step and
    /// grid are kept.
    pub fn stop(&mut self) {
        self.session().stop();
        self.clock.stop();
        log::info!("playback stopped with {} triggers pending", self.triggers.occupied_len());
    }

    pub fn toggle_playback(&mut self) -> Result<(), ControlError> {
        if self.is_running() {
            self.stop();
            Ok(())
        } else {
            self.start()
        }
    }

    /// Change tempo; the clock picks it up from its next period.
    pub fn set_tempo(&mut self, bpm: f32) -> Result<(), ControlError> {
        let tempo = {
            let mut session = self.session();
            session.set_tempo(bpm)?;
            session.tempo()
        };
        self.clock.set_tempo(tempo);
        log::info!("tempo {}", tempo);
        Ok(())
    }

    // --- State ---

    pub fn is_running(&self) -> bool {
        self.session().is_running()
    }

    pub fn route(&self) -> OutputRoute {
        self.session().route()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.session().snapshot()
    }

    // --- Triggers ---

    /// Move every queued trigger into `sink`, oldest first.
    pub fn drain_triggers<S: TriggerSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut count = 0;
        while let Some(event) = self.triggers.try_pop() {
            sink.on_trigger(event);
            count += 1;
        }
        count
    }

    /// Collect queued triggers.
    pub fn poll_triggers(&mut self) -> Vec<TriggerEvent> {
        let mut events = Vec::new();
        self.drain_triggers(&mut events);
        events
    }
}

impl<C: ClockDriver> Drop for Controller<C> {
    fn drop(&mut self) {
        self.clock.stop();
    }
}
