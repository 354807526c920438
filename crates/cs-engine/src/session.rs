//! The sequencer session: one owned context driven by clock ticks and commands.

use cs_ir::{
    Algorithm, Command, Direction, EvolutionSpeed, Grid, OutputRoute, SeqError, Tempo, Timestamp,
    TrackFlags, TransportState, TriggerEvent,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::cadence::EvolutionState;
use crate::config::SessionConfig;
use crate::evolution::evolve;
use crate::snapshot::Snapshot;
use crate::step_clock::StepClock;
use crate::trigger::{Eligible, TriggerSink};

/// What one tick did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickOutcome {
    /// Playback column after advancing
    pub step: usize,
    /// Whether a generation replaced the grid
    pub evolved: bool,
    /// Number of trigger events emitted
    pub triggered: usize,
}

/// All sequencer state, owned in one place.
///
/// Ticks and commands both take `&mut self`, so whoever owns the session
/// decides how they are serialized; nothing inside needs a lock.
#[derive(Clone, Debug)]
pub struct Session {
    grid: Grid,
    flags: TrackFlags,
    clock: StepClock,
    evolution: EvolutionState,
    tempo: Tempo,
    transport: TransportState,
    route: OutputRoute,
    rng: SmallRng,
    generation: u64,
    ticks: u64,
}

impl Session {
    pub fn new(config: &SessionConfig) -> Self {
        let mut rng = SmallRng::seed_from_u64(config.seed.unwrap_or_default());
        let grid = if config.randomize {
            Grid::random(&mut rng)
        } else {
            config.grid.unwrap_or_default()
        };

        Self {
            grid,
            flags: config.flags,
            clock: StepClock::new(config.direction),
            evolution: EvolutionState::new(config.algorithm, config.evolution_speed),
            tempo: config.tempo,
            transport: TransportState::Stopped,
            route: config.route,
            rng,
            generation: 0,
            ticks: 0,
        }
    }

    // --- Clock callback ---

    /// Advance one sixteenth-note step and emit triggers for `time`.
    ///
    /// Order: move the playhead, maybe apply a generation, resolve
    /// mute/solo, then fire every eligible live cell at the new column.
    /// Returns `None` without touching state while stopped, so callbacks
    /// that were already queued when `stop()` ran emit nothing.
    pub fn tick<S: TriggerSink + ?Sized>(
        &mut self,
        time: Timestamp,
        sink: &mut S,
    ) -> Option<TickOutcome> {
        if self.transport != TransportState::Running {
            log::trace!("tick at {}us dropped, transport stopped", time.micros);
            return None;
        }

        let step = self.clock.advance();

        let evolved = self.evolution.tick();
        if evolved {
            self.grid = evolve(&self.grid, self.evolution.algorithm, &self.flags.freeze);
            self.generation += 1;
            log::debug!(
                "generation {} ({}) population {}",
                self.generation,
                self.evolution.algorithm,
                self.grid.population()
            );
        }

        let eligible = Eligible::from(&self.flags);
        let mut triggered = 0;
        for track in eligible.tracks() {
            if self.grid.cell(track, step) {
                sink.on_trigger(TriggerEvent::new(track, time));
                triggered += 1;
            }
        }

        self.ticks += 1;
        log::trace!("tick {} step {} triggered {}", self.ticks, step, triggered);
        Some(TickOutcome { step, evolved, triggered })
    }

    // --- Commands ---

    /// Apply a command. Failing commands change nothing.
    pub fn apply(&mut self, command: Command) -> Result<(), SeqError> {
        match command {
            Command::ToggleCell { track, step } => self.toggle_cell(track, step)?,
            Command::SetGrid(grid) => self.set_grid(grid),
            Command::Randomize => self.randomize(),
            Command::Clear => self.clear(),
            Command::SetAlgorithm(algorithm) => self.set_algorithm(algorithm),
            Command::SetPlaybackDirection(direction) => self.set_playback_direction(direction),
            Command::SetEvolutionSpeed(steps) => self.set_evolution_speed(steps)?,
            Command::ToggleEvolutionPause => self.toggle_evolution_pause(),
            Command::ToggleMute(track) => self.flags.toggle_mute(track)?,
            Command::ToggleSolo(track) => self.flags.toggle_solo(track)?,
            Command::ToggleFreeze(track) => self.flags.toggle_freeze(track)?,
            Command::Seek(step) => self.clock.seek(step)?,
            Command::Start => self.start(),
            Command::Stop => self.stop(),
            Command::TogglePlayback => self.toggle_playback(),
            Command::SetTempo(bpm) => self.set_tempo(bpm)?,
            Command::ToggleMidi => self.toggle_midi(),
        }
        Ok(())
    }

    pub fn toggle_cell(&mut self, track: usize, step: usize) -> Result<(), SeqError> {
        self.grid = self.grid.toggle(track, step)?;
        Ok(())
    }

    pub fn set_grid(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub fn randomize(&mut self) {
        self.grid = Grid::random(&mut self.rng);
    }

    pub fn clear(&mut self) {
        self.grid = Grid::empty();
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.evolution.algorithm = algorithm;
    }

    /// Takes effect on the next tick. The ping-pong heading is kept.
    pub fn set_playback_direction(&mut self, direction: Direction) {
        self.clock.set_direction(direction);
    }

    /// Change ticks per generation without resetting the elapsed counter.
    pub fn set_evolution_speed(&mut self, steps: u32) -> Result<(), SeqError> {
        self.evolution.speed = EvolutionSpeed::new(steps)?;
        Ok(())
    }

    pub fn toggle_evolution_pause(&mut self) {
        self.evolution.paused = !self.evolution.paused;
    }

    pub fn toggle_mute(&mut self, track: usize) -> Result<(), SeqError> {
        self.flags.toggle_mute(track)
    }

    pub fn toggle_solo(&mut self, track: usize) -> Result<(), SeqError> {
        self.flags.toggle_solo(track)
    }

    pub fn toggle_freeze(&mut self, track: usize) -> Result<(), SeqError> {
        self.flags.toggle_freeze(track)
    }

    pub fn seek(&mut self, step: usize) -> Result<(), SeqError> {
        self.clock.seek(step)
    }

    /// Begin accepting ticks. Idempotent.
    pub fn start(&mut self) {
        if self.transport == TransportState::Stopped {
            self.transport = TransportState::Running;
            log::debug!("transport running from step {}", self.clock.step());
        }
    }

    /// Stop accepting ticks. The playhead and grid are kept for the next start.
    pub fn stop(&mut self) {
        if self.transport == TransportState::Running {
            self.transport = TransportState::Stopped;
            log::debug!("transport stopped at step {}", self.clock.step());
        }
    }

    pub fn toggle_playback(&mut self) {
        match self.transport {
            TransportState::Stopped => self.start(),
            TransportState::Running => self.stop(),
        }
    }

    pub fn set_tempo(&mut self, bpm: f32) -> Result<(), SeqError> {
        self.tempo = Tempo::from_bpm(bpm)?;
        Ok(())
    }

    /// Flip between the built-in voices and MIDI output.
    pub fn toggle_midi(&mut self) {
        self.route = self.route.toggled();
        log::debug!("output route {:?}", self.route);
    }

    // --- Queries ---

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn flags(&self) -> &TrackFlags {
        &self.flags
    }

    pub fn current_step(&self) -> usize {
        self.clock.step()
    }

    pub fn evolution(&self) -> &EvolutionState {
        &self.evolution
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    pub fn is_running(&self) -> bool {
        self.transport == TransportState::Running
    }

    pub fn route(&self) -> OutputRoute {
        self.route
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid: self.grid,
            current_step: self.clock.step(),
            track_mutes: self.flags.mute,
            track_solos: self.flags.solo,
            track_freezes: self.flags.freeze,
            algorithm: self.evolution.algorithm,
            playback_direction: self.clock.direction(),
            ping_pong_heading: self.clock.heading(),
            evolution_speed: self.evolution.speed.steps(),
            steps_since_last_evolution: self.evolution.steps_since_last,
            is_evolution_paused: self.evolution.paused,
            bpm: self.tempo.bpm(),
            transport: self.transport,
            output_route: self.route,
            generation: self.generation,
            ticks: self.ticks,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
