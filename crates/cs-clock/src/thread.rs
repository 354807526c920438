//! Wall-clock driver running on a dedicated thread.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use cs_ir::{Tempo, Timestamp};

use crate::traits::{ClockDriver, ClockError, TickCallback};

/// Longest single sleep, bounding how long `stop` waits for the thread.
const MAX_SLEEP_SLICE: Duration = Duration::from_millis(5);

/// Ticks at the current tempo using deadline scheduling.
///
/// Each deadline is computed from the run's origin rather than from the
/// previous wake-up, so sleep overshoot does not accumulate as drift. The
/// pending tick is always one current step after the last one, so a tempo
/// change takes effect within one sleep slice.
pub struct ThreadClock {
    tempo: Tempo,
    step_micros: Arc<AtomicU64>,
    /// Scheduled time of the next tick
    position: Arc<AtomicU64>,
    callback: Arc<Mutex<Option<TickCallback>>>,
    playback: Option<ClockHandle>,
}

struct ClockHandle {
    stop_signal: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl ThreadClock {
    pub fn new(tempo: Tempo) -> Self {
        Self {
            tempo,
            step_micros: Arc::new(AtomicU64::new(tempo.step_micros())),
            position: Arc::new(AtomicU64::new(0)),
            callback: Arc::new(Mutex::new(None)),
            playback: None,
        }
    }

    /// Scheduled time of the next tick.
    pub fn position(&self) -> Timestamp {
        Timestamp::from_micros(self.position.load(Ordering::Acquire))
    }
}

impl Default for ThreadClock {
    fn default() -> Self {
        Self::new(Tempo::default())
    }
}

impl ClockDriver for ThreadClock {
    fn set_callback(&mut self, callback: TickCallback) {
        match self.callback.lock() {
            Ok(mut slot) => *slot = Some(callback),
            Err(poisoned) => *poisoned.into_inner() = Some(callback),
        }
    }

    fn start(&mut self) -> Result<(), ClockError> {
        if self.playback.is_some() {
            return Ok(());
        }
        let installed = self.callback.lock().map(|c| c.is_some()).unwrap_or(false);
        if !installed {
            return Err(ClockError::NoCallback);
        }

        let stop_signal = Arc::new(AtomicBool::new(false));
        let stop = stop_signal.clone();
        let callback = self.callback.clone();
        let step_micros = self.step_micros.clone();
        let position = self.position.clone();

        let thread = std::thread::Builder::new()
            .name("cellseq-clock".into())
            .spawn(move || clock_thread(callback, stop, step_micros, position))
            .map_err(|e| ClockError::Spawn(e.to_string()))?;

        log::debug!("clock thread started at {}", self.tempo);
        self.playback = Some(ClockHandle { stop_signal, thread: Some(thread) });
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            pb.stop_signal.store(true, Ordering::Release);
            if let Some(handle) = pb.thread.take() {
                if handle.join().is_err() {
                    log::error!("clock thread panicked");
                }
            }
            log::debug!("clock thread stopped");
        }
    }

    fn set_tempo(&mut self, tempo: Tempo) {
        self.tempo = tempo;
        self.step_micros.store(tempo.step_micros(), Ordering::Release);
    }

    fn tempo(&self) -> Tempo {
        self.tempo
    }

    fn is_running(&self) -> bool {
        self.playback.is_some()
    }
}

impl Drop for ThreadClock {
    fn drop(&mut self) {
        self.stop();
    }
}

fn clock_thread(
    callback: Arc<Mutex<Option<TickCallback>>>,
    stop_signal: Arc<AtomicBool>,
    step_micros: Arc<AtomicU64>,
    position: Arc<AtomicU64>,
) {
    let first = position.load(Ordering::Acquire);
    let mut origin = Instant::now();
    let mut base = first;
    let mut last: Option<u64> = None;

    loop {
        let next = wait_for_tick(&stop_signal, || {
            let at = last.map_or(first, |t| t + step_micros.load(Ordering::Acquire));
            (at, origin + Duration::from_micros(at.saturating_sub(base)))
        });
        let Some(at) = next else {
            break;
        };

        {
            let Ok(mut guard) = callback.lock() else {
                log::error!("tick callback poisoned, stopping clock");
                break;
            };
            if let Some(tick) = guard.as_mut() {
                tick(Timestamp::from_micros(at));
            }
        }

        last = Some(at);
        let period = step_micros.load(Ordering::Acquire);
        position.store(at + period, Ordering::Release);

        // Fell more than a step behind: resync instead of bursting to catch up
        let due = origin + Duration::from_micros(at + period - base);
        if let Some(late) = Instant::now().checked_duration_since(due) {
            if late > Duration::from_micros(period) {
                log::warn!("clock {}us late, resyncing", late.as_micros());
                origin = Instant::now();
                base = at + period;
            }
        }
    }
}

/// Sleep in short slices until the tick from `deadline` is due and return its
/// time, or `None` if stopped first. The deadline is re-read every slice, so a
/// tempo change moves the tick already being waited on.
fn wait_for_tick(stop_signal: &AtomicBool, deadline: impl Fn() -> (u64, Instant)) -> Option<u64> {
    loop {
        if stop_signal.load(Ordering::Acquire) {
            return None;
        }
        let (at, due) = deadline();
        let now = Instant::now();
        if now >= due {
            return Some(at);
        }
        std::thread::sleep((due - now).min(MAX_SLEEP_SLICE));
    }
}
