//! cellseq - terminal front-end for the generative rhythm sequencer.
//!
//! Plays a number of bars and prints each trigger as a kit voice (or as
//! MIDI messages with `--midi`), then the final grid or the full state as JSON.
//!
//! Usage:
//!   cellseq --randomize --bars 4
//!   cellseq --midi --offline --randomize
//!   cellseq --offline --json --seed 7 --randomize --algorithm highlife
//!   RUST_LOG=debug cellseq --speed 4

mod args;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cs_clock::{ManualClock, ThreadClock};
use cs_engine::TriggerSink;
use cs_master::{
    Controller, MidiMessage, MidiNoteSink, OutputRoute, SessionConfig, Snapshot, TriggerEvent,
};

use args::Args;

/// Sixteenth-note steps in one 4/4 bar.
const STEPS_PER_BAR: u64 = 16;
/// How often realtime mode drains the trigger queue.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.session_config()?;
    let ticks = u64::from(args.bars) * STEPS_PER_BAR;

    println!(
        "{} | {} | every {} steps | {} | {} bars",
        config.tempo,
        config.algorithm,
        config.evolution_speed.steps(),
        config.direction.label(),
        args.bars
    );

    let snapshot = if args.offline {
        run_offline(config, ticks)?
    } else {
        run_realtime(config, ticks)?
    };

    if args.json {
        let json = serde_json::to_string_pretty(&snapshot).context("Failed to serialize snapshot")?;
        println!("{}", json);
    } else {
        println!();
        println!("{}", snapshot.grid);
        println!(
            "step {:02} | generation {} | population {}",
            snapshot.current_step,
            snapshot.generation,
            snapshot.grid.population()
        );
    }
    Ok(())
}

/// Tick with a wall-clock thread until `ticks` steps have played.
fn run_realtime(config: SessionConfig, ticks: u64) -> Result<Snapshot> {
    let mut out = TriggerPrinter::new(config.route);
    let clock = ThreadClock::new(config.tempo);
    let mut ctrl = Controller::new(clock, config);
    ctrl.start().context("Failed to start playback")?;

    while ctrl.snapshot().ticks < ticks {
        std::thread::sleep(POLL_INTERVAL);
        ctrl.drain_triggers(&mut out);
    }

    ctrl.stop();
    ctrl.drain_triggers(&mut out);
    out.finish();
    Ok(ctrl.snapshot())
}

/// Tick as fast as possible with a caller-driven clock.
fn run_offline(config: SessionConfig, ticks: u64) -> Result<Snapshot> {
    let mut out = TriggerPrinter::new(config.route);
    let clock = ManualClock::new(config.tempo);
    let mut ctrl = Controller::new(clock, config);
    ctrl.start().context("Failed to start playback")?;

    for _ in 0..ticks {
        ctrl.clock_mut().fire();
        ctrl.drain_triggers(&mut out);
    }

    log::debug!("offline run ended at {}us", ctrl.clock().now().micros);
    ctrl.stop();
    out.finish();
    Ok(ctrl.snapshot())
}

/// Prints triggers as kit voices, or as MIDI messages on the MIDI route.
struct TriggerPrinter {
    route: OutputRoute,
    midi: MidiNoteSink,
}

impl TriggerPrinter {
    fn new(route: OutputRoute) -> Self {
        Self { route, midi: MidiNoteSink::new() }
    }

    /// Print note-offs still pending at the end of the run.
    fn finish(&mut self) {
        self.midi.take_all().iter().for_each(print_midi);
    }
}

impl TriggerSink for TriggerPrinter {
    fn on_trigger(&mut self, event: TriggerEvent) {
        match self.route {
            OutputRoute::Synth => {
                let info = event.info();
                println!(
                    "{:>9.3}s  {:<10}  note {}",
                    event.time.as_secs_f64(),
                    info.name,
                    info.midi_note
                );
            }
            OutputRoute::Midi => {
                self.midi.on_trigger(event);
                self.midi.take_until(event.time).iter().for_each(print_midi);
            }
        }
    }
}

fn print_midi(msg: &MidiMessage) {
    let [status, note, velocity] = msg.bytes;
    println!(
        "{:>9.3}s  [{:02X} {:02X} {:02X}]",
        msg.time.as_secs_f64(),
        status,
        note,
        velocity
    );
}
