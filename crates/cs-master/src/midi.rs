//! Trigger-to-MIDI note mapping.

use cs_engine::TriggerSink;
use cs_ir::{Timestamp, TrackInfo, TriggerEvent, DEFAULT_KIT, TRACKS};

pub const NOTE_ON: u8 = 0x90;
pub const NOTE_OFF: u8 = 0x80;
pub const NOTE_ON_VELOCITY: u8 = 0x7F;
pub const NOTE_OFF_VELOCITY: u8 = 0x40;
/// Time between a note-on and its note-off.
pub const NOTE_GATE_MICROS: u64 = 100_000;

/// A timestamped three-byte channel message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MidiMessage {
    pub time: Timestamp,
    pub bytes: [u8; 3],
}

impl MidiMessage {
    pub fn is_note_on(&self) -> bool {
        self.bytes[0] & 0xF0 == NOTE_ON
    }
}

/// Turns triggers into note-on/note-off pairs using a drum kit.
///
/// Nothing is sent anywhere; messages accumulate until taken.
#[derive(Clone, Debug)]
pub struct MidiNoteSink {
    kit: &'static [TrackInfo; TRACKS],
    channel: u8,
    pending: Vec<MidiMessage>,
}

impl MidiNoteSink {
    /// Sink on channel 1 with the default kit.
    pub fn new() -> Self {
        Self::with_kit(&DEFAULT_KIT, 0)
    }

    /// `channel` is zero-based and masked to 0..16.
    pub fn with_kit(kit: &'static [TrackInfo; TRACKS], channel: u8) -> Self {
        Self { kit, channel: channel & 0x0F, pending: Vec::new() }
    }

    pub fn note_for(&self, track: usize) -> Option<u8> {
        self.kit.get(track).map(|info| info.midi_note)
    }

    /// Messages whose time is at or before `until`, in time order.
    ///
    /// Note-offs scheduled later stay queued.
    pub fn take_until(&mut self, until: Timestamp) -> Vec<MidiMessage> {
        self.pending.sort();
        let split = self.pending.partition_point(|m| m.time <= until);
        self.pending.drain(..split).collect()
    }

    /// Every queued message, in time order.
    pub fn take_all(&mut self) -> Vec<MidiMessage> {
        self.pending.sort();
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

impl Default for MidiNoteSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerSink for MidiNoteSink {
    fn on_trigger(&mut self, event: TriggerEvent) {
        let Some(note) = self.note_for(event.track_index()) else {
            log::warn!("no kit entry for track {}", event.track);
            return;
        };
        self.pending.push(MidiMessage {
            time: event.time,
            bytes: [NOTE_ON | self.channel, note, NOTE_ON_VELOCITY],
        });
        self.pending.push(MidiMessage {
            time: event.time.add_micros(NOTE_GATE_MICROS),
            bytes: [NOTE_OFF | self.channel, note, NOTE_OFF_VELOCITY],
        });
    }
}
