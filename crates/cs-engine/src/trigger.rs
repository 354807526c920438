//! Mute/solo resolution and trigger delivery.

use alloc::vec::Vec;
use arrayvec::ArrayVec;
use cs_ir::{TrackFlags, TriggerEvent, TRACKS};

/// Decide which tracks may sound this tick.
///
/// If any track is soloed only soloed tracks are eligible, whatever their
/// mute flag. Otherwise every unmuted track is. Freeze flags play no part.
pub fn eligible_tracks(mutes: &[bool; TRACKS], solos: &[bool; TRACKS]) -> [bool; TRACKS] {
    let any_solo = solos.iter().any(|&s| s);
    core::array::from_fn(|t| if any_solo { solos[t] } else { !mutes[t] })
}

/// Eligibility mask for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Eligible(pub [bool; TRACKS]);

impl Eligible {
    pub fn contains(&self, track: usize) -> bool {
        self.0.get(track).copied().unwrap_or(false)
    }

    pub fn tracks(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().enumerate().filter(|&(_, &on)| on).map(|(t, _)| t)
    }
}

impl From<&TrackFlags> for Eligible {
    fn from(flags: &TrackFlags) -> Self {
        Eligible(eligible_tracks(&flags.mute, &flags.solo))
    }
}

/// Receiver for trigger events (audio voice, MIDI out, recorder...).
pub trait TriggerSink {
    fn on_trigger(&mut self, event: TriggerEvent);
}

impl TriggerSink for Vec<TriggerEvent> {
    fn on_trigger(&mut self, event: TriggerEvent) {
        self.push(event);
    }
}

/// Fixed-capacity sink for the allocation-free tick path. One tick can
/// fire at most one event per track; overflow is dropped.
impl TriggerSink for ArrayVec<TriggerEvent, TRACKS> {
    fn on_trigger(&mut self, event: TriggerEvent) {
        if self.try_push(event).is_err() {
            log::warn!("trigger buffer full, dropping track {}", event.track);
        }
    }
}

impl<S: TriggerSink + ?Sized> TriggerSink for &mut S {
    fn on_trigger(&mut self, event: TriggerEvent) {
        (**self).on_trigger(event);
    }
}
