//! Chord playback scheduling
//!
//! Strums a chord by starting one sample per note, each `time_interval` after
//! the previous one. Only one chord plays at a time: every `play` begins with a
//! `reset` that cancels the previous chord's pending notes and stops whatever
//! it already started.

use std::time::Duration;

use tracing::{debug, warn};

use super::audio::{AudioHandle, AudioProvider};
use super::timer::{Timer, VirtualTimer};
use super::types::{
    AudioKey, NoteTrigger, PlaybackEvent, PlaybackOptions, ScheduledChord, ScheduledNote, TimerId,
};
use crate::chord::Chord;
use crate::config::MissingAudioPolicy;
use crate::error::ChordError;
use crate::note::PitchClass;

/// Schedules strummed chords on an audio provider
///
/// # State
/// - `playing`: keys whose sample announced it started and has not ended yet
/// - `queued`: timers of notes that have not been triggered yet
///
/// Both are owned here and replaced on every [`play`](Self::play).
#[derive(Debug)]
pub struct PlaybackScheduler<P, T> {
    provider: P,
    timer: T,
    policy: MissingAudioPolicy,
    playing: Vec<AudioKey>,
    queued: Vec<TimerId>,
}

impl<P: AudioProvider, T: Timer> PlaybackScheduler<P, T> {
    pub fn new(provider: P, timer: T, policy: MissingAudioPolicy) -> Self {
        Self {
            provider,
            timer,
            policy,
            playing: Vec::new(),
            queued: Vec::new(),
        }
    }

    /// Cancel every queued note and stop every sample that is audibly playing.
    ///
    /// Notifications still queued by the provider are applied first, so a
    /// sample started through [`fire`](Self::fire) without a later
    /// [`pump`](Self::pump) is still stopped.
    ///
    /// A playing sample is stopped (paused and rewound to the start) only if it
    /// is not paused, not ended and has moved past position zero. Both sets are
    /// emptied. Calling this on an idle scheduler does nothing.
    pub fn reset(&mut self) {
        self.pump();

        for id in self.queued.drain(..) {
            self.timer.cancel(id);
        }

        for key in self.playing.drain(..) {
            if let Some(handle) = self.provider.handle(&key) {
                if !handle.is_paused() && !handle.is_ended() && handle.current_time() > Duration::ZERO
                {
                    handle.pause();
                    handle.set_current_time(Duration::ZERO);
                    debug!(%key, "stopped sample");
                }
            }
        }
    }

    /// Strum `chord` on `root`.
    ///
    /// # Steps
    /// 1. Compute the (possibly inverted) chord notes
    /// 2. Resolve each note to the key `<note><octave>`
    /// 3. [`reset`](Self::reset) any previous chord
    /// 4. Schedule note `k` after `k * time_interval`
    ///
    /// Failures in steps 1 and 2 happen before the reset, so a rejected call
    /// leaves the previous chord playing.
    ///
    /// # Errors
    /// - [`ChordError::UnknownRootNote`] if `root` is not a note name
    /// - [`ChordError::MissingAudioResource`] if a key has no sample and the
    ///   policy is [`MissingAudioPolicy::Strict`]
    pub fn play(
        &mut self,
        chord: &Chord,
        root: &str,
        options: &PlaybackOptions,
    ) -> Result<ScheduledChord, ChordError> {
        let notes = chord.notes(root, options.note_options())?;

        debug!(
            chord = chord.id(),
            root,
            notes = ?notes.iter().map(|note| note.name()).collect::<Vec<_>>(),
            "computed chord notes"
        );

        let (resolved, skipped) = self.resolve(&notes, options.octave)?;

        self.reset();

        let mut scheduled = Vec::with_capacity(resolved.len());
        for (position, key) in resolved {
            let offset = options.time_interval * position as u32;
            let timer = self.timer.schedule_after(offset, NoteTrigger { key, position });
            self.queued.push(timer);

            debug!(%key, offset_ms = offset.as_millis() as u64, "scheduled note");

            scheduled.push(ScheduledNote {
                key,
                position,
                offset_ms: offset.as_millis() as u64,
                timer,
            });
        }

        Ok(ScheduledChord {
            chord: chord.id().to_string(),
            root: root.to_lowercase(),
            octave: options.octave,
            notes: scheduled,
            skipped,
        })
    }

    /// Map notes to keys, applying the missing-audio policy.
    fn resolve(
        &self,
        notes: &[PitchClass],
        octave: u8,
    ) -> Result<(Vec<(usize, AudioKey)>, Vec<AudioKey>), ChordError> {
        let mut resolved = Vec::with_capacity(notes.len());
        let mut skipped = Vec::new();

        for (position, note) in notes.iter().enumerate() {
            let key = AudioKey::new(*note, octave);
            if self.provider.contains(&key) {
                resolved.push((position, key));
                continue;
            }
            match self.policy {
                MissingAudioPolicy::Strict => {
                    return Err(ChordError::MissingAudioResource {
                        key: key.to_string(),
                    });
                }
                MissingAudioPolicy::Lenient => {
                    warn!(%key, "no audio resource loaded, skipping note");
                    skipped.push(key);
                }
            }
        }

        Ok((resolved, skipped))
    }

    /// Deliver a due timer. Starts the sample unless the timer is no longer
    /// queued (cancelled by a reset). Returns whether a sample was started.
    pub fn fire(&mut self, id: TimerId, trigger: NoteTrigger) -> bool {
        let slot = match self.queued.iter().position(|queued| *queued == id) {
            Some(slot) => slot,
            None => {
                debug!(timer = id.0, key = %trigger.key, "ignoring stale timer");
                return false;
            }
        };
        self.queued.remove(slot);

        match self.provider.handle(&trigger.key) {
            Some(handle) => {
                handle.play();
                true
            }
            None => {
                warn!(key = %trigger.key, "audio resource disappeared before playback");
                false
            }
        }
    }

    /// Apply a notification from the audio subsystem.
    pub fn notify(&mut self, event: PlaybackEvent) {
        match event {
            PlaybackEvent::Started(key) => {
                if !self.playing.contains(&key) {
                    self.playing.push(key);
                }
            }
            PlaybackEvent::Ended(key) => {
                self.playing.retain(|playing| *playing != key);
            }
        }
    }

    /// Apply every notification the provider has queued. Returns how many.
    pub fn pump(&mut self) -> usize {
        let events = self.provider.poll_events();
        let count = events.len();
        for event in events {
            self.notify(event);
        }
        count
    }

    /// Keys currently sounding
    pub fn playing(&self) -> &[AudioKey] {
        &self.playing
    }

    /// Timers of notes not yet triggered
    pub fn queued(&self) -> &[TimerId] {
        &self.queued
    }

    pub fn is_idle(&self) -> bool {
        self.playing.is_empty() && self.queued.is_empty()
    }

    pub fn policy(&self) -> MissingAudioPolicy {
        self.policy
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }
}

impl<P: AudioProvider> PlaybackScheduler<P, VirtualTimer> {
    /// Advance the virtual clock, fire due notes, then apply the provider's
    /// notifications. Returns the number of samples started.
    pub fn advance(&mut self, by: Duration) -> usize {
        let due = self.timer.advance(by);
        let mut started = 0;
        for (id, trigger) in due {
            if self.fire(id, trigger) {
                started += 1;
            }
        }
        self.pump();
        started
    }
}
