//! Playback type definitions
//!
//! Keys that identify audio samples, the sample range, per-call playback
//! options, and the plan returned when a chord is scheduled.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::chord::NoteOptions;
use crate::config::{Config, DEFAULT_OCTAVE, DEFAULT_TIME_INTERVAL_MS};
use crate::note::PitchClass;

/// Identifies one audio sample: a pitch class in a given octave
///
/// Displays as the resource key, e.g. `"c#4"`.
///
/// # Ordering
/// Keys order by octave first, then pitch, so sorting keys walks up the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AudioKey {
    pub octave: u8,
    pub note: PitchClass,
}

impl AudioKey {
    pub fn new(note: PitchClass, octave: u8) -> Self {
        Self { octave, note }
    }
}

impl fmt::Display for AudioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.note, self.octave)
    }
}

impl Serialize for AudioKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The span of notes that have samples
///
/// Every octave between `lowest_octave` and `highest_octave` is complete,
/// except the lowest one (which starts at `lowest_note`) and the highest one
/// (which stops at `highest_note`). The default covers e2 to e6, a guitar's
/// range with a few frets to spare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioRange {
    pub lowest_octave: u8,
    pub highest_octave: u8,
    pub lowest_note: PitchClass,
    pub highest_note: PitchClass,
}

impl Default for AudioRange {
    fn default() -> Self {
        let e = PitchClass::new(4);
        Self {
            lowest_octave: 2,
            highest_octave: 6,
            lowest_note: e,
            highest_note: e,
        }
    }
}

impl AudioRange {
    /// Number of octaves touched by the range
    pub fn octaves(&self) -> usize {
        usize::from(self.highest_octave) - usize::from(self.lowest_octave) + 1
    }

    pub fn contains_octave(&self, octave: u8) -> bool {
        (self.lowest_octave..=self.highest_octave).contains(&octave)
    }

    pub fn contains(&self, key: &AudioKey) -> bool {
        if !self.contains_octave(key.octave) {
            return false;
        }
        if key.octave == self.lowest_octave && key.note < self.lowest_note {
            return false;
        }
        if key.octave == self.highest_octave && key.note > self.highest_note {
            return false;
        }
        true
    }

    /// Every key in the range, lowest first
    pub fn keys(&self) -> impl Iterator<Item = AudioKey> {
        let range = *self;
        (range.lowest_octave..=range.highest_octave).flat_map(move |octave| {
            let from = if octave == range.lowest_octave {
                range.lowest_note.index()
            } else {
                0
            };
            let to = if octave == range.highest_octave {
                range.highest_note.index()
            } else {
                11
            };
            (from..=to).map(move |index| AudioKey::new(PitchClass::new(index), octave))
        })
    }
}

/// Options for a single [`play`](super::PlaybackScheduler::play) call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Delay between two successive notes
    pub time_interval: Duration,
    pub octave: u8,
    /// Left rotations of the chord notes (see [`NoteOptions`])
    pub invert: usize,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            time_interval: Duration::from_millis(DEFAULT_TIME_INTERVAL_MS),
            octave: DEFAULT_OCTAVE,
            invert: 0,
        }
    }
}

impl PlaybackOptions {
    /// Defaults taken from the configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            time_interval: config.time_interval,
            octave: config.octave,
            invert: 0,
        }
    }

    pub fn with_invert(mut self, invert: usize) -> Self {
        self.invert = invert;
        self
    }

    pub fn with_octave(mut self, octave: u8) -> Self {
        self.octave = octave;
        self
    }

    pub fn with_time_interval(mut self, time_interval: Duration) -> Self {
        self.time_interval = time_interval;
        self
    }

    pub fn note_options(&self) -> NoteOptions {
        NoteOptions::inverted(self.invert)
    }
}

/// Notification raised by the audio subsystem about a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackEvent {
    /// The sample actually started sounding
    Started(AudioKey),
    /// The sample reached its end
    Ended(AudioKey),
}

/// Handle for a pending timer, unique per timer facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TimerId(pub u64);

/// What a timer does when it fires: start the sample for `key`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteTrigger {
    pub key: AudioKey,
    /// Position of the note within the chord
    pub position: usize,
}

/// One note of a scheduled chord
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledNote {
    pub key: AudioKey,
    pub position: usize,
    /// Delay from the `play` call, in milliseconds
    pub offset_ms: u64,
    pub timer: TimerId,
}

/// Result of scheduling a chord
///
/// `skipped` lists notes that had no sample; it is only ever non-empty under
/// the lenient missing-audio policy.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledChord {
    pub chord: String,
    pub root: String,
    pub octave: u8,
    pub notes: Vec<ScheduledNote>,
    pub skipped: Vec<AudioKey>,
}
