//! Audio resources
//!
//! The scheduler never decodes audio itself. It talks to an [`AudioProvider`]
//! that maps [`AudioKey`]s to [`AudioHandle`]s owned by the host's audio
//! subsystem.
//!
//! [`SampleLibrary`] is the standard provider: one handle per key in the
//! configured [`AudioRange`], each pointing at `<audio-path>/<format>/<key>.<format>`.
//! [`HeadlessHandle`] is a handle that only keeps time, for dry runs and tests.

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use super::types::{AudioKey, PlaybackEvent};
use crate::config::Config;
use crate::error::ChordError;

/// Notification queued by a handle until its provider is polled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    PlayStarted,
    PlaybackEnded,
}

/// A playable sample, modelled on an HTML media element
pub trait AudioHandle {
    fn play(&mut self);
    fn pause(&mut self);
    /// Playback position from the start of the sample
    fn current_time(&self) -> Duration;
    fn set_current_time(&mut self, position: Duration);
    fn is_paused(&self) -> bool;
    fn is_ended(&self) -> bool;

    /// Pop the oldest pending notification.
    ///
    /// Handles whose host pushes notifications straight to
    /// [`PlaybackScheduler::notify`](super::PlaybackScheduler::notify) keep the
    /// default, which never has any.
    fn take_notification(&mut self) -> Option<Notification> {
        None
    }
}

/// Looks up audio handles by key
pub trait AudioProvider {
    type Handle: AudioHandle;

    fn handle(&mut self, key: &AudioKey) -> Option<&mut Self::Handle>;

    fn contains(&self, key: &AudioKey) -> bool;

    /// Drain notifications raised since the last poll.
    fn poll_events(&mut self) -> Vec<PlaybackEvent> {
        Vec::new()
    }
}

/// Sample file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Ogg,
    Mp3,
}

impl AudioFormat {
    pub fn extension(self) -> &'static str {
        match self {
            AudioFormat::Ogg => "ogg",
            AudioFormat::Mp3 => "mp3",
        }
    }

    /// Pick the format to load: ogg if the host can decode it, mp3 otherwise.
    ///
    /// # Errors
    /// [`ChordError::UnsupportedPlaybackEnvironment`] when neither is supported.
    pub fn negotiate(support: AudioSupport) -> Result<Self, ChordError> {
        if support.ogg {
            Ok(AudioFormat::Ogg)
        } else if support.mp3 {
            Ok(AudioFormat::Mp3)
        } else {
            Err(ChordError::UnsupportedPlaybackEnvironment)
        }
    }
}

/// Formats the host can decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioSupport {
    pub ogg: bool,
    pub mp3: bool,
}

impl AudioSupport {
    pub fn all() -> Self {
        Self { ogg: true, mp3: true }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// Path of the sample for `key`
pub fn resource_path(audio_path: &Path, format: AudioFormat, key: &AudioKey) -> PathBuf {
    let extension = format.extension();
    audio_path
        .join(extension)
        .join(format!("{}.{}", key, extension))
}

#[derive(Debug)]
struct Sample<H> {
    path: PathBuf,
    handle: H,
}

/// One handle per key of the configured range
#[derive(Debug)]
pub struct SampleLibrary<H> {
    format: AudioFormat,
    samples: BTreeMap<AudioKey, Sample<H>>,
}

impl<H: AudioHandle> SampleLibrary<H> {
    /// Create a handle for every key in `config.range`.
    ///
    /// `factory` receives each key and its resource path and returns the host's
    /// handle for it.
    ///
    /// # Errors
    /// [`ChordError::UnsupportedPlaybackEnvironment`] if no format can be played.
    /// Nothing is loaded in that case, so no scheduler can be built on top.
    pub fn load<F>(config: &Config, support: AudioSupport, mut factory: F) -> Result<Self, ChordError>
    where
        F: FnMut(&AudioKey, &Path) -> H,
    {
        let format = AudioFormat::negotiate(support)?;

        let samples: BTreeMap<AudioKey, Sample<H>> = config
            .range
            .keys()
            .map(|key| {
                let path = resource_path(&config.audio_path, format, &key);
                let handle = factory(&key, &path);
                (key, Sample { path, handle })
            })
            .collect();

        debug!(
            format = format.extension(),
            octaves = config.range.octaves(),
            samples = samples.len(),
            "loaded sample library"
        );

        Ok(Self { format, samples })
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn path(&self, key: &AudioKey) -> Option<&Path> {
        self.samples.get(key).map(|sample| sample.path.as_path())
    }

    /// Keys of all loaded samples, lowest first
    pub fn keys(&self) -> impl Iterator<Item = &AudioKey> {
        self.samples.keys()
    }

    pub fn get(&self, key: &AudioKey) -> Option<&H> {
        self.samples.get(key).map(|sample| &sample.handle)
    }
}

impl<H: AudioHandle> AudioProvider for SampleLibrary<H> {
    type Handle = H;

    fn handle(&mut self, key: &AudioKey) -> Option<&mut H> {
        self.samples.get_mut(key).map(|sample| &mut sample.handle)
    }

    fn contains(&self, key: &AudioKey) -> bool {
        self.samples.contains_key(key)
    }

    fn poll_events(&mut self) -> Vec<PlaybackEvent> {
        let mut events = Vec::new();
        for (key, sample) in self.samples.iter_mut() {
            while let Some(notification) = sample.handle.take_notification() {
                events.push(match notification {
                    Notification::PlayStarted => PlaybackEvent::Started(*key),
                    Notification::PlaybackEnded => PlaybackEvent::Ended(*key),
                });
            }
        }
        events
    }
}

impl SampleLibrary<HeadlessHandle> {
    /// Move every headless handle's clock forward.
    pub fn advance(&mut self, by: Duration) {
        for sample in self.samples.values_mut() {
            sample.handle.advance(by);
        }
    }
}

/// A handle that produces no sound and only tracks position and state
///
/// Starts paused at position zero. Playing it queues a
/// [`Notification::PlayStarted`]; reaching `length` pauses it, marks it ended
/// and queues a [`Notification::PlaybackEnded`].
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessHandle {
    length: Duration,
    position: Duration,
    paused: bool,
    ended: bool,
    notifications: VecDeque<Notification>,
}

impl HeadlessHandle {
    pub fn new(length: Duration) -> Self {
        Self {
            length,
            position: Duration::ZERO,
            paused: true,
            ended: false,
            notifications: VecDeque::new(),
        }
    }

    pub fn length(&self) -> Duration {
        self.length
    }

    pub fn advance(&mut self, by: Duration) {
        if self.paused || self.ended {
            return;
        }
        self.position += by;
        if self.position >= self.length {
            self.position = self.length;
            self.ended = true;
            self.paused = true;
            self.notifications.push_back(Notification::PlaybackEnded);
        }
    }
}

impl AudioHandle for HeadlessHandle {
    fn play(&mut self) {
        if self.ended {
            self.position = Duration::ZERO;
            self.ended = false;
        }
        if self.paused {
            self.paused = false;
            self.notifications.push_back(Notification::PlayStarted);
        }
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn current_time(&self) -> Duration {
        self.position
    }

    fn set_current_time(&mut self, position: Duration) {
        self.position = position.min(self.length);
        if self.position < self.length {
            self.ended = false;
        }
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_ended(&self) -> bool {
        self.ended
    }

    fn take_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }
}
