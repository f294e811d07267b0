//! # Playback Module
//!
//! Strum chords on pre-loaded audio samples, one note after another.
//!
//! ## Purpose
//! Given a chord type, a root and an octave, this module:
//! 1. **Resolves samples** - each chord note maps to the sample key `<note><octave>`
//! 2. **Schedules notes** - note `k` starts `k * time_interval` after the call
//! 3. **Tracks what sounds** - samples report when they start and end, so the
//!    next chord can silence the previous one
//!
//! ## Sub-modules
//! - `types` - AudioKey, AudioRange, PlaybackOptions and the scheduled plan
//! - `audio` - AudioHandle/AudioProvider traits, format negotiation, SampleLibrary
//! - `timer` - Timer trait and the explicitly advanced VirtualTimer
//! - `scheduler` - PlaybackScheduler: reset, play, fire and notification handling
//!
//! ## Key Types
//! - [`PlaybackScheduler`] - Owns the playing and queued sets
//! - [`SampleLibrary`] - One handle per key in the configured range
//! - [`ScheduledChord`] - What `play` scheduled (serializable for JSON output)
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use chords::ChordContext;
//! use chords::playback::{
//!     AudioSupport, HeadlessHandle, PlaybackScheduler, SampleLibrary, VirtualTimer,
//! };
//!
//! let ctx = ChordContext::new();
//! let library = SampleLibrary::load(ctx.config(), AudioSupport::all(), |_, _| {
//!     HeadlessHandle::new(Duration::from_secs(2))
//! })?;
//! let mut scheduler =
//!     PlaybackScheduler::new(library, VirtualTimer::new(), ctx.config().missing_audio);
//!
//! let plan = scheduler.play(ctx.chord("min")?, "a", &ctx.playback_options())?;
//! let offsets: Vec<u64> = plan.notes.iter().map(|n| n.offset_ms).collect();
//! assert_eq!(offsets, vec![0, 20, 40]);
//!
//! // Only the root is due right away
//! assert_eq!(scheduler.advance(Duration::ZERO), 1);
//! assert_eq!(scheduler.playing().len(), 1);
//! # Ok::<(), chords::ChordError>(())
//! ```
//!
//! ## Single-Threaded Model
//!
//! Nothing here spawns threads or sleeps. Timers are data: a [`Timer`] returns
//! a [`TimerId`] for each [`NoteTrigger`], and the host hands due triggers back
//! to [`PlaybackScheduler::fire`]. Sample start/end notifications arrive either
//! through [`PlaybackScheduler::notify`] or, for handles that queue them, via
//! [`PlaybackScheduler::pump`].
//!
//! ## Stopping
//!
//! A new `play` stops the previous chord first. Samples that are sounding are
//! paused and rewound; notes not yet triggered are cancelled, and a cancelled
//! timer that still gets delivered is ignored.

mod audio;
mod scheduler;
mod timer;
mod types;


pub use audio::{
    resource_path, AudioFormat, AudioHandle, AudioProvider, AudioSupport, HeadlessHandle,
    Notification, SampleLibrary,
};
pub use scheduler::PlaybackScheduler;
pub use timer::{Timer, VirtualTimer};
pub use types::{
    AudioKey, AudioRange, NoteTrigger, PlaybackEvent, PlaybackOptions, ScheduledChord,
    ScheduledNote, TimerId,
};
