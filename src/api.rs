//! # Public API
//!
//! This module contains the main entry point for the chords library.
//!
//! [`ChordContext`] owns everything a caller needs: the chord registry (seeded
//! with the built-in catalogue plus any chord types from the configuration)
//! and the validated configuration. There is no process-wide state; create a
//! context and pass it around.
//!
//! ## Lookup Functions
//!
//! - [`ChordContext::chord()`] - Chord type by id
//! - [`ChordContext::notes()`] - Lowercase note names for a chord on a root
//! - [`ChordContext::formatted_notes()`] - Display string, e.g. `"C, E, G"`
//!
//! ## Typical Usage
//!
//! ```rust
//! use chords::ChordContext;
//!
//! let ctx = ChordContext::new();
//!
//! assert_eq!(ctx.notes("maj", "C", 0)?, vec!["c", "e", "g"]);
//! assert_eq!(ctx.formatted_notes("min7", "c", 0)?, "C, D#, G, A#");
//!
//! // First inversion: the root moves to the end
//! assert_eq!(ctx.formatted_notes("maj", "c", 1)?, "E, G, C");
//! # Ok::<(), chords::ChordError>(())
//! ```
//!
//! ## Custom Chord Types
//!
//! ```rust
//! use chords::ChordContext;
//!
//! let ctx = ChordContext::from_yaml(r#"
//! chords:
//!   - id: quartal
//!     intervals: [5, 10]
//!     short-name: q
//! "#)?;
//!
//! assert_eq!(ctx.formatted_notes("quartal", "d", 0)?, "D, G, C");
//! # Ok::<(), chords::ChordError>(())
//! ```

use std::path::Path;

use tracing::debug;

use crate::chord::{Chord, NoteOptions};
use crate::config::Config;
use crate::error::ChordError;
use crate::playback::{
    AudioHandle, AudioKey, AudioSupport, PlaybackOptions, PlaybackScheduler, SampleLibrary, Timer,
};
use crate::registry::ChordRegistry;

/// Registry plus configuration
#[derive(Debug, Clone)]
pub struct ChordContext {
    registry: ChordRegistry,
    config: Config,
}

impl Default for ChordContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ChordContext {
    /// A context with the built-in chord types and the default configuration.
    pub fn new() -> Self {
        Self {
            registry: ChordRegistry::with_defaults(),
            config: Config::default(),
        }
    }

    /// Seed the built-in chord types, then register the configuration's own.
    ///
    /// A configured chord type with a built-in id replaces the built-in one.
    ///
    /// # Errors
    /// [`ChordError::InvalidChordDefinition`] for the first configured chord
    /// type that fails validation.
    pub fn from_config(config: Config) -> Result<Self, ChordError> {
        let mut registry = ChordRegistry::with_defaults();
        for declaration in &config.chords {
            let chord = registry.register(
                &declaration.id,
                declaration.intervals.clone(),
                declaration.options(),
            )?;
            debug!(id = chord.id(), intervals = ?chord.intervals(), "registered chord type");
        }
        Ok(Self { registry, config })
    }

    /// Parse a YAML configuration and build a context from it.
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        Self::from_config(Config::from_yaml(content)?)
    }

    /// Read a YAML configuration file and build a context from it.
    pub fn load(path: &Path) -> Result<Self, ChordError> {
        Self::from_config(Config::load(path)?)
    }

    pub fn registry(&self) -> &ChordRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ChordRegistry {
        &mut self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Chord type by id.
    ///
    /// # Errors
    /// [`ChordError::UnknownChordType`] if no chord type has that id.
    pub fn chord(&self, id: &str) -> Result<&Chord, ChordError> {
        self.registry.require(id)
    }

    /// Note names of chord type `id` on `root`, inverted `invert` times.
    ///
    /// # Errors
    /// - [`ChordError::UnknownChordType`] for an unregistered id
    /// - [`ChordError::UnknownRootNote`] for a root outside the note table
    pub fn notes(&self, id: &str, root: &str, invert: usize) -> Result<Vec<&'static str>, ChordError> {
        self.chord(id)?.note_names(root, NoteOptions::inverted(invert))
    }

    /// Like [`ChordContext::notes`], joined with ", " and upper-cased.
    pub fn formatted_notes(&self, id: &str, root: &str, invert: usize) -> Result<String, ChordError> {
        self.chord(id)?
            .formatted_notes(root, NoteOptions::inverted(invert))
    }

    /// Playback defaults from the configuration
    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions::from_config(&self.config)
    }

    /// Load one sample per key of the configured range.
    ///
    /// # Errors
    /// [`ChordError::UnsupportedPlaybackEnvironment`] if `support` has no
    /// playable format.
    pub fn load_samples<H, F>(&self, support: AudioSupport, factory: F) -> Result<SampleLibrary<H>, ChordError>
    where
        H: AudioHandle,
        F: FnMut(&AudioKey, &Path) -> H,
    {
        SampleLibrary::load(&self.config, support, factory)
    }

    /// Scheduler over `library`, using the configured missing-audio policy.
    pub fn scheduler<H: AudioHandle, T: Timer>(
        &self,
        library: SampleLibrary<H>,
        timer: T,
    ) -> PlaybackScheduler<SampleLibrary<H>, T> {
        PlaybackScheduler::new(library, timer, self.config.missing_audio)
    }
}
