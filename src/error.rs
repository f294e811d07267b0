//! # Error Types
//!
//! This module defines all error types for the chords library.
//!
//! Every error carries enough context (chord id, root name, resource key) for a
//! caller to report the problem without re-deriving it.
//!
//! ## Error Types
//! - `InvalidChordDefinition` - A chord type failed validation at registration time
//! - `UnknownRootNote` - A root note name is not one of the 12 canonical names
//! - `UnknownChordType` - No chord type is registered under the requested id
//! - `MissingAudioResource` - A note + octave has no loaded audio sample
//! - `UnsupportedPlaybackEnvironment` - The host cannot decode any sample format
//! - `InvalidConfig` - The YAML configuration is malformed or inconsistent
//!
//! ## Usage
//! ```rust
//! use chords::{ChordContext, ChordError};
//!
//! let ctx = ChordContext::new();
//! match ctx.formatted_notes("min7", "h", 0) {
//!     Ok(notes) => println!("{}", notes),
//!     Err(ChordError::UnknownRootNote { root, .. }) => {
//!         eprintln!("'{}' is not a note", root);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChordError {
    /// A chord type definition was rejected.
    ///
    /// Occurs when the id is empty and the pattern is not a major triad, or when
    /// the interval pattern has fewer than two notes. The registry is left untouched.
    ///
    /// # Example
    /// ```
    /// # use chords::ChordError;
    /// let err = ChordError::InvalidChordDefinition {
    ///     id: "solo".to_string(),
    ///     message: "A chord must consist of at least two notes".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Invalid chord definition 'solo': A chord must consist of at least two notes"
    /// );
    /// ```
    #[error("Invalid chord definition '{id}': {message}")]
    InvalidChordDefinition { id: String, message: String },

    /// The root note is not in the canonical chromatic set.
    ///
    /// # Example
    /// ```
    /// # use chords::ChordError;
    /// let err = ChordError::UnknownRootNote {
    ///     root: "h".to_string(),
    ///     chord: "maj".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Unknown root note 'h' given for chord 'maj'");
    /// ```
    #[error("Unknown root note '{root}' given for chord '{chord}'")]
    UnknownRootNote { root: String, chord: String },

    /// No chord type is registered under this id.
    #[error("Unknown chord type: {0}")]
    UnknownChordType(String),

    /// The resolved note and octave fall outside the loaded sample range.
    #[error("No audio resource loaded for '{key}'")]
    MissingAudioResource { key: String },

    /// Neither ogg nor mp3 playback is available on the host.
    #[error("Audio playback is not supported: neither ogg nor mp3 can be decoded")]
    UnsupportedPlaybackEnvironment,

    /// Invalid configuration.
    ///
    /// # Example
    /// ```
    /// # use chords::ChordError;
    /// let err = ChordError::InvalidConfig("Invalid lowest note: h".to_string());
    /// assert_eq!(err.to_string(), "Invalid configuration: Invalid lowest note: h");
    /// ```
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
