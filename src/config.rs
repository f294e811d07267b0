//! # Configuration
//!
//! Playback defaults, the sample range and custom chord types, read from YAML.
//!
//! ## Format
//! ```yaml
//! audio-path: ../audio/
//! time-interval: 20        # milliseconds between strummed notes
//! octave: 4
//! missing-audio: strict    # or lenient
//! range:
//!   lowest-octave: 2
//!   highest-octave: 6
//!   lowest-note: e
//!   highest-note: e
//! chords:
//!   - id: maj7sharp11
//!     intervals: [4, 7, 11, 18]
//!     short-name: "M7♯11"
//!     long-name: Major 7 sharp 11
//! ```
//!
//! Every key is optional. Unknown keys are rejected so that a misspelt option
//! does not silently fall back to its default.
//!
//! ## Example
//! ```rust
//! use chords::{Config, MissingAudioPolicy};
//!
//! let config = Config::from_yaml("time-interval: 50\nmissing-audio: lenient")?;
//! assert_eq!(config.time_interval.as_millis(), 50);
//! assert_eq!(config.missing_audio, MissingAudioPolicy::Lenient);
//! assert_eq!(config.octave, 4);
//! # Ok::<(), chords::ChordError>(())
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::chord::ChordOptions;
use crate::error::ChordError;
use crate::note::PitchClass;
use crate::playback::AudioRange;

/// Default delay between two strummed notes
pub const DEFAULT_TIME_INTERVAL_MS: u64 = 20;

/// Default playback octave
pub const DEFAULT_OCTAVE: u8 = 4;

/// Default location of the sample files
pub const DEFAULT_AUDIO_PATH: &str = "../audio/";

/// What to do when a note has no loaded sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingAudioPolicy {
    /// Refuse to play the chord
    #[default]
    Strict,
    /// Skip the note and log a warning
    Lenient,
}

/// A chord type declared in the configuration file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ChordDeclaration {
    #[serde(default)]
    pub id: String,
    pub intervals: Vec<u8>,
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub important_notes: Vec<u8>,
}

impl ChordDeclaration {
    pub fn options(&self) -> ChordOptions {
        ChordOptions {
            short_name: self.short_name.clone(),
            long_name: self.long_name.clone(),
            important_notes: self.important_notes.clone(),
        }
    }
}

/// Validated configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub audio_path: PathBuf,
    pub time_interval: Duration,
    pub octave: u8,
    pub missing_audio: MissingAudioPolicy,
    pub range: AudioRange,
    pub chords: Vec<ChordDeclaration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            audio_path: PathBuf::from(DEFAULT_AUDIO_PATH),
            time_interval: Duration::from_millis(DEFAULT_TIME_INTERVAL_MS),
            octave: DEFAULT_OCTAVE,
            missing_audio: MissingAudioPolicy::default(),
            range: AudioRange::default(),
            chords: Vec::new(),
        }
    }
}

/// Raw configuration for YAML deserialization
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawConfig {
    audio_path: Option<String>,
    time_interval: Option<u64>,
    octave: Option<u8>,
    missing_audio: Option<MissingAudioPolicy>,
    range: Option<RawRange>,
    #[serde(default)]
    chords: Vec<ChordDeclaration>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
struct RawRange {
    lowest_octave: Option<u8>,
    highest_octave: Option<u8>,
    lowest_note: Option<String>,
    highest_note: Option<String>,
}

impl Config {
    /// Parse and validate a YAML configuration document.
    ///
    /// An empty document yields [`Config::default`].
    pub fn from_yaml(content: &str) -> Result<Self, ChordError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| ChordError::InvalidConfig(e.to_string()))?;

        let defaults = Self::default();

        let range = match raw.range {
            Some(raw_range) => parse_range(raw_range, &defaults.range)?,
            None => defaults.range,
        };

        let octave = raw.octave.unwrap_or(defaults.octave);
        if !range.contains_octave(octave) {
            return Err(ChordError::InvalidConfig(format!(
                "Octave {} is outside the sample range ({}-{})",
                octave, range.lowest_octave, range.highest_octave
            )));
        }

        Ok(Self {
            audio_path: raw
                .audio_path
                .map(PathBuf::from)
                .unwrap_or(defaults.audio_path),
            time_interval: raw
                .time_interval
                .map(Duration::from_millis)
                .unwrap_or(defaults.time_interval),
            octave,
            missing_audio: raw.missing_audio.unwrap_or(defaults.missing_audio),
            range,
            chords: raw.chords,
        })
    }

    /// Read and parse a configuration file.
    pub fn load(path: &std::path::Path) -> Result<Self, ChordError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ChordError::InvalidConfig(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&content)
    }
}

fn parse_range(raw: RawRange, defaults: &AudioRange) -> Result<AudioRange, ChordError> {
    let lowest_note = match &raw.lowest_note {
        Some(name) => parse_note(name, "lowest")?,
        None => defaults.lowest_note,
    };
    let highest_note = match &raw.highest_note {
        Some(name) => parse_note(name, "highest")?,
        None => defaults.highest_note,
    };

    let range = AudioRange {
        lowest_octave: raw.lowest_octave.unwrap_or(defaults.lowest_octave),
        highest_octave: raw.highest_octave.unwrap_or(defaults.highest_octave),
        lowest_note,
        highest_note,
    };

    if range.lowest_octave > range.highest_octave
        || (range.lowest_octave == range.highest_octave && lowest_note > highest_note)
    {
        return Err(ChordError::InvalidConfig(format!(
            "Empty sample range: {}{} to {}{}",
            lowest_note, range.lowest_octave, highest_note, range.highest_octave
        )));
    }

    Ok(range)
}

fn parse_note(name: &str, which: &str) -> Result<PitchClass, ChordError> {
    PitchClass::from_name(name)
        .ok_or_else(|| ChordError::InvalidConfig(format!("Invalid {} note: {}", which, name)))
}
