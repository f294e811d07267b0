//! # Chord Definition Registry
//!
//! Keeps every known chord type, keyed by id, in registration order.
//!
//! The built-in catalogue covers the common triads, sevenths, sixths, suspended
//! and added-ninth chords. Callers can register their own chord types; they go
//! through the same validation as [`Chord::new`].
//!
//! ## Catalogue
//! | id | intervals | short | long |
//! |----|-----------|-------|------|
//! | power | 0 7 | 5 | power 5 |
//! | maj | 0 4 7 | | Major |
//! | min | 0 3 7 | m | minor |
//! | majmin7 | 0 4 7 10 | 7 | Dominant 7 |
//! | min7 | 0 3 7 10 | m7 | minor 7 |
//! | maj9 | 0 4 7 11 14 | M9 | Major 9 |
//!
//! (abridged; see [`CATALOGUE`] for the full list of 28 chord types)
//!
//! ## Example
//! ```rust
//! use chords::{ChordOptions, ChordRegistry};
//!
//! let mut registry = ChordRegistry::with_defaults();
//! assert_eq!(registry.len(), 28);
//!
//! registry.register("maj7sharp11", vec![4, 7, 11, 18], ChordOptions::named("M7♯11", "Major 7 sharp 11"))?;
//! assert_eq!(registry.get("maj7sharp11").unwrap().intervals(), &[0, 4, 7, 11, 18]);
//! # Ok::<(), chords::ChordError>(())
//! ```

use std::collections::HashMap;

use crate::chord::{Chord, ChordOptions};
use crate::error::ChordError;

/// A built-in chord type
#[derive(Debug, Clone, Copy)]
pub struct BuiltinChord {
    pub id: &'static str,
    pub intervals: &'static [u8],
    pub short_name: &'static str,
    pub long_name: &'static str,
}

impl BuiltinChord {
    const fn new(
        id: &'static str,
        intervals: &'static [u8],
        short_name: &'static str,
        long_name: &'static str,
    ) -> Self {
        Self {
            id,
            intervals,
            short_name,
            long_name,
        }
    }

    fn to_chord(self) -> Chord {
        Chord::from_parts(
            self.id,
            self.intervals.to_vec(),
            ChordOptions::named(self.short_name, self.long_name),
        )
    }
}

/// Built-in chord types, in display order
///
/// Intervals are semitones from the root: minor 3rd = 3, major 3rd = 4,
/// perfect 5th = 7, minor 7th = 10, major 7th = 11, major 9th = 14
pub const CATALOGUE: &[BuiltinChord] = &[
    BuiltinChord::new("power", &[0, 7], "5", "power 5"),
    BuiltinChord::new("maj", &[0, 4, 7], "", "Major"),
    BuiltinChord::new("min", &[0, 3, 7], "m", "minor"),
    BuiltinChord::new("sus2", &[0, 2, 7], "2", "Suspended 2'nd"),
    BuiltinChord::new("sus4", &[0, 5, 7], "4", "Suspended 4"),
    BuiltinChord::new("aug", &[0, 4, 8], "+", "Augmented"),
    BuiltinChord::new("dim", &[0, 3, 6], "°", "diminished"),
    BuiltinChord::new("flat5", &[0, 4, 6], "♭5", "flatted 5"),
    BuiltinChord::new("majmin7", &[0, 4, 7, 10], "7", "Dominant 7"),
    BuiltinChord::new("min7", &[0, 3, 7, 10], "m7", "minor 7"),
    BuiltinChord::new("maj7", &[0, 4, 7, 11], "M7", "Major 7"),
    BuiltinChord::new("minmaj7", &[0, 3, 7, 11], "mMaj7", "minor Major 7"),
    BuiltinChord::new("min7flat5", &[0, 3, 6, 10], "m7♭5", "minor 7 flatted 5"),
    BuiltinChord::new("dim7", &[0, 3, 6, 9], "°7", "diminished 7"),
    BuiltinChord::new("maj6", &[0, 4, 7, 9], "6", "Major 6"),
    BuiltinChord::new("min6", &[0, 3, 7, 8], "m6", "minor 6"),
    BuiltinChord::new("majmin6", &[0, 4, 7, 8], "Mmin6", "Major minor 6"),
    BuiltinChord::new("minmaj6", &[0, 3, 7, 9], "mMaj6", "minor Major 6"),
    BuiltinChord::new("min7sus4", &[0, 5, 7, 10], "m7 sus4", "minor seventh Suspended 4"),
    BuiltinChord::new("maj7sus4", &[0, 5, 7, 11], "M7 sus4", "Major 7 Suspended 4"),
    BuiltinChord::new("min7sus2", &[0, 2, 7, 10], "m7 sus2", "minor seventh Suspended 2'nd"),
    BuiltinChord::new("maj7sus2", &[0, 2, 7, 11], "M7 sus2", "Major 7 Suspended 2'nd"),
    BuiltinChord::new("majadd9", &[0, 4, 7, 14], "add9", "Major added 9"),
    BuiltinChord::new("minadd9", &[0, 3, 7, 14], "m add9", "minor added 9"),
    BuiltinChord::new("maj9", &[0, 4, 7, 11, 14], "M9", "Major 9"),
    BuiltinChord::new("min9", &[0, 3, 7, 10, 14], "m9", "minor 9"),
    BuiltinChord::new("minmaj9", &[0, 3, 7, 11, 14], "mMaj9", "minor Major 9"),
    BuiltinChord::new("majmin9", &[0, 4, 7, 10, 14], "9", "Dominant 9"),
];

/// Chord types by id, enumerated in registration order
#[derive(Debug, Clone, Default)]
pub struct ChordRegistry {
    chords: Vec<Chord>,
    index: HashMap<String, usize>,
}

impl ChordRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with [`CATALOGUE`]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.seed_defaults();
        registry
    }

    /// Register every built-in chord type. Existing ids are overwritten.
    pub fn seed_defaults(&mut self) {
        for entry in CATALOGUE {
            self.insert(entry.to_chord());
        }
    }

    /// Validate and register a chord type, returning the stored chord.
    ///
    /// The id is stored lowercase. An id that already exists is overwritten
    /// in place.
    ///
    /// # Errors
    /// [`ChordError::InvalidChordDefinition`] if validation fails; the registry
    /// is not modified.
    pub fn register(
        &mut self,
        id: &str,
        intervals: Vec<u8>,
        options: ChordOptions,
    ) -> Result<&Chord, ChordError> {
        let chord = Chord::new(id, intervals, options)?;
        Ok(self.insert(chord))
    }

    /// Store an already validated chord.
    pub fn insert(&mut self, chord: Chord) -> &Chord {
        let position = match self.index.get(chord.id()) {
            Some(&position) => {
                self.chords[position] = chord;
                position
            }
            None => {
                let position = self.chords.len();
                self.index.insert(chord.id().to_string(), position);
                self.chords.push(chord);
                position
            }
        };
        &self.chords[position]
    }

    pub fn get(&self, id: &str) -> Option<&Chord> {
        self.index.get(id).map(|&position| &self.chords[position])
    }

    /// Like [`ChordRegistry::get`], failing with [`ChordError::UnknownChordType`].
    pub fn require(&self, id: &str) -> Result<&Chord, ChordError> {
        self.get(id)
            .ok_or_else(|| ChordError::UnknownChordType(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Chords in registration order
    pub fn iter(&self) -> impl Iterator<Item = &Chord> {
        self.chords.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.chords.iter().map(Chord::id)
    }
}
