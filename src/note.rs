//! # Note Table
//!
//! The twelve chromatic pitch classes and their spellings.
//!
//! Pitch classes are stored as a semitone index from C (0 = C, 11 = B). Internal
//! names are lowercase with `#` for sharps (`"c#"`); these are also the names used
//! to build audio resource keys. Display names use the proper accidental glyphs and
//! come in a sharp and a flat spelling.
//!
//! ```text
//! index:  0   1    2   3    4   5   6    7   8    9   10   11
//! name:   c   c#   d   d#   e   f   f#   g   g#   a   a#   b
//! sharp:  C   C♯   D   D♯   E   F   F♯   G   G♯   A   A♯   B
//! flat:   C   D♭   D   E♭   E   F   G♭   G   A♭   A   B♭   B
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

/// Canonical note names, indexed by semitone distance from C
pub const NOTES: [&str; 12] = [
    "c", "c#", "d", "d#", "e", "f", "f#", "g", "g#", "a", "a#", "b",
];

/// Display names using sharps
pub const NOTES_SHARP: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

/// Display names using flats
pub const NOTES_FLAT: [&str; 12] = [
    "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B",
];

/// Number of pitch classes in the chromatic scale
pub const SEMITONES: usize = NOTES.len();

/// Canonical lowercase note name for `index mod 12`.
pub fn note_at(index: usize) -> &'static str {
    NOTES[index % SEMITONES]
}

/// Index (0-11) of a canonical note name, ignoring case.
///
/// Only the twelve canonical names are recognised; enharmonic spellings such as
/// `"db"` return `None`.
pub fn index_of(name: &str) -> Option<usize> {
    let lower = name.to_lowercase();
    NOTES.iter().position(|n| *n == lower)
}

/// Accidental style for display names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spelling {
    #[default]
    Sharp,
    Flat,
}

/// A chromatic pitch class (C through B, octave-less)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);

    /// Pitch class for an arbitrary semitone count, wrapped into the octave.
    pub fn new(index: usize) -> Self {
        Self((index % SEMITONES) as u8)
    }

    /// Parse a canonical note name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        index_of(name).map(Self::new)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Canonical lowercase name, e.g. `"f#"`
    pub fn name(self) -> &'static str {
        NOTES[self.index()]
    }

    pub fn display_name(self, spelling: Spelling) -> &'static str {
        match spelling {
            Spelling::Sharp => NOTES_SHARP[self.index()],
            Spelling::Flat => NOTES_FLAT[self.index()],
        }
    }

    /// Move up by `semitones`, wrapping at the octave.
    pub fn transpose(self, semitones: u8) -> Self {
        Self::new(self.index() + semitones as usize)
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| format!("Unknown note name: {}", s))
    }
}

impl Serialize for PitchClass {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_at_wraps() {
        assert_eq!(note_at(0), "c");
        assert_eq!(note_at(11), "b");
        assert_eq!(note_at(12), "c");
        assert_eq!(note_at(14), "d");
        assert_eq!(note_at(25), "c#");
    }

    #[test]
    fn test_index_of_case_insensitive() {
        assert_eq!(index_of("c"), Some(0));
        assert_eq!(index_of("C"), Some(0));
        assert_eq!(index_of("F#"), Some(6));
        assert_eq!(index_of("a#"), Some(10));
        assert_eq!(index_of("B"), Some(11));
    }

    #[test]
    fn test_index_of_unknown() {
        assert_eq!(index_of("h"), None);
        assert_eq!(index_of("db"), None); // flats are display-only
        assert_eq!(index_of(""), None);
        assert_eq!(index_of("c##"), None);
    }

    #[test]
    fn test_transpose_wraps_octave() {
        let a = PitchClass::from_name("a").unwrap();
        assert_eq!(a.transpose(3).name(), "c");
        assert_eq!(a.transpose(14).name(), "b");
        assert_eq!(PitchClass::C.transpose(12), PitchClass::C);
    }

    #[test]
    fn test_display_spellings() {
        let a_sharp = PitchClass::new(10);
        assert_eq!(a_sharp.display_name(Spelling::Sharp), "A♯");
        assert_eq!(a_sharp.display_name(Spelling::Flat), "B♭");

        // Natural notes are spelled the same either way
        for pc in [0, 2, 4, 5, 7, 9, 11].map(PitchClass::new) {
            assert_eq!(pc.display_name(Spelling::Sharp), pc.display_name(Spelling::Flat));
        }
    }

    #[test]
    fn test_from_str() {
        let pc: PitchClass = "G#".parse().unwrap();
        assert_eq!(pc.index(), 8);
        assert_eq!(pc.to_string(), "g#");
        assert!("x".parse::<PitchClass>().is_err());
    }
}
