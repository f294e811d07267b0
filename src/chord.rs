//! # Chord Model
//!
//! A [`Chord`] is a chord type: an interval pattern in semitones from the root,
//! plus display metadata. Given a root note it produces the chord's pitch classes.
//!
//! ## Interval Patterns
//! - Offsets are semitones above the root: minor 3rd = 3, major 3rd = 4,
//!   perfect 5th = 7, minor 7th = 10, major 7th = 11, major 9th = 14
//! - The first offset is always 0 (the root). A pattern that omits it gets it
//!   prepended, so `[4, 7]` and `[0, 4, 7]` describe the same major triad
//! - Order and duplicates after the root are kept exactly as authored
//!
//! ## Inversion
//! Inverting rotates the computed note list left: the first note moves to the
//! end. Pitch classes never change, only their order (which is also the order
//! they are strummed in). Inverting by the chord length is the identity.
//!
//! ## Example
//! ```rust
//! use chords::{Chord, ChordOptions, NoteOptions};
//!
//! let min7 = Chord::new("min7", vec![3, 7, 10], ChordOptions::default())?;
//! assert_eq!(min7.intervals(), &[0, 3, 7, 10]);
//! assert_eq!(min7.note_names("C", NoteOptions::default())?, vec!["c", "d#", "g", "a#"]);
//! assert_eq!(min7.formatted_notes("a", NoteOptions::inverted(1))?, "C, E, G, A");
//! # Ok::<(), chords::ChordError>(())
//! ```

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::ChordError;
use crate::note::{PitchClass, Spelling};

/// Id given to a chord registered without a name, allowed only for major triads
pub const DEFAULT_CHORD_ID: &str = "maj";

const MAJOR_TRIAD: [u8; 3] = [0, 4, 7];

/// Optional display metadata attached to a chord type
///
/// - `short_name`: shortest symbol, e.g. `"m"` for minor or `"4"` for sus4
/// - `long_name`: descriptive name, e.g. `"minor"` or `"Suspended 4"`
/// - `important_notes`: offsets (from the interval pattern) of the chord tones
///   that matter most, handy for long extended chords
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChordOptions {
    pub short_name: String,
    pub long_name: String,
    pub important_notes: Vec<u8>,
}

impl ChordOptions {
    pub fn named(short_name: &str, long_name: &str) -> Self {
        Self {
            short_name: short_name.to_string(),
            long_name: long_name.to_string(),
            important_notes: Vec::new(),
        }
    }
}

/// Options for note computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteOptions {
    /// Number of left rotations applied to the computed notes
    pub invert: usize,
}

impl NoteOptions {
    pub fn inverted(invert: usize) -> Self {
        Self { invert }
    }
}

/// A validated chord type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chord {
    id: String,
    intervals: Vec<u8>,
    short_name: String,
    long_name: String,
    important_notes: Vec<u8>,
}

impl Chord {
    /// Validate and normalise a chord type.
    ///
    /// # Rules
    /// - A missing root offset (0) is prepended
    /// - The normalised pattern must have at least two offsets
    /// - Ids are stored lowercase
    /// - An empty id is only accepted for a major triad, which is named `"maj"`
    /// - Every important note must be one of the pattern's offsets
    ///
    /// # Errors
    /// Returns [`ChordError::InvalidChordDefinition`] when a rule is broken.
    pub fn new(id: &str, intervals: Vec<u8>, options: ChordOptions) -> Result<Self, ChordError> {
        let invalid = |message: &str| ChordError::InvalidChordDefinition {
            id: id.to_string(),
            message: message.to_string(),
        };

        if intervals.is_empty() {
            return Err(invalid(
                "The intervals between the notes of the chord must be supplied",
            ));
        }

        let intervals = normalize_intervals(intervals);
        if intervals.len() < 2 {
            return Err(invalid("A chord must consist of at least two notes"));
        }

        let id = if id.is_empty() {
            if !is_major_triad(&intervals) {
                return Err(invalid("Chord name must be supplied"));
            }
            DEFAULT_CHORD_ID.to_string()
        } else {
            id.to_lowercase()
        };

        if let Some(missing) = options
            .important_notes
            .iter()
            .find(|offset| !intervals.contains(*offset))
        {
            return Err(ChordError::InvalidChordDefinition {
                id,
                message: format!("Important note {} is not part of the chord", missing),
            });
        }

        Ok(Self::from_parts(&id, intervals, options))
    }

    /// Build without validation; `intervals` must already be normalised.
    pub(crate) fn from_parts(id: &str, intervals: Vec<u8>, options: ChordOptions) -> Self {
        Self {
            id: id.to_string(),
            intervals,
            short_name: options.short_name,
            long_name: options.long_name,
            important_notes: options.important_notes,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn short_name(&self) -> &str {
        &self.short_name
    }

    pub fn long_name(&self) -> &str {
        &self.long_name
    }

    /// Normalised interval pattern (first offset is always 0)
    pub fn intervals(&self) -> &[u8] {
        &self.intervals
    }

    pub fn important_notes(&self) -> &[u8] {
        &self.important_notes
    }

    /// Number of notes in the chord
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Pitch classes of this chord on `root`, in interval order, rotated by
    /// `options.invert`.
    ///
    /// # Errors
    /// [`ChordError::UnknownRootNote`] if `root` is not a canonical note name.
    pub fn notes(&self, root: &str, options: NoteOptions) -> Result<Vec<PitchClass>, ChordError> {
        let root_pc = self.resolve_root(root)?;

        let mut notes: Vec<PitchClass> = self
            .intervals
            .iter()
            .map(|offset| root_pc.transpose(*offset))
            .collect();

        if !notes.is_empty() {
            let shift = options.invert % notes.len();
            notes.rotate_left(shift);
        }

        Ok(notes)
    }

    /// Same as [`Chord::notes`], as lowercase note names.
    pub fn note_names(&self, root: &str, options: NoteOptions) -> Result<Vec<&'static str>, ChordError> {
        Ok(self
            .notes(root, options)?
            .into_iter()
            .map(PitchClass::name)
            .collect())
    }

    /// Notes joined with ", " and upper-cased, e.g. `"C, E, G"`.
    pub fn formatted_notes(&self, root: &str, options: NoteOptions) -> Result<String, ChordError> {
        Ok(self.note_names(root, options)?.join(", ").to_uppercase())
    }

    /// Pitch classes of the important notes on `root`.
    pub fn important_pitches(&self, root: &str) -> Result<Vec<PitchClass>, ChordError> {
        let root_pc = self.resolve_root(root)?;
        Ok(self
            .important_notes
            .iter()
            .map(|offset| root_pc.transpose(*offset))
            .collect())
    }

    /// Chord symbol for display, e.g. `"Am7"` or `"B♭M7"`.
    pub fn display_name(&self, root: &str, spelling: Spelling) -> Result<String, ChordError> {
        let root_pc = self.resolve_root(root)?;
        Ok(format!("{}{}", root_pc.display_name(spelling), self.short_name))
    }

    fn resolve_root(&self, root: &str) -> Result<PitchClass, ChordError> {
        PitchClass::from_name(root).ok_or_else(|| ChordError::UnknownRootNote {
            root: root.to_string(),
            chord: self.id.clone(),
        })
    }
}

/// Prepend the root offset if the pattern does not start with it.
fn normalize_intervals(mut intervals: Vec<u8>) -> Vec<u8> {
    if intervals.first() != Some(&0) {
        intervals.insert(0, 0);
    }
    intervals
}

/// Whether a normalised pattern is a major triad in any order.
fn is_major_triad(intervals: &[u8]) -> bool {
    let offsets: BTreeSet<u8> = intervals.iter().copied().collect();
    offsets == MAJOR_TRIAD.iter().copied().collect::<BTreeSet<u8>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(intervals: &[u8]) -> Chord {
        Chord::new("test", intervals.to_vec(), ChordOptions::default()).unwrap()
    }

    #[test]
    fn test_root_prepended_when_missing() {
        assert_eq!(chord(&[4, 7]).intervals(), &[0, 4, 7]);
        assert_eq!(chord(&[0, 4, 7]).intervals(), &[0, 4, 7]);
        assert_eq!(chord(&[7, 4]).intervals(), &[0, 7, 4]); // order kept as authored
    }

    #[test]
    fn test_duplicates_preserved() {
        assert_eq!(chord(&[0, 7, 7, 12]).intervals(), &[0, 7, 7, 12]);
    }

    #[test]
    fn test_empty_intervals_rejected() {
        let result = Chord::new("empty", vec![], ChordOptions::default());
        assert!(matches!(result, Err(ChordError::InvalidChordDefinition { .. })));
    }

    #[test]
    fn test_lone_root_rejected() {
        let result = Chord::new("solo", vec![0], ChordOptions::default());
        assert!(matches!(result, Err(ChordError::InvalidChordDefinition { .. })));
    }

    #[test]
    fn test_single_interval_gains_root() {
        // [7] becomes [0, 7] once the root is prepended
        let result = Chord::new("fifth", vec![7], ChordOptions::default());
        assert!(result.is_ok());
        let fifth = result.unwrap();
        assert_eq!(fifth.intervals(), &[0, 7]);
        assert_eq!(fifth.note_names("c", NoteOptions::default()).unwrap(), vec!["c", "g"]);
    }

    #[test]
    fn test_id_is_lowercased() {
        let chord = Chord::new("Maj7", vec![4, 7, 11], ChordOptions::default()).unwrap();
        assert_eq!(chord.id(), "maj7");
    }

    #[test]
    fn test_unnamed_major_triad_gets_default_id() {
        let chord = Chord::new("", vec![4, 7], ChordOptions::default()).unwrap();
        assert_eq!(chord.id(), DEFAULT_CHORD_ID);

        let chord = Chord::new("", vec![0, 7, 4], ChordOptions::default()).unwrap();
        assert_eq!(chord.id(), DEFAULT_CHORD_ID);
    }

    #[test]
    fn test_unnamed_other_chord_rejected() {
        let result = Chord::new("", vec![0, 3, 7], ChordOptions::default());
        match result {
            Err(ChordError::InvalidChordDefinition { message, .. }) => {
                assert_eq!(message, "Chord name must be supplied");
            }
            other => panic!("Expected InvalidChordDefinition, got {:?}", other),
        }
    }

    #[test]
    fn test_important_notes_must_be_in_pattern() {
        let options = ChordOptions {
            important_notes: vec![4, 10],
            ..ChordOptions::default()
        };
        assert!(Chord::new("dom7", vec![0, 4, 7, 10], options.clone()).is_ok());
        assert!(Chord::new("maj", vec![0, 4, 7], options).is_err());
    }

    #[test]
    fn test_notes_major() {
        let maj = chord(&[0, 4, 7]);
        assert_eq!(maj.note_names("C", NoteOptions::default()).unwrap(), vec!["c", "e", "g"]);
        assert_eq!(maj.note_names("a", NoteOptions::default()).unwrap(), vec!["a", "c#", "e"]);
    }

    #[test]
    fn test_notes_wrap_past_b() {
        // Add9 on B: the 9th (14 semitones) wraps twice past C
        let add9 = chord(&[0, 4, 7, 14]);
        assert_eq!(
            add9.note_names("b", NoteOptions::default()).unwrap(),
            vec!["b", "d#", "f#", "c#"]
        );
    }

    #[test]
    fn test_inversion_rotates_left() {
        let maj = chord(&[0, 4, 7]);
        assert_eq!(maj.note_names("c", NoteOptions::inverted(1)).unwrap(), vec!["e", "g", "c"]);
        assert_eq!(maj.note_names("c", NoteOptions::inverted(2)).unwrap(), vec!["g", "c", "e"]);
    }

    #[test]
    fn test_inversion_is_cyclic() {
        let min7 = chord(&[0, 3, 7, 10]);
        let len = min7.len();
        let base = min7.notes("d", NoteOptions::default()).unwrap();

        assert_eq!(min7.notes("d", NoteOptions::inverted(len)).unwrap(), base);
        for n in 0..(len * 3) {
            assert_eq!(
                min7.notes("d", NoteOptions::inverted(n)).unwrap(),
                min7.notes("d", NoteOptions::inverted(n % len)).unwrap(),
                "invert {} should equal invert {}",
                n,
                n % len
            );
        }
    }

    #[test]
    fn test_large_inversion_terminates() {
        let maj = chord(&[0, 4, 7]);
        let notes = maj.note_names("c", NoteOptions::inverted(usize::MAX)).unwrap();
        // usize::MAX % 3 == 0 on 64-bit and 32-bit targets
        assert_eq!(notes, vec!["c", "e", "g"]);
    }

    #[test]
    fn test_unknown_root() {
        let maj = chord(&[0, 4, 7]);
        match maj.notes("h", NoteOptions::default()) {
            Err(ChordError::UnknownRootNote { root, chord }) => {
                assert_eq!(root, "h");
                assert_eq!(chord, "test");
            }
            other => panic!("Expected UnknownRootNote, got {:?}", other),
        }
    }

    #[test]
    fn test_formatted_notes() {
        let maj = chord(&[0, 4, 7]);
        assert_eq!(maj.formatted_notes("c", NoteOptions::default()).unwrap(), "C, E, G");
        assert_eq!(maj.formatted_notes("F#", NoteOptions::default()).unwrap(), "F#, A#, C#");
    }

    #[test]
    fn test_display_name() {
        let min7 = Chord::new("min7", vec![0, 3, 7, 10], ChordOptions::named("m7", "minor 7")).unwrap();
        assert_eq!(min7.display_name("a", Spelling::Sharp).unwrap(), "Am7");
        assert_eq!(min7.display_name("a#", Spelling::Flat).unwrap(), "B♭m7");
        assert_eq!(min7.long_name(), "minor 7");
    }

    #[test]
    fn test_important_pitches() {
        let options = ChordOptions {
            important_notes: vec![4, 10],
            ..ChordOptions::default()
        };
        let dom7 = Chord::new("majmin7", vec![0, 4, 7, 10], options).unwrap();
        let names: Vec<&str> = dom7
            .important_pitches("g")
            .unwrap()
            .into_iter()
            .map(PitchClass::name)
            .collect();
        assert_eq!(names, vec!["b", "f"]);
    }
}
