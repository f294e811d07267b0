pub mod api;
pub mod chord;
pub mod config;
pub mod error;
pub mod note;
pub mod playback;
pub mod registry;

pub use api::ChordContext;
pub use chord::{Chord, ChordOptions, NoteOptions, DEFAULT_CHORD_ID};
pub use config::{ChordDeclaration, Config, MissingAudioPolicy};
pub use error::*;
pub use note::{PitchClass, Spelling};
pub use registry::{ChordRegistry, CATALOGUE};

/// Note names of chord type `id` on `root`, using the built-in catalogue.
/// Shorthand for a one-off lookup; keep a [`ChordContext`] for repeated use.
pub fn chord_notes(id: &str, root: &str, invert: usize) -> Result<Vec<&'static str>, ChordError> {
    ChordContext::new().notes(id, root, invert)
}
