//! Musical key detection and chord recognition from the pitch chroma.

pub mod chords;
pub mod key;

pub use chords::{CHORD_NAMES, ChordSequence, compute_chords};
pub use key::{KEY_NAMES, Key, KeyMode, compute_key};
