//! Domain model for phonetic analysis and manual rhyme authoring.
//!
//! # Responsibility
//! - Define the plain data structures shared by analysis and authoring.
//! - Keep every entity representable as serde data (no handles, no closures).
//!
//! # Invariants
//! - A word's syllables concatenate back to its vocalized text.
//! - Hits are inclusive, global syllable ranges within one bar.
//! - A scheme in a verse never holds zero hits.

pub mod phonetics;
pub mod verse;
