//! Diacritic-driven phonetic analysis of vocalized Hebrew.
//!
//! # Responsibility
//! - Group characters into consonant+marks units.
//! - Split vocalized words into syllables and derive vowel signatures.
//!
//! # Invariants
//! - Every function here is pure and total: no input makes it fail.
//! - Syllabification is lossless; syllables concatenate to the input.

pub mod niqqud;
pub mod signature;
pub mod syllabifier;
pub mod units;
