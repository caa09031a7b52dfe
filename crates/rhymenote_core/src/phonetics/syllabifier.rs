//! Rule-based syllabification and per-syllable detail extraction.
//!
//! # Invariants
//! - `syllabify(text).concat() == text` for every input.
//! - Boundaries depend only on marks, never on a lexicon.

use crate::model::phonetics::{Syllable, Vowel};
use crate::phonetics::niqqud::{is_guttural, is_hebrew_mark, vowel_for_char};
use crate::phonetics::units::{group_units, ConsonantUnit};

/// Vowel, onset and coda of one syllable string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableDetails {
    pub text: String,
    pub vowel: Option<Vowel>,
    pub onset: String,
    pub coda: String,
}

/// Splits a vocalized string into ordered syllable substrings.
///
/// Returns an empty list for empty input. Text without marks never hits a
/// boundary rule and comes back as a single syllable.
pub fn syllabify(text: &str) -> Vec<String> {
    let units = group_units(text);
    let mut syllables = Vec::new();
    let mut buffer = String::new();

    for (index, current) in units.iter().enumerate() {
        buffer.push_str(&current.full_text);
        let closes = match units.get(index + 1) {
            Some(next) => closes_syllable(current, next),
            None => true,
        };
        if closes {
            syllables.push(std::mem::take(&mut buffer));
        }
    }

    syllables
}

/// Boundary rules, in priority order.
fn closes_syllable(current: &ConsonantUnit, next: &ConsonantUnit) -> bool {
    // Doubled consonant closes the current syllable, except on gutturals.
    if next.has_dagesh() && !next.letter.is_some_and(is_guttural) {
        return true;
    }
    // Sheva is always treated as closing, vocal or silent.
    if current.has_sheva() {
        return true;
    }
    current.has_vowel() && (next.has_vowel() || next.has_sheva())
}

/// Derives vowel, onset and coda for one syllable string.
pub fn extract_syllable_details(syllable: &str) -> SyllableDetails {
    let mut vowel = None;
    let mut onset = String::new();
    let mut coda = String::new();

    for c in syllable.chars() {
        if vowel.is_none() {
            if let Some(found) = vowel_for_char(c) {
                vowel = Some(found);
                continue;
            }
        }
        if is_consonant(c) {
            if vowel.is_none() {
                onset.push(c);
            } else {
                coda.push(c);
            }
        }
    }

    SyllableDetails {
        text: syllable.to_string(),
        vowel,
        onset,
        coda,
    }
}

/// Syllabifies one word and attaches details, offsets and stress.
///
/// Offsets are char positions inside `vocalized`; only the final syllable
/// is marked stressed.
pub fn build_syllables(vocalized: &str) -> Vec<Syllable> {
    let parts = syllabify(vocalized);
    let last = parts.len().saturating_sub(1);
    let mut cursor = 0;

    parts
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let details = extract_syllable_details(&text);
            let start_index = cursor;
            cursor += text.chars().count();
            Syllable {
                text: details.text,
                vowel: details.vowel,
                onset: details.onset,
                coda: details.coda,
                is_stressed: index == last,
                start_index,
                end_index: cursor,
            }
        })
        .collect()
}

fn is_consonant(c: char) -> bool {
    !is_hebrew_mark(c) && c.is_alphabetic()
}
