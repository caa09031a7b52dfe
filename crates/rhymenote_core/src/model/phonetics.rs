//! Phonetic analysis model: vowels, syllables, words and rhyme groups.
//!
//! # Responsibility
//! - Define the closed vowel category used by every signature.
//! - Hold the per-word view produced by analysis.
//!
//! # Invariants
//! - `Word` values are recomputed wholesale, never patched in place.
//! - `RhymeGroup.members` is de-duplicated by `(line_id, word_position)`.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one bar (line) of text.
pub type BarId = Uuid;

/// Coarse vowel category used for rhyme signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Vowel {
    A,
    E,
    I,
    O,
    U,
}

impl Vowel {
    /// Single-letter label used inside signatures.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::E => "E",
            Self::I => "I",
            Self::O => "O",
            Self::U => "U",
        }
    }
}

impl Display for Vowel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One syllable of a vocalized word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Syllable {
    /// Exact substring of the vocalized word.
    pub text: String,
    /// First core vowel mark of the syllable, mapped to its category.
    pub vowel: Option<Vowel>,
    /// Consonants before the vowel mark.
    pub onset: String,
    /// Consonants after the vowel mark.
    pub coda: String,
    /// Heuristic: only the final syllable of a word is stressed.
    pub is_stressed: bool,
    /// Char offset of the first character inside the vocalized word.
    pub start_index: usize,
    /// Char offset one past the last character (exclusive).
    pub end_index: usize,
}

/// Per-word phonetic view produced by analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Token as it appeared in the bar text.
    pub text: String,
    /// Token with punctuation and marks removed.
    pub clean_text: String,
    /// Vocalized form the syllables were computed from.
    pub vocalized_text: String,
    pub syllables: Vec<Syllable>,
    /// Dash-joined non-empty syllable vowels, e.g. `A-O`.
    pub vowel_signature: String,
    /// Vowel of the final syllable, empty when it has none.
    pub anchor_signature: String,
}

impl Word {
    /// Non-empty vowels of this word in syllable order.
    pub fn vowels(&self) -> Vec<Vowel> {
        self.syllables.iter().filter_map(|s| s.vowel).collect()
    }
}

/// Rhyme category of a detected group.
///
/// Analysis only produces `Multi`, `Assonance` and `Anchor`; the remaining
/// kinds exist so stored groups from other producers stay representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RhymeType {
    Multi,
    Assonance,
    Anchor,
    Perfect,
    Slant,
}

impl RhymeType {
    /// Stable layer name used in bucket keys and group ids.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Multi => "multi",
            Self::Assonance => "assonance",
            Self::Anchor => "anchor",
            Self::Perfect => "perfect",
            Self::Slant => "slant",
        }
    }
}

/// Reference from a rhyme group back to one word occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeMember {
    pub line_id: BarId,
    pub word_position: usize,
    pub text: String,
}

/// A set of words sharing one signature key within one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhymeGroup {
    /// `layer:key`, stable for identical input.
    pub id: String,
    /// Clustering key without the layer prefix.
    pub signature: String,
    #[serde(rename = "type")]
    pub kind: RhymeType,
    pub confidence: f32,
    pub members: Vec<RhymeMember>,
}
