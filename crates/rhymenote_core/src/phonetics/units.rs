//! Groups a vocalized string into consonant+marks units.

use crate::phonetics::niqqud::{is_hebrew_mark, Niqqud};

/// One base character plus the marks attached after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsonantUnit {
    /// Base character; `None` only for marks with nothing to attach to.
    pub letter: Option<char>,
    pub marks: Vec<char>,
    /// Letter followed by its marks, exactly as in the source.
    pub full_text: String,
}

impl ConsonantUnit {
    fn starting_with(letter: Option<char>) -> Self {
        Self {
            letter,
            marks: Vec::new(),
            full_text: letter.map(String::from).unwrap_or_default(),
        }
    }

    fn attach(&mut self, mark: char) {
        self.marks.push(mark);
        self.full_text.push(mark);
    }

    pub fn has_mark(&self, mark: Niqqud) -> bool {
        self.marks
            .iter()
            .any(|c| Niqqud::from_char(*c) == Some(mark))
    }

    pub fn has_dagesh(&self) -> bool {
        self.has_mark(Niqqud::Dagesh)
    }

    pub fn has_sheva(&self) -> bool {
        self.has_mark(Niqqud::Sheva)
    }

    /// Whether any attached mark is one of the core vowel marks.
    pub fn has_vowel(&self) -> bool {
        self.marks
            .iter()
            .any(|c| Niqqud::from_char(*c).and_then(Niqqud::vowel).is_some())
    }
}

/// Splits `text` into units, left to right.
///
/// Hebrew letters open a unit, marks join the current one, and any other
/// character stands alone as its own unit.
pub fn group_units(text: &str) -> Vec<ConsonantUnit> {
    let mut units: Vec<ConsonantUnit> = Vec::new();
    for c in text.chars() {
        if is_hebrew_mark(c) {
            match units.last_mut() {
                Some(unit) => unit.attach(c),
                None => {
                    let mut orphan = ConsonantUnit::starting_with(None);
                    orphan.attach(c);
                    units.push(orphan);
                }
            }
        } else {
            // Letters and foreign characters both open a fresh unit.
            units.push(ConsonantUnit::starting_with(Some(c)));
        }
    }
    units
}
