//! Hebrew letter and niqqud classification.

use crate::model::phonetics::Vowel;

/// Guttural letters that refuse consonant doubling.
const GUTTURALS: [char; 5] = ['א', 'ה', 'ח', 'ע', 'ר'];
/// Final-form letters that make up suffix rhymes.
const FINAL_FORMS: [char; 3] = ['ם', 'ן', 'ך'];

/// Niqqud marks the analysis distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Niqqud {
    Sheva,
    HatafSegol,
    HatafPatah,
    HatafQamats,
    Hiriq,
    Tsere,
    Segol,
    Patah,
    Qamats,
    Holam,
    HolamHaserForVav,
    Qubuts,
    QamatsQatan,
    Dagesh,
}

impl Niqqud {
    pub fn from_char(c: char) -> Option<Self> {
        let mark = match c {
            '\u{05B0}' => Self::Sheva,
            '\u{05B1}' => Self::HatafSegol,
            '\u{05B2}' => Self::HatafPatah,
            '\u{05B3}' => Self::HatafQamats,
            '\u{05B4}' => Self::Hiriq,
            '\u{05B5}' => Self::Tsere,
            '\u{05B6}' => Self::Segol,
            '\u{05B7}' => Self::Patah,
            '\u{05B8}' => Self::Qamats,
            '\u{05B9}' => Self::Holam,
            '\u{05BA}' => Self::HolamHaserForVav,
            '\u{05BB}' => Self::Qubuts,
            '\u{05BC}' => Self::Dagesh,
            '\u{05C7}' => Self::QamatsQatan,
            _ => return None,
        };
        Some(mark)
    }

    /// Vowel category carried by this mark, if it is a vowel mark.
    pub fn vowel(self) -> Option<Vowel> {
        match self {
            Self::HatafPatah | Self::Patah | Self::Qamats => Some(Vowel::A),
            Self::HatafSegol | Self::Tsere | Self::Segol => Some(Vowel::E),
            Self::Hiriq => Some(Vowel::I),
            Self::HatafQamats | Self::Holam | Self::HolamHaserForVav | Self::QamatsQatan => {
                Some(Vowel::O)
            }
            Self::Qubuts => Some(Vowel::U),
            Self::Sheva | Self::Dagesh => None,
        }
    }
}

/// Maps one character to a vowel when it is a core vowel mark.
pub fn vowel_for_char(c: char) -> Option<Vowel> {
    Niqqud::from_char(c).and_then(Niqqud::vowel)
}

/// Hebrew base letters, including final forms.
pub fn is_hebrew_letter(c: char) -> bool {
    ('\u{05D0}'..='\u{05EA}').contains(&c)
}

/// Combining marks in the Hebrew block (cantillation and niqqud).
///
/// Maqaf, paseq, sof pasuq and nun hafukha are punctuation, not marks.
pub fn is_hebrew_mark(c: char) -> bool {
    ('\u{0591}'..='\u{05C7}').contains(&c)
        && !matches!(c, '\u{05BE}' | '\u{05C0}' | '\u{05C3}' | '\u{05C6}')
}

pub fn is_guttural(c: char) -> bool {
    GUTTURALS.contains(&c)
}

pub fn is_final_form(c: char) -> bool {
    FINAL_FORMS.contains(&c)
}

/// Removes every Hebrew mark, keeping letters and everything else.
pub fn strip_marks(text: &str) -> String {
    text.chars().filter(|c| !is_hebrew_mark(*c)).collect()
}
