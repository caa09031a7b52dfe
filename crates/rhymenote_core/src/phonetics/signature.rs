//! Word-level phonetic signatures and line tokenization.
//!
//! # Responsibility
//! - Project syllables into vowel and anchor signatures.
//! - Split bar text into word tokens and build `Word` values.
//!
//! # Invariants
//! - A word with zero syllables has empty signatures.
//! - `Word.syllables` always partitions `Word.vocalized_text`.

use crate::model::phonetics::{Syllable, Vowel, Word};
use crate::phonetics::niqqud::{is_hebrew_mark, strip_marks};
use crate::phonetics::syllabifier::build_syllables;
use once_cell::sync::Lazy;
use regex::Regex;

static TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("valid token regex"));

/// Dash-joined non-empty vowels, e.g. `A-O`.
pub fn vowel_signature(syllables: &[Syllable]) -> String {
    join_vowels(syllables.iter().filter_map(|s| s.vowel))
}

/// Vowel of the final syllable, or empty.
pub fn anchor_signature(syllables: &[Syllable]) -> String {
    syllables
        .last()
        .and_then(|s| s.vowel)
        .map(|v| v.as_str().to_string())
        .unwrap_or_default()
}

pub fn join_vowels(vowels: impl IntoIterator<Item = Vowel>) -> String {
    vowels
        .into_iter()
        .map(Vowel::as_str)
        .collect::<Vec<_>>()
        .join("-")
}

/// Whitespace-separated tokens of one bar, in order.
pub fn tokenize_line(text: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(text).map(|m| m.as_str()).collect()
}

/// Token without marks and without non-letter characters.
pub fn clean_word(token: &str) -> String {
    strip_marks(token)
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect()
}

/// Drops punctuation from a token while keeping letters and their marks.
pub fn strip_punctuation(token: &str) -> String {
    token
        .chars()
        .filter(|c| is_hebrew_mark(*c) || c.is_alphanumeric())
        .collect()
}

/// Builds the phonetic view of one token from its vocalized form.
pub fn analyze_word(text: &str, vocalized: &str) -> Word {
    let vocalized_text = strip_punctuation(vocalized);
    let syllables = build_syllables(&vocalized_text);
    Word {
        text: text.to_string(),
        clean_text: clean_word(text),
        vowel_signature: vowel_signature(&syllables),
        anchor_signature: anchor_signature(&syllables),
        vocalized_text,
        syllables,
    }
}

/// Builds words for `tokens`, pairing each with its vocalized form.
///
/// A missing or blank vocalization falls back to the raw token.
pub fn analyze_tokens<T: AsRef<str>>(tokens: &[T], vocalized: &[String]) -> Vec<Word> {
    tokens
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let token = token.as_ref();
            let form = vocalized
                .get(index)
                .map(String::as_str)
                .filter(|form| !form.trim().is_empty())
                .unwrap_or(token);
            analyze_word(token, form)
        })
        .collect()
}

/// Last base character of a word, skipping marks.
pub fn final_letter(word: &Word) -> Option<char> {
    word.vocalized_text
        .chars()
        .rev()
        .find(|c| !is_hebrew_mark(*c))
}

#[cfg(test)]
mod tests {
    use super::{analyze_tokens, analyze_word, clean_word, final_letter, tokenize_line};

    // alef+patah, he+hataf patah, bet+qamats, he
    const AHAVA: &str = "\u{05D0}\u{05B7}\u{05D4}\u{05B2}\u{05D1}\u{05B8}\u{05D4}";

    #[test]
    fn analyze_word_projects_signatures() {
        let word = analyze_word("אהבה", AHAVA);
        assert_eq!(word.syllables.len(), 3);
        assert_eq!(word.vowel_signature, "A-A-A");
        assert_eq!(word.anchor_signature, "A");
        assert_eq!(word.clean_text, "אהבה");
    }

    #[test]
    fn empty_word_has_empty_signatures() {
        let word = analyze_word("", "");
        assert!(word.syllables.is_empty());
        assert!(word.vowel_signature.is_empty());
        assert!(word.anchor_signature.is_empty());
    }

    #[test]
    fn anchor_is_empty_when_last_syllable_has_no_vowel() {
        // dalet+qamats, final mem+sheva
        let word = analyze_word("דם", "\u{05D3}\u{05B8}\u{05DD}\u{05B0}");
        assert_eq!(word.syllables.len(), 2);
        assert_eq!(word.vowel_signature, "A");
        assert!(word.anchor_signature.is_empty());
    }

    #[test]
    fn punctuation_is_dropped_from_vocalized_text() {
        let word = analyze_word("אהבה,", &format!("{AHAVA},"));
        assert_eq!(word.vocalized_text, AHAVA);
        assert_eq!(word.clean_text, "אהבה");
        assert_eq!(final_letter(&word), Some('\u{05D4}'));
    }

    #[test]
    fn analyze_tokens_falls_back_to_raw_token() {
        let tokens = ["ab", "cd"];
        let words = analyze_tokens(&tokens, &[AHAVA.to_string()]);
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].vocalized_text, AHAVA);
        assert_eq!(words[1].vocalized_text, "cd");
    }

    #[test]
    fn tokenizes_on_any_whitespace() {
        assert_eq!(tokenize_line("  a\tbb  c "), vec!["a", "bb", "c"]);
        assert_eq!(clean_word("(hey!)"), "hey");
    }
}
