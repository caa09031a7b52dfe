//! Three-layer rhyme clustering over vowel signatures.
//!
//! Layers are independent: one word can join a multi-syllabic, an
//! assonance and an anchor group at the same time.

use crate::model::phonetics::{BarId, RhymeGroup, RhymeMember, RhymeType, Vowel, Word};
use crate::model::verse::Bar;
use crate::phonetics::niqqud::is_final_form;
use crate::phonetics::signature::{final_letter, join_vowels};
use log::debug;
use std::collections::HashMap;

pub const MULTI_CONFIDENCE: f32 = 0.95;
pub const ANCHOR_CONFIDENCE: f32 = 0.85;
pub const ASSONANCE_CONFIDENCE: f32 = 0.6;
const MIN_GROUP_MEMBERS: usize = 2;

/// One word occurrence offered to the cluster engine.
#[derive(Debug, Clone, Copy)]
pub struct ClusterInput<'a> {
    pub line_id: BarId,
    pub word_position: usize,
    pub word: &'a Word,
}

struct Bucket {
    kind: RhymeType,
    signature: String,
    members: Vec<RhymeMember>,
}

/// Insertion-ordered bucket map keyed by `layer:key`.
#[derive(Default)]
struct Buckets {
    order: Vec<Bucket>,
    index: HashMap<String, usize>,
}

impl Buckets {
    fn add(&mut self, kind: RhymeType, signature: String, input: &ClusterInput<'_>) {
        let id = format!("{}:{}", kind.as_str(), signature);
        let slot = match self.index.get(&id) {
            Some(slot) => *slot,
            None => {
                self.order.push(Bucket {
                    kind,
                    signature,
                    members: Vec::new(),
                });
                self.index.insert(id, self.order.len() - 1);
                self.order.len() - 1
            }
        };

        let bucket = &mut self.order[slot];
        let duplicate = bucket.members.iter().any(|member| {
            member.line_id == input.line_id && member.word_position == input.word_position
        });
        if !duplicate {
            bucket.members.push(RhymeMember {
                line_id: input.line_id,
                word_position: input.word_position,
                text: input.word.text.clone(),
            });
        }
    }
}

/// Groups words into rhyme groups.
///
/// Never fails; empty input or all-singleton buckets give an empty list.
pub fn cluster_words(inputs: &[ClusterInput<'_>]) -> Vec<RhymeGroup> {
    let mut buckets = Buckets::default();

    for input in inputs {
        let vowels = input.word.vowels();
        let Some(last_vowel) = vowels.last().copied() else {
            continue;
        };

        if vowels.len() >= 2 {
            let tail = join_vowels(vowels[vowels.len() - 2..].iter().copied());
            buckets.add(RhymeType::Multi, tail, input);
        }

        buckets.add(RhymeType::Assonance, last_vowel.as_str().to_string(), input);

        if let Some(letter) = final_letter(input.word).filter(|c| is_final_form(*c)) {
            buckets.add(RhymeType::Anchor, anchor_key(last_vowel, letter), input);
        }
    }

    let groups: Vec<RhymeGroup> = buckets
        .order
        .into_iter()
        .filter(|bucket| bucket.members.len() >= MIN_GROUP_MEMBERS)
        .map(|bucket| RhymeGroup {
            id: format!("{}:{}", bucket.kind.as_str(), bucket.signature),
            confidence: confidence_for(bucket.kind),
            signature: bucket.signature,
            kind: bucket.kind,
            members: bucket.members,
        })
        .collect();

    debug!(
        "event=rhyme_cluster module=rhyme status=ok words={} groups={}",
        inputs.len(),
        groups.len()
    );
    groups
}

/// Clusters every analyzed word of the given bars.
pub fn cluster_bars(bars: &[Bar]) -> Vec<RhymeGroup> {
    let inputs: Vec<ClusterInput<'_>> = bars
        .iter()
        .flat_map(|bar| {
            bar.words
                .iter()
                .enumerate()
                .map(move |(word_position, word)| ClusterInput {
                    line_id: bar.id,
                    word_position,
                    word,
                })
        })
        .collect();
    cluster_words(&inputs)
}

fn anchor_key(vowel: Vowel, letter: char) -> String {
    format!("{}{}", vowel.as_str(), letter)
}

fn confidence_for(kind: RhymeType) -> f32 {
    match kind {
        RhymeType::Multi => MULTI_CONFIDENCE,
        RhymeType::Anchor => ANCHOR_CONFIDENCE,
        RhymeType::Assonance | RhymeType::Perfect | RhymeType::Slant => ASSONANCE_CONFIDENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::{cluster_words, ClusterInput};
    use crate::phonetics::signature::analyze_word;
    use uuid::Uuid;

    #[test]
    fn duplicate_positions_are_not_added_twice() {
        // lamed+patah, mem+qamats
        let word = analyze_word("למה", "\u{05DC}\u{05B7}\u{05DE}\u{05B8}");
        let line = Uuid::new_v4();
        let inputs = [
            ClusterInput {
                line_id: line,
                word_position: 0,
                word: &word,
            },
            ClusterInput {
                line_id: line,
                word_position: 0,
                word: &word,
            },
        ];
        assert!(cluster_words(&inputs).is_empty());
    }

    #[test]
    fn empty_input_yields_no_groups() {
        assert!(cluster_words(&[]).is_empty());
    }
}
