//! Read-only aggregates over one scheme.

use crate::model::phonetics::{BarId, Vowel};
use crate::model::verse::{Scheme, Verse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Summary numbers shown next to a scheme.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeStats {
    /// Sum of covered syllables over all hits.
    pub total_syllables: usize,
    /// Distinct bars referenced by the hits.
    pub bar_count: usize,
    /// Vowels of every covered syllable, hit by hit; unresolved ones skipped.
    pub vowel_pattern: Vec<Vowel>,
}

pub fn compute_scheme_stats(scheme: &Scheme, verse: &Verse) -> SchemeStats {
    let total_syllables = scheme
        .hits
        .iter()
        .fold(0usize, |total, hit| total.saturating_add(hit.syllable_count()));
    let bar_count = scheme
        .hits
        .iter()
        .map(|hit| hit.bar_id)
        .collect::<BTreeSet<BarId>>()
        .len();

    let mut vowel_pattern = Vec::new();
    for hit in &scheme.hits {
        let Some(bar) = verse.bar(hit.bar_id) else {
            continue;
        };
        vowel_pattern.extend(
            bar.syllables()
                .skip(hit.start_syllable)
                .take(hit.syllable_count())
                .filter_map(|syllable| syllable.vowel),
        );
    }

    SchemeStats {
        total_syllables,
        bar_count,
        vowel_pattern,
    }
}
