//! Verse authoring model: bars, hits and schemes.
//!
//! # Responsibility
//! - Hold the addressable root (`Verse`) mutated by the tap state machine.
//! - Resolve global syllable indices within a bar.
//!
//! # Invariants
//! - Hit ranges are inclusive and `start <= end`.
//! - Within one scheme, hits on the same bar neither overlap nor touch.
//! - Removing a bar also removes every hit on it and any scheme left empty.
//! - A verse built from outside data holds these only after `normalize()`.

use crate::model::phonetics::{BarId, Syllable, Word};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier of one scheme.
pub type SchemeId = Uuid;

/// Contiguous inclusive syllable range within one bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hit {
    pub bar_id: BarId,
    pub start_syllable: usize,
    pub end_syllable: usize,
}

impl Hit {
    /// Single-syllable hit.
    pub fn single(bar_id: BarId, index: usize) -> Self {
        Self {
            bar_id,
            start_syllable: index,
            end_syllable: index,
        }
    }

    /// Inclusive range; callers must pass `start <= end`.
    pub fn span(bar_id: BarId, start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "hit start must not exceed end");
        Self {
            bar_id,
            start_syllable: start,
            end_syllable: end,
        }
    }

    pub fn contains(&self, bar_id: BarId, index: usize) -> bool {
        self.bar_id == bar_id && self.start_syllable <= index && index <= self.end_syllable
    }

    pub fn is_single(&self) -> bool {
        self.start_syllable == self.end_syllable
    }

    /// Number of syllables covered; zero for a reversed range.
    pub fn syllable_count(&self) -> usize {
        if self.start_syllable > self.end_syllable {
            return 0;
        }
        (self.end_syllable - self.start_syllable).saturating_add(1)
    }

    /// Same bar and the ranges overlap or are directly adjacent.
    pub fn touches(&self, other: &Hit) -> bool {
        self.bar_id == other.bar_id
            && self.start_syllable <= other.end_syllable.saturating_add(1)
            && other.start_syllable <= self.end_syllable.saturating_add(1)
    }
}

/// Named, colored collection of hits forming one rhyme pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub id: SchemeId,
    /// Base color as `#rrggbb`.
    pub color: String,
    pub name: Option<String>,
    pub hits: Vec<Hit>,
}

impl Scheme {
    /// Creates a scheme with a generated id and one initial hit.
    pub fn new(color: impl Into<String>, first_hit: Hit) -> Self {
        Self {
            id: Uuid::new_v4(),
            color: color.into(),
            name: None,
            hits: vec![first_hit],
        }
    }

    /// Hits of this scheme on one bar, in stored order.
    pub fn hits_on(&self, bar_id: BarId) -> impl Iterator<Item = &Hit> {
        self.hits.iter().filter(move |hit| hit.bar_id == bar_id)
    }
}

/// One line of lyrics with its analyzed words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub id: BarId,
    pub text: String,
    /// Empty until analysis for the current text has been applied.
    pub words: Vec<Word>,
}

impl Bar {
    /// Creates an unanalyzed bar with a generated id.
    pub fn new(text: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), text)
    }

    pub fn with_id(id: BarId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            words: Vec::new(),
        }
    }

    /// Syllables of every word, flattened in word order.
    ///
    /// The position in this iterator is the global syllable index used by hits.
    pub fn syllables(&self) -> impl Iterator<Item = &Syllable> {
        self.words.iter().flat_map(|word| word.syllables.iter())
    }

    pub fn syllable_count(&self) -> usize {
        self.words.iter().map(|word| word.syllables.len()).sum()
    }

    /// Resolves one global syllable index.
    pub fn syllable_at(&self, index: usize) -> Option<&Syllable> {
        self.syllables().nth(index)
    }
}

/// Snapshot data that cannot be repaired into a valid verse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseValidationError {
    ReversedHit {
        scheme_id: SchemeId,
        start: usize,
        end: usize,
    },
    DuplicateBarId(BarId),
    DuplicateSchemeId(SchemeId),
}

impl Display for VerseValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReversedHit {
                scheme_id,
                start,
                end,
            } => write!(
                f,
                "scheme {scheme_id} has a hit with start {start} after end {end}"
            ),
            Self::DuplicateBarId(id) => write!(f, "duplicate bar id: {id}"),
            Self::DuplicateSchemeId(id) => write!(f, "duplicate scheme id: {id}"),
        }
    }
}

impl Error for VerseValidationError {}

/// Repairs applied by `Verse::normalize`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    /// Hits absorbed into an overlapping or adjacent hit.
    pub merged_hits: usize,
    /// Hits pointing at bars the verse does not contain.
    pub dropped_hits: usize,
    /// Schemes left without hits.
    pub dropped_schemes: usize,
}

impl NormalizeReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}

/// Addressable root for authoring: bars plus schemes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub bars: Vec<Bar>,
    pub schemes: Vec<Scheme>,
}

impl Verse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bar(&self, bar_id: BarId) -> Option<&Bar> {
        self.bars.iter().find(|bar| bar.id == bar_id)
    }

    pub fn bar_mut(&mut self, bar_id: BarId) -> Option<&mut Bar> {
        self.bars.iter_mut().find(|bar| bar.id == bar_id)
    }

    /// Appends a bar and returns its id.
    pub fn add_bar(&mut self, bar: Bar) -> BarId {
        let bar_id = bar.id;
        self.bars.push(bar);
        bar_id
    }

    /// Removes a bar together with its hits; empty schemes are dropped.
    ///
    /// Returns `false` when the bar does not exist.
    pub fn remove_bar(&mut self, bar_id: BarId) -> bool {
        let before = self.bars.len();
        self.bars.retain(|bar| bar.id != bar_id);
        if self.bars.len() == before {
            return false;
        }

        for scheme in &mut self.schemes {
            scheme.hits.retain(|hit| hit.bar_id != bar_id);
        }
        self.schemes.retain(|scheme| !scheme.hits.is_empty());
        true
    }

    pub fn scheme(&self, scheme_id: SchemeId) -> Option<&Scheme> {
        self.schemes.iter().find(|scheme| scheme.id == scheme_id)
    }

    pub fn scheme_mut(&mut self, scheme_id: SchemeId) -> Option<&mut Scheme> {
        self.schemes.iter_mut().find(|scheme| scheme.id == scheme_id)
    }

    pub fn scheme_position(&self, scheme_id: SchemeId) -> Option<usize> {
        self.schemes.iter().position(|scheme| scheme.id == scheme_id)
    }

    /// Restores the hit and scheme invariants on externally built data.
    ///
    /// Reversed hits and duplicate ids are rejected before anything changes.
    /// Otherwise hits on unknown bars are dropped, overlapping or adjacent
    /// hits of one scheme are merged and empty schemes are removed.
    pub fn normalize(&mut self) -> Result<NormalizeReport, VerseValidationError> {
        let mut bar_ids = HashSet::with_capacity(self.bars.len());
        for bar in &self.bars {
            if !bar_ids.insert(bar.id) {
                return Err(VerseValidationError::DuplicateBarId(bar.id));
            }
        }
        let mut scheme_ids = HashSet::with_capacity(self.schemes.len());
        for scheme in &self.schemes {
            if !scheme_ids.insert(scheme.id) {
                return Err(VerseValidationError::DuplicateSchemeId(scheme.id));
            }
            if let Some(hit) = scheme
                .hits
                .iter()
                .find(|hit| hit.start_syllable > hit.end_syllable)
            {
                return Err(VerseValidationError::ReversedHit {
                    scheme_id: scheme.id,
                    start: hit.start_syllable,
                    end: hit.end_syllable,
                });
            }
        }

        let mut report = NormalizeReport::default();
        for scheme in &mut self.schemes {
            let before = scheme.hits.len();
            scheme.hits.retain(|hit| bar_ids.contains(&hit.bar_id));
            let known = scheme.hits.len();
            report.dropped_hits += before - known;

            coalesce_hits(&mut scheme.hits);
            report.merged_hits += known - scheme.hits.len();
        }
        let before = self.schemes.len();
        self.schemes.retain(|scheme| !scheme.hits.is_empty());
        report.dropped_schemes = before - self.schemes.len();
        Ok(report)
    }
}

/// Merges every group of touching hits into one, keeping first-seen order.
fn coalesce_hits(hits: &mut Vec<Hit>) {
    let mut merged: Vec<Hit> = Vec::with_capacity(hits.len());
    for hit in hits.drain(..) {
        let mut current = hit;
        let mut slot: Option<usize> = None;
        while let Some(pos) = merged.iter().position(|kept| kept.touches(&current)) {
            let kept = merged.remove(pos);
            current = Hit::span(
                current.bar_id,
                kept.start_syllable.min(current.start_syllable),
                kept.end_syllable.max(current.end_syllable),
            );
            slot = Some(slot.map_or(pos, |at| at.min(pos)));
        }
        merged.insert(slot.unwrap_or(merged.len()), current);
    }
    *hits = merged;
}
