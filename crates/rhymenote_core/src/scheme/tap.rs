//! Tap-driven mark/unmark state machine.
//!
//! Decision order for `apply_tap(bar, index)`:
//! 1. A hit of any scheme covers `index`: delete it (single syllable),
//!    shrink it from either edge, or split it around `index`.
//! 2. Otherwise, with an active scheme: extend its adjacent hit on the bar
//!    and merge touching hits, or append a new single-syllable hit.
//! 3. Otherwise: create a new scheme with a palette color and activate it.
//!
//! # Invariants
//! - Unknown bars and out-of-range indices leave the verse untouched.
//! - Hits of one scheme on one bar never overlap or touch after a tap.

use crate::model::phonetics::BarId;
use crate::model::verse::{Hit, Scheme, SchemeId, Verse};
use crate::scheme::palette::color_for_index;
use log::debug;

/// What a tap did to the verse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapAction {
    /// Stale bar or out-of-range index; nothing changed.
    Ignored,
    /// A single-syllable hit was deleted.
    RemovedHit { scheme_removed: bool },
    ShrunkStart,
    ShrunkEnd,
    /// An interior tap cut one hit into two.
    Split,
    /// An adjacent hit of the active scheme grew to include the index.
    Extended,
    /// The active scheme gained a new single-syllable hit.
    Appended,
    /// A new scheme was created around the index.
    CreatedScheme,
}

impl TapAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignored => "ignored",
            Self::RemovedHit { .. } => "removed_hit",
            Self::ShrunkStart => "shrunk_start",
            Self::ShrunkEnd => "shrunk_end",
            Self::Split => "split",
            Self::Extended => "extended",
            Self::Appended => "appended",
            Self::CreatedScheme => "created_scheme",
        }
    }
}

/// Result of one tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapOutcome {
    pub action: TapAction,
    /// Scheme the tap touched, if any.
    pub scheme_id: Option<SchemeId>,
    /// Active scheme after the tap.
    pub active_scheme: Option<SchemeId>,
}

/// Applies one tap to `verse` and returns the new active scheme.
///
/// `palette` supplies the base color of a newly created scheme.
pub fn apply_tap(
    verse: &mut Verse,
    active: Option<SchemeId>,
    palette: &[String],
    bar_id: BarId,
    index: usize,
) -> TapOutcome {
    let in_range = verse
        .bar(bar_id)
        .is_some_and(|bar| index < bar.syllable_count());
    if !in_range {
        debug!("event=scheme_tap module=scheme status=ignored reason=stale_target");
        return TapOutcome {
            action: TapAction::Ignored,
            scheme_id: None,
            active_scheme: active,
        };
    }

    let outcome = if let Some((scheme_pos, hit_pos)) = find_covering_hit(verse, bar_id, index) {
        edit_covering_hit(verse, active, scheme_pos, hit_pos, index)
    } else {
        match active.filter(|id| verse.scheme(*id).is_some()) {
            Some(active_id) => grow_active_scheme(verse, active_id, bar_id, index),
            None => create_scheme(verse, palette, bar_id, index),
        }
    };

    debug!(
        "event=scheme_tap module=scheme status=ok action={} schemes={}",
        outcome.action.as_str(),
        verse.schemes.len()
    );
    outcome
}

fn find_covering_hit(verse: &Verse, bar_id: BarId, index: usize) -> Option<(usize, usize)> {
    verse
        .schemes
        .iter()
        .enumerate()
        .find_map(|(scheme_pos, scheme)| {
            scheme
                .hits
                .iter()
                .position(|hit| hit.contains(bar_id, index))
                .map(|hit_pos| (scheme_pos, hit_pos))
        })
}

fn edit_covering_hit(
    verse: &mut Verse,
    active: Option<SchemeId>,
    scheme_pos: usize,
    hit_pos: usize,
    index: usize,
) -> TapOutcome {
    let scheme = &mut verse.schemes[scheme_pos];
    let scheme_id = scheme.id;
    let hit = scheme.hits[hit_pos];

    if hit.is_single() {
        scheme.hits.remove(hit_pos);
        if !scheme.hits.is_empty() {
            return TapOutcome {
                action: TapAction::RemovedHit {
                    scheme_removed: false,
                },
                scheme_id: Some(scheme_id),
                active_scheme: active,
            };
        }

        verse.schemes.remove(scheme_pos);
        let active_scheme = if active == Some(scheme_id) {
            scheme_pos
                .checked_sub(1)
                .map(|previous| verse.schemes[previous].id)
        } else {
            active
        };
        return TapOutcome {
            action: TapAction::RemovedHit {
                scheme_removed: true,
            },
            scheme_id: Some(scheme_id),
            active_scheme,
        };
    }

    let action = if index == hit.start_syllable {
        scheme.hits[hit_pos].start_syllable += 1;
        TapAction::ShrunkStart
    } else if index == hit.end_syllable {
        scheme.hits[hit_pos].end_syllable -= 1;
        TapAction::ShrunkEnd
    } else {
        let left = Hit::span(hit.bar_id, hit.start_syllable, index - 1);
        let right = Hit::span(hit.bar_id, index + 1, hit.end_syllable);
        scheme.hits.splice(hit_pos..=hit_pos, [left, right]);
        TapAction::Split
    };

    TapOutcome {
        action,
        scheme_id: Some(scheme_id),
        active_scheme: Some(scheme_id),
    }
}

fn grow_active_scheme(
    verse: &mut Verse,
    active_id: SchemeId,
    bar_id: BarId,
    index: usize,
) -> TapOutcome {
    let Some(scheme) = verse.scheme_mut(active_id) else {
        return TapOutcome {
            action: TapAction::Ignored,
            scheme_id: None,
            active_scheme: None,
        };
    };

    let extend_end = scheme
        .hits
        .iter()
        .position(|hit| {
            hit.bar_id == bar_id && hit.end_syllable.checked_add(1) == Some(index)
        });
    let extend_start = scheme
        .hits
        .iter()
        .position(|hit| {
            hit.bar_id == bar_id && index.checked_add(1) == Some(hit.start_syllable)
        });

    let extended = match (extend_end, extend_start) {
        (Some(pos), _) => {
            scheme.hits[pos].end_syllable = index;
            true
        }
        (None, Some(pos)) => {
            scheme.hits[pos].start_syllable = index;
            true
        }
        (None, None) => false,
    };

    let action = if extended {
        merge_adjacent_hits(&mut scheme.hits, bar_id);
        TapAction::Extended
    } else {
        scheme.hits.push(Hit::single(bar_id, index));
        TapAction::Appended
    };

    TapOutcome {
        action,
        scheme_id: Some(active_id),
        active_scheme: Some(active_id),
    }
}

fn create_scheme(verse: &mut Verse, palette: &[String], bar_id: BarId, index: usize) -> TapOutcome {
    let color = color_for_index(palette, verse.schemes.len());
    let scheme = Scheme::new(color, Hit::single(bar_id, index));
    let scheme_id = scheme.id;
    verse.schemes.push(scheme);
    TapOutcome {
        action: TapAction::CreatedScheme,
        scheme_id: Some(scheme_id),
        active_scheme: Some(scheme_id),
    }
}

/// Repeatedly joins hits on `bar_id` where one ends right before another starts.
pub fn merge_adjacent_hits(hits: &mut Vec<Hit>, bar_id: BarId) {
    loop {
        let pair = hits.iter().enumerate().find_map(|(left, a)| {
            if a.bar_id != bar_id {
                return None;
            }
            hits.iter()
                .position(|b| {
                    b.bar_id == bar_id && a.end_syllable.checked_add(1) == Some(b.start_syllable)
                })
                .map(|right| (left, right))
        });

        let Some((left, right)) = pair else {
            break;
        };
        hits[left].end_syllable = hits[right].end_syllable;
        hits.remove(right);
    }
}

/// True when no two hits on the same bar overlap or touch.
pub fn hits_are_disjoint(hits: &[Hit]) -> bool {
    hits.iter().enumerate().all(|(i, a)| {
        hits.iter().skip(i + 1).all(|b| !a.touches(b))
    })
}
