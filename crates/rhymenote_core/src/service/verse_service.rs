//! Verse authoring use-case service.
//!
//! # Responsibility
//! - Own one `Verse` plus the active scheme selection.
//! - Serialize taps and explicit scheme operations against that state.
//! - Apply bar re-analysis with last-edit-wins semantics.
//!
//! # Invariants
//! - A service only ever holds a validated config and a normalized verse.
//! - `tap` never fails; stale bars and indices are ignored.
//! - The active scheme, when set, always exists in the verse.
//! - A vocalization result is applied only for the bar's latest text.

use crate::config::{ConfigError, EngineConfig};
use crate::model::phonetics::{BarId, RhymeGroup};
use crate::model::verse::{Bar, Scheme, SchemeId, Verse, VerseValidationError};
use crate::phonetics::signature::{analyze_tokens, tokenize_line};
use crate::rhyme::cluster::cluster_bars;
use crate::scheme::coloring::bar_syllable_colors;
use crate::scheme::shades::is_valid_hex;
use crate::scheme::stats::{compute_scheme_stats, SchemeStats};
use crate::scheme::tap::{apply_tap, TapOutcome};
use crate::service::rhyme_engine::RhymeEngine;
use crate::vocalize::cache::VocalizationCache;
use crate::vocalize::provider::VocalizationProvider;
use crate::vocalize::tracker::{RevisionTracker, VocalizationTicket};
use log::{debug, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from explicit bar and scheme operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerseServiceError {
    BarNotFound(BarId),
    SchemeNotFound(SchemeId),
    /// Color is not `#rgb` or `#rrggbb`.
    InvalidColor(String),
    /// Name is blank after trim; use `None` to clear a name.
    InvalidSchemeName,
    ReorderOutOfRange { from: usize, to: usize, len: usize },
    InvalidConfig(ConfigError),
    InvalidVerse(VerseValidationError),
}

impl Display for VerseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BarNotFound(id) => write!(f, "bar not found: {id}"),
            Self::SchemeNotFound(id) => write!(f, "scheme not found: {id}"),
            Self::InvalidColor(value) => write!(f, "invalid scheme color: `{value}`"),
            Self::InvalidSchemeName => write!(f, "scheme name must not be blank"),
            Self::ReorderOutOfRange { from, to, len } => write!(
                f,
                "scheme reorder out of range: {from} -> {to} with {len} schemes"
            ),
            Self::InvalidConfig(err) => write!(f, "invalid engine config: {err}"),
            Self::InvalidVerse(err) => write!(f, "invalid verse: {err}"),
        }
    }
}

impl Error for VerseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidConfig(err) => Some(err),
            Self::InvalidVerse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for VerseServiceError {
    fn from(value: ConfigError) -> Self {
        Self::InvalidConfig(value)
    }
}

impl From<VerseValidationError> for VerseServiceError {
    fn from(value: VerseValidationError) -> Self {
        Self::InvalidVerse(value)
    }
}

/// Text change waiting for vocalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVocalization {
    pub ticket: VocalizationTicket,
    /// Tokens of the new text, in order; vocalize each one.
    pub tokens: Vec<String>,
}

/// Single authoritative owner of a verse being authored.
pub struct VerseService {
    verse: Verse,
    active_scheme: Option<SchemeId>,
    tracker: RevisionTracker,
    config: EngineConfig,
}

impl Default for VerseService {
    /// Empty verse with the built-in config, which always validates.
    fn default() -> Self {
        Self {
            verse: Verse::new(),
            active_scheme: None,
            tracker: RevisionTracker::new(),
            config: EngineConfig::default(),
        }
    }
}

impl VerseService {
    pub fn new(config: &EngineConfig) -> Result<Self, VerseServiceError> {
        Self::from_verse(Verse::new(), config)
    }

    /// Wraps an existing (for example deserialized) verse.
    ///
    /// The config is validated and the verse normalized first; reversed
    /// hits and duplicate ids are rejected.
    pub fn from_verse(
        mut verse: Verse,
        config: &EngineConfig,
    ) -> Result<Self, VerseServiceError> {
        let config = config.clone().normalized();
        config.validate()?;
        let report = verse.normalize()?;
        if !report.is_clean() {
            warn!(
                "event=verse_load module=verse status=repaired merged_hits={} dropped_hits={} dropped_schemes={}",
                report.merged_hits, report.dropped_hits, report.dropped_schemes
            );
        }
        info!(
            "event=verse_load module=verse status=ok bars={} schemes={}",
            verse.bars.len(),
            verse.schemes.len()
        );
        Ok(Self {
            verse,
            active_scheme: None,
            tracker: RevisionTracker::new(),
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Replaces the config; the current one stays on error.
    ///
    /// A new palette only affects schemes created afterwards.
    pub fn reconfigure(&mut self, config: &EngineConfig) -> Result<(), VerseServiceError> {
        let config = config.clone().normalized();
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn verse(&self) -> &Verse {
        &self.verse
    }

    pub fn into_verse(self) -> Verse {
        self.verse
    }

    pub fn active_scheme(&self) -> Option<SchemeId> {
        self.active_scheme
    }

    /// Selects the scheme future taps extend, or clears the selection.
    pub fn select_scheme(&mut self, scheme_id: Option<SchemeId>) -> Result<(), VerseServiceError> {
        if let Some(id) = scheme_id {
            if self.verse.scheme(id).is_none() {
                return Err(VerseServiceError::SchemeNotFound(id));
            }
        }
        self.active_scheme = scheme_id;
        Ok(())
    }

    /// Appends a bar and returns the vocalization it needs.
    pub fn add_bar(&mut self, text: impl Into<String>) -> PendingVocalization {
        let bar = Bar::new(text);
        let tokens = owned_tokens(&bar.text);
        let bar_id = self.verse.add_bar(bar);
        PendingVocalization {
            ticket: self.tracker.begin(bar_id),
            tokens,
        }
    }

    /// Removes a bar, its hits and any scheme left empty.
    pub fn remove_bar(&mut self, bar_id: BarId) -> Result<(), VerseServiceError> {
        if !self.verse.remove_bar(bar_id) {
            return Err(VerseServiceError::BarNotFound(bar_id));
        }
        self.tracker.invalidate(bar_id);
        if let Some(active) = self.active_scheme {
            if self.verse.scheme(active).is_none() {
                self.active_scheme = None;
            }
        }
        info!(
            "event=bar_remove module=verse status=ok bars={} schemes={}",
            self.verse.bars.len(),
            self.verse.schemes.len()
        );
        Ok(())
    }

    /// Replaces a bar's text and discards its previous syllables.
    ///
    /// Any vocalization still pending for the old text becomes stale.
    pub fn set_bar_text(
        &mut self,
        bar_id: BarId,
        text: impl Into<String>,
    ) -> Result<PendingVocalization, VerseServiceError> {
        let bar = self
            .verse
            .bar_mut(bar_id)
            .ok_or(VerseServiceError::BarNotFound(bar_id))?;
        bar.text = text.into();
        bar.words.clear();
        let tokens = owned_tokens(&bar.text);
        Ok(PendingVocalization {
            ticket: self.tracker.begin(bar_id),
            tokens,
        })
    }

    /// Applies vocalized forms for a ticket; stale tickets are dropped.
    ///
    /// `vocalized[i]` belongs to token `i`; missing or blank entries fall
    /// back to the raw token. Returns whether the result was applied.
    pub fn apply_vocalization(&mut self, ticket: &VocalizationTicket, vocalized: &[String]) -> bool {
        if !self.tracker.is_current(ticket) {
            debug!(
                "event=vocalize_apply module=verse status=dropped reason=stale revision={}",
                ticket.revision
            );
            return false;
        }
        let Some(bar) = self.verse.bar_mut(ticket.bar_id) else {
            return false;
        };

        let tokens = tokenize_line(&bar.text);
        bar.words = analyze_tokens(&tokens, vocalized);
        debug!(
            "event=vocalize_apply module=verse status=ok revision={} words={} syllables={}",
            ticket.revision,
            bar.words.len(),
            bar.syllable_count()
        );
        true
    }

    /// Synchronous text update: vocalizes through `engine` and applies.
    pub fn update_bar_text<P: VocalizationProvider, C: VocalizationCache>(
        &mut self,
        bar_id: BarId,
        text: impl Into<String>,
        engine: &RhymeEngine<P, C>,
    ) -> Result<(), VerseServiceError> {
        let pending = self.set_bar_text(bar_id, text)?;
        let vocalized = engine.vocalize_tokens(&pending.tokens);
        self.apply_vocalization(&pending.ticket, &vocalized);
        Ok(())
    }

    /// Applies one tap and updates the active scheme.
    pub fn tap(&mut self, bar_id: BarId, syllable_index: usize) -> TapOutcome {
        let outcome = apply_tap(
            &mut self.verse,
            self.active_scheme,
            &self.config.palette,
            bar_id,
            syllable_index,
        );
        self.active_scheme = outcome.active_scheme;
        outcome
    }

    /// Sets or clears a scheme's display name.
    pub fn rename_scheme(
        &mut self,
        scheme_id: SchemeId,
        name: Option<String>,
    ) -> Result<(), VerseServiceError> {
        let name = match name {
            Some(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err(VerseServiceError::InvalidSchemeName);
                }
                Some(trimmed.to_string())
            }
            None => None,
        };
        self.scheme_mut(scheme_id)?.name = name;
        Ok(())
    }

    /// Replaces a scheme's base color.
    pub fn recolor_scheme(
        &mut self,
        scheme_id: SchemeId,
        color: &str,
    ) -> Result<(), VerseServiceError> {
        if !is_valid_hex(color) {
            return Err(VerseServiceError::InvalidColor(color.to_string()));
        }
        self.scheme_mut(scheme_id)?.color = color.trim().to_ascii_lowercase();
        Ok(())
    }

    /// Moves the scheme at `from` so it ends up at `to`.
    pub fn reorder_scheme(&mut self, from: usize, to: usize) -> Result<(), VerseServiceError> {
        let len = self.verse.schemes.len();
        if from >= len || to >= len {
            return Err(VerseServiceError::ReorderOutOfRange { from, to, len });
        }
        let scheme = self.verse.schemes.remove(from);
        self.verse.schemes.insert(to, scheme);
        Ok(())
    }

    /// Deletes a scheme with all its hits.
    ///
    /// When it was active, the preceding scheme becomes active (none if it
    /// was first), matching tap-driven deletion.
    pub fn delete_scheme(&mut self, scheme_id: SchemeId) -> Result<(), VerseServiceError> {
        let position = self
            .verse
            .scheme_position(scheme_id)
            .ok_or(VerseServiceError::SchemeNotFound(scheme_id))?;
        self.verse.schemes.remove(position);
        if self.active_scheme == Some(scheme_id) {
            self.active_scheme = position
                .checked_sub(1)
                .map(|previous| self.verse.schemes[previous].id);
        }
        info!(
            "event=scheme_delete module=verse status=ok schemes={}",
            self.verse.schemes.len()
        );
        Ok(())
    }

    pub fn scheme_stats(&self, scheme_id: SchemeId) -> Result<SchemeStats, VerseServiceError> {
        let scheme = self
            .verse
            .scheme(scheme_id)
            .ok_or(VerseServiceError::SchemeNotFound(scheme_id))?;
        Ok(compute_scheme_stats(scheme, &self.verse))
    }

    /// Render colors for every syllable of a bar.
    pub fn syllable_colors(&self, bar_id: BarId) -> Result<Vec<Option<String>>, VerseServiceError> {
        if self.verse.bar(bar_id).is_none() {
            return Err(VerseServiceError::BarNotFound(bar_id));
        }
        Ok(bar_syllable_colors(&self.verse, bar_id))
    }

    /// Automatic rhyme groups over every analyzed bar.
    pub fn detect_rhymes(&self) -> Vec<RhymeGroup> {
        cluster_bars(&self.verse.bars)
    }

    fn scheme_mut(&mut self, scheme_id: SchemeId) -> Result<&mut Scheme, VerseServiceError> {
        self.verse
            .scheme_mut(scheme_id)
            .ok_or(VerseServiceError::SchemeNotFound(scheme_id))
    }
}

fn owned_tokens(text: &str) -> Vec<String> {
    tokenize_line(text).into_iter().map(str::to_string).collect()
}
