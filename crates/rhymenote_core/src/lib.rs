//! Core rhyme analysis and scheme authoring for RhymeNote.
//! This crate is the single source of truth for phonetic and authoring invariants.

pub mod config;
pub mod logging;
pub mod model;
pub mod phonetics;
pub mod rhyme;
pub mod scheme;
pub mod service;
pub mod vocalize;

pub use config::{ConfigError, EngineConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::phonetics::{BarId, RhymeGroup, RhymeMember, RhymeType, Syllable, Vowel, Word};
pub use model::verse::{
    Bar, Hit, NormalizeReport, Scheme, SchemeId, Verse, VerseValidationError,
};
pub use phonetics::signature::{analyze_word, anchor_signature, vowel_signature};
pub use phonetics::syllabifier::{extract_syllable_details, syllabify, SyllableDetails};
pub use rhyme::cluster::{cluster_bars, cluster_words, ClusterInput};
pub use scheme::coloring::bar_syllable_colors;
pub use scheme::shades::{get_scheme_shades, scheme_shade_at, ColorParseError};
pub use scheme::stats::{compute_scheme_stats, SchemeStats};
pub use scheme::tap::{apply_tap, TapAction, TapOutcome};
pub use service::rhyme_engine::{AnalyzedLine, RhymeEngine};
pub use service::verse_service::{PendingVocalization, VerseService, VerseServiceError};
pub use vocalize::cache::{InMemoryVocalizationCache, NoopVocalizationCache, VocalizationCache};
pub use vocalize::provider::{
    first_candidate, PassthroughProvider, VocalizationError, VocalizationProvider,
};
pub use vocalize::tracker::{RevisionTracker, VocalizationTicket};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
