//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Hold the one authoritative `VerseService` for the UI session.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every verse mutation goes through the session lock, so taps and
//!   vocalization results are applied one at a time.
//! - Ids cross the boundary as canonical UUID strings.
//! - Loaded snapshots and configs are validated before they replace
//!   session state; a rejected input leaves the session unchanged.
//!
//! # See also
//! - crates/rhymenote_core/src/service/verse_service.rs

use rhymenote_core::phonetics::syllabifier::build_syllables;
use rhymenote_core::{
    core_version as core_version_inner, first_candidate, get_scheme_shades,
    init_logging as init_logging_inner, ping as ping_inner, EngineConfig, PendingVocalization,
    TapAction, Verse, VerseService, VocalizationTicket,
};
use std::sync::{Mutex, MutexGuard, OnceLock};
use uuid::Uuid;

const SHADE_COUNT_MAX: u32 = 64;
static SESSION: OnceLock<Mutex<VerseService>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive);
///   blank uses the session config's `log_level`.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = if level.trim().is_empty() {
        session().config().log_level.clone()
    } else {
        level
    };
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One syllable of an already vocalized word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyllableItem {
    pub text: String,
    /// `A|E|I|O|U`, or `None` when the syllable has no vowel mark.
    pub vowel: Option<String>,
    pub onset: String,
    pub coda: String,
    pub is_stressed: bool,
    /// Char offset in the input, inclusive.
    pub start_index: u32,
    /// Char offset in the input, exclusive.
    pub end_index: u32,
}

/// Generic action response envelope for verse commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseActionResponse {
    /// Whether operation succeeded.
    pub ok: bool,
    /// Bar or scheme id the operation produced or touched.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl VerseActionResponse {
    fn success(message: impl Into<String>, id: Option<String>) -> Self {
        Self {
            ok: true,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Vocalization work the UI must perform after a text change.
///
/// Pass `bar_id` and `revision` back to `verse_apply_vocalization`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingVocalizationResponse {
    pub ok: bool,
    pub bar_id: Option<String>,
    pub revision: u64,
    pub tokens: Vec<String>,
    pub message: String,
}

impl PendingVocalizationResponse {
    fn from_pending(pending: PendingVocalization) -> Self {
        Self {
            ok: true,
            bar_id: Some(pending.ticket.bar_id.to_string()),
            revision: pending.ticket.revision,
            tokens: pending.tokens,
            message: "Vocalization pending.".to_string(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            bar_id: None,
            revision: 0,
            tokens: Vec::new(),
            message: message.into(),
        }
    }
}

/// Result of one syllable tap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TapResponse {
    /// Applied transition, for example `created_scheme` or `split`.
    pub action: String,
    /// Whether a scheme was deleted because it lost its last hit.
    pub scheme_removed: bool,
    pub scheme_id: Option<String>,
    pub active_scheme_id: Option<String>,
}

/// Summary numbers for one scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeStatsResponse {
    pub ok: bool,
    pub total_syllables: u32,
    pub bar_count: u32,
    /// Covered vowels joined with `-`, for example `A-E-A`.
    pub vowel_pattern: String,
    pub message: String,
}

/// Syllabifies one vocalized word without touching the session.
#[flutter_rust_bridge::frb(sync)]
pub fn syllabify_text(text: String) -> Vec<SyllableItem> {
    build_syllables(text.trim())
        .into_iter()
        .map(|syllable| SyllableItem {
            vowel: syllable.vowel.map(|vowel| vowel.as_str().to_string()),
            text: syllable.text,
            onset: syllable.onset,
            coda: syllable.coda,
            is_stressed: syllable.is_stressed,
            start_index: to_u32(syllable.start_index),
            end_index: to_u32(syllable.end_index),
        })
        .collect()
}

/// Applies an `EngineConfig` JSON object; missing fields take defaults.
///
/// The palette only affects schemes created afterwards.
#[flutter_rust_bridge::frb(sync)]
pub fn engine_configure(config_json: String) -> VerseActionResponse {
    let result = serde_json::from_str::<EngineConfig>(&config_json)
        .map_err(|err| err.to_string())
        .and_then(|config| {
            session()
                .reconfigure(&config)
                .map_err(|err| err.to_string())
        });
    match result {
        Ok(()) => VerseActionResponse::success("Config applied.", None),
        Err(err) => VerseActionResponse::failure(format!("engine_configure failed: {err}")),
    }
}

/// Current session config as JSON; empty string if serialization fails.
#[flutter_rust_bridge::frb(sync)]
pub fn engine_config_json() -> String {
    let config = session().config().clone();
    serde_json::to_string(&config).unwrap_or_default()
}

/// Replaces the session verse with an empty one, keeping the config.
#[flutter_rust_bridge::frb(sync)]
pub fn verse_reset() -> VerseActionResponse {
    let config = session().config().clone();
    match VerseService::new(&config) {
        Ok(service) => {
            *session() = service;
            VerseActionResponse::success("Verse reset.", None)
        }
        Err(err) => VerseActionResponse::failure(format!("verse_reset failed: {err}")),
    }
}

/// Replaces the session verse with a JSON snapshot.
///
/// The snapshot is normalized: touching hits merge, hits on unknown bars
/// and empty schemes are dropped. Reversed hits or duplicate ids reject
/// it. The active scheme selection is cleared; bars keep their analysis.
#[flutter_rust_bridge::frb(sync)]
pub fn verse_load_json(json: String) -> VerseActionResponse {
    let config = session().config().clone();
    let result = serde_json::from_str::<Verse>(&json)
        .map_err(|err| err.to_string())
        .and_then(|verse| VerseService::from_verse(verse, &config).map_err(|err| err.to_string()));
    match result {
        Ok(service) => {
            let bars = service.verse().bars.len();
            *session() = service;
            VerseActionResponse::success(format!("Loaded {bars} bar(s)."), None)
        }
        Err(err) => VerseActionResponse::failure(format!("verse_load_json failed: {err}")),
    }
}

/// Serializes the session verse; empty string if serialization fails.
#[flutter_rust_bridge::frb(sync)]
pub fn verse_snapshot_json() -> String {
    match serde_json::to_string(session().verse()) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("event=verse_snapshot module=ffi status=error error={err}");
            String::new()
        }
    }
}

/// Appends a bar; the returned tokens still need vocalization.
#[flutter_rust_bridge::frb(sync)]
pub fn verse_add_bar(text: String) -> PendingVocalizationResponse {
    PendingVocalizationResponse::from_pending(session().add_bar(text))
}

#[flutter_rust_bridge::frb(sync)]
pub fn verse_remove_bar(bar_id: String) -> VerseActionResponse {
    let result = parse_id(&bar_id).and_then(|id| {
        session()
            .remove_bar(id)
            .map(|()| id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(id) => VerseActionResponse::success("Bar removed.", Some(id.to_string())),
        Err(err) => VerseActionResponse::failure(format!("verse_remove_bar failed: {err}")),
    }
}

/// Replaces a bar's text; earlier pending vocalizations become stale.
#[flutter_rust_bridge::frb(sync)]
pub fn verse_set_bar_text(bar_id: String, text: String) -> PendingVocalizationResponse {
    let result = parse_id(&bar_id).and_then(|id| {
        session()
            .set_bar_text(id, text)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(pending) => PendingVocalizationResponse::from_pending(pending),
        Err(err) => {
            PendingVocalizationResponse::failure(format!("verse_set_bar_text failed: {err}"))
        }
    }
}

/// Applies provider candidates for a pending vocalization.
///
/// `candidates[i]` holds the provider answer for token `i`; only its first
/// candidate is used, and a missing or blank one keeps the raw token.
/// Stale revisions are reported as `ok = false` and change nothing.
#[flutter_rust_bridge::frb(sync)]
pub fn verse_apply_vocalization(
    bar_id: String,
    revision: u64,
    candidates: Vec<Vec<String>>,
) -> VerseActionResponse {
    let bar_id = match parse_id(&bar_id) {
        Ok(id) => id,
        Err(err) => {
            return VerseActionResponse::failure(format!("verse_apply_vocalization failed: {err}"))
        }
    };
    let vocalized = candidates
        .into_iter()
        .map(|answer| first_candidate(answer).unwrap_or_default())
        .collect::<Vec<_>>();
    let ticket = VocalizationTicket { bar_id, revision };

    if session().apply_vocalization(&ticket, &vocalized) {
        VerseActionResponse::success("Vocalization applied.", Some(bar_id.to_string()))
    } else {
        VerseActionResponse::failure("Vocalization dropped: bar text changed or bar removed.")
    }
}

/// Applies one tap on a bar's global syllable index.
#[flutter_rust_bridge::frb(sync)]
pub fn verse_tap(bar_id: String, syllable_index: u32) -> TapResponse {
    let Ok(id) = parse_id(&bar_id) else {
        return TapResponse {
            action: TapAction::Ignored.as_str().to_string(),
            scheme_removed: false,
            scheme_id: None,
            active_scheme_id: session().active_scheme().map(|id| id.to_string()),
        };
    };
    let outcome = session().tap(id, syllable_index as usize);
    TapResponse {
        action: outcome.action.as_str().to_string(),
        scheme_removed: matches!(
            outcome.action,
            TapAction::RemovedHit {
                scheme_removed: true
            }
        ),
        scheme_id: outcome.scheme_id.map(|id| id.to_string()),
        active_scheme_id: outcome.active_scheme.map(|id| id.to_string()),
    }
}

/// Selects the scheme future taps extend; `None` clears the selection.
#[flutter_rust_bridge::frb(sync)]
pub fn verse_select_scheme(scheme_id: Option<String>) -> VerseActionResponse {
    let result = scheme_id
        .as_deref()
        .map(parse_id)
        .transpose()
        .and_then(|id| {
            session()
                .select_scheme(id)
                .map(|()| id)
                .map_err(|err| err.to_string())
        });
    match result {
        Ok(id) => VerseActionResponse::success("Scheme selected.", id.map(|id| id.to_string())),
        Err(err) => VerseActionResponse::failure(format!("verse_select_scheme failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn scheme_rename(scheme_id: String, name: Option<String>) -> VerseActionResponse {
    scheme_command("scheme_rename", "Scheme renamed.", &scheme_id, |service, id| {
        service.rename_scheme(id, name)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn scheme_recolor(scheme_id: String, color: String) -> VerseActionResponse {
    scheme_command("scheme_recolor", "Scheme recolored.", &scheme_id, |service, id| {
        service.recolor_scheme(id, &color)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn scheme_delete(scheme_id: String) -> VerseActionResponse {
    scheme_command("scheme_delete", "Scheme deleted.", &scheme_id, |service, id| {
        service.delete_scheme(id)
    })
}

/// Moves the scheme at position `from` to position `to`.
#[flutter_rust_bridge::frb(sync)]
pub fn scheme_reorder(from: u32, to: u32) -> VerseActionResponse {
    match session().reorder_scheme(from as usize, to as usize) {
        Ok(()) => VerseActionResponse::success("Scheme moved.", None),
        Err(err) => VerseActionResponse::failure(format!("scheme_reorder failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn scheme_stats(scheme_id: String) -> SchemeStatsResponse {
    let result = parse_id(&scheme_id).and_then(|id| {
        session()
            .scheme_stats(id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(stats) => SchemeStatsResponse {
            ok: true,
            total_syllables: to_u32(stats.total_syllables),
            bar_count: to_u32(stats.bar_count),
            vowel_pattern: stats
                .vowel_pattern
                .iter()
                .map(|vowel| vowel.as_str())
                .collect::<Vec<_>>()
                .join("-"),
            message: "Stats computed.".to_string(),
        },
        Err(err) => SchemeStatsResponse {
            ok: false,
            total_syllables: 0,
            bar_count: 0,
            vowel_pattern: String::new(),
            message: format!("scheme_stats failed: {err}"),
        },
    }
}

/// Gradient of `count` colors derived from `base_color`.
#[flutter_rust_bridge::frb(sync)]
pub fn scheme_shades(base_color: String, count: u32) -> Vec<String> {
    get_scheme_shades(&base_color, count.min(SHADE_COUNT_MAX) as usize)
}

/// Render color per syllable of a bar; unknown bars yield an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn bar_syllable_colors(bar_id: String) -> Vec<Option<String>> {
    parse_id(&bar_id)
        .and_then(|id| {
            session()
                .syllable_colors(id)
                .map_err(|err| err.to_string())
        })
        .unwrap_or_default()
}

/// Automatic rhyme groups over the session verse as a JSON array.
#[flutter_rust_bridge::frb(sync)]
pub fn detect_rhymes_json() -> String {
    let groups = session().detect_rhymes();
    match serde_json::to_string(&groups) {
        Ok(json) => json,
        Err(err) => {
            log::warn!("event=detect_rhymes module=ffi status=error error={err}");
            "[]".to_string()
        }
    }
}

fn session() -> MutexGuard<'static, VerseService> {
    SESSION
        .get_or_init(|| Mutex::new(VerseService::default()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn scheme_command(
    operation: &str,
    success: &str,
    scheme_id: &str,
    f: impl FnOnce(&mut VerseService, Uuid) -> Result<(), rhymenote_core::VerseServiceError>,
) -> VerseActionResponse {
    let result = parse_id(scheme_id)
        .and_then(|id| f(&mut session(), id).map(|()| id).map_err(|err| err.to_string()));
    match result {
        Ok(id) => VerseActionResponse::success(success, Some(id.to_string())),
        Err(err) => VerseActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn parse_id(raw: &str) -> Result<Uuid, String> {
    Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid id `{}`: {err}", raw.trim()))
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
