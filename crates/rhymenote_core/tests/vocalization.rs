use rhymenote_core::vocalize::provider::VocalizationResult;
use rhymenote_core::{
    EngineConfig, InMemoryVocalizationCache, NoopVocalizationCache, PassthroughProvider,
    RhymeEngine, VerseService, VocalizationCache, VocalizationError, VocalizationProvider,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// bet+patah, bet+patah
const BABA: &str = "\u{05D1}\u{05B7}\u{05D1}\u{05B7}";

struct MapProvider {
    answers: HashMap<String, Vec<String>>,
    calls: Arc<AtomicUsize>,
}

impl MapProvider {
    fn new(answers: Vec<(&str, Vec<&str>)>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let provider = Self {
            answers: answers
                .into_iter()
                .map(|(raw, candidates)| {
                    (
                        raw.to_string(),
                        candidates.into_iter().map(str::to_string).collect(),
                    )
                })
                .collect(),
            calls: Arc::clone(&calls),
        };
        (provider, calls)
    }
}

impl VocalizationProvider for MapProvider {
    fn provider_id(&self) -> &str {
        "map"
    }

    fn vocalize(&self, raw_word: &str) -> VocalizationResult<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .get(raw_word)
            .cloned()
            .ok_or_else(|| VocalizationError::Unavailable("offline".to_string()))
    }
}

#[test]
fn engine_uses_first_candidate() {
    let (provider, _) = MapProvider::new(vec![("בב", vec![BABA, "other"])]);
    let engine =
        RhymeEngine::new(provider, NoopVocalizationCache, EngineConfig::default()).unwrap();
    assert_eq!(engine.vocalize_word("בב"), BABA);
}

#[test]
fn provider_failure_falls_back_to_raw_word() {
    let (provider, calls) = MapProvider::new(vec![("empty", vec![])]);
    let engine =
        RhymeEngine::new(provider, NoopVocalizationCache, EngineConfig::default()).unwrap();

    assert_eq!(engine.vocalize_word("unknown,"), "unknown,");
    assert_eq!(engine.vocalize_word("empty"), "empty");
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let words = engine.analyze_line("unknown, empty");
    assert_eq!(words.len(), 2);
    assert_eq!(words[0].vocalized_text, "unknown");
}

#[test]
fn cache_prevents_repeat_lookups() {
    let (provider, calls) = MapProvider::new(vec![("בב", vec![BABA])]);
    let engine = RhymeEngine::new(
        provider,
        InMemoryVocalizationCache::new(),
        EngineConfig::default(),
    )
    .unwrap();

    engine.vocalize_word("בב");
    engine.vocalize_word("בב!");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(engine.cache().get("בב").as_deref(), Some(BABA));
}

#[test]
fn failures_are_not_cached() {
    let (provider, calls) = MapProvider::new(vec![]);
    let engine = RhymeEngine::new(
        provider,
        InMemoryVocalizationCache::new(),
        EngineConfig::default(),
    )
    .unwrap();
    engine.vocalize_word("x");
    engine.vocalize_word("x");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(engine.cache().is_empty());
}

#[test]
fn batched_vocalization_preserves_order() {
    let config = EngineConfig {
        vocalize_batch_size: 2,
        ..EngineConfig::default()
    };
    let engine = RhymeEngine::new(PassthroughProvider, NoopVocalizationCache, config).unwrap();
    let tokens = ["a", "b", "c", "d", "e"];
    assert_eq!(engine.vocalize_tokens(&tokens), vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn stale_vocalization_is_dropped() {
    let mut service = VerseService::new(&EngineConfig::default()).unwrap();
    let first = service.add_bar("old text");
    let bar_id = first.ticket.bar_id;
    let second = service.set_bar_text(bar_id, "bb").unwrap();
    assert_eq!(second.tokens, vec!["bb"]);

    assert!(!service.apply_vocalization(&first.ticket, &["x".to_string(), "y".to_string()]));
    assert!(service.verse().bar(bar_id).unwrap().words.is_empty());

    assert!(service.apply_vocalization(&second.ticket, &[BABA.to_string()]));
    let bar = service.verse().bar(bar_id).unwrap();
    assert_eq!(bar.words.len(), 1);
    assert_eq!(bar.syllable_count(), 2);

    assert!(!service.apply_vocalization(&first.ticket, &[]));
}

#[test]
fn removed_bar_drops_pending_vocalization() {
    let mut service = VerseService::new(&EngineConfig::default()).unwrap();
    let pending = service.add_bar("bb");
    service.remove_bar(pending.ticket.bar_id).unwrap();
    assert!(!service.apply_vocalization(&pending.ticket, &[BABA.to_string()]));
}

#[test]
fn update_bar_text_analyzes_synchronously() {
    let (provider, _) = MapProvider::new(vec![("בב", vec![BABA])]);
    let engine = RhymeEngine::new(
        provider,
        InMemoryVocalizationCache::new(),
        EngineConfig::default(),
    )
    .unwrap();
    let mut service = VerseService::new(engine.config()).unwrap();
    let bar_id = service.add_bar("").ticket.bar_id;

    service.update_bar_text(bar_id, "בב בב", &engine).unwrap();
    let bar = service.verse().bar(bar_id).unwrap();
    assert_eq!(bar.text, "בב בב");
    assert_eq!(bar.syllable_count(), 4);
    assert_eq!(bar.words[1].vowel_signature, "A-A");
}
