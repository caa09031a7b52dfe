//! Session-scoped vocalization cache.

use std::collections::HashMap;
use std::sync::Mutex;

/// Get/put cache injected into the engine.
///
/// Keys are clean (mark-free) words; values are chosen vocalized forms.
pub trait VocalizationCache: Send + Sync {
    fn get(&self, clean_word: &str) -> Option<String>;
    fn put(&self, clean_word: String, vocalized: String);
}

/// In-memory cache living as long as its owner.
#[derive(Debug, Default)]
pub struct InMemoryVocalizationCache {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryVocalizationCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl VocalizationCache for InMemoryVocalizationCache {
    fn get(&self, clean_word: &str) -> Option<String> {
        // A poisoned lock only means a writer panicked; the map is still usable.
        let entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(clean_word).cloned()
    }

    fn put(&self, clean_word: String, vocalized: String) {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(clean_word, vocalized);
    }
}

/// Cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVocalizationCache;

impl VocalizationCache for NoopVocalizationCache {
    fn get(&self, _clean_word: &str) -> Option<String> {
        None
    }

    fn put(&self, _clean_word: String, _vocalized: String) {}
}
