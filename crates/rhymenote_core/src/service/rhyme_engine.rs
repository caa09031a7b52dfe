//! Analysis use-case service.
//!
//! # Responsibility
//! - Vocalize tokens through the injected provider and cache.
//! - Turn bar text into analyzed words and rhyme groups.
//!
//! # Invariants
//! - Provider failures degrade to raw text and never surface to callers.
//! - Only the first vocalization candidate is ever used.
//! - Batches run concurrently; output order always matches input order.

use crate::config::{ConfigError, EngineConfig};
use crate::model::phonetics::{BarId, RhymeGroup, Word};
use crate::phonetics::signature::{analyze_tokens, clean_word, tokenize_line};
use crate::rhyme::cluster::{cluster_words, ClusterInput};
use crate::vocalize::cache::VocalizationCache;
use crate::vocalize::provider::{first_candidate, VocalizationProvider};
use log::{debug, warn};
use rayon::prelude::*;

/// One line after analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzedLine {
    pub line_id: BarId,
    pub words: Vec<Word>,
}

/// Analysis facade over a vocalization provider and a session cache.
pub struct RhymeEngine<P: VocalizationProvider, C: VocalizationCache> {
    provider: P,
    cache: C,
    config: EngineConfig,
}

impl<P: VocalizationProvider, C: VocalizationCache> RhymeEngine<P, C> {
    /// Builds an engine; `config` is normalized, then validated.
    pub fn new(provider: P, cache: C, config: EngineConfig) -> Result<Self, ConfigError> {
        let config = config.normalized();
        config.validate()?;
        Ok(Self {
            provider,
            cache,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Vocalized form of one token; the raw token when vocalization fails.
    pub fn vocalize_word(&self, token: &str) -> String {
        let clean = clean_word(token);
        if clean.is_empty() {
            return token.to_string();
        }
        if let Some(cached) = self.cache.get(&clean) {
            return cached;
        }

        match self.provider.vocalize(&clean).and_then(first_candidate) {
            Ok(vocalized) => {
                self.cache.put(clean, vocalized.clone());
                vocalized
            }
            Err(err) => {
                warn!(
                    "event=vocalize module=engine status=fallback provider={} reason={err}",
                    self.provider.provider_id()
                );
                token.to_string()
            }
        }
    }

    /// Vocalizes tokens in order, running each batch concurrently.
    pub fn vocalize_tokens<T: AsRef<str> + Sync>(&self, tokens: &[T]) -> Vec<String> {
        let mut vocalized = Vec::with_capacity(tokens.len());
        for batch in tokens.chunks(self.config.vocalize_batch_size) {
            let results: Vec<String> = batch
                .par_iter()
                .map(|token| self.vocalize_word(token.as_ref()))
                .collect();
            vocalized.extend(results);
        }
        vocalized
    }

    /// Tokenizes, vocalizes and analyzes one line of text.
    pub fn analyze_line(&self, text: &str) -> Vec<Word> {
        let tokens = tokenize_line(text);
        let vocalized = self.vocalize_tokens(&tokens);
        analyze_tokens(&tokens, &vocalized)
    }

    /// Analyzes several lines, keeping their ids.
    pub fn analyze_lines(&self, lines: &[(BarId, &str)]) -> Vec<AnalyzedLine> {
        lines
            .iter()
            .map(|(line_id, text)| AnalyzedLine {
                line_id: *line_id,
                words: self.analyze_line(text),
            })
            .collect()
    }

    /// Analyzes lines and clusters all of their words.
    pub fn detect_rhymes(&self, lines: &[(BarId, &str)]) -> Vec<RhymeGroup> {
        let analyzed = self.analyze_lines(lines);
        let inputs: Vec<ClusterInput<'_>> = analyzed
            .iter()
            .flat_map(|line| {
                line.words
                    .iter()
                    .enumerate()
                    .map(move |(word_position, word)| ClusterInput {
                        line_id: line.line_id,
                        word_position,
                        word,
                    })
            })
            .collect();
        let groups = cluster_words(&inputs);
        debug!(
            "event=detect_rhymes module=engine status=ok lines={} groups={}",
            lines.len(),
            groups.len()
        );
        groups
    }
}
