//! Vocalization provider contract.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Provider-side failure. Callers degrade to raw text instead of surfacing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VocalizationError {
    /// Provider could not be reached (network, quota, shutdown).
    Unavailable(String),
    /// Provider answered with zero candidates.
    EmptyResult,
    /// Provider-specific failure.
    Provider { provider_id: String, message: String },
}

impl Display for VocalizationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "vocalization unavailable: {message}"),
            Self::EmptyResult => write!(f, "vocalization returned no candidates"),
            Self::Provider {
                provider_id,
                message,
            } => write!(f, "vocalization provider `{provider_id}` failed: {message}"),
        }
    }
}

impl Error for VocalizationError {}

pub type VocalizationResult<T> = Result<T, VocalizationError>;

/// External vocalizer: raw word to ordered candidate vocalized forms.
///
/// Implementations must be safe to call from several batch workers at once.
pub trait VocalizationProvider: Send + Sync {
    fn provider_id(&self) -> &str;
    fn vocalize(&self, raw_word: &str) -> VocalizationResult<Vec<String>>;
}

/// Treats every word as already vocalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughProvider;

impl VocalizationProvider for PassthroughProvider {
    fn provider_id(&self) -> &str {
        "passthrough"
    }

    fn vocalize(&self, raw_word: &str) -> VocalizationResult<Vec<String>> {
        Ok(vec![raw_word.to_string()])
    }
}

/// First candidate of a provider answer.
///
/// Later candidates are never consulted; a missing or blank first
/// candidate is an `EmptyResult`.
pub fn first_candidate(candidates: Vec<String>) -> VocalizationResult<String> {
    candidates
        .into_iter()
        .next()
        .filter(|candidate| !candidate.trim().is_empty())
        .ok_or(VocalizationError::EmptyResult)
}

#[cfg(test)]
mod tests {
    use super::{first_candidate, PassthroughProvider, VocalizationError, VocalizationProvider};

    #[test]
    fn first_candidate_never_looks_past_the_first_entry() {
        let picked = first_candidate(vec!["a".to_string(), "b".to_string()])
            .expect("first candidate");
        assert_eq!(picked, "a");
        assert_eq!(
            first_candidate(vec![" ".to_string(), "b".to_string()]),
            Err(VocalizationError::EmptyResult)
        );
        assert_eq!(first_candidate(vec![]), Err(VocalizationError::EmptyResult));
    }

    #[test]
    fn passthrough_echoes_input() {
        let provider = PassthroughProvider;
        assert_eq!(provider.vocalize("abc").expect("passthrough"), vec!["abc"]);
    }
}
