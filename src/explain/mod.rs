//! Plain-language paraphrases of claim text.
//!
//! [`Explainer`] caches every successful answer under `category::text` so a
//! repeated request never reaches the service twice. Failures are not cached.

mod cache;
mod client;

use log::debug;
use thiserror::Error;

use cache::{ExplainCache, cache_key};
pub use client::{DEFAULT_ENDPOINT, DEFAULT_MODEL, ExplainConfig, MessagesClient};

pub const DEFAULT_CATEGORY: &str = "academic text";

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("missing text")]
    MissingText,

    #[error("text-generation API key is not configured")]
    NotConfigured,

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("service returned {status}: {message}")]
    Service { status: u16, message: String },

    #[error("no explanation returned")]
    EmptyResponse,
}

/// A service that answers `text` under `system_prompt`.
pub trait TextGenerator: Send + Sync {
    fn generate(&self, system_prompt: &str, text: &str) -> Result<String, ExplainError>;
}

pub fn system_prompt(category: &str) -> String {
    format!(
        "You explain complex academic {category} in simple everyday English that a high \
         schooler would understand. Keep it to 2-3 sentences. No jargon. Be clear and direct."
    )
}

pub struct Explainer {
    generator: Box<dyn TextGenerator>,
    cache: ExplainCache,
}

impl Explainer {
    pub fn new(generator: impl TextGenerator + 'static) -> Self {
        Self {
            generator: Box::new(generator),
            cache: ExplainCache::default(),
        }
    }

    pub fn explain(&self, text: &str, category: &str) -> Result<String, ExplainError> {
        if text.trim().is_empty() {
            return Err(ExplainError::MissingText);
        }

        let category = if category.trim().is_empty() {
            DEFAULT_CATEGORY
        } else {
            category
        };

        let key = cache_key(category, text);
        if let Some(hit) = self.cache.get(&key) {
            debug!("explanation cache hit for {category}");
            return Ok(hit);
        }

        let explanation = self.generator.generate(&system_prompt(category), text)?;
        self.cache.insert(key, explanation.clone());
        Ok(explanation)
    }

    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    struct CountingGenerator {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl TextGenerator for CountingGenerator {
        fn generate(&self, system_prompt: &str, text: &str) -> Result<String, ExplainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ExplainError::EmptyResponse);
            }
            Ok(format!("{} | {text}", system_prompt.len()))
        }
    }

    fn explainer(fail: bool) -> (Explainer, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let generator = CountingGenerator {
            calls: Arc::clone(&calls),
            fail,
        };
        (Explainer::new(generator), calls)
    }

    #[test]
    fn repeated_requests_hit_the_cache() {
        let (explainer, calls) = explainer(false);
        let first = explainer.explain("claim text", "verdict").expect("ok");
        let second = explainer.explain("claim text", "verdict").expect("ok");
        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(explainer.cached_len(), 1);
    }

    #[test]
    fn cache_is_keyed_by_category_and_text() {
        let (explainer, calls) = explainer(false);
        explainer.explain("claim text", "verdict").expect("ok");
        explainer.explain("claim text", "challenge").expect("ok");
        explainer.explain("other text", "verdict").expect("ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(explainer.cached_len(), 3);
    }

    #[test]
    fn blank_category_uses_default() {
        let (explainer, calls) = explainer(false);
        explainer.explain("claim text", "").expect("ok");
        explainer.explain("claim text", DEFAULT_CATEGORY).expect("ok");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let (explainer, calls) = explainer(true);
        assert!(explainer.explain("claim text", "verdict").is_err());
        assert!(explainer.explain("claim text", "verdict").is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(explainer.cached_len(), 0);
    }

    #[test]
    fn blank_text_is_rejected_without_a_call() {
        let (explainer, calls) = explainer(false);
        assert!(matches!(
            explainer.explain("   ", "verdict"),
            Err(ExplainError::MissingText)
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn system_prompt_names_the_category() {
        let prompt = system_prompt("verdict");
        assert!(prompt.starts_with("You explain complex academic verdict in simple"));
        assert!(prompt.ends_with("Be clear and direct."));
    }
}
